use crate::{default_output_dir, render, resource_path};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dtogen_core::DEFAULT_MAX_DEPTH;
use dtogen_sheet::{DtoDocument, SheetLayout};
use log::info;
use std::{fs, path::PathBuf};

/// A generator of DTO classes from tabular definition sheets
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Action to perform on the definition sheet
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java DTO sources
    Generate {
        #[command(flatten)]
        source: Source,
        /// Output directory (defaults to a per-platform location)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },
    /// Print the reconstructed definitions as JSON
    Inspect {
        #[command(flatten)]
        source: Source,
    },
}

#[derive(Args)]
struct Source {
    /// Path of the definition sheet (CSV, optionally gzip-compressed)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    sheet: PathBuf,
    /// JSON file with the labels used by the sheet
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    layout: Option<PathBuf>,
    /// Maximum number of nested class levels
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Source {
    fn load(&self) -> anyhow::Result<DtoDocument> {
        let layout = match &self.layout {
            Some(path) => SheetLayout::from_path(path)?,
            None => SheetLayout::default(),
        };
        dtogen_sheet::load(&self.sheet, &layout, self.max_depth)
    }
}

impl Cli {
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Generate { source, output } => {
                let document = source.load()?;
                let output = output.clone().unwrap_or_else(default_output_dir);
                for resource in render(&document) {
                    let path =
                        resource_path(&output, &resource.package_name, &resource.resource_name);
                    if let Some(dir) = path.parent() {
                        fs::create_dir_all(dir).with_context(|| {
                            format!("failed to create directory '{}'", dir.display())
                        })?;
                    }
                    fs::write(&path, &resource.source)
                        .with_context(|| format!("failed to write '{}'", path.display()))?;
                    info!("generated class {}", resource.resource_name);
                    println!("{}", path.display());
                }
            }
            Commands::Inspect { source } => {
                let document = source.load()?;
                let json = serde_json::to_string_pretty(&document)
                    .context("failed to serialize definitions")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
