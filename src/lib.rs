//! dtogen generates DTO classes out of tabular definition sheets.
//!
//! The definition sheet lists classes and fields as flat rows,
//! with nesting encoded by a layer column.
//! dtogen rebuilds the class hierarchy (see [`dtogen_core`]),
//! reads the sheet and its document items (see [`dtogen_sheet`]),
//! and emits one Java source file per top-level class.

mod cli;
mod output;
mod render;

pub use cli::Cli;
pub use dtogen_sheet;
pub use output::{default_output_dir, resource_path};
pub use render::{DtoResource, render};
