use anyhow::Context;
use dtogen_core::ItemNames;
use hashbrown::HashMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Document-level items, each read from the cell next to its label.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetaItem {
    /// Version of the definition.
    Version,
    /// Name of the project.
    ProjectName,
    /// Package the generated classes belong to.
    PackageName,
    /// Physical name of the defined class.
    PhysicalName,
    /// Logical, human-readable name of the defined class.
    LogicalName,
    /// Overview of the defined classes.
    Description,
    /// Author of the definition.
    Creator,
    /// Date the definition was created.
    CreationDate,
    /// Date the definition was last updated.
    UpdateDate,
}

impl MetaItem {
    /// All the items, in declaration order.
    pub const ALL: [MetaItem; 9] = [
        MetaItem::Version,
        MetaItem::ProjectName,
        MetaItem::PackageName,
        MetaItem::PhysicalName,
        MetaItem::LogicalName,
        MetaItem::Description,
        MetaItem::Creator,
        MetaItem::CreationDate,
        MetaItem::UpdateDate,
    ];

    /// The label used by sheets that follow the built-in layout.
    pub const fn default_label(self) -> &'static str {
        match self {
            MetaItem::Version => "Version",
            MetaItem::ProjectName => "Project Name",
            MetaItem::PackageName => "Package Name",
            MetaItem::PhysicalName => "Physical Name",
            MetaItem::LogicalName => "Logical Name",
            // Not `Description`, which labels a column of the definition table.
            MetaItem::Description => "Overview",
            MetaItem::Creator => "Creator",
            MetaItem::CreationDate => "Creation Date",
            MetaItem::UpdateDate => "Update Date",
        }
    }
}

/// Labels of the document-level items.
///
/// Unconfigured items fall back to their [`MetaItem::default_label`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaNames {
    names: HashMap<MetaItem, String>,
}

impl MetaNames {
    /// Sets the label of the given item.
    pub fn with(mut self, item: MetaItem, label: impl Into<String>) -> Self {
        self.names.insert(item, label.into());
        self
    }

    /// The label of the given item.
    pub fn label(&self, item: MetaItem) -> &str {
        self.names
            .get(&item)
            .map_or(item.default_label(), String::as_str)
    }
}

/// Labels used by a definition sheet, for both the definition columns and the document items.
///
/// ```json
/// {
///     "items": { "layer": "Lv", "logical-delete": "Deleted", "...": "..." },
///     "meta": { "package-name": "Package" }
/// }
/// ```
///
/// An omitted section takes the built-in labels.
/// A given `items` section must configure every [`dtogen_core::FieldKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Labels of the definition columns.
    pub items: ItemNames,
    /// Labels of the document items.
    pub meta: MetaNames,
}

impl SheetLayout {
    /// Loads a layout from a JSON file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        info!(target: "sheet", "loading sheet layout '{}'", path.display());
        let reader = File::open(path)
            .map(BufReader::new)
            .with_context(|| format!("failed to open layout file '{}'", path.display()))?;
        serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse layout in '{}'", path.display()))
    }
}
