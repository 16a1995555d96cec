//! Reader for DTO definition sheets.
//!
//! A definition sheet is a CSV grid holding:
//!
//! - document items (package, creator, ...), each written in the first non-empty cell
//!   to the right of its label;
//! - a definition table, whose header row starts at the logical-delete column label,
//!   with one row per class or field.
//!
//! Labels are configured through a [`SheetLayout`].

mod layout;
mod sheet;

use anyhow::Context;
use dtogen_core::{DefinitionGroup, FieldKind, ItemNameResolver, Reconstructor};
use log::{info, warn};
pub use dtogen_core;
pub use layout::{MetaItem, MetaNames, SheetLayout};
use serde::Serialize;
pub use sheet::{CellIndex, Sheet};
use std::path::Path;
use thiserror::Error;

/// The error type for the layout of definition sheets.
#[derive(Error, Debug)]
pub enum SheetError {
    /// The layout configures no label for the item.
    #[error("missing required item `{0}`")]
    MissingItem(FieldKind),
    /// The sheet has no cell with the given label to anchor the definition table.
    #[error("definition table header `{0}` not found")]
    MissingAnchor(String),
}

/// Document-level information of a definition sheet.
///
/// Items whose label is not found in the sheet are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DtoMeta {
    /// Version of the definition.
    pub version: String,
    /// Name of the project.
    pub project_name: String,
    /// Package of the generated classes.
    pub package_name: String,
    /// Physical name of the defined class.
    pub physical_name: String,
    /// Logical name of the defined class.
    pub logical_name: String,
    /// Overview of the defined classes.
    pub description: String,
    /// Author of the definition.
    pub creator: String,
    /// Creation date, as written in the sheet.
    pub creation_date: String,
    /// Last update date, as written in the sheet.
    pub update_date: String,
}

impl DtoMeta {
    fn read(sheet: &Sheet, layout: &SheetLayout) -> Self {
        let value = |item| {
            let label = layout.meta.label(item);
            match sheet.find_cell(label) {
                Some(index) => sheet.region_value(index).to_owned(),
                None => {
                    warn!(target: "sheet", "item `{label}` not found, left empty");
                    String::new()
                }
            }
        };
        Self {
            version: value(MetaItem::Version),
            project_name: value(MetaItem::ProjectName),
            package_name: value(MetaItem::PackageName),
            physical_name: value(MetaItem::PhysicalName),
            logical_name: value(MetaItem::LogicalName),
            description: value(MetaItem::Description),
            creator: value(MetaItem::Creator),
            creation_date: value(MetaItem::CreationDate),
            update_date: value(MetaItem::UpdateDate),
        }
    }
}

/// A fully read definition sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtoDocument {
    /// Document-level items.
    pub meta: DtoMeta,
    /// Top-level class definitions, in sheet order.
    pub definitions: DefinitionGroup,
}

impl DtoDocument {
    /// Reads the document out of an already loaded sheet.
    pub fn from_sheet(
        sheet: &Sheet,
        layout: &SheetLayout,
        max_depth: usize,
    ) -> anyhow::Result<Self> {
        let anchor_label = layout
            .items
            .item_name(FieldKind::LogicalDelete)
            .ok_or(SheetError::MissingItem(FieldKind::LogicalDelete))?;
        let anchor = sheet
            .find_cell(anchor_label)
            .ok_or_else(|| SheetError::MissingAnchor(anchor_label.to_owned()))?;
        let records = sheet.matrix(anchor);
        let definitions = Reconstructor::new(&layout.items)
            .with_max_depth(max_depth)
            .reconstruct(&records)
            .context("failed to reconstruct class definitions")?;
        let meta = DtoMeta::read(sheet, layout);
        info!(
            target: "sheet",
            "read {} class definitions for package '{}'",
            definitions.len(),
            meta.package_name
        );
        Ok(Self { meta, definitions })
    }
}

/// Loads the definition sheet at the given path.
pub fn load(path: &Path, layout: &SheetLayout, max_depth: usize) -> anyhow::Result<DtoDocument> {
    let sheet = Sheet::open(path)?;
    DtoDocument::from_sheet(&sheet, layout, max_depth)
        .with_context(|| format!("invalid definition sheet '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtogen_core::{DEFAULT_MAX_DEPTH, ItemNames, ReconstructError};

    #[test]
    fn missing_meta_is_empty() {
        let sheet = Sheet::from_reader(
            "Package Name,com.example\nLogical Delete,Layer,Variable Name\n,0,User\n".as_bytes(),
        )
        .expect("valid CSV");
        let document = DtoDocument::from_sheet(&sheet, &SheetLayout::default(), DEFAULT_MAX_DEPTH)
            .expect("valid document");
        assert_eq!(document.meta.package_name, "com.example");
        assert_eq!(document.meta.creator, "");
        assert_eq!(document.meta.physical_name, "");
        assert_eq!(document.definitions[0].name(), "User");
    }

    #[test]
    fn class_name_items() {
        let sheet = Sheet::from_reader(
            "Physical Name,UserDto\nLogical Name,,User\nOverview,a user\n\
             Logical Delete,Layer,Variable Name,Description\n,0,User,a user\n"
                .as_bytes(),
        )
        .expect("valid CSV");
        let document = DtoDocument::from_sheet(&sheet, &SheetLayout::default(), DEFAULT_MAX_DEPTH)
            .expect("valid document");
        assert_eq!(document.meta.physical_name, "UserDto");
        assert_eq!(document.meta.logical_name, "User");
        assert_eq!(document.meta.description, "a user");
    }

    #[test]
    fn missing_anchor() {
        let sheet = Sheet::from_reader("Layer,Variable Name\n0,User\n".as_bytes())
            .expect("valid CSV");
        let err = DtoDocument::from_sheet(&sheet, &SheetLayout::default(), DEFAULT_MAX_DEPTH)
            .expect_err("no logical delete column");
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::MissingAnchor(label)) if label == "Logical Delete"
        ));
    }

    #[test]
    fn missing_item() {
        let sheet = Sheet::from_reader("Logical Delete,Layer\n,0\n".as_bytes())
            .expect("valid CSV");
        let layout = SheetLayout {
            items: ItemNames::new().with(FieldKind::Layer, "Layer"),
            ..Default::default()
        };
        let err = DtoDocument::from_sheet(&sheet, &layout, DEFAULT_MAX_DEPTH)
            .expect_err("no logical delete label");
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::MissingItem(FieldKind::LogicalDelete))
        ));

        let layout = SheetLayout {
            items: ItemNames::new()
                .with(FieldKind::Layer, "Layer")
                .with(FieldKind::LogicalDelete, "Logical Delete"),
            ..Default::default()
        };
        let err = DtoDocument::from_sheet(&sheet, &layout, DEFAULT_MAX_DEPTH)
            .expect_err("no variable name label");
        assert_eq!(
            err.downcast_ref::<ReconstructError>(),
            Some(&ReconstructError::MissingItemName(FieldKind::VariableName))
        );
    }
}
