//! Reconstruction of DTO definition trees from flat, layered definition records.
//!
//! A definition sheet describes classes and their fields as a flat sequence of [`Record`]s,
//! where nesting is only encoded by an integer _layer_ column:
//!
//! - class headers sit on even layers `L`;
//! - the fields of a class sit on layer `L + 1`;
//! - a field owning a nested class is directly followed by that class' header on layer `L + 2`.
//!
//! Rows can be _logically deleted_, in which case they are consumed but produce nothing.
//! Column labels are not fixed: they are looked up through an [`ItemNameResolver`],
//! such as [`ItemNames`].
//!
//! ```
//! # use dtogen_core::{ItemNames, Record, reconstruct};
//! let items = ItemNames::default();
//! let row = |layer: &str, name: &str, data_type: &str| {
//!     Record::from_iter([
//!         ("Layer", layer),
//!         ("Variable Name", name),
//!         ("Data Type", data_type),
//!     ])
//! };
//! let records = [row("0", "User", ""), row("1", "id", "int")];
//!
//! let definitions = reconstruct(&records, &items).expect("well-formed records");
//! assert_eq!(definitions.len(), 1);
//! assert_eq!(definitions[0].name(), "User");
//! assert_eq!(definitions[0].fields()[0].data_type(), "int");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod definition;
mod item;
mod reconstruct;
mod record;

pub use definition::*;
pub use item::*;
pub use reconstruct::*;
pub use record::*;
