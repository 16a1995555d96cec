//! Reconstruction of the definition tree from flat, layered records.
//!
//! Records are walked once, front to back, by a single cursor.
//! Each nesting level being built is a [`Frame`] on an explicit stack,
//! so the depth of the tree is bounded by [`Reconstructor::with_max_depth`]
//! rather than by the call stack.

use crate::{
    ClassDefinition, DefinitionGroup, FieldDefinition, FieldKind, ItemNameResolver, Record,
};
use log::{debug, info, trace};
use thiserror::Error;

/// Default bound on the number of nested levels.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Layer expected for the fields of top-level definitions.
pub const ROOT_BASE_LAYER: u32 = 1;

/// The error type for the reconstruction of definition trees.
///
/// Any error aborts the whole reconstruction and no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    /// No column label is configured for the item.
    #[error("no column label configured for item {0}")]
    MissingItemName(FieldKind),
    /// The layer of a record is not a valid non-negative integer.
    #[error("record {row}: layer `{value}` is not a valid non-negative integer")]
    MalformedRecord {
        /// Index of the record.
        row: usize,
        /// Content of the layer cell.
        value: String,
    },
    /// No class definition was found.
    #[error("no class definition found")]
    EmptyHierarchy,
    /// The record nests definitions deeper than allowed.
    #[error("record {row}: nesting exceeds the maximum depth of {limit} levels")]
    HierarchyTooDeep {
        /// Index of the record.
        row: usize,
        /// Maximum allowed number of nested levels.
        limit: usize,
    },
    /// A field record is not preceded by any class header on its level.
    #[error("record {row}: field does not belong to any class definition")]
    OrphanField {
        /// Index of the record.
        row: usize,
    },
    /// A nested class is not preceded by a field that can own it.
    #[error("record {row}: nested definition is not owned by any field")]
    UnownedNestedLevel {
        /// Index of the record.
        row: usize,
    },
}

// Column labels, resolved once before walking the records.
// Every kind must be configured, including those no record is read through.
struct Labels<'a> {
    layer: &'a str,
    logical_delete: &'a str,
    variable_name: &'a str,
    data_type: &'a str,
    initial_value: &'a str,
    invariant: &'a str,
    description: &'a str,
}

impl<'a> Labels<'a> {
    fn resolve<R: ItemNameResolver + ?Sized>(resolver: &'a R) -> Result<Self, ReconstructError> {
        let label = move |kind| {
            resolver
                .item_name(kind)
                .ok_or(ReconstructError::MissingItemName(kind))
        };
        for kind in FieldKind::ALL {
            label(kind)?;
        }
        Ok(Self {
            layer: label(FieldKind::Layer)?,
            logical_delete: label(FieldKind::LogicalDelete)?,
            variable_name: label(FieldKind::VariableName)?,
            data_type: label(FieldKind::DataType)?,
            initial_value: label(FieldKind::InitialValue)?,
            invariant: label(FieldKind::Invariant)?,
            description: label(FieldKind::Description)?,
        })
    }

    fn layer(&self, row: usize, record: &Record) -> Result<u32, ReconstructError> {
        let value = record.value(self.layer);
        value
            .parse::<u32>()
            .map_err(|_| ReconstructError::MalformedRecord {
                row,
                value: value.to_owned(),
            })
    }

    fn class_definition(&self, record: &Record) -> ClassDefinition {
        ClassDefinition::new(
            record.value(self.variable_name),
            record.value(self.description),
        )
    }

    fn field_definition(&self, record: &Record) -> FieldDefinition {
        FieldDefinition::new(record.value(self.variable_name), record.value(self.data_type))
            .with_initial_value(record.value(self.initial_value))
            .with_invariant(record.flag(self.invariant))
            .with_description(record.value(self.description))
    }
}

// A nesting level under construction.
// The definition currently receiving fields is always the last one of the group.
#[derive(Debug)]
struct Frame {
    base_layer: u32,
    group: DefinitionGroup,
}

impl Frame {
    fn new(base_layer: u32) -> Self {
        Self {
            base_layer,
            group: DefinitionGroup::new(),
        }
    }

    // Reopens a level whose group was already attached to its owning field,
    // so that further headers are appended to the same group.
    fn resume(base_layer: u32, group: DefinitionGroup) -> Self {
        Self { base_layer, group }
    }

    // The layer of header rows of this level.
    fn header_layer(&self) -> u32 {
        self.base_layer.saturating_sub(1)
    }
}

// What a row means with respect to the level being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Ascend,
    Skip,
    Header,
    Descend,
    Field,
}

impl Step {
    fn of(layer: u32, deleted: bool, base_layer: u32) -> Self {
        let header_layer = base_layer.checked_sub(1);
        if header_layer.is_some_and(|header_layer| layer < header_layer) {
            Step::Ascend
        } else if deleted {
            Step::Skip
        } else if header_layer == Some(layer) && layer % 2 == 0 {
            Step::Header
        } else if layer > base_layer {
            Step::Descend
        } else {
            Step::Field
        }
    }
}

/// Rebuilds [`DefinitionGroup`] trees out of flat sequences of [`Record`]s.
#[derive(Debug)]
pub struct Reconstructor<'a, R: ItemNameResolver + ?Sized> {
    resolver: &'a R,
    max_depth: usize,
}

impl<'a, R: ItemNameResolver + ?Sized> Reconstructor<'a, R> {
    /// Creates a reconstructor reading column labels from the given resolver,
    /// allowing up to [`DEFAULT_MAX_DEPTH`] nested levels.
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of nested levels, the starting level included.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rebuilds all top-level definitions.
    ///
    /// Header rows are expected on layer `0`.
    /// Fails with [`ReconstructError::EmptyHierarchy`] if no definition is found.
    pub fn reconstruct(&self, records: &[Record]) -> Result<DefinitionGroup, ReconstructError> {
        let (group, consumed) = self.build(records, 0, ROOT_BASE_LAYER)?;
        if group.is_empty() {
            return Err(ReconstructError::EmptyHierarchy);
        }
        info!(
            "reconstructed {} definitions over {} levels from {consumed} records",
            group.len(),
            group.depth()
        );
        Ok(group)
    }

    /// Rebuilds the sibling definitions whose fields lie on `base_layer`,
    /// starting from `records[start_index]`.
    ///
    /// Records are consumed until the end of the sequence
    /// or until a record belonging to an ancestor level, which is left unconsumed.
    /// Returns the definitions together with the number of consumed records,
    /// including deleted ones and those consumed by nested levels.
    pub fn build(
        &self,
        records: &[Record],
        start_index: usize,
        base_layer: u32,
    ) -> Result<(DefinitionGroup, usize), ReconstructError> {
        let labels = Labels::resolve(self.resolver)?;
        debug!("building level {base_layer} from record {start_index}");

        // Levels opened below `base_layer`, innermost last.
        let mut root = Frame::new(base_layer);
        let mut nested: Vec<Frame> = Vec::new();
        let mut row = start_index;
        while let Some(record) = records.get(row) {
            let layer = labels.layer(row, record)?;
            let deleted = record.flag(labels.logical_delete);
            let frame = nested.last_mut().unwrap_or(&mut root);
            let step = Step::of(layer, deleted, frame.base_layer);
            trace!(target: "reconstruct", "record {row}: layer {layer}, {step:?}");

            match step {
                Step::Ascend => match nested.pop() {
                    Some(child) => {
                        // The same record is then examined again by the parent level.
                        Self::close(nested.last_mut().unwrap_or(&mut root), child);
                        continue;
                    }
                    None => break,
                },
                Step::Skip => trace!(target: "reconstruct", "skipping deleted record {record:?}"),
                Step::Header => frame.group.push(labels.class_definition(record)),
                Step::Descend => {
                    let child_layer = frame.base_layer.saturating_add(2);
                    let owner = frame
                        .group
                        .last_mut()
                        .and_then(ClassDefinition::last_field_mut)
                        .ok_or(ReconstructError::UnownedNestedLevel { row })?;
                    // A deleted ancestor-layer record may have closed the level early.
                    let attached = owner.take_nested();
                    if nested.len() + 1 >= self.max_depth {
                        return Err(ReconstructError::HierarchyTooDeep {
                            row,
                            limit: self.max_depth,
                        });
                    }
                    let child = match attached {
                        Some(group) => Frame::resume(child_layer, group),
                        None => Frame::new(child_layer),
                    };
                    debug!(
                        "record {row}: descending to level {} (headers on layer {})",
                        child.base_layer,
                        child.header_layer()
                    );
                    nested.push(child);
                    // The same record is then examined again by the nested level.
                    continue;
                }
                Step::Field => frame
                    .group
                    .last_mut()
                    .ok_or(ReconstructError::OrphanField { row })?
                    .push_field(labels.field_definition(record)),
            }
            row += 1;
        }

        while let Some(child) = nested.pop() {
            Self::close(nested.last_mut().unwrap_or(&mut root), child);
        }
        let consumed = row - start_index;
        debug!("level {base_layer} done: consumed {consumed} records");
        Ok((root.group, consumed))
    }

    // Attaches the group of a finished level to the field owning it in the parent level.
    fn close(parent: &mut Frame, child: Frame) {
        debug!("closing level {}", child.base_layer);
        // A level is only opened when its parent has a field to own it,
        // and the parent gains no fields while the level is open.
        if let Some(field) = parent
            .group
            .last_mut()
            .and_then(ClassDefinition::last_field_mut)
        {
            field.attach_nested(child.group);
        }
    }
}

/// Rebuilds the definitions of level `base_layer` starting from `records[start_index]`,
/// with default options.
///
/// See [`Reconstructor::build`].
pub fn build<R: ItemNameResolver + ?Sized>(
    records: &[Record],
    resolver: &R,
    start_index: usize,
    base_layer: u32,
) -> Result<(DefinitionGroup, usize), ReconstructError> {
    Reconstructor::new(resolver).build(records, start_index, base_layer)
}

/// Rebuilds all top-level definitions with default options.
///
/// See [`Reconstructor::reconstruct`].
pub fn reconstruct<R: ItemNameResolver + ?Sized>(
    records: &[Record],
    resolver: &R,
) -> Result<DefinitionGroup, ReconstructError> {
    Reconstructor::new(resolver).reconstruct(records)
}
