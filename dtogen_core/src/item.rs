use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic kind of a column of the definition records.
///
/// The set of kinds is closed: every document must be able to name the column holding each of them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Nesting depth of the row.
    Layer,
    /// Non-empty if the row is logically deleted.
    LogicalDelete,
    /// Name of the field (or of the class, on header rows).
    VariableName,
    /// Type of the field.
    DataType,
    /// Initial value of the field, if any.
    InitialValue,
    /// Non-empty if the field is immutable.
    Invariant,
    /// Description of the field (or of the class, on header rows).
    Description,
    /// Name of the class.
    ClassName,
    /// Description of the class.
    ClassDescription,
}

impl FieldKind {
    /// All the kinds, in declaration order.
    pub const ALL: [FieldKind; 9] = [
        FieldKind::Layer,
        FieldKind::LogicalDelete,
        FieldKind::VariableName,
        FieldKind::DataType,
        FieldKind::InitialValue,
        FieldKind::Invariant,
        FieldKind::Description,
        FieldKind::ClassName,
        FieldKind::ClassDescription,
    ];

    /// The column label used by documents that follow the built-in layout.
    pub const fn default_label(self) -> &'static str {
        match self {
            FieldKind::Layer => "Layer",
            FieldKind::LogicalDelete => "Logical Delete",
            FieldKind::VariableName => "Variable Name",
            FieldKind::DataType => "Data Type",
            FieldKind::InitialValue => "Initial Value",
            FieldKind::Invariant => "Invariant",
            FieldKind::Description => "Description",
            FieldKind::ClassName => "Class Name",
            FieldKind::ClassDescription => "Class Description",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Looks up the column label of a [`FieldKind`] in the current document.
///
/// Resolution is a static lookup and never inspects the records themselves.
pub trait ItemNameResolver {
    /// Returns the label of the column holding values of the given kind,
    /// or `None` if the kind is not configured.
    fn item_name(&self, kind: FieldKind) -> Option<&str>;
}

/// Configured mapping from [`FieldKind`] to column labels.
///
/// [`ItemNames::default`] maps every kind to its [`FieldKind::default_label`],
/// while [`ItemNames::new`] starts with no kind configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemNames {
    names: HashMap<FieldKind, String>,
}

impl Default for ItemNames {
    fn default() -> Self {
        FieldKind::ALL
            .into_iter()
            .fold(Self::new(), |items, kind| items.with(kind, kind.default_label()))
    }
}

impl ItemNames {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Sets the label of the given kind, replacing the previous one if any.
    pub fn with(mut self, kind: FieldKind, label: impl Into<String>) -> Self {
        self.names.insert(kind, label.into());
        self
    }

    /// Kinds with no configured label.
    pub fn missing(&self) -> impl Iterator<Item = FieldKind> + '_ {
        FieldKind::ALL
            .into_iter()
            .filter(|kind| !self.names.contains_key(kind))
    }
}

impl ItemNameResolver for ItemNames {
    fn item_name(&self, kind: FieldKind) -> Option<&str> {
        self.names.get(&kind).map(String::as_str)
    }
}
