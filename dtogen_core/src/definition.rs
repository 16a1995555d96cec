//! The reconstructed definition tree.
//!
//! A [`DefinitionGroup`] is an ordered collection of [`ClassDefinition`]s,
//! each owning its ordered [`FieldDefinition`]s,
//! and each field possibly owning a nested [`DefinitionGroup`].
//! Order always follows the order of the originating rows.

use serde::Serialize;
use std::ops::Index;

/// An ordered group of class definitions belonging to the same nesting level.
///
/// An empty group is a valid state, meaning no definition was found at that level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DefinitionGroup(Vec<ClassDefinition>);

impl DefinitionGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a definition to the group.
    pub fn with(mut self, definition: ClassDefinition) -> Self {
        self.push(definition);
        self
    }

    pub(crate) fn push(&mut self, definition: ClassDefinition) {
        self.0.push(definition);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut ClassDefinition> {
        self.0.last_mut()
    }

    /// Number of class definitions in the group.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the group holds no definition.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the definition at the given position, if any.
    pub fn get(&self, index: usize) -> Option<&ClassDefinition> {
        self.0.get(index)
    }

    /// Iterates over the definitions in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassDefinition> {
        self.0.iter()
    }

    /// Number of nested group levels, this one included.
    ///
    /// An empty group still counts as one level.
    pub fn depth(&self) -> usize {
        1 + self
            .iter()
            .flat_map(ClassDefinition::fields)
            .filter_map(FieldDefinition::nested)
            .map(DefinitionGroup::depth)
            .max()
            .unwrap_or(0)
    }
}

impl Index<usize> for DefinitionGroup {
    type Output = ClassDefinition;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a DefinitionGroup {
    type Item = &'a ClassDefinition;
    type IntoIter = std::slice::Iter<'a, ClassDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The definition of a class: its name, its description and its ordered fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassDefinition {
    name: String,
    description: String,
    fields: Vec<FieldDefinition>,
}

impl ClassDefinition {
    /// Creates a new class definition with no fields.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field to the definition.
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.push_field(field);
        self
    }

    pub(crate) fn push_field(&mut self, field: FieldDefinition) {
        self.fields.push(field);
    }

    pub(crate) fn last_field_mut(&mut self) -> Option<&mut FieldDefinition> {
        self.fields.last_mut()
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The fields of the class, in row order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }
}

/// The definition of a single field of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    variable_name: String,
    data_type: String,
    initial_value: String,
    invariant: bool,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    nested: Option<DefinitionGroup>,
}

impl FieldDefinition {
    /// Creates a new mutable field with no initial value, no description and no nested definitions.
    pub fn new(variable_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }

    /// Sets the initial value of the field.
    pub fn with_initial_value(mut self, initial_value: impl Into<String>) -> Self {
        self.initial_value = initial_value.into();
        self
    }

    /// Sets whether the field is invariant.
    pub fn with_invariant(mut self, invariant: bool) -> Self {
        self.invariant = invariant;
        self
    }

    /// Sets the description of the field.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the group of class definitions nested under the field.
    pub fn with_nested(mut self, nested: DefinitionGroup) -> Self {
        self.nested = Some(nested);
        self
    }

    // A field's nested group is never replaced while attached.
    pub(crate) fn attach_nested(&mut self, nested: DefinitionGroup) {
        debug_assert!(self.nested.is_none(), "nested group attached twice");
        self.nested.get_or_insert(nested);
    }

    // Detaches the nested group so that it can be extended and attached again.
    pub(crate) fn take_nested(&mut self) -> Option<DefinitionGroup> {
        self.nested.take()
    }

    /// The variable name.
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// The data type.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// The initial value, empty if there is none.
    pub fn initial_value(&self) -> &str {
        &self.initial_value
    }

    /// Whether the field is immutable.
    pub fn is_invariant(&self) -> bool {
        self.invariant
    }

    /// The description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The group of class definitions nested under this field, if any.
    pub fn nested(&self) -> Option<&DefinitionGroup> {
        self.nested.as_ref()
    }
}
