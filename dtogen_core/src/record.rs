use hashbrown::HashMap;

/// One row of a definition region, mapping column labels to cell values.
///
/// Records are immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record(HashMap<String, String>);

impl Record {
    /// Returns the value of the cell under the given column label, if any.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    /// Returns the value of the cell under the given column label,
    /// or the empty string if there is no such column.
    pub fn value(&self, label: &str) -> &str {
        self.get(label).unwrap_or_default()
    }

    /// Reads the cell under the given column label as a flag.
    ///
    /// A flag is set iff the cell exists and is not empty.
    /// No trimming is performed, so a single space counts as set.
    pub fn flag(&self, label: &str) -> bool {
        self.get(label).is_some_and(|value| !value.is_empty())
    }

    /// Number of cells in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, value)| (label.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        let record = Record::from_iter([("set", "x"), ("space", " "), ("empty", "")]);
        assert!(record.flag("set"));
        assert!(record.flag("space"));
        assert!(!record.flag("empty"));
        assert!(!record.flag("missing"));
    }

    #[test]
    fn values() {
        let record = Record::from_iter([("name", "id")]);
        assert_eq!(record.get("name"), Some("id"));
        assert_eq!(record.value("name"), "id");
        assert_eq!(record.get("type"), None);
        assert_eq!(record.value("type"), "");
        assert_eq!(record.len(), 1);
    }
}
