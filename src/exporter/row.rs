use std::collections::BTreeMap;

use crate::config::ColumnValue;

/// Column values of one ObsCore record.
///
/// A row is filled by the record assembler and moved into the
/// [`BatchCollector`](super::BatchCollector), which drains it column by
/// column. Unset columns are stored as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: BTreeMap<String, ColumnValue>,
}

impl Row {
    /// Empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing a previous value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        self.values.insert(column.into(), value.into());
    }

    /// Set a column if the value is present
    pub fn set_opt<V: Into<ColumnValue>>(&mut self, column: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(column, value);
        }
    }

    /// Value of a column
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.values.get(column)
    }

    /// Remove and return a column value
    pub fn take(&mut self, column: &str) -> Option<ColumnValue> {
        self.values.remove(column)
    }

    /// True if the column has a value
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Names of the columns with values, in name order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of columns with values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no column has a value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
