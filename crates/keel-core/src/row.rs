//! Positional result rows.

use crate::error::Result;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One result row, as an ordered list of values.
///
/// Rows are opaque and positional; name-to-position lookup is layered on top
/// by the result-column resolver in `keel-query`, not stored per row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Create a row from its ordered values.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The value at the 0-based `position`, if in range.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Number of values in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the values in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Consume the row, yielding its values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// Materialize a domain type from a projected row.
///
/// Implementations read values positionally, in the projection order of the
/// statement that produced the row.
pub trait FromRow: Sized {
    /// Build `Self` from `row`.
    fn from_row(row: &Row) -> Result<Self>;
}
