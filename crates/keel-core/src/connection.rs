//! Synchronous transport contracts implemented by store drivers.
//!
//! The core executes statements, fetches result-shape metadata, and consumes
//! rows through these traits as plain blocking calls; any suspension happens
//! inside the driver and is opaque here. A caller aborts a logical operation
//! by abandoning the unit of work that owns the connection.

use crate::row::Row;
use crate::value::Value;
use thiserror::Error;

/// An opaque driver-level fault.
///
/// Drivers surface every failure as this one type; the core wraps it into its
/// own error kinds and never re-exports the driver's native errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Create a fault with a human-readable description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The fault description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result-shape metadata for one executed statement.
///
/// Fetched at most once per cursor by the result-column resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMetadata {
    columns: Vec<String>,
}

impl CursorMetadata {
    /// Create metadata from the cursor's column names, in position order.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Number of columns in the result shape.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The column name at the 0-based `position`, if in range.
    #[must_use]
    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.columns.get(position).map(String::as_str)
    }

    /// The column names in position order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.columns
    }
}

/// A live cursor over an executed statement's results.
pub trait RowCursor {
    /// Fetch the result-shape metadata.
    ///
    /// Callers cache the returned value; a conforming driver may still be
    /// asked more than once and must tolerate it.
    fn metadata(&mut self) -> Result<CursorMetadata, TransportError>;

    /// Advance to the next row, or `None` when the results are exhausted.
    fn next_row(&mut self) -> Result<Option<Row>, TransportError>;
}

/// A connection to a row-oriented store.
///
/// One connection belongs to one unit of work; the core never shares a
/// connection across threads of control and introduces no locking around it.
pub trait Connection {
    /// The cursor type produced by [`Connection::select`].
    type Cursor<'conn>: RowCursor
    where
        Self: 'conn;

    /// Execute a select statement with positionally bound parameters and
    /// return a cursor over its results.
    fn select(
        &mut self,
        statement: &str,
        parameters: &[Value],
    ) -> Result<Self::Cursor<'_>, TransportError>;
}
