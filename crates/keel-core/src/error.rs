//! Error taxonomy for the persistence core.
//!
//! Every failure path in the core either returns a well-defined "no match"
//! value or raises one of the kinds below; nothing is silently swallowed, and
//! raw transport error types never escape this layer.

use crate::connection::TransportError;
use std::fmt;
use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The result-shape metadata operation that failed, named for diagnosability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataOp {
    /// Reading the column count.
    ColumnCount,
    /// Resolving a column position from its name.
    PositionByName,
    /// Resolving a column name from its position.
    NameByPosition,
}

impl fmt::Display for MetadataOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MetadataOp::ColumnCount => "column count",
            MetadataOp::PositionByName => "column position by name",
            MetadataOp::NameByPosition => "column name by position",
        };
        f.write_str(label)
    }
}

/// Errors raised by the query, schema, and versioning core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// More than one row matched a lookup whose attribute the schema declares
    /// unique. Indicates broken data integrity; surfaced, never retried and
    /// never truncated to a single row.
    #[error("more than one row with the given unique key was found: {key}, for entity: {entity}")]
    AmbiguousUniqueKey {
        /// The entity being loaded.
        entity: String,
        /// Display form of the offending key value.
        key: String,
    },

    /// An index or unique-key declaration could not be resolved against the
    /// schema model. Fatal to the build phase.
    #[error("constraint '{constraint}' on table '{table}': {detail}")]
    Schema {
        /// The constraint name from the declaration.
        constraint: String,
        /// The table the declaration resolved to.
        table: String,
        /// What failed to resolve.
        detail: String,
    },

    /// A transport fault while inspecting result-shape metadata, wrapped with
    /// the specific failing operation.
    #[error("unable to access result set metadata ({operation}): {detail}")]
    MetadataAccess {
        /// The metadata operation that failed.
        operation: MetadataOp,
        /// Human-readable description of the underlying fault.
        detail: String,
    },

    /// The number of bound values does not match the statement's placeholder
    /// count. Internal AST/binder desynchronization, not a user error;
    /// unrecoverable by calling code.
    #[error("parameter arity mismatch: {expected} slot(s) expected, {actual} value(s) supplied")]
    BindingArity {
        /// Slots the statement or mapping expects.
        expected: usize,
        /// Values actually supplied.
        actual: usize,
    },

    /// A version-checked update affected zero rows: another transaction got
    /// there first. Raised by write orchestration; defined here because the
    /// version values it checks are this core's output.
    #[error("row was updated or deleted by another transaction for entity: {entity}")]
    StaleState {
        /// The entity whose row went stale.
        entity: String,
    },

    /// A statement or binder referenced an attribute the entity mapping does
    /// not define.
    #[error("entity '{entity}' has no attribute named '{attribute}'")]
    UnknownAttribute {
        /// The entity mapping consulted.
        entity: String,
        /// The attribute name that failed to resolve.
        attribute: String,
    },

    /// Any other transport fault from statement execution or row consumption.
    #[error("statement execution failed: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Wrap a transport fault encountered during a metadata operation.
    #[must_use]
    pub fn metadata_access(operation: MetadataOp, fault: &TransportError) -> Self {
        Error::MetadataAccess {
            operation,
            detail: fault.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_access_names_operation() {
        let fault = TransportError::new("socket closed");
        let err = Error::metadata_access(MetadataOp::PositionByName, &fault);
        let msg = err.to_string();
        assert!(msg.contains("column position by name"));
        assert!(msg.contains("socket closed"));
    }

    #[test]
    fn test_transport_error_wraps() {
        let err: Error = TransportError::new("broken pipe").into();
        assert!(matches!(err, Error::Transport(_)));
    }
}
