//! Keel — an object-relational persistence core for Rust.
//!
//! This facade re-exports the workspace's public surface:
//!
//! - `keel-core`: values, rows, mappings, errors, dialects, transport traits,
//!   version-type and generated-value capabilities.
//! - `keel-query`: select AST and builder, positional parameter binding, the
//!   lazy result-column resolver, the select executor, and the unique-key
//!   loader.
//! - `keel-schema`: the relational schema model and the deferred index /
//!   unique-key second pass.
//! - `keel-session`: the session surface and optimistic versioning helpers.
//!
//! # Example
//!
//! ```ignore
//! use keel::prelude::*;
//!
//! let loader = UniqueKeyLoader::<Hero>::new(mapping, "name")?;
//! let mut session = Session::new(connection);
//! let mut ctx = session.execution_context();
//! let hero = loader.load(&Value::from("Spider-Man"), LockMode::None, None, &mut ctx)?;
//! ```

pub use keel_core::{
    AttributeMapping, ColumnDefaultGeneration, ColumnMapping, ColumnValueGenerator, Connection,
    CurrentTimestampGeneration, CursorMetadata, Dialect, EntityMapping, Error, FromRow,
    GeneratedAlwaysGeneration, GeneratedValueSpec, MetadataOp, NumericVersionType, Result, Row,
    RowCursor, SequenceGeneration, SqlType, TimestampVersionType, TransportError,
    TriggerGeneration, Value, VersionMapping, VersionType, quote_ident, unquote_ident,
};
pub use keel_query::{
    Callback, ClauseKind, ExecutionContext, LockMode, ParameterBindings, ResultColumns,
    SelectStatement, UniqueKeyLoader, UniqueSemantic, build_select_by_attribute, execute_select,
};
pub use keel_schema::{
    Column, ConstraintKind, ConstraintSecondPass, ConstraintSource, Index, MetadataBuilder, Table,
    UniqueKey,
};
pub use keel_session::{Session, SessionConfig, versioning};

/// The most commonly needed imports, in one place.
pub mod prelude {
    pub use keel_core::{
        AttributeMapping, ColumnMapping, Connection, Dialect, EntityMapping, Error, FromRow,
        Result, Row, SqlType, Value, VersionMapping,
    };
    pub use keel_query::{ExecutionContext, LockMode, UniqueKeyLoader};
    pub use keel_schema::{Column, ConstraintKind, MetadataBuilder, Table};
    pub use keel_session::{Session, SessionConfig, versioning};
}
