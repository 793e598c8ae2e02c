//! Core types and traits for Keel.
//!
//! `keel-core` is the **foundation layer** for the entire ecosystem. It defines
//! the data model and the contracts that all other crates build on.
//!
//! # Role In The Architecture
//!
//! - **Data model**: [`Value`], [`Row`], and [`SqlType`] represent query inputs
//!   and outputs and are shared across the query, schema, and session crates.
//! - **Mapping metadata**: [`EntityMapping`] and [`AttributeMapping`] describe
//!   how entity attributes decompose into physical columns; they drive both
//!   select building and positional parameter binding.
//! - **Transport contract**: [`Connection`] and [`RowCursor`] are the
//!   synchronous seams implemented by store drivers. All driver faults arrive
//!   as an opaque [`TransportError`] that this layer's [`Error`] taxonomy
//!   wraps; the raw driver error type never crosses the boundary.
//! - **Capabilities**: [`VersionType`] (optimistic-lock value arithmetic) and
//!   [`ColumnValueGenerator`] (database-generated column values) are the two
//!   per-entity capability seams resolved at mapping-build time.
//!
//! # Who Uses This Crate
//!
//! - `keel-query` consumes mapping metadata and `Value` to build and run
//!   unique-key selects.
//! - `keel-schema` inspects mapping metadata during the deferred constraint
//!   second pass.
//! - `keel-session` depends on `Connection` and the versioning capabilities
//!   for unit-of-work flows.
//!
//! Most applications should use the `keel` facade; reach for `keel-core`
//! directly when writing drivers or advanced integrations.

pub mod connection;
pub mod dialect;
pub mod error;
pub mod generated;
pub mod identifiers;
pub mod mapping;
pub mod row;
pub mod types;
pub mod value;
pub mod version;

pub use connection::{Connection, CursorMetadata, RowCursor, TransportError};
pub use dialect::Dialect;
pub use error::{Error, MetadataOp, Result};
pub use generated::{
    ColumnDefaultGeneration, ColumnValueGenerator, CurrentTimestampGeneration,
    GeneratedAlwaysGeneration, GeneratedValueSpec, SequenceGeneration, TriggerGeneration,
};
pub use identifiers::{quote_ident, unquote_ident};
pub use mapping::{AttributeMapping, ColumnMapping, EntityMapping, VersionMapping};
pub use row::{FromRow, Row};
pub use types::SqlType;
pub use value::Value;
pub use version::{NumericVersionType, TimestampVersionType, VersionType};
