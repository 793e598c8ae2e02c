//! Unique-key select building, binding, and execution for Keel.
//!
//! This crate owns the read path of the persistence core:
//!
//! - [`SelectStatement`] — the immutable select AST, rendered per dialect.
//! - [`build_select_by_attribute`] — pure construction of a select over one
//!   filter attribute, composite-aware.
//! - [`ParameterBindings`] — positional parameter slots whose order mirrors
//!   the AST's placeholder order exactly.
//! - [`ResultColumns`] — lazy, fetch-once column metadata over a live cursor,
//!   with quoted-name normalization.
//! - [`execute_select`] — the reusable executor: render, run, transform rows,
//!   apply uniqueness semantics. Cardinality policy stays with callers.
//! - [`UniqueKeyLoader`] — the entry point answering "load the entity whose
//!   attribute X equals V", enforcing the at-most-one-row contract.

pub mod ast;
pub mod context;
pub mod executor;
pub mod loader;
pub mod params;
pub mod resultset;
pub mod select;

pub use ast::{LockMode, SelectStatement};
pub use context::{Callback, ExecutionContext};
pub use executor::{UniqueSemantic, execute_select};
pub use loader::UniqueKeyLoader;
pub use params::{ClauseKind, ParameterBindings};
pub use resultset::ResultColumns;
pub use select::build_select_by_attribute;
