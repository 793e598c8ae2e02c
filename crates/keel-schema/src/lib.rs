//! Schema model and deferred constraint resolution for Keel.
//!
//! The relational model here ([`Table`], [`Column`], [`Index`], [`UniqueKey`])
//! is the mutable build-time picture of the physical schema. Index and
//! unique-key declarations reference columns by name — names that may not
//! resolve while entity mappings are still being assembled — so their
//! resolution is deferred: declarations queue as [`ConstraintSecondPass`]
//! tasks on the [`MetadataBuilder`] and drain only after every mapping in the
//! build unit is complete.

pub mod model;
pub mod second_pass;

pub use model::{Column, Index, Table, UniqueKey};
pub use second_pass::{ConstraintKind, ConstraintSecondPass, ConstraintSource, MetadataBuilder};
