//! Database-generated column value contracts.
//!
//! A column value may be produced by the store itself rather than supplied by
//! the caller: implicitly by a trigger or a DDL `default`, or explicitly by a
//! SQL expression placed in the `insert`/`update` statement. Each strategy is
//! one [`ColumnValueGenerator`]; write orchestration consults the strategy to
//! decide how the column participates in statement text and how the value is
//! observed afterwards.

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use std::fmt;

/// Capability implemented once per generation strategy.
///
/// Every strategy answers the same four questions; no strategy needs another
/// strategy's internals.
pub trait ColumnValueGenerator: fmt::Debug + Send + Sync {
    /// Whether the generated columns appear in the statement's column list at
    /// all. `true` for value expressions like `current_timestamp`; `false`
    /// when a trigger, a `generated always as` column, or a DDL default
    /// produces the value behind the statement's back.
    fn reference_columns_in_sql(&self, dialect: Dialect) -> bool;

    /// When the columns are referenced, whether the value arrives as a bound
    /// parameter (`true`) or as a literal SQL fragment (`false`).
    fn write_property_value(&self) -> bool;

    /// The SQL fragments placed in the value positions when the columns are
    /// referenced but not bound as parameters — function calls or syntactic
    /// markers, one fragment per physical column.
    fn referenced_column_values(&self, dialect: Dialect) -> Vec<String>;

    /// An attribute forming a unique key of the entity, usable to re-select
    /// the just-written row when the strategy cannot otherwise observe the
    /// generated value.
    fn unique_key_attribute(&self) -> Option<&str> {
        None
    }

    /// Whether the store itself computes the value. Strategies that merely
    /// provide default SQL, without true database autonomy, override this to
    /// `false`.
    fn generated_by_database(&self) -> bool {
        true
    }
}

/// Value produced by a database trigger.
///
/// The column never appears in the statement; retrieval goes through a
/// re-select keyed on `unique_key`.
#[derive(Debug, Clone)]
pub struct TriggerGeneration {
    unique_key: Option<String>,
}

impl TriggerGeneration {
    /// A trigger strategy re-selecting by the named unique-key attribute.
    #[must_use]
    pub fn new(unique_key: impl Into<String>) -> Self {
        Self {
            unique_key: Some(unique_key.into()),
        }
    }

    /// A trigger strategy with no re-select path.
    #[must_use]
    pub fn without_unique_key() -> Self {
        Self { unique_key: None }
    }
}

impl ColumnValueGenerator for TriggerGeneration {
    fn reference_columns_in_sql(&self, _dialect: Dialect) -> bool {
        false
    }

    fn write_property_value(&self) -> bool {
        false
    }

    fn referenced_column_values(&self, _dialect: Dialect) -> Vec<String> {
        Vec::new()
    }

    fn unique_key_attribute(&self) -> Option<&str> {
        self.unique_key.as_deref()
    }
}

/// Value produced by a DDL `default` clause.
///
/// Not referenced in the statement, and not database autonomy either: the
/// default expression is plain SQL the mapping supplied.
#[derive(Debug, Clone)]
pub struct ColumnDefaultGeneration;

impl ColumnValueGenerator for ColumnDefaultGeneration {
    fn reference_columns_in_sql(&self, _dialect: Dialect) -> bool {
        false
    }

    fn write_property_value(&self) -> bool {
        false
    }

    fn referenced_column_values(&self, _dialect: Dialect) -> Vec<String> {
        Vec::new()
    }

    fn generated_by_database(&self) -> bool {
        false
    }
}

/// Value produced by a `generated always as` column.
#[derive(Debug, Clone)]
pub struct GeneratedAlwaysGeneration;

impl ColumnValueGenerator for GeneratedAlwaysGeneration {
    fn reference_columns_in_sql(&self, _dialect: Dialect) -> bool {
        false
    }

    fn write_property_value(&self) -> bool {
        false
    }

    fn referenced_column_values(&self, _dialect: Dialect) -> Vec<String> {
        Vec::new()
    }
}

/// Value drawn from a named sequence.
///
/// On stores without sequences the column drops out of the statement and the
/// store's own key assignment takes over.
#[derive(Debug, Clone)]
pub struct SequenceGeneration {
    sequence: String,
}

impl SequenceGeneration {
    /// A sequence strategy drawing from `sequence`.
    #[must_use]
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
        }
    }

    /// The sequence name.
    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }
}

impl ColumnValueGenerator for SequenceGeneration {
    fn reference_columns_in_sql(&self, dialect: Dialect) -> bool {
        dialect.supports_sequences()
    }

    fn write_property_value(&self) -> bool {
        false
    }

    fn referenced_column_values(&self, dialect: Dialect) -> Vec<String> {
        if dialect.supports_sequences() {
            vec![dialect.next_sequence_value_expression(&self.sequence)]
        } else {
            Vec::new()
        }
    }
}

/// Value computed by the store's current-timestamp function.
#[derive(Debug, Clone)]
pub struct CurrentTimestampGeneration;

impl ColumnValueGenerator for CurrentTimestampGeneration {
    fn reference_columns_in_sql(&self, _dialect: Dialect) -> bool {
        true
    }

    fn write_property_value(&self) -> bool {
        false
    }

    fn referenced_column_values(&self, dialect: Dialect) -> Vec<String> {
        vec![dialect.current_timestamp_expression().to_string()]
    }
}

/// How one generated attribute participates in a statement, snapshotted from
/// its strategy against a concrete dialect.
///
/// The shape makes the contract's invariant unrepresentable: a column is
/// either referenced together with a value policy, or not referenced at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedValueSpec {
    /// Columns appear in the column list; values arrive as bound parameters.
    BoundParameter,
    /// Columns appear in the column list; values are literal SQL fragments,
    /// one per physical column.
    SqlFragments(Vec<String>),
    /// Columns are omitted from the statement entirely.
    Omitted,
}

impl GeneratedValueSpec {
    /// Snapshot `generator` for `dialect`, for an attribute spanning
    /// `column_span` physical columns.
    ///
    /// A strategy that references columns without binding them must supply
    /// exactly one fragment per column; anything else is an
    /// internal-consistency fault.
    pub fn from_generator(
        generator: &dyn ColumnValueGenerator,
        dialect: Dialect,
        column_span: usize,
    ) -> Result<Self> {
        if !generator.reference_columns_in_sql(dialect) {
            return Ok(GeneratedValueSpec::Omitted);
        }
        if generator.write_property_value() {
            return Ok(GeneratedValueSpec::BoundParameter);
        }
        let fragments = generator.referenced_column_values(dialect);
        if fragments.len() != column_span {
            return Err(Error::BindingArity {
                expected: column_span,
                actual: fragments.len(),
            });
        }
        Ok(GeneratedValueSpec::SqlFragments(fragments))
    }

    /// Whether the attribute's columns appear in the statement.
    #[must_use]
    pub fn references_columns(&self) -> bool {
        !matches!(self, GeneratedValueSpec::Omitted)
    }
}
