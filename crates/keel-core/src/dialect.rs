//! SQL dialect selection.
//!
//! The dialect decides placeholder syntax, identifier quoting, and a handful
//! of feature probes. Statement rendering itself lives in `keel-query`; the
//! dialect only supplies the store-specific pieces.

use serde::{Deserialize, Serialize};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// PostgreSQL (default).
    #[default]
    Postgres,
    /// SQLite.
    Sqlite,
    /// MySQL / MariaDB.
    Mysql,
}

impl Dialect {
    /// The parameter placeholder for the 1-based position `position`.
    #[must_use]
    pub fn placeholder(&self, position: usize) -> String {
        match self {
            Dialect::Postgres => format!("${position}"),
            Dialect::Sqlite => format!("?{position}"),
            Dialect::Mysql => "?".to_string(),
        }
    }

    /// The characters this dialect uses to quote identifiers.
    ///
    /// Consumed by result-set name normalization, which must strip quoting
    /// identically on the write side (statement rendering) and the read side
    /// (column lookup).
    #[must_use]
    pub const fn quote_chars(&self) -> &'static [char] {
        match self {
            Dialect::Postgres | Dialect::Sqlite => &['"'],
            Dialect::Mysql => &['`'],
        }
    }

    /// Whether the store supports sequences.
    #[must_use]
    pub const fn supports_sequences(&self) -> bool {
        match self {
            Dialect::Postgres | Dialect::Mysql => true,
            Dialect::Sqlite => false,
        }
    }

    /// The SQL expression producing the current timestamp.
    #[must_use]
    pub const fn current_timestamp_expression(&self) -> &'static str {
        "current_timestamp"
    }

    /// The SQL expression drawing the next value from `sequence`.
    #[must_use]
    pub fn next_sequence_value_expression(&self, sequence: &str) -> String {
        match self {
            Dialect::Postgres | Dialect::Sqlite => format!("nextval('{sequence}')"),
            Dialect::Mysql => format!("next value for {sequence}"),
        }
    }
}
