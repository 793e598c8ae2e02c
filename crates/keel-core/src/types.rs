//! Physical SQL type descriptors.

use serde::{Deserialize, Serialize};

/// The physical type of a column, carried alongside each bound parameter so
/// drivers can pick the right wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    /// BOOLEAN.
    Boolean,
    /// INTEGER.
    Integer,
    /// BIGINT.
    BigInt,
    /// DOUBLE PRECISION.
    Double,
    /// TEXT / VARCHAR.
    Text,
    /// BLOB / BYTEA.
    Bytes,
    /// TIMESTAMP.
    Timestamp,
    /// JSON / JSONB.
    Json,
}

impl SqlType {
    /// The DDL spelling of this type.
    #[must_use]
    pub const fn sql_name(&self) -> &'static str {
        match self {
            SqlType::Boolean => "BOOLEAN",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE PRECISION",
            SqlType::Text => "TEXT",
            SqlType::Bytes => "BYTEA",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Json => "JSONB",
        }
    }
}
