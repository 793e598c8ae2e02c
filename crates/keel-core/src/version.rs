//! Optimistic-lock value arithmetic.
//!
//! Seeding and incrementing a version value depends on the version attribute's
//! concrete type. Each rule is a [`VersionType`] capability, resolved once per
//! entity at mapping-build time and cached in the version mapping — never
//! re-dispatched by runtime type inspection.

use crate::value::Value;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Type-specific seed and successor rules for an optimistic-lock value.
pub trait VersionType: fmt::Debug + Send + Sync {
    /// The initial lock value written at first insert.
    fn seed(&self) -> Value;

    /// The lock value to write on the next successful update.
    ///
    /// Never mutates `current`.
    ///
    /// # Panics
    ///
    /// Panics when `current` is not a value this type produces; that means the
    /// version mapping was built against the wrong attribute type, which is a
    /// programming error, not a runtime condition.
    fn next(&self, current: &Value) -> Value;
}

/// Numeric versioning: seed 0, successor +1.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericVersionType;

impl VersionType for NumericVersionType {
    fn seed(&self) -> Value {
        Value::BigInt(0)
    }

    fn next(&self, current: &Value) -> Value {
        match current {
            Value::Int(i) => Value::Int(i + 1),
            Value::BigInt(i) => Value::BigInt(i + 1),
            other => panic!(
                "numeric version increment applied to non-numeric value: {}",
                other.type_name()
            ),
        }
    }
}

/// Timestamp versioning: seed and successor both regenerate from the clock.
///
/// The successor is clamped to be strictly greater than `current`, so two
/// updates inside one clock tick still produce distinct versions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampVersionType;

impl VersionType for TimestampVersionType {
    fn seed(&self) -> Value {
        Value::Timestamp(now_micros())
    }

    fn next(&self, current: &Value) -> Value {
        match current {
            Value::Timestamp(previous) => Value::Timestamp(now_micros().max(previous + 1)),
            other => panic!(
                "timestamp version increment applied to non-timestamp value: {}",
                other.type_name()
            ),
        }
    }
}

fn now_micros() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_micros() as i64)
}
