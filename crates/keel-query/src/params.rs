//! Positional parameter binding.

use keel_core::{AttributeMapping, Error, Result, SqlType, Value};

/// The statement clause a value is being bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    /// A WHERE predicate.
    Where,
    /// An INSERT value list.
    Insert,
    /// An UPDATE set clause.
    Update,
}

/// Ordered parameter slots for one statement execution.
///
/// Slot order mirrors the statement's placeholder order exactly; the slot
/// count must equal the statement's placeholder count before execution.
/// Bindings are built once per execution and discarded after.
#[derive(Debug, Clone, Default)]
pub struct ParameterBindings {
    slots: Vec<(Value, SqlType)>,
}

impl ParameterBindings {
    /// Create an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompose `value` into the physical values implied by `attribute` and
    /// append one slot per column, returning the number of slots consumed.
    ///
    /// A scalar attribute consumes its value as-is. A composite attribute
    /// requires a [`Value::Composite`] whose parts line up, in order, with the
    /// attribute's declared columns — the same order select building uses for
    /// its placeholders. `Value::Null` decomposes into one NULL per column.
    ///
    /// Any arity disagreement between the value and the attribute's column
    /// span is [`Error::BindingArity`]: an internal-consistency fault, not a
    /// user error.
    pub fn register_attribute_values(
        &mut self,
        value: &Value,
        _clause: ClauseKind,
        attribute: &AttributeMapping,
    ) -> Result<usize> {
        let span = attribute.column_span();

        if span == 1 {
            if let Value::Composite(parts) = value {
                return Err(Error::BindingArity {
                    expected: 1,
                    actual: parts.len(),
                });
            }
            self.slots
                .push((value.clone(), attribute.columns[0].sql_type));
            return Ok(1);
        }

        match value {
            Value::Null => {
                for column in &attribute.columns {
                    self.slots.push((Value::Null, column.sql_type));
                }
            }
            Value::Composite(parts) => {
                if parts.len() != span {
                    return Err(Error::BindingArity {
                        expected: span,
                        actual: parts.len(),
                    });
                }
                for (part, column) in parts.iter().zip(&attribute.columns) {
                    self.slots.push((part.clone(), column.sql_type));
                }
            }
            _ => {
                return Err(Error::BindingArity {
                    expected: span,
                    actual: 1,
                });
            }
        }
        Ok(span)
    }

    /// Number of slots bound so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The bound slots in placeholder order.
    #[must_use]
    pub fn slots(&self) -> &[(Value, SqlType)] {
        &self.slots
    }

    /// The bound values in placeholder order, as passed to the transport.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.slots.iter().map(|(value, _)| value.clone()).collect()
    }
}
