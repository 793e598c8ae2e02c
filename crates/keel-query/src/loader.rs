//! Loading a single entity by a unique attribute.

use crate::ast::LockMode;
use crate::context::ExecutionContext;
use crate::executor::{UniqueSemantic, execute_select};
use crate::params::{ClauseKind, ParameterBindings};
use crate::select::build_select_by_attribute;
use keel_core::{Connection, EntityMapping, Error, FromRow, Result, Row, Value};
use std::marker::PhantomData;
use std::sync::Arc;

/// Two rows are enough to tell "exactly one" from "more than one" without
/// materializing an arbitrarily large ambiguous result.
const AMBIGUITY_PROBE_LIMIT: u64 = 2;

/// Loads the entity whose unique attribute equals a given value.
///
/// The attribute is fixed at construction; every call rebuilds and re-executes
/// the select (no statement caching across calls) and leaves the unit of
/// work's tracked state untouched.
#[derive(Debug)]
pub struct UniqueKeyLoader<T> {
    entity: Arc<EntityMapping>,
    attribute: String,
    _entity_type: PhantomData<fn() -> T>,
}

impl<T: FromRow + PartialEq> UniqueKeyLoader<T> {
    /// Create a loader over `entity`'s attribute named `attribute`.
    pub fn new(entity: Arc<EntityMapping>, attribute: &str) -> Result<Self> {
        entity.require_attribute(attribute)?;
        Ok(Self {
            entity,
            attribute: attribute.to_string(),
            _entity_type: PhantomData,
        })
    }

    /// The mapping this loader loads.
    #[must_use]
    pub fn entity_mapping(&self) -> &EntityMapping {
        &self.entity
    }

    /// Load the entity whose unique attribute equals `key_value`.
    ///
    /// Zero matching rows is a normal outcome and returns `Ok(None)`. More
    /// than one matching row means the schema's uniqueness assumption is
    /// broken in the data; that is [`Error::AmbiguousUniqueKey`], reported to
    /// the caller and never truncated to an arbitrary row.
    pub fn load<C: Connection>(
        &self,
        key_value: &Value,
        lock_mode: LockMode,
        read_only: Option<bool>,
        ctx: &mut ExecutionContext<'_, C>,
    ) -> Result<Option<T>> {
        if let Some(read_only) = read_only {
            ctx.set_read_only(read_only);
        }

        let attribute = self.entity.require_attribute(&self.attribute)?;
        let statement = build_select_by_attribute(
            &self.entity,
            &[],
            &self.attribute,
            Some(AMBIGUITY_PROBE_LIMIT),
            lock_mode,
        )?;

        let mut bindings = ParameterBindings::new();
        let registered =
            bindings.register_attribute_values(key_value, ClauseKind::Where, attribute)?;
        if registered != statement.placeholder_count() {
            return Err(Error::BindingArity {
                expected: statement.placeholder_count(),
                actual: registered,
            });
        }

        tracing::debug!(
            entity = %self.entity.entity_name,
            attribute = %self.attribute,
            read_only = ctx.read_only(),
            "Loading entity by unique key"
        );

        let mut matches = execute_select(
            &statement,
            &bindings,
            ctx,
            |row| T::from_row(row),
            UniqueSemantic::Filter,
        )?;

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(Error::AmbiguousUniqueKey {
                entity: self.entity.entity_name.clone(),
                key: format!("{key_value:?}"),
            }),
        }
    }

    /// Resolve just the identifier of the entity whose unique attribute
    /// equals `key_value`.
    ///
    /// # Panics
    ///
    /// The caller is expected to have already confirmed a match exists.
    /// Anything other than exactly one row violates that contract and panics;
    /// it is a programming error, not a recoverable condition.
    pub fn resolve_id<C: Connection>(
        &self,
        key_value: &Value,
        ctx: &mut ExecutionContext<'_, C>,
    ) -> Result<Value> {
        let attribute = self.entity.require_attribute(&self.attribute)?;
        let identifier = self.entity.identifier_attribute();
        let identifier_name = identifier.name.clone();
        let identifier_span = identifier.column_span();

        let statement = build_select_by_attribute(
            &self.entity,
            &[identifier_name.as_str()],
            &self.attribute,
            Some(AMBIGUITY_PROBE_LIMIT),
            LockMode::None,
        )?;

        let mut bindings = ParameterBindings::new();
        let registered =
            bindings.register_attribute_values(key_value, ClauseKind::Where, attribute)?;
        if registered != statement.placeholder_count() {
            return Err(Error::BindingArity {
                expected: statement.placeholder_count(),
                actual: registered,
            });
        }

        tracing::debug!(
            entity = %self.entity.entity_name,
            attribute = %self.attribute,
            "Resolving identifier by unique key"
        );

        let mut matches = execute_select(
            &statement,
            &bindings,
            ctx,
            |row| Ok(identifier_value(row, identifier_span)),
            UniqueSemantic::Filter,
        )?;

        assert!(
            matches.len() == 1,
            "resolve_id found {} row(s) for entity '{}' where the caller guaranteed exactly one",
            matches.len(),
            self.entity.entity_name
        );
        Ok(matches.remove(0))
    }
}

fn identifier_value(row: &Row, span: usize) -> Value {
    if span == 1 {
        row.get(0).cloned().unwrap_or(Value::Null)
    } else {
        Value::Composite(row.iter().cloned().collect())
    }
}
