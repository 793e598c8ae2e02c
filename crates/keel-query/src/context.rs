//! Per-operation execution context.

use keel_core::{Connection, Dialect};
use std::fmt;

/// Sink for actions deferred until after a load completes.
///
/// Row transforms and the executor may register work that must not run while
/// the cursor is open (follow-on fetches, post-load listeners); the executor
/// drains the sink once row consumption finishes.
#[derive(Default)]
pub struct Callback {
    after_load: Vec<Box<dyn FnOnce() + Send>>,
}

impl Callback {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action to run after row consumption completes.
    pub fn register_after_load(&mut self, action: Box<dyn FnOnce() + Send>) {
        self.after_load.push(action);
    }

    /// Number of registered, not-yet-invoked actions.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.after_load.len()
    }

    /// Run and clear all registered actions, in registration order.
    pub fn invoke_after_load(&mut self) {
        for action in self.after_load.drain(..) {
            action();
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("pending", &self.after_load.len())
            .finish()
    }
}

/// Everything one logical operation needs: the session's connection, the
/// session's dialect, read-only intent, and the post-load callback sink.
///
/// A context is scoped to a single operation and discarded afterwards; it is
/// created by the session, not retained.
pub struct ExecutionContext<'s, C: Connection> {
    connection: &'s mut C,
    dialect: Dialect,
    read_only: bool,
    callback: Callback,
}

impl<'s, C: Connection> ExecutionContext<'s, C> {
    /// Create a context borrowing `connection` for one operation.
    pub fn new(connection: &'s mut C, dialect: Dialect, read_only: bool) -> Self {
        Self {
            connection,
            dialect,
            read_only,
            callback: Callback::new(),
        }
    }

    /// The dialect statements render against.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether the operation runs with read-only intent.
    #[must_use]
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Override the read-only intent for this operation.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// The post-load callback sink.
    pub fn callback_mut(&mut self) -> &mut Callback {
        &mut self.callback
    }

    /// Split the context into its independently borrowed parts.
    pub(crate) fn split(&mut self) -> (&mut C, Dialect, &mut Callback) {
        (&mut *self.connection, self.dialect, &mut self.callback)
    }
}

impl<C: Connection> fmt::Debug for ExecutionContext<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("dialect", &self.dialect)
            .field("read_only", &self.read_only)
            .field("callback", &self.callback)
            .finish()
    }
}
