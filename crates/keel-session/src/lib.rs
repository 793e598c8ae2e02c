//! Session surface and optimistic versioning for Keel.
//!
//! The [`Session`] owns one connection and represents one unit of work. It is
//! never shared across concurrent threads of control, and nothing here takes
//! a lock: cross-session races are arbitrated entirely by the optimistic
//! version values produced in [`versioning`], checked by write orchestration
//! through a version-match predicate on the update statement.
//!
//! # Example
//!
//! ```ignore
//! let mut session = Session::new(connection);
//! let mut ctx = session.execution_context();
//! let hero = loader.load(&Value::from("Spider-Man"), LockMode::None, None, &mut ctx)?;
//! ```

pub mod versioning;

use keel_core::{Connection, Dialect};
use keel_query::ExecutionContext;
use serde::{Deserialize, Serialize};

/// Configuration for session behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The dialect statements render against.
    pub dialect: Dialect,
    /// Whether operations run with read-only intent unless overridden.
    pub default_read_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            default_read_only: false,
        }
    }
}

/// One unit of work over one connection.
///
/// The session hands out a fresh [`ExecutionContext`] per logical operation;
/// contexts borrow the connection and are discarded when the operation ends.
/// Abandoning the session is how a caller aborts in-flight work.
#[derive(Debug)]
pub struct Session<C: Connection> {
    connection: C,
    config: SessionConfig,
}

impl<C: Connection> Session<C> {
    /// Create a session with default configuration.
    pub fn new(connection: C) -> Self {
        Self::with_config(connection, SessionConfig::default())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(connection: C, config: SessionConfig) -> Self {
        Self { connection, config }
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Get a mutable reference to the underlying connection.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    /// Consume the session and return the underlying connection.
    pub fn into_connection(self) -> C {
        self.connection
    }

    /// An execution context for one operation, with the session's defaults.
    pub fn execution_context(&mut self) -> ExecutionContext<'_, C> {
        let dialect = self.config.dialect;
        let read_only = self.config.default_read_only;
        ExecutionContext::new(&mut self.connection, dialect, read_only)
    }

    /// An execution context with explicit read-only intent.
    pub fn execution_context_with(&mut self, read_only: bool) -> ExecutionContext<'_, C> {
        let dialect = self.config.dialect;
        ExecutionContext::new(&mut self.connection, dialect, read_only)
    }
}
