//! The select statement AST.
//!
//! A [`SelectStatement`] is an immutable tree built fresh per logical query
//! shape: target table, ordered projected columns, a conjunction of
//! `column = ?` predicates, an optional literal row limit, and a lock mode.
//! Placeholders are positional and counted; the count is fixed at
//! construction and must equal the number of values the binder registers.

use keel_core::{Dialect, quote_ident};
use serde::{Deserialize, Serialize};

/// Row-level lock requested alongside the select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockMode {
    /// No lock (default).
    #[default]
    None,
    /// Shared lock.
    Share,
    /// Exclusive lock.
    Update,
}

impl LockMode {
    /// The locking clause for `dialect`, if the store supports one.
    #[must_use]
    pub const fn sql_clause(&self, dialect: Dialect) -> Option<&'static str> {
        match (self, dialect) {
            (LockMode::None, _) | (_, Dialect::Sqlite) => None,
            (LockMode::Share, _) => Some("FOR SHARE"),
            (LockMode::Update, _) => Some("FOR UPDATE"),
        }
    }
}

/// An immutable parameterized select over one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectStatement {
    table: String,
    projections: Vec<String>,
    restrictions: Vec<String>,
    row_limit: Option<u64>,
    lock_mode: LockMode,
}

impl SelectStatement {
    /// Create a select statement.
    ///
    /// `projections` and `restrictions` are physical column names in render
    /// order; each restriction contributes one `column = ?` predicate, so the
    /// placeholder count equals `restrictions.len()` from here on.
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        projections: Vec<String>,
        restrictions: Vec<String>,
        row_limit: Option<u64>,
        lock_mode: LockMode,
    ) -> Self {
        Self {
            table: table.into(),
            projections,
            restrictions,
            row_limit,
            lock_mode,
        }
    }

    /// The target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Projected column names, in select-list order.
    #[must_use]
    pub fn projections(&self) -> &[String] {
        &self.projections
    }

    /// Restricted column names, in predicate (and placeholder) order.
    #[must_use]
    pub fn restriction_columns(&self) -> &[String] {
        &self.restrictions
    }

    /// Number of parameter placeholders in the statement.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.restrictions.len()
    }

    /// The literal row limit, if any.
    #[must_use]
    pub fn row_limit(&self) -> Option<u64> {
        self.row_limit
    }

    /// The requested lock mode.
    #[must_use]
    pub fn lock_mode(&self) -> LockMode {
        self.lock_mode
    }

    /// Render the statement as dialect-specific SQL.
    ///
    /// Pure; identifiers are quoted with the dialect's quote characters and
    /// placeholders numbered in restriction order.
    #[must_use]
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let projections: Vec<String> = self
            .projections
            .iter()
            .map(|column| quote_ident(column, dialect))
            .collect();

        let mut sql = format!(
            "SELECT {} FROM {}",
            projections.join(", "),
            quote_ident(&self.table, dialect)
        );

        if !self.restrictions.is_empty() {
            let predicates: Vec<String> = self
                .restrictions
                .iter()
                .enumerate()
                .map(|(position, column)| {
                    format!(
                        "{} = {}",
                        quote_ident(column, dialect),
                        dialect.placeholder(position + 1)
                    )
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        if let Some(limit) = self.row_limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(clause) = self.lock_mode.sql_clause(dialect) {
            sql.push(' ');
            sql.push_str(clause);
        }

        sql
    }
}
