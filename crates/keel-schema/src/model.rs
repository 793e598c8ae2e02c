//! The relational schema model.

use keel_core::SqlType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A physical column on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column type.
    pub sql_type: SqlType,
}

impl Column {
    /// Create a column.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
        }
    }
}

/// A named index on one table.
///
/// The column list is ordered and duplicate-free; second-pass resolutions
/// referencing the same (table, name) pair accumulate into one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Member columns, in resolution order.
    pub columns: Vec<String>,
}

impl Index {
    /// Create an empty index named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append `column` unless it is already a member.
    pub fn add_column(&mut self, column: &str) {
        if !self.columns.iter().any(|existing| existing == column) {
            self.columns.push(column.to_string());
        }
    }
}

/// A named unique key on one table. Same accumulation rules as [`Index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueKey {
    /// Unique-key name.
    pub name: String,
    /// Member columns, in resolution order.
    pub columns: Vec<String>,
}

impl UniqueKey {
    /// Create an empty unique key named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append `column` unless it is already a member.
    pub fn add_column(&mut self, column: &str) {
        if !self.columns.iter().any(|existing| existing == column) {
            self.columns.push(column.to_string());
        }
    }
}

/// A physical table with its columns and accumulated constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in declared order.
    pub columns: Vec<Column>,
    indexes: BTreeMap<String, Index>,
    unique_keys: BTreeMap<String, UniqueKey>,
}

impl Table {
    /// Create a table with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: BTreeMap::new(),
            unique_keys: BTreeMap::new(),
        }
    }

    /// Append `column` unless a column of that name already exists.
    pub fn add_column(&mut self, column: Column) {
        if self.column(&column.name).is_none() {
            self.columns.push(column);
        }
    }

    /// Look up a column by name, ASCII case-insensitively.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// The index named `name`, creating it on first reference.
    pub fn get_or_create_index(&mut self, name: &str) -> &mut Index {
        self.indexes
            .entry(name.to_string())
            .or_insert_with(|| Index::new(name))
    }

    /// The unique key named `name`, creating it on first reference.
    pub fn get_or_create_unique_key(&mut self, name: &str) -> &mut UniqueKey {
        self.unique_keys
            .entry(name.to_string())
            .or_insert_with(|| UniqueKey::new(name))
    }

    /// The index named `name`, if resolved.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    /// The unique key named `name`, if resolved.
    #[must_use]
    pub fn unique_key(&self, name: &str) -> Option<&UniqueKey> {
        self.unique_keys.get(name)
    }

    /// All resolved indexes, ordered by name.
    pub fn indexes(&self) -> impl Iterator<Item = &Index> {
        self.indexes.values()
    }

    /// All resolved unique keys, ordered by name.
    pub fn unique_keys(&self) -> impl Iterator<Item = &UniqueKey> {
        self.unique_keys.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup_ignores_ascii_case() {
        let mut table = Table::new("heroes");
        table.add_column(Column::new("Name", SqlType::Text));
        assert!(table.column("name").is_some());
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_get_or_create_index_reuses_by_name() {
        let mut table = Table::new("heroes");
        table.get_or_create_index("idx_a").add_column("c1");
        table.get_or_create_index("idx_a").add_column("c2");
        assert_eq!(table.indexes().count(), 1);
        assert_eq!(table.index("idx_a").expect("idx_a").columns, vec!["c1", "c2"]);
    }

    #[test]
    fn test_add_column_to_index_is_idempotent() {
        let mut index = Index::new("idx_a");
        index.add_column("c1");
        index.add_column("c1");
        assert_eq!(index.columns, vec!["c1"]);
    }

    #[test]
    fn test_indexes_and_unique_keys_are_separate_namespaces() {
        let mut table = Table::new("heroes");
        table.get_or_create_index("k").add_column("c1");
        table.get_or_create_unique_key("k").add_column("c2");
        assert_eq!(table.index("k").expect("index").columns, vec!["c1"]);
        assert_eq!(table.unique_key("k").expect("unique").columns, vec!["c2"]);
    }
}
