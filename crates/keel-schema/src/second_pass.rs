//! Deferred index and unique-key resolution.
//!
//! Phase 1 of a schema build declares constraints against names that may not
//! yet resolve — in particular, a composite attribute's owning table is only
//! known once the surrounding entity mapping is complete. Declarations are
//! therefore collected as an ordered task list and drained in a second pass
//! after the whole mapping set is frozen; resolution never triggers lazily.

use crate::model::Table;
use keel_core::{Dialect, EntityMapping, Error, Result, unquote_ident};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Whether a declaration builds an index or a unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A plain index.
    Index,
    /// A unique key.
    Unique,
}

/// What a deferred declaration references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintSource {
    /// Bare column names on a known table.
    Columns {
        /// The owning table.
        table: String,
        /// Member columns, in declared order.
        columns: Vec<String>,
    },
    /// A single annotated attribute; the owning table and column set are
    /// resolved at pass time from the finished entity mapping.
    Attribute {
        /// The declaring entity.
        entity: String,
        /// The annotated attribute.
        attribute: String,
    },
}

/// One deferred index/unique-key resolution task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSecondPass {
    /// Constraint name.
    pub name: String,
    /// Index or unique key.
    pub kind: ConstraintKind,
    /// What to resolve against.
    pub source: ConstraintSource,
}

/// Build-time collector for tables, finished entity mappings, and pending
/// constraint resolutions.
///
/// Schema building is a one-time, start-of-life activity: the builder is
/// single-threaded by design and holds the only mutable reference to the
/// model while passes run.
#[derive(Debug, Default)]
pub struct MetadataBuilder {
    tables: BTreeMap<String, Table>,
    entities: BTreeMap<String, Arc<EntityMapping>>,
    pending: Vec<ConstraintSecondPass>,
    dialect: Dialect,
}

impl MetadataBuilder {
    /// Create an empty builder rendering against the default dialect.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder for `dialect`.
    #[must_use]
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Register a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Register a finished entity mapping.
    pub fn add_entity(&mut self, entity: Arc<EntityMapping>) {
        self.entities.insert(entity.entity_name.clone(), entity);
    }

    /// The table named `name`.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// The entity mapping named `name`.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Arc<EntityMapping>> {
        self.entities.get(name)
    }

    /// Queue a column-mode declaration: `name` over `columns` of `table`.
    pub fn add_constraint_by_columns(
        &mut self,
        name: impl Into<String>,
        kind: ConstraintKind,
        table: impl Into<String>,
        columns: Vec<String>,
    ) {
        self.pending.push(ConstraintSecondPass {
            name: name.into(),
            kind,
            source: ConstraintSource::Columns {
                table: table.into(),
                columns,
            },
        });
    }

    /// Queue an attribute-mode declaration: `name` over the columns of
    /// `entity`'s `attribute`, whichever table those turn out to live on.
    pub fn add_constraint_by_attribute(
        &mut self,
        name: impl Into<String>,
        kind: ConstraintKind,
        entity: impl Into<String>,
        attribute: impl Into<String>,
    ) {
        self.pending.push(ConstraintSecondPass {
            name: name.into(),
            kind,
            source: ConstraintSource::Attribute {
                entity: entity.into(),
                attribute: attribute.into(),
            },
        });
    }

    /// Number of queued, unresolved declarations.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drain and resolve every queued declaration, in queue order.
    ///
    /// Must run only after all entity mappings in the build unit are
    /// registered. Passes accumulate into shared-by-name constraints, so
    /// their relative order does not affect the final model; draining in
    /// queue order keeps runs deterministic anyway.
    pub fn run_second_passes(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        tracing::debug!(passes = pending.len(), "Running constraint second passes");
        for pass in pending {
            self.resolve(&pass)?;
        }
        Ok(())
    }

    fn resolve(&mut self, pass: &ConstraintSecondPass) -> Result<()> {
        match &pass.source {
            ConstraintSource::Columns { table, columns } => {
                self.add_columns_to_constraint(&pass.name, pass.kind, table, columns)
            }
            ConstraintSource::Attribute { entity, attribute } => {
                let mapping =
                    self.entities
                        .get(entity)
                        .cloned()
                        .ok_or_else(|| Error::Schema {
                            constraint: pass.name.clone(),
                            table: String::new(),
                            detail: format!("entity '{entity}' is not part of this build unit"),
                        })?;
                let attribute = mapping.require_attribute(attribute)?;
                // The owning table is only knowable now that the mapping set
                // is frozen.
                let table = mapping.table.clone();
                let columns: Vec<String> = attribute
                    .columns
                    .iter()
                    .map(|column| column.column.clone())
                    .collect();
                self.add_columns_to_constraint(&pass.name, pass.kind, &table, &columns)
            }
        }
    }

    fn add_columns_to_constraint(
        &mut self,
        name: &str,
        kind: ConstraintKind,
        table_name: &str,
        columns: &[String],
    ) -> Result<()> {
        let dialect = self.dialect;
        let table = self
            .tables
            .get_mut(table_name)
            .ok_or_else(|| Error::Schema {
                constraint: name.to_string(),
                table: table_name.to_string(),
                detail: "table is not part of this build unit".to_string(),
            })?;

        for column_name in columns {
            let bare = unquote_ident(column_name, dialect);
            let column = table.column(&bare).ok_or_else(|| Error::Schema {
                constraint: name.to_string(),
                table: table_name.to_string(),
                detail: format!("no column named '{column_name}' matches the declaration"),
            })?;
            let resolved = column.name.clone();
            match kind {
                ConstraintKind::Index => table.get_or_create_index(name).add_column(&resolved),
                ConstraintKind::Unique => {
                    table.get_or_create_unique_key(name).add_column(&resolved);
                }
            }
            tracing::debug!(
                constraint = name,
                table = table_name,
                column = %resolved,
                "Resolved constraint column"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use keel_core::{AttributeMapping, ColumnMapping, SqlType};

    fn hero_table() -> Table {
        let mut table = Table::new("heroes");
        table.add_column(Column::new("id", SqlType::BigInt));
        table.add_column(Column::new("name", SqlType::Text));
        table.add_column(Column::new("callsign_prefix", SqlType::Text));
        table.add_column(Column::new("callsign_number", SqlType::Integer));
        table
    }

    fn hero_mapping() -> Arc<EntityMapping> {
        Arc::new(EntityMapping::new(
            "Hero",
            "heroes",
            vec![
                AttributeMapping::scalar("id", "id", SqlType::BigInt),
                AttributeMapping::scalar("name", "name", SqlType::Text),
                AttributeMapping::composite(
                    "callsign",
                    vec![
                        ColumnMapping::new("callsign_prefix", SqlType::Text),
                        ColumnMapping::new("callsign_number", SqlType::Integer),
                    ],
                ),
            ],
            0,
        ))
    }

    #[test]
    fn test_same_named_declarations_accumulate_into_one_constraint() {
        let mut builder = MetadataBuilder::new();
        builder.add_table(hero_table());
        builder.add_constraint_by_columns(
            "idx_a",
            ConstraintKind::Index,
            "heroes",
            vec!["id".to_string()],
        );
        builder.add_constraint_by_columns(
            "idx_a",
            ConstraintKind::Index,
            "heroes",
            vec!["name".to_string()],
        );

        builder.run_second_passes().expect("second pass");

        let table = builder.table("heroes").expect("table");
        assert_eq!(table.indexes().count(), 1);
        assert_eq!(table.index("idx_a").expect("idx_a").columns, vec!["id", "name"]);
    }

    #[test]
    fn test_attribute_mode_resolves_table_at_pass_time() {
        let mut builder = MetadataBuilder::new();
        // Declaration queued before the table or the mapping exist.
        builder.add_constraint_by_attribute(
            "uk_callsign",
            ConstraintKind::Unique,
            "Hero",
            "callsign",
        );
        builder.add_table(hero_table());
        builder.add_entity(hero_mapping());

        builder.run_second_passes().expect("second pass");

        let table = builder.table("heroes").expect("table");
        assert_eq!(
            table.unique_key("uk_callsign").expect("unique key").columns,
            vec!["callsign_prefix", "callsign_number"]
        );
    }

    #[test]
    fn test_plain_attribute_resolves_single_column() {
        let mut builder = MetadataBuilder::new();
        builder.add_table(hero_table());
        builder.add_entity(hero_mapping());
        builder.add_constraint_by_attribute("idx_name", ConstraintKind::Index, "Hero", "name");

        builder.run_second_passes().expect("second pass");

        let table = builder.table("heroes").expect("table");
        assert_eq!(table.index("idx_name").expect("idx_name").columns, vec!["name"]);
    }

    #[test]
    fn test_unknown_column_fails_the_build() {
        let mut builder = MetadataBuilder::new();
        builder.add_table(hero_table());
        builder.add_constraint_by_columns(
            "idx_ghost",
            ConstraintKind::Index,
            "heroes",
            vec!["ghost".to_string()],
        );

        let err = builder.run_second_passes().expect_err("unknown column");
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn test_quoted_declaration_column_resolves() {
        let mut builder = MetadataBuilder::new();
        builder.add_table(hero_table());
        builder.add_constraint_by_columns(
            "idx_name",
            ConstraintKind::Index,
            "heroes",
            vec!["\"name\"".to_string()],
        );

        builder.run_second_passes().expect("second pass");
        let table = builder.table("heroes").expect("table");
        assert_eq!(table.index("idx_name").expect("idx_name").columns, vec!["name"]);
    }

    #[test]
    fn test_pass_order_does_not_change_the_model() {
        let declare = |builder: &mut MetadataBuilder, forward: bool| {
            let (first, second) = if forward { ("id", "name") } else { ("name", "id") };
            builder.add_constraint_by_columns(
                "idx_a",
                ConstraintKind::Index,
                "heroes",
                vec![first.to_string()],
            );
            builder.add_constraint_by_columns(
                "idx_b",
                ConstraintKind::Index,
                "heroes",
                vec![second.to_string()],
            );
        };

        let mut forward = MetadataBuilder::new();
        forward.add_table(hero_table());
        declare(&mut forward, true);
        forward.run_second_passes().expect("second pass");

        let mut reversed = MetadataBuilder::new();
        reversed.add_table(hero_table());
        declare(&mut reversed, false);
        reversed.run_second_passes().expect("second pass");

        // Different declaration order, same constraint count per table.
        assert_eq!(
            forward.table("heroes").expect("table").indexes().count(),
            reversed.table("heroes").expect("table").indexes().count()
        );
    }
}
