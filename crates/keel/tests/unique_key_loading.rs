//! End-to-end unique-key loading against an in-memory transport.

use keel::prelude::*;
use keel::{CursorMetadata, RowCursor, TransportError};

/// Transport double: returns a fixed result shape and row set, and records
/// the last statement it was asked to run. Predicate evaluation is the real
/// store's job, so fixtures are built to contain exactly the rows the
/// statement would match.
#[derive(Debug, Default)]
struct MemoryStore {
    columns: Vec<String>,
    rows: Vec<Row>,
    last_sql: Option<String>,
    last_parameters: Vec<Value>,
}

struct MemoryCursor {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Row>,
}

impl RowCursor for MemoryCursor {
    fn metadata(&mut self) -> std::result::Result<CursorMetadata, TransportError> {
        Ok(CursorMetadata::new(self.columns.clone()))
    }

    fn next_row(&mut self) -> std::result::Result<Option<Row>, TransportError> {
        Ok(self.rows.next())
    }
}

impl Connection for MemoryStore {
    type Cursor<'conn> = MemoryCursor;

    fn select(
        &mut self,
        statement: &str,
        parameters: &[Value],
    ) -> std::result::Result<Self::Cursor<'_>, TransportError> {
        self.last_sql = Some(statement.to_string());
        self.last_parameters = parameters.to_vec();
        Ok(MemoryCursor {
            columns: self.columns.clone(),
            rows: self.rows.clone().into_iter(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Hero {
    id: i64,
    name: String,
    callsign_prefix: String,
    callsign_number: i32,
}

impl FromRow for Hero {
    fn from_row(row: &Row) -> Result<Self> {
        fn cell(row: &Row, position: usize) -> Result<Value> {
            row.get(position).cloned().ok_or_else(|| {
                keel::TransportError::new(format!("missing value at position {position}")).into()
            })
        }
        let id = match cell(row, 0)? {
            Value::BigInt(id) => id,
            other => {
                return Err(
                    keel::TransportError::new(format!("unexpected id value: {other:?}")).into(),
                );
            }
        };
        let name = match cell(row, 1)? {
            Value::Text(name) => name,
            other => {
                return Err(
                    keel::TransportError::new(format!("unexpected name value: {other:?}")).into(),
                );
            }
        };
        let callsign_prefix = match cell(row, 2)? {
            Value::Text(prefix) => prefix,
            other => {
                return Err(keel::TransportError::new(format!(
                    "unexpected callsign prefix: {other:?}"
                ))
                .into());
            }
        };
        let callsign_number = match cell(row, 3)? {
            Value::Int(number) => number,
            other => {
                return Err(keel::TransportError::new(format!(
                    "unexpected callsign number: {other:?}"
                ))
                .into());
            }
        };
        Ok(Self {
            id,
            name,
            callsign_prefix,
            callsign_number,
        })
    }
}

fn hero_mapping() -> std::sync::Arc<EntityMapping> {
    std::sync::Arc::new(EntityMapping::new(
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

fn hero_row(id: i64, name: &str, prefix: &str, number: i32) -> Row {
    Row::new(vec![
        Value::BigInt(id),
        Value::from(name),
        Value::from(prefix),
        Value::Int(number),
    ])
}

fn hero_columns() -> Vec<String> {
    ["id", "name", "callsign_prefix", "callsign_number"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn loader() -> UniqueKeyLoader<Hero> {
    UniqueKeyLoader::new(hero_mapping(), "name").expect("known attribute")
}

#[test]
fn test_load_returns_the_single_matching_row() {
    let store = MemoryStore {
        columns: hero_columns(),
        rows: vec![hero_row(1, "Alice", "alpha", 7)],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let hero = loader()
        .load(&Value::from("Alice"), LockMode::None, None, &mut ctx)
        .expect("load");

    assert_eq!(
        hero,
        Some(Hero {
            id: 1,
            name: "Alice".to_string(),
            callsign_prefix: "alpha".to_string(),
            callsign_number: 7,
        })
    );
}

#[test]
fn test_load_returns_none_when_no_row_matches() {
    let store = MemoryStore {
        columns: hero_columns(),
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let hero = loader()
        .load(&Value::from("Nobody"), LockMode::None, None, &mut ctx)
        .expect("load");
    assert_eq!(hero, None);
}

#[test]
fn test_load_reports_broken_uniqueness_instead_of_picking_a_row() {
    // Two distinct entities share the "unique" name: a data-integrity bug
    // the loader must surface, never hide by truncation.
    let store = MemoryStore {
        columns: hero_columns(),
        rows: vec![
            hero_row(1, "Alice", "alpha", 7),
            hero_row(2, "Alice", "bravo", 9),
        ],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let err = loader()
        .load(&Value::from("Alice"), LockMode::None, None, &mut ctx)
        .expect_err("ambiguity");
    assert!(matches!(err, Error::AmbiguousUniqueKey { .. }));
}

#[test]
fn test_duplicate_identical_rows_collapse_to_one() {
    // The executor's uniqueness filter removes row-level duplicates of the
    // same entity; ambiguity is about distinct entities only.
    let store = MemoryStore {
        columns: hero_columns(),
        rows: vec![
            hero_row(1, "Alice", "alpha", 7),
            hero_row(1, "Alice", "alpha", 7),
        ],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let hero = loader()
        .load(&Value::from("Alice"), LockMode::None, None, &mut ctx)
        .expect("load");
    assert_eq!(hero.map(|h| h.id), Some(1));
}

#[test]
fn test_select_probes_two_rows_and_renders_predicate() {
    let store = MemoryStore {
        columns: hero_columns(),
        rows: vec![hero_row(1, "Alice", "alpha", 7)],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();
    loader()
        .load(&Value::from("Alice"), LockMode::None, None, &mut ctx)
        .expect("load");

    let sql = session.connection().last_sql.clone().expect("sql captured");
    assert_eq!(
        sql,
        "SELECT \"id\", \"name\", \"callsign_prefix\", \"callsign_number\" \
         FROM \"heroes\" WHERE \"name\" = $1 LIMIT 2"
    );
    assert_eq!(
        session.connection().last_parameters,
        vec![Value::from("Alice")]
    );
}

#[test]
fn test_composite_key_binds_placeholders_in_declared_order() {
    let store = MemoryStore {
        columns: hero_columns(),
        rows: vec![hero_row(1, "Alice", "alpha", 7)],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let by_callsign: UniqueKeyLoader<Hero> =
        UniqueKeyLoader::new(hero_mapping(), "callsign").expect("known attribute");
    let key = Value::Composite(vec![Value::from("alpha"), Value::Int(7)]);
    let hero = by_callsign
        .load(&key, LockMode::None, None, &mut ctx)
        .expect("load");
    assert!(hero.is_some());

    let sql = session.connection().last_sql.clone().expect("sql captured");
    assert!(sql.contains("\"callsign_prefix\" = $1 AND \"callsign_number\" = $2"));
    assert_eq!(
        session.connection().last_parameters,
        vec![Value::from("alpha"), Value::Int(7)]
    );
}

#[test]
fn test_composite_key_arity_mismatch_is_a_binding_fault() {
    let store = MemoryStore {
        columns: hero_columns(),
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let by_callsign: UniqueKeyLoader<Hero> =
        UniqueKeyLoader::new(hero_mapping(), "callsign").expect("known attribute");
    let short_key = Value::Composite(vec![Value::from("alpha")]);
    let err = by_callsign
        .load(&short_key, LockMode::None, None, &mut ctx)
        .expect_err("arity fault");
    assert!(matches!(err, Error::BindingArity { expected: 2, actual: 1 }));
    // The fault fires before anything reaches the store.
    assert!(session.connection().last_sql.is_none());
}

#[test]
fn test_quoted_result_columns_resolve_like_bare_names() {
    // A driver may hand back quoted column labels; name normalization must
    // land on the same positions either way.
    let store = MemoryStore {
        columns: hero_columns()
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect(),
        rows: vec![hero_row(1, "Alice", "alpha", 7)],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let hero = loader()
        .load(&Value::from("Alice"), LockMode::None, None, &mut ctx)
        .expect("load");
    assert_eq!(hero.map(|h| h.name), Some("Alice".to_string()));
}

#[test]
fn test_lock_mode_renders_a_locking_clause() {
    let store = MemoryStore {
        columns: hero_columns(),
        rows: vec![hero_row(1, "Alice", "alpha", 7)],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();
    loader()
        .load(&Value::from("Alice"), LockMode::Update, None, &mut ctx)
        .expect("load");

    let sql = session.connection().last_sql.clone().expect("sql captured");
    assert!(sql.ends_with("FOR UPDATE"));
}

#[test]
fn test_resolve_id_projects_only_the_identifier() {
    let store = MemoryStore {
        columns: vec!["id".to_string()],
        rows: vec![Row::new(vec![Value::BigInt(42)])],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();

    let id = loader()
        .resolve_id(&Value::from("Alice"), &mut ctx)
        .expect("resolve");
    assert_eq!(id, Value::BigInt(42));

    let sql = session.connection().last_sql.clone().expect("sql captured");
    assert!(sql.starts_with("SELECT \"id\" FROM \"heroes\""));
}

#[test]
#[should_panic(expected = "resolve_id found 0 row(s)")]
fn test_resolve_id_asserts_the_caller_confirmed_existence() {
    let store = MemoryStore {
        columns: vec!["id".to_string()],
        ..MemoryStore::default()
    };
    let mut session = Session::new(store);
    let mut ctx = session.execution_context();
    let _ = loader().resolve_id(&Value::from("Nobody"), &mut ctx);
}

#[test]
fn test_unknown_attribute_is_rejected_at_construction() {
    let result: Result<UniqueKeyLoader<Hero>> = UniqueKeyLoader::new(hero_mapping(), "ghost");
    assert!(matches!(result, Err(Error::UnknownAttribute { .. })));
}
