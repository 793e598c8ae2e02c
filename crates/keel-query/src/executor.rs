//! The reusable select executor.

use crate::ast::SelectStatement;
use crate::context::ExecutionContext;
use crate::params::ParameterBindings;
use crate::resultset::ResultColumns;
use keel_core::{Connection, Error, Result, Row, TransportError};

/// How produced values are deduplicated before being returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueSemantic {
    /// Drop values equal to one already produced.
    Filter,
    /// Keep every produced value.
    AllowDuplicates,
}

/// Render `statement` with `bindings`, run it on the context's connection,
/// and transform each returned row into a `T`.
///
/// Projected columns are located in the cursor's result shape by name through
/// [`ResultColumns`], so a driver returning columns reordered or quoted still
/// yields rows in projection order. The post-load callback sink drains after
/// the cursor is exhausted.
///
/// This executor does not interpret cardinality — zero, one, or many rows are
/// all returned as-is. That policy belongs to callers, which keeps the
/// executor reusable for single-row and multi-row queries alike.
pub fn execute_select<C, T, F>(
    statement: &SelectStatement,
    bindings: &ParameterBindings,
    ctx: &mut ExecutionContext<'_, C>,
    mut row_transform: F,
    unique_semantic: UniqueSemantic,
) -> Result<Vec<T>>
where
    C: Connection,
    T: PartialEq,
    F: FnMut(&Row) -> Result<T>,
{
    if bindings.len() != statement.placeholder_count() {
        return Err(Error::BindingArity {
            expected: statement.placeholder_count(),
            actual: bindings.len(),
        });
    }

    let (connection, dialect, callback) = ctx.split();
    let sql = statement.to_sql(dialect);
    tracing::debug!(sql = %sql, parameters = bindings.len(), "Executing select");

    let parameter_values = bindings.values();
    let mut results = Vec::new();
    {
        let cursor = connection.select(&sql, &parameter_values)?;
        let mut columns = ResultColumns::new(cursor, dialect);

        let mut positions = Vec::with_capacity(statement.projections().len());
        for projection in statement.projections() {
            positions.push(columns.position_of(projection)?);
        }

        while let Some(row) = columns.next_row()? {
            let mut cells = Vec::with_capacity(positions.len());
            for &position in &positions {
                let value = row.get(position).cloned().ok_or_else(|| {
                    Error::Transport(TransportError::new(format!(
                        "row has {} value(s) but the result shape placed a column at position {position}",
                        row.len()
                    )))
                })?;
                cells.push(value);
            }
            let item = row_transform(&Row::new(cells))?;
            match unique_semantic {
                UniqueSemantic::Filter if results.contains(&item) => {}
                _ => results.push(item),
            }
        }
    }

    callback.invoke_after_load();
    Ok(results)
}
