//! Select construction from entity mappings.

use crate::ast::{LockMode, SelectStatement};
use keel_core::{EntityMapping, Result};

/// Build a select over `entity` filtered on one attribute.
///
/// Pure function of its inputs; no I/O. An empty `projected_attributes` slice
/// projects the entity's full attribute set; callers wanting just the
/// identifier pass it explicitly.
///
/// A composite filter attribute contributes one placeholder per decomposed
/// column, conjoined with AND in the attribute's declared column order. That
/// order is the same one the parameter binder emits, which is what makes
/// purely positional binding sound.
pub fn build_select_by_attribute(
    entity: &EntityMapping,
    projected_attributes: &[&str],
    filter_attribute: &str,
    row_limit: Option<u64>,
    lock_mode: LockMode,
) -> Result<SelectStatement> {
    let filter = entity.require_attribute(filter_attribute)?;

    let mut projections = Vec::new();
    if projected_attributes.is_empty() {
        for attribute in &entity.attributes {
            for column in &attribute.columns {
                projections.push(column.column.clone());
            }
        }
    } else {
        for name in projected_attributes {
            let attribute = entity.require_attribute(name)?;
            for column in &attribute.columns {
                projections.push(column.column.clone());
            }
        }
    }

    let restrictions = filter
        .columns
        .iter()
        .map(|column| column.column.clone())
        .collect();

    Ok(SelectStatement::new(
        entity.table.clone(),
        projections,
        restrictions,
        row_limit,
        lock_mode,
    ))
}
