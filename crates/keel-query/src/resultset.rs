//! Lazy result-shape metadata over a live cursor.

use keel_core::{
    CursorMetadata, Dialect, Error, MetadataOp, Result, Row, RowCursor, unquote_ident,
};

/// Name-to-position lookup layered over an executed query's cursor.
///
/// Metadata is fetched from the cursor at most once, on the first call to any
/// lookup, and cached for the lifetime of the executed query. The cache is an
/// explicit `Option` rather than implicit memoization so the single-fetch
/// invariant stays auditable.
///
/// Column positions are 0-based. Name lookup strips the dialect's identifier
/// quoting before comparing, mirroring the normalization applied when the
/// statement was rendered, and compares ASCII case-insensitively.
#[derive(Debug)]
pub struct ResultColumns<C: RowCursor> {
    cursor: C,
    dialect: Dialect,
    metadata: Option<CursorMetadata>,
}

impl<C: RowCursor> ResultColumns<C> {
    /// Wrap `cursor`, normalizing names with `dialect`'s quoting rules.
    pub fn new(cursor: C, dialect: Dialect) -> Self {
        Self {
            cursor,
            dialect,
            metadata: None,
        }
    }

    /// Number of columns in the result shape.
    pub fn column_count(&mut self) -> Result<usize> {
        Ok(self.metadata_for(MetadataOp::ColumnCount)?.column_count())
    }

    /// The 0-based position of the column named `name`.
    ///
    /// `name` may carry the dialect's quoting characters; it resolves to the
    /// same position as its bare form.
    pub fn position_of(&mut self, name: &str) -> Result<usize> {
        let dialect = self.dialect;
        let bare = unquote_ident(name, dialect);
        let metadata = self.metadata_for(MetadataOp::PositionByName)?;
        metadata
            .names()
            .iter()
            .position(|candidate| {
                unquote_ident(candidate, dialect).eq_ignore_ascii_case(&bare)
            })
            .ok_or_else(|| Error::MetadataAccess {
                operation: MetadataOp::PositionByName,
                detail: format!("no column named '{name}' in the result"),
            })
    }

    /// The column name at the 0-based `position`.
    pub fn name_of(&mut self, position: usize) -> Result<String> {
        let metadata = self.metadata_for(MetadataOp::NameByPosition)?;
        metadata
            .name_at(position)
            .map(ToString::to_string)
            .ok_or_else(|| Error::MetadataAccess {
                operation: MetadataOp::NameByPosition,
                detail: format!(
                    "position {position} out of range for {} column(s)",
                    metadata.column_count()
                ),
            })
    }

    /// Advance the underlying cursor to the next row.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        self.cursor.next_row().map_err(Error::from)
    }

    fn metadata_for(&mut self, operation: MetadataOp) -> Result<&CursorMetadata> {
        if self.metadata.is_none() {
            let fetched = self
                .cursor
                .metadata()
                .map_err(|fault| Error::metadata_access(operation, &fault))?;
            self.metadata = Some(fetched);
        }
        match &self.metadata {
            Some(metadata) => Ok(metadata),
            None => unreachable!("cursor metadata populated above"),
        }
    }
}
