//! Entity mapping metadata.
//!
//! Read-only descriptions of how entity attributes decompose into physical
//! columns. Mappings are built once by the metadata pipeline and consumed by
//! select building, parameter binding, versioning, and the schema second
//! pass; nothing in this module performs I/O.

use crate::error::{Error, Result};
use crate::generated::ColumnValueGenerator;
use crate::types::SqlType;
use crate::version::{NumericVersionType, TimestampVersionType, VersionType};
use std::sync::Arc;

/// One physical column an attribute maps onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Physical column name.
    pub column: String,
    /// Physical column type.
    pub sql_type: SqlType,
}

impl ColumnMapping {
    /// Create a column mapping.
    pub fn new(column: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            column: column.into(),
            sql_type,
        }
    }
}

/// One entity attribute and its decomposition into physical columns.
///
/// The column order is fixed at build time and shared by every consumer:
/// select building emits predicates in this order, the binder emits values in
/// this order, and constraint resolution flattens sub-columns in this order.
#[derive(Debug, Clone)]
pub struct AttributeMapping {
    /// Logical attribute name.
    pub name: String,
    /// Physical columns, in declared order. One for a scalar attribute,
    /// several for a composite/embedded one.
    pub columns: Vec<ColumnMapping>,
    /// Whether a change to this attribute requires a version bump.
    pub versioned: bool,
    /// Generation strategy when the store computes this attribute's value.
    pub generator: Option<Arc<dyn ColumnValueGenerator>>,
}

impl AttributeMapping {
    /// A scalar attribute mapped onto a single column.
    pub fn scalar(name: impl Into<String>, column: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            columns: vec![ColumnMapping::new(column, sql_type)],
            versioned: true,
            generator: None,
        }
    }

    /// A composite attribute decomposing into several columns, in order.
    pub fn composite(name: impl Into<String>, columns: Vec<ColumnMapping>) -> Self {
        Self {
            name: name.into(),
            columns,
            versioned: true,
            generator: None,
        }
    }

    /// Mark whether changes to this attribute are versionable.
    #[must_use]
    pub fn versioned(mut self, versioned: bool) -> Self {
        self.versioned = versioned;
        self
    }

    /// Attach a database generation strategy.
    #[must_use]
    pub fn generator(mut self, generator: Arc<dyn ColumnValueGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Number of physical columns (and therefore parameter slots) this
    /// attribute spans.
    #[must_use]
    pub fn column_span(&self) -> usize {
        self.columns.len()
    }

    /// The physical column names, in declared order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }
}

/// The entity's version attribute and its cached arithmetic capability.
#[derive(Debug, Clone)]
pub struct VersionMapping {
    /// Index of the version attribute within the entity's attribute list.
    pub attribute: usize,
    /// Seed/successor rules, resolved once at mapping-build time.
    pub version_type: Arc<dyn VersionType>,
}

impl VersionMapping {
    /// A version mapping with an explicit type capability.
    #[must_use]
    pub fn new(attribute: usize, version_type: Arc<dyn VersionType>) -> Self {
        Self {
            attribute,
            version_type,
        }
    }

    /// Numeric versioning for the attribute at `attribute`.
    #[must_use]
    pub fn numeric(attribute: usize) -> Self {
        Self::new(attribute, Arc::new(NumericVersionType))
    }

    /// Timestamp versioning for the attribute at `attribute`.
    #[must_use]
    pub fn timestamp(attribute: usize) -> Self {
        Self::new(attribute, Arc::new(TimestampVersionType))
    }
}

/// Read-only mapping metadata for one entity.
#[derive(Debug, Clone)]
pub struct EntityMapping {
    /// Logical entity name.
    pub entity_name: String,
    /// Physical table name.
    pub table: String,
    /// Attributes in declared order.
    pub attributes: Vec<AttributeMapping>,
    /// Index of the identifier attribute.
    pub identifier: usize,
    /// Version attribute, when the entity is optimistically locked.
    pub version: Option<VersionMapping>,
}

impl EntityMapping {
    /// Create a mapping; the identifier is the attribute at `identifier`.
    ///
    /// # Panics
    ///
    /// Panics when `identifier` is out of range for `attributes` — mappings
    /// are built by trusted metadata code, and a bad index is a build bug.
    pub fn new(
        entity_name: impl Into<String>,
        table: impl Into<String>,
        attributes: Vec<AttributeMapping>,
        identifier: usize,
    ) -> Self {
        assert!(
            identifier < attributes.len(),
            "identifier attribute index out of range"
        );
        Self {
            entity_name: entity_name.into(),
            table: table.into(),
            attributes,
            identifier,
            version: None,
        }
    }

    /// Attach a version mapping.
    #[must_use]
    pub fn with_version(mut self, version: VersionMapping) -> Self {
        self.version = Some(version);
        self
    }

    /// Look up an attribute by logical name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeMapping> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Look up an attribute's index by logical name.
    #[must_use]
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// Like [`EntityMapping::attribute`], but failing with
    /// [`Error::UnknownAttribute`].
    pub fn require_attribute(&self, name: &str) -> Result<&AttributeMapping> {
        self.attribute(name).ok_or_else(|| Error::UnknownAttribute {
            entity: self.entity_name.clone(),
            attribute: name.to_string(),
        })
    }

    /// The identifier attribute.
    #[must_use]
    pub fn identifier_attribute(&self) -> &AttributeMapping {
        &self.attributes[self.identifier]
    }

    /// Per-attribute versionability flags, indexed like `attributes`.
    #[must_use]
    pub fn attribute_versionability(&self) -> Vec<bool> {
        self.attributes.iter().map(|a| a.versioned).collect()
    }

    /// Whether the entity carries an optimistic-lock attribute.
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        self.version.is_some()
    }
}
