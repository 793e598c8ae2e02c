//! Utilities for dealing with optimistic locking values.
//!
//! The version value itself is opaque here; its seed and successor rules live
//! in the [`VersionType`](keel_core::VersionType) capability cached on the
//! entity's version mapping. These functions orchestrate that capability over
//! entity state snapshots.

use keel_core::{EntityMapping, Value, VersionMapping};

/// Create the initial optimistic locking value for the version property.
#[must_use]
pub fn seed(version_mapping: &VersionMapping) -> Value {
    let seeded = version_mapping.version_type.seed();
    tracing::trace!(seed = ?seeded, "Seeding version");
    seeded
}

/// Seed the version property in `fields` **if required**, reporting whether a
/// new value was injected.
///
/// Seeding is required when the current value is unset (`Value::Null`) or is
/// a negative number — the sentinel callers may pre-supply to mean "not yet
/// persisted" as distinct from "unset". Any other value is kept.
pub fn seed_version(
    fields: &mut [Value],
    version_index: usize,
    version_mapping: &VersionMapping,
) -> bool {
    let initial = &fields[version_index];
    if initial.is_null() || initial.is_negative_number() {
        fields[version_index] = seed(version_mapping);
        true
    } else {
        tracing::trace!(version = ?initial, "Using initial version");
        false
    }
}

/// Generate the next increment in the optimistic locking value.
///
/// `current` is never mutated; the successor is a fresh value.
#[must_use]
pub fn increment(current: &Value, version_mapping: &VersionMapping) -> Value {
    let next = version_mapping.version_type.next(current);
    tracing::trace!(from = ?current, to = ?next, "Incrementing version");
    next
}

/// Inject the optimistic locking value into the entity state snapshot.
///
/// A no-op for unversioned entities.
pub fn set_version(fields: &mut [Value], version: Value, entity: &EntityMapping) {
    if let Some(mapping) = &entity.version {
        fields[mapping.attribute] = version;
    }
}

/// Extract the optimistic locking value out of the entity state snapshot.
///
/// `None` for unversioned entities.
#[must_use]
pub fn get_version<'f>(fields: &'f [Value], entity: &EntityMapping) -> Option<&'f Value> {
    entity
        .version
        .as_ref()
        .map(|mapping| &fields[mapping.attribute])
}

/// Do we need to increment the version, given the dirty attributes?
///
/// Any structural collection change forces an increment; otherwise one is
/// needed exactly when some dirty attribute is versionable. Pure decision
/// function, no I/O.
#[must_use]
pub fn is_version_increment_required(
    dirty_attributes: &[usize],
    has_dirty_collections: bool,
    attribute_versionability: &[bool],
) -> bool {
    if has_dirty_collections {
        return true;
    }
    dirty_attributes
        .iter()
        .any(|&dirty| attribute_versionability[dirty])
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::{AttributeMapping, EntityMapping, SqlType};

    fn versioned_mapping() -> VersionMapping {
        VersionMapping::numeric(1)
    }

    fn versioned_entity() -> EntityMapping {
        EntityMapping::new(
            "Hero",
            "heroes",
            vec![
                AttributeMapping::scalar("id", "id", SqlType::BigInt),
                AttributeMapping::scalar("version", "version", SqlType::BigInt).versioned(false),
            ],
            0,
        )
        .with_version(versioned_mapping())
    }

    #[test]
    fn test_seed_version_replaces_null() {
        let mut fields = vec![Value::BigInt(1), Value::Null];
        let seeded = seed_version(&mut fields, 1, &versioned_mapping());
        assert!(seeded);
        assert_eq!(fields[1], Value::BigInt(0));
    }

    #[test]
    fn test_seed_version_replaces_negative_sentinel() {
        let mut fields = vec![Value::BigInt(1), Value::BigInt(-1)];
        let seeded = seed_version(&mut fields, 1, &versioned_mapping());
        assert!(seeded);
        assert_eq!(fields[1], Value::BigInt(0));
    }

    #[test]
    fn test_seed_version_keeps_existing_value() {
        let mut fields = vec![Value::BigInt(1), Value::BigInt(5)];
        let seeded = seed_version(&mut fields, 1, &versioned_mapping());
        assert!(!seeded);
        assert_eq!(fields[1], Value::BigInt(5));
    }

    #[test]
    fn test_increment_leaves_current_untouched() {
        let current = Value::BigInt(3);
        let next = increment(&current, &versioned_mapping());
        assert_eq!(next, Value::BigInt(4));
        assert_eq!(current, Value::BigInt(3));
    }

    #[test]
    fn test_collection_change_always_requires_increment() {
        assert!(is_version_increment_required(&[], true, &[false, false]));
    }

    #[test]
    fn test_non_versionable_dirty_attribute_requires_no_increment() {
        let versionability = vec![true, true, false];
        assert!(!is_version_increment_required(&[2], false, &versionability));
    }

    #[test]
    fn test_versionable_dirty_attribute_requires_increment() {
        let versionability = vec![true, true, true];
        assert!(is_version_increment_required(&[2], false, &versionability));
    }

    #[test]
    fn test_no_changes_require_no_increment() {
        assert!(!is_version_increment_required(&[], false, &[true, true]));
    }

    #[test]
    fn test_set_and_get_version_round_trip() {
        let entity = versioned_entity();
        let mut fields = vec![Value::BigInt(1), Value::Null];
        set_version(&mut fields, Value::BigInt(7), &entity);
        assert_eq!(get_version(&fields, &entity), Some(&Value::BigInt(7)));
    }

    #[test]
    fn test_unversioned_entity_is_a_no_op() {
        let entity = EntityMapping::new(
            "Plain",
            "plain",
            vec![AttributeMapping::scalar("id", "id", SqlType::BigInt)],
            0,
        );
        let mut fields = vec![Value::BigInt(1)];
        set_version(&mut fields, Value::BigInt(9), &entity);
        assert_eq!(fields, vec![Value::BigInt(1)]);
        assert_eq!(get_version(&fields, &entity), None);
    }
}
