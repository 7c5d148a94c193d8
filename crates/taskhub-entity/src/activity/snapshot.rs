//! Schema-versioned entity snapshots for activity diffs.
//!
//! A [`Snapshot`] is a flat key-value capture of an entity's serialized
//! state, tagged with a schema version so consumers can render diffs
//! without per-entity-type branching. A [`ChangeSet`] pairs the snapshot
//! taken before a mutation with the one taken after.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use taskhub_core::{AppError, AppResult};

/// Current snapshot schema version.
pub const SNAPSHOT_SCHEMA_VERSION: u16 = 1;

/// A point-in-time capture of one entity's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Version of the snapshot format itself.
    pub schema_version: u16,
    /// The entity's serialized fields.
    pub fields: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Capture a snapshot of any serializable entity.
    ///
    /// The entity must serialize to a JSON object; its top-level fields
    /// become the snapshot's key-value map.
    pub fn capture<T: Serialize>(entity: &T) -> AppResult<Self> {
        let value = serde_json::to_value(entity)?;
        match value {
            Value::Object(map) => Ok(Self {
                schema_version: SNAPSHOT_SCHEMA_VERSION,
                fields: map.into_iter().collect(),
            }),
            other => Err(AppError::validation(format!(
                "Snapshot source must serialize to an object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Look up a captured field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// The before/after state captured around a mutation.
///
/// - create: `after` only
/// - update: `before` and `after`
/// - delete: `before` only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Entity state strictly prior to the mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Snapshot>,
    /// Entity state after the mutation was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Snapshot>,
}

impl ChangeSet {
    /// Changeset for a create: the stored entity's state.
    pub fn created(after: Snapshot) -> Self {
        Self {
            before: None,
            after: Some(after),
        }
    }

    /// Changeset for an update: full pre- and post-mutation state.
    pub fn updated(before: Snapshot, after: Snapshot) -> Self {
        Self {
            before: Some(before),
            after: Some(after),
        }
    }

    /// Changeset for a delete: the last known state.
    pub fn deleted(before: Snapshot) -> Self {
        Self {
            before: Some(before),
            after: None,
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        progress: i32,
    }

    #[test]
    fn test_capture_flattens_fields() {
        let snap = Snapshot::capture(&Sample {
            name: "Website Redesign",
            progress: 40,
        })
        .unwrap();
        assert_eq!(snap.schema_version, SNAPSHOT_SCHEMA_VERSION);
        assert_eq!(snap.field("name"), Some(&json!("Website Redesign")));
        assert_eq!(snap.field("progress"), Some(&json!(40)));
    }

    #[test]
    fn test_capture_rejects_non_objects() {
        assert!(Snapshot::capture(&42).is_err());
        assert!(Snapshot::capture(&vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_changeset_shapes() {
        let snap = Snapshot::capture(&Sample {
            name: "a",
            progress: 0,
        })
        .unwrap();

        let created = ChangeSet::created(snap.clone());
        assert!(created.before.is_none() && created.after.is_some());

        let deleted = ChangeSet::deleted(snap.clone());
        assert!(deleted.before.is_some() && deleted.after.is_none());

        let updated = ChangeSet::updated(snap.clone(), snap);
        assert!(updated.before.is_some() && updated.after.is_some());
    }

    #[test]
    fn test_serde_roundtrip_through_json() {
        let snap = Snapshot::capture(&Sample {
            name: "a",
            progress: 1,
        })
        .unwrap();
        let set = ChangeSet::updated(snap.clone(), snap);
        let value = serde_json::to_value(&set).unwrap();
        let back: ChangeSet = serde_json::from_value(value).unwrap();
        assert_eq!(back, set);
    }
}
