//! Activity record entity model and query shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use taskhub_core::types::{ActivityId, UserId};

use super::action::{ActivityAction, EntityKind};
use super::snapshot::ChangeSet;

/// One immutable entry in the append-only activity trail.
///
/// Records are never mutated or deleted once written; the application
/// only appends and reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityRecord {
    /// Unique activity identifier.
    pub id: ActivityId,
    /// The user who performed the action.
    pub actor_id: UserId,
    /// The action performed.
    pub action: ActivityAction,
    /// The type of the affected entity.
    pub entity_type: EntityKind,
    /// The affected entity's id. Opaque — not validated against the
    /// entity type's table.
    pub entity_id: Uuid,
    /// Human-readable description, e.g. `"Updated project: Website Redesign"`.
    pub description: String,
    /// Optional before/after snapshot of the entity state.
    pub changes: Option<Json<ChangeSet>>,
    /// Owning tenant (an admin's user id). Scopes every query.
    pub company_id: UserId,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
    /// The acting user.
    pub actor_id: UserId,
    /// The action performed.
    pub action: ActivityAction,
    /// Affected entity type.
    pub entity_type: EntityKind,
    /// Affected entity id.
    pub entity_id: Uuid,
    /// Human-readable description.
    pub description: String,
    /// Optional before/after changeset.
    pub changes: Option<ChangeSet>,
    /// Resolved tenant.
    pub company_id: UserId,
}

/// Minimal actor info hydrated into activity reads for human review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorSummary {
    /// The actor's user id.
    pub id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

/// An activity record with its actor reference hydrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityWithActor {
    /// The underlying record.
    #[serde(flatten)]
    pub record: ActivityRecord,
    /// The acting user, if the account still exists.
    pub actor: Option<ActorSummary>,
}

/// Exact-match filters for activity searches, combined with AND.
/// The tenant is always present; everything else is optional.
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    /// Tenant scope (required).
    pub company_id: UserId,
    /// Narrow to one entity type.
    pub entity_type: Option<EntityKind>,
    /// Narrow to one action.
    pub action: Option<ActivityAction>,
    /// Narrow to one acting user.
    pub actor_id: Option<UserId>,
    /// Narrow to one specific entity instance.
    pub entity_id: Option<Uuid>,
}

impl ActivityFilter {
    /// A filter that only scopes by tenant.
    pub fn for_tenant(company_id: UserId) -> Self {
        Self {
            company_id,
            entity_type: None,
            action: None,
            actor_id: None,
            entity_id: None,
        }
    }
}

/// Inclusive `created_at` bounds for statistics queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end: DateTime<Utc>,
}

/// One `(entity_type, action)` count from the first aggregation level.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityCount {
    /// Entity type.
    pub entity_type: EntityKind,
    /// Action.
    pub action: ActivityAction,
    /// Number of matching records.
    pub count: i64,
}

/// Per-action count within one entity type's summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCount {
    /// Action.
    pub action: ActivityAction,
    /// Number of matching records.
    pub count: i64,
}

/// Second-level aggregation: all action counts for one entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityActivitySummary {
    /// Entity type.
    pub entity_type: EntityKind,
    /// Per-action counts.
    pub actions: Vec<ActionCount>,
    /// Sum of all action counts for this entity type.
    pub total_count: i64,
}
