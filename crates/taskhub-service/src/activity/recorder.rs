//! Append-only activity writer.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use taskhub_core::AppResult;
use taskhub_database::ActivityStore;
use taskhub_entity::activity::{
    ActivityAction, ActivityRecord, ChangeSet, EntityKind, NewActivity, Snapshot,
};

use crate::context::ActorContext;

/// Captures an entity snapshot for an audit changeset.
///
/// Snapshots feed best-effort audit writes, so a capture failure is
/// logged and produces `None` instead of failing the mutation.
pub fn capture_snapshot<T: serde::Serialize>(entity: &T) -> Option<Snapshot> {
    match Snapshot::capture(entity) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "Failed to capture entity snapshot");
            None
        }
    }
}

/// Writes records to the activity trail.
///
/// Every business mutation goes through here; the recorder derives the
/// tenant from the acting context so callers cannot write into another
/// tenant's trail.
#[derive(Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
}

impl ActivityRecorder {
    /// Creates a new recorder.
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Appends exactly one activity record and returns it as persisted,
    /// with the store-assigned id and timestamp.
    pub async fn record(
        &self,
        ctx: &ActorContext,
        action: ActivityAction,
        entity_type: EntityKind,
        entity_id: Uuid,
        description: impl Into<String>,
        changes: Option<ChangeSet>,
    ) -> AppResult<ActivityRecord> {
        self.store
            .append(NewActivity {
                actor_id: ctx.user_id,
                action,
                entity_type,
                entity_id,
                description: description.into(),
                changes,
                company_id: ctx.tenant_id,
            })
            .await
    }

    /// Appends an activity record after an already-committed primary
    /// mutation. A failed audit write must never fail the business
    /// operation it describes, so errors are logged and swallowed.
    pub async fn record_best_effort(
        &self,
        ctx: &ActorContext,
        action: ActivityAction,
        entity_type: EntityKind,
        entity_id: Uuid,
        description: impl Into<String>,
        changes: Option<ChangeSet>,
    ) {
        if let Err(e) = self
            .record(ctx, action, entity_type, entity_id, description, changes)
            .await
        {
            warn!(
                actor_id = %ctx.user_id,
                %action,
                entity = %entity_type,
                %entity_id,
                error = %e,
                "Failed to record activity"
            );
        }
    }
}
