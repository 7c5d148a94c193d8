//! Read side of the activity trail.

use std::sync::Arc;

use uuid::Uuid;

use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ActivityId, UserId};
use taskhub_core::{AppError, AppResult};
use taskhub_database::ActivityStore;
use taskhub_entity::activity::{
    ActionCount, ActivityAction, ActivityCount, ActivityFilter, ActivityWithActor, DateRange,
    EntityActivitySummary, EntityKind,
};

use crate::context::ActorContext;

/// Optional exact-match filters for the recent-activity feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentFilter {
    /// Narrow to one entity type.
    pub entity_type: Option<EntityKind>,
    /// Narrow to one action.
    pub action: Option<ActivityAction>,
    /// Narrow to one acting user.
    pub actor_id: Option<UserId>,
}

/// Tenant-scoped queries over the activity trail.
///
/// Every read filters on the caller's resolved tenant; nothing in this
/// service can observe another tenant's records.
#[derive(Clone)]
pub struct ActivityQueryService {
    store: Arc<dyn ActivityStore>,
}

impl ActivityQueryService {
    /// Creates a new query service.
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Most recent activity in the caller's tenant, newest first, with
    /// optional exact-match narrowing combined with AND.
    pub async fn recent(
        &self,
        ctx: &ActorContext,
        filter: RecentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityWithActor>> {
        let filter = ActivityFilter {
            company_id: ctx.tenant_id,
            entity_type: filter.entity_type,
            action: filter.action,
            actor_id: filter.actor_id,
            entity_id: None,
        };
        self.store.search(&filter, page).await
    }

    /// Full history of one entity, newest first.
    pub async fn for_entity(
        &self,
        ctx: &ActorContext,
        entity_type: EntityKind,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityWithActor>> {
        let filter = ActivityFilter {
            entity_type: Some(entity_type),
            entity_id: Some(entity_id),
            ..ActivityFilter::for_tenant(ctx.tenant_id)
        };
        self.store.search(&filter, page).await
    }

    /// Everything one user has done within the caller's tenant.
    pub async fn for_actor(
        &self,
        ctx: &ActorContext,
        actor_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityWithActor>> {
        let filter = ActivityFilter {
            actor_id: Some(actor_id),
            ..ActivityFilter::for_tenant(ctx.tenant_id)
        };
        self.store.search(&filter, page).await
    }

    /// Fetches a single record by id.
    ///
    /// The tenant check happens here, at the read boundary: a record
    /// belonging to another tenant yields an authorization error, not
    /// a not-found, because the record exists but the caller may not
    /// see it.
    pub async fn get(&self, ctx: &ActorContext, id: ActivityId) -> AppResult<ActivityWithActor> {
        let activity = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Activity not found"))?;

        if activity.record.company_id != ctx.tenant_id {
            return Err(AppError::authorization(
                "You do not have access to this activity",
            ));
        }

        Ok(activity)
    }

    /// Aggregated activity statistics for the caller's tenant,
    /// optionally bounded by an inclusive date range.
    pub async fn statistics(
        &self,
        ctx: &ActorContext,
        range: Option<DateRange>,
    ) -> AppResult<Vec<EntityActivitySummary>> {
        let counts = self
            .store
            .count_by_entity_and_action(ctx.tenant_id, range)
            .await?;
        Ok(regroup(counts))
    }
}

/// Folds flat `(entity_type, action, count)` rows into one summary per
/// entity type, preserving the incoming row order.
fn regroup(counts: Vec<ActivityCount>) -> Vec<EntityActivitySummary> {
    let mut summaries: Vec<EntityActivitySummary> = Vec::new();
    for row in counts {
        let summary = match summaries
            .iter_mut()
            .find(|s| s.entity_type == row.entity_type)
        {
            Some(existing) => existing,
            None => {
                summaries.push(EntityActivitySummary {
                    entity_type: row.entity_type,
                    actions: Vec::new(),
                    total_count: 0,
                });
                summaries.last_mut().unwrap()
            }
        };
        summary.actions.push(ActionCount {
            action: row.action,
            count: row.count,
        });
        summary.total_count += row.count;
    }
    summaries
}
