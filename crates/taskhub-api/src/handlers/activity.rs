//! Activity trail handlers — the read side of the audit log.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use taskhub_core::error::AppError;
use taskhub_core::types::{ActivityId, ProjectId, TaskId, UserId};
use taskhub_entity::activity::{
    ActivityAction, ActivityWithActor, DateRange, EntityActivitySummary, EntityKind,
};
use taskhub_service::RecentFilter;

use crate::dto::response::{ApiResponse, PagedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Filter query parameters for the recent-activity feed. Pagination is
/// extracted separately via [`PaginationParams`].
#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    /// Narrow to one entity type.
    pub entity_type: Option<String>,
    /// Narrow to one action.
    pub action: Option<String>,
    /// Narrow to one acting user.
    pub user_id: Option<UserId>,
}

/// Query parameters for activity statistics.
#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    /// Inclusive lower bound on `created_at`.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub end_date: Option<DateTime<Utc>>,
}

impl StatisticsQuery {
    /// Both bounds or neither; a half-open range is a client error.
    fn into_range(self) -> Result<Option<DateRange>, AppError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(AppError::validation("start_date must not exceed end_date"));
                }
                Ok(Some(DateRange { start, end }))
            }
            (None, None) => Ok(None),
            _ => Err(AppError::validation(
                "start_date and end_date must be provided together",
            )),
        }
    }
}

/// GET /api/activities/recent
pub async fn recent(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<PagedResponse<ActivityWithActor>>, ApiError> {
    let filter = RecentFilter {
        entity_type: query
            .entity_type
            .as_deref()
            .map(|s| s.parse::<EntityKind>())
            .transpose()
            .map_err(ApiError::from)?,
        action: query
            .action
            .as_deref()
            .map(|s| s.parse::<ActivityAction>())
            .transpose()
            .map_err(ApiError::from)?,
        actor_id: query.user_id,
    };
    let activities = state
        .activity_query
        .recent(auth.context(), filter, &params.into_page_request())
        .await?;
    Ok(Json(activities.into()))
}

/// GET /api/activities/statistics
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<ApiResponse<Vec<EntityActivitySummary>>>, ApiError> {
    let range = query.into_range()?;
    let summaries = state
        .activity_query
        .statistics(auth.context(), range)
        .await?;
    Ok(Json(ApiResponse::ok(summaries)))
}

/// GET /api/activities/project/{id}
pub async fn for_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PagedResponse<ActivityWithActor>>, ApiError> {
    let page = state
        .activity_query
        .for_entity(
            auth.context(),
            EntityKind::Project,
            id.into_uuid(),
            &params.into_page_request(),
        )
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/activities/task/{id}
pub async fn for_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PagedResponse<ActivityWithActor>>, ApiError> {
    let page = state
        .activity_query
        .for_entity(
            auth.context(),
            EntityKind::Task,
            id.into_uuid(),
            &params.into_page_request(),
        )
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/activities/user/{id}
pub async fn for_actor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PagedResponse<ActivityWithActor>>, ApiError> {
    let page = state
        .activity_query
        .for_actor(auth.context(), id, &params.into_page_request())
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/activities/{id}
pub async fn get_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ActivityId>,
) -> Result<Json<ApiResponse<ActivityWithActor>>, ApiError> {
    let activity = state.activity_query.get(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(activity)))
}
