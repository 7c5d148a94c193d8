//! Task handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use taskhub_core::types::{ProjectId, TaskId, UserId};
use taskhub_entity::task::{NewTask, Task, TaskPatch};

use crate::dto::response::{ApiResponse, MessageResponse, PagedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Filter query parameters for task listings. Pagination is extracted
/// separately via [`PaginationParams`].
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    /// Narrow to one project.
    pub project_id: Option<ProjectId>,
    /// Narrow to one assignee.
    pub assignee_id: Option<UserId>,
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<PagedResponse<Task>>, ApiError> {
    let tasks = state
        .task_service
        .list(
            auth.context(),
            query.project_id,
            query.assignee_id,
            &params.into_page_request(),
        )
        .await?;
    Ok(Json(tasks.into()))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewTask>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.task_service.create(auth.context(), req).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.task_service.get(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.task_service.update(auth.context(), id, patch).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.task_service.delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Task deleted"))))
}
