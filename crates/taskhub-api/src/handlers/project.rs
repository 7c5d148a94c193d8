//! Project handlers — CRUD and team membership.

use axum::Json;
use axum::extract::{Path, Query, State};

use taskhub_core::types::{ProjectId, UserId};
use taskhub_entity::project::{NewProject, Project, ProjectPatch};

use crate::dto::response::{ApiResponse, MessageResponse, PagedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PagedResponse<Project>>, ApiError> {
    let page = state
        .project_service
        .list(auth.context(), &params.into_page_request())
        .await?;
    Ok(Json(page.into()))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewProject>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.project_service.create(auth.context(), req).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.project_service.get(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state
        .project_service
        .update(auth.context(), id, patch)
        .await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.project_service.delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Project deleted",
    ))))
}

/// POST /api/projects/{id}/members/{user_id}
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(ProjectId, UserId)>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state
        .project_service
        .add_member(auth.context(), id, user_id)
        .await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(ProjectId, UserId)>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state
        .project_service
        .remove_member(auth.context(), id, user_id)
        .await?;
    Ok(Json(ApiResponse::ok(project)))
}
