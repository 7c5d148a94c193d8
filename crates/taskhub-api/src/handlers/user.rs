//! User handlers — company directory and profile self-service.

use axum::Json;
use axum::extract::{Path, State};

use taskhub_core::types::UserId;
use taskhub_entity::user::{UpdateProfile, User};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users
pub async fn list_company(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.user_service.list_company(auth.context()).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.get(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<UpdateProfile>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state
        .user_service
        .update_profile(auth.context(), patch)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}
