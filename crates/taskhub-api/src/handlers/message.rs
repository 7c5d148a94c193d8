//! Message handlers.

use axum::Json;
use axum::extract::{Path, State};

use taskhub_core::types::{MessageId, UserId};
use taskhub_entity::message::{Message, NewMessage};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/messages
pub async fn list_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Message>>>, ApiError> {
    let messages = state.message_service.list_for_caller(auth.context()).await?;
    Ok(Json(ApiResponse::ok(messages)))
}

/// POST /api/messages
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewMessage>,
) -> Result<Json<ApiResponse<Message>>, ApiError> {
    let message = state.message_service.send(auth.context(), req).await?;
    Ok(Json(ApiResponse::ok(message)))
}

/// GET /api/messages/user/{user_id}
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<ApiResponse<Vec<Message>>>, ApiError> {
    let messages = state
        .message_service
        .list_for_user(auth.context(), user_id)
        .await?;
    Ok(Json(ApiResponse::ok(messages)))
}

/// DELETE /api/messages/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<MessageId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.message_service.delete(auth.context(), id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Message deleted"))))
}
