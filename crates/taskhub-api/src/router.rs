//! Route definitions for the TaskHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(project_routes())
        .merge(task_routes())
        .merge(message_routes())
        .merge(activity_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// User directory and self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_company))
        .route("/users/me", put(handlers::user::update_profile))
        .route("/users/{id}", get(handlers::user::get_user))
}

/// Project CRUD and membership.
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::project::list_projects))
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/{id}", get(handlers::project::get_project))
        .route("/projects/{id}", put(handlers::project::update_project))
        .route("/projects/{id}", delete(handlers::project::delete_project))
        .route(
            "/projects/{id}/members/{user_id}",
            post(handlers::project::add_member),
        )
        .route(
            "/projects/{id}/members/{user_id}",
            delete(handlers::project::remove_member),
        )
}

/// Task CRUD.
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::task::list_tasks))
        .route("/tasks", post(handlers::task::create_task))
        .route("/tasks/{id}", get(handlers::task::get_task))
        .route("/tasks/{id}", put(handlers::task::update_task))
        .route("/tasks/{id}", delete(handlers::task::delete_task))
}

/// Direct messaging.
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(handlers::message::list_own))
        .route("/messages", post(handlers::message::send))
        .route(
            "/messages/user/{user_id}",
            get(handlers::message::list_for_user),
        )
        .route("/messages/{id}", delete(handlers::message::delete))
}

/// Activity trail read endpoints.
fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activities/recent", get(handlers::activity::recent))
        .route(
            "/activities/statistics",
            get(handlers::activity::statistics),
        )
        .route(
            "/activities/project/{id}",
            get(handlers::activity::for_project),
        )
        .route("/activities/task/{id}", get(handlers::activity::for_task))
        .route("/activities/user/{id}", get(handlers::activity::for_actor))
        .route("/activities/{id}", get(handlers::activity::get_activity))
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let allowed = &state.config.server.cors.allowed_origins;

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.contains(&"*".to_string()) {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}
