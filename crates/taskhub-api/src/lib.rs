//! # taskhub-api
//!
//! Axum HTTP layer for TaskHub: router, application state, request
//! extractors, middleware, DTOs, and the `AppError` to HTTP response
//! mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
