//! # taskhub-service
//!
//! Business logic service layer for TaskHub. Each service orchestrates
//! stores and authentication to implement application-level use cases,
//! and every business mutation is mirrored into the append-only
//! activity trail.
//!
//! Services follow constructor injection — all dependencies are
//! provided at construction time as `Arc<dyn Store>` handles.

pub mod activity;
pub mod auth;
pub mod context;
pub mod message;
pub mod project;
pub mod task;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use activity::{ActivityQueryService, ActivityRecorder, RecentFilter};
pub use auth::{AuthService, AuthSession, RegisterUser};
pub use context::ActorContext;
pub use message::MessageService;
pub use project::ProjectService;
pub use task::TaskService;
pub use user::UserService;
