//! Shared type definitions: identifiers and pagination.

pub mod id;
pub mod pagination;

pub use id::{ActivityId, MessageId, ProjectId, TaskId, UserId};
pub use pagination::{PageRequest, PageResponse};
