//! Store trait seams between the service layer and persistence.
//!
//! Services hold `Arc<dyn Store>` handles; the concrete implementations
//! in [`crate::repositories`] back them with PostgreSQL. The traits are
//! object-safe so tests can substitute in-memory implementations.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ActivityId, MessageId, ProjectId, TaskId, UserId};
use taskhub_entity::activity::{
    ActivityCount, ActivityFilter, ActivityRecord, ActivityWithActor, DateRange, NewActivity,
};
use taskhub_entity::message::Message;
use taskhub_entity::project::Project;
use taskhub_entity::task::Task;
use taskhub_entity::user::User;

/// Append-only store for the activity trail.
///
/// No update or delete operation exists by design; records are immutable
/// once appended.
#[async_trait]
pub trait ActivityStore: Send + Sync + 'static {
    /// Append exactly one new record. `created_at` is store-assigned.
    async fn append(&self, activity: NewActivity) -> AppResult<ActivityRecord>;

    /// Fetch one record with its actor hydrated. No tenant check here —
    /// the query service enforces that at its own boundary.
    async fn find_by_id(&self, id: ActivityId) -> AppResult<Option<ActivityWithActor>>;

    /// Search records matching the filter, newest first, with actor
    /// hydration and pagination.
    async fn search(
        &self,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityWithActor>>;

    /// First-level statistics aggregation: count records grouped by
    /// `(entity_type, action)` within the tenant, optionally bounded by
    /// an inclusive date range on `created_at`.
    async fn count_by_entity_and_action(
        &self,
        company_id: UserId,
        range: Option<DateRange>,
    ) -> AppResult<Vec<ActivityCount>>;
}

/// Store for projects.
#[async_trait]
pub trait ProjectStore: Send + Sync + 'static {
    /// Persist a new project.
    async fn insert(&self, project: &Project) -> AppResult<Project>;

    /// Fetch a project by id.
    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>>;

    /// Replace all mutable fields of an existing project.
    async fn update(&self, project: &Project) -> AppResult<Project>;

    /// Delete a project. Returns `true` if a row was removed.
    async fn delete(&self, id: ProjectId) -> AppResult<bool>;

    /// List projects in a tenant, newest first. When `visible_to` is
    /// set, only projects managed by or including that user are returned.
    async fn list(
        &self,
        company_id: UserId,
        visible_to: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>>;
}

/// Store for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Persist a new task.
    async fn insert(&self, task: &Task) -> AppResult<Task>;

    /// Fetch a task by id.
    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>>;

    /// Replace all mutable fields of an existing task.
    async fn update(&self, task: &Task) -> AppResult<Task>;

    /// Delete a task. Returns `true` if a row was removed.
    async fn delete(&self, id: TaskId) -> AppResult<bool>;

    /// List tasks in a tenant, newest first, optionally narrowed to one
    /// project and/or one assignee.
    async fn list(
        &self,
        company_id: UserId,
        project_id: Option<ProjectId>,
        assignee_id: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Task>>;
}

/// Store for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user.
    async fn insert(&self, user: &User) -> AppResult<User>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Fetch a user by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Replace mutable fields of an existing user.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// List all members of a company (the owning admin plus employees),
    /// excluding one user (typically the caller).
    async fn list_company(&self, company_id: UserId, exclude: UserId) -> AppResult<Vec<User>>;
}

/// Store for direct messages.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Persist a new message.
    async fn insert(&self, message: &Message) -> AppResult<Message>;

    /// Fetch a message by id.
    async fn find_by_id(&self, id: MessageId) -> AppResult<Option<Message>>;

    /// List all messages sent or received by a user within a tenant,
    /// newest first.
    async fn list_for_user(&self, company_id: UserId, user_id: UserId)
    -> AppResult<Vec<Message>>;

    /// Delete a message. Returns `true` if a row was removed.
    async fn delete(&self, id: MessageId) -> AppResult<bool>;
}
