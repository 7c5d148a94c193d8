//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use taskhub_core::types::{ProjectId, TaskId, UserId};

use super::priority::TaskPriority;
use super::status::TaskStatus;

/// A unit of work inside a project, assigned to one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// The project this task belongs to.
    pub project_id: ProjectId,
    /// The user this task is assigned to.
    pub assignee_id: UserId,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Owning tenant (an admin's user id).
    pub company_id: UserId,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data submitted to create a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Parent project.
    pub project_id: ProjectId,
    /// Assigned user.
    pub assignee_id: UserId,
    /// Priority (defaults to `Medium`).
    #[serde(default)]
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: DateTime<Utc>,
}

/// Partial update of a task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New assignee.
    pub assignee_id: Option<UserId>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
}
