//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use taskhub_core::types::{ProjectId, UserId};

use super::status::ProjectStatus;

/// A project owned by a company, managed by one user, worked on by members.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Completion percentage, 0–100.
    pub progress: i32,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// The user managing this project.
    pub manager_id: UserId,
    /// Team members. Non-admins only see projects they belong to.
    pub member_ids: Vec<UserId>,
    /// Owning tenant (an admin's user id).
    pub company_id: UserId,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Whether the given user manages or is a member of this project.
    pub fn involves(&self, user_id: UserId) -> bool {
        self.manager_id == user_id || self.member_ids.contains(&user_id)
    }
}

/// Data submitted to create a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Planned end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Initial team members.
    #[serde(default)]
    pub member_ids: Vec<UserId>,
}

/// Partial update of a project. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New start date.
    pub start_date: Option<DateTime<Utc>>,
    /// New end date.
    pub end_date: Option<DateTime<Utc>>,
    /// New progress percentage.
    pub progress: Option<i32>,
    /// New status.
    pub status: Option<ProjectStatus>,
}
