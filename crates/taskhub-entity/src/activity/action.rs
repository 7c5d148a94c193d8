//! Closed enumerations for the activity trail.
//!
//! Both enums reject unknown values at construction time instead of
//! relying on database schema enforcement alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use taskhub_core::AppError;

/// The kind of action an activity record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// A new entity was created.
    Create,
    /// An existing entity was modified.
    Update,
    /// An entity was deleted.
    Delete,
    /// A user signed in.
    Login,
    /// A user signed out.
    Logout,
}

impl ActivityAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            _ => Err(AppError::validation(format!(
                "Invalid activity action: '{s}'. Expected one of: create, update, delete, login, logout"
            ))),
        }
    }
}

/// The type of entity an activity record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_entity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A task.
    Task,
    /// A project.
    Project,
    /// A user account (profile edits, login/logout).
    User,
    /// A comment on a task or project.
    Comment,
}

impl EntityKind {
    /// Return the entity kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::User => "user",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "project" => Ok(Self::Project),
            "user" => Ok(Self::User),
            "comment" => Ok(Self::Comment),
            _ => Err(AppError::validation(format!(
                "Invalid entity type: '{s}'. Expected one of: task, project, user, comment"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str_rejects_unknown() {
        assert_eq!(
            "create".parse::<ActivityAction>().unwrap(),
            ActivityAction::Create
        );
        assert!("archive".parse::<ActivityAction>().is_err());
    }

    #[test]
    fn test_entity_kind_from_str_rejects_unknown() {
        assert_eq!("project".parse::<EntityKind>().unwrap(), EntityKind::Project);
        // "profile" was never part of the persisted schema's set
        assert!("profile".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ActivityAction::Delete).unwrap(),
            "\"delete\""
        );
        assert_eq!(serde_json::to_string(&EntityKind::Task).unwrap(), "\"task\"");
    }
}
