//! User directory and profile self-service, audited through the
//! activity trail.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use taskhub_core::types::UserId;
use taskhub_core::{AppError, AppResult};
use taskhub_database::UserStore;
use taskhub_entity::activity::{ActivityAction, ChangeSet, EntityKind};
use taskhub_entity::user::{UpdateProfile, User};

use crate::activity::ActivityRecorder;
use crate::activity::recorder::capture_snapshot;
use crate::context::ActorContext;

/// Handles user lookups and profile updates.
#[derive(Clone)]
pub struct UserService {
    /// User persistence.
    store: Arc<dyn UserStore>,
    /// Activity trail writer.
    recorder: ActivityRecorder,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(store: Arc<dyn UserStore>, recorder: ActivityRecorder) -> Self {
        Self { store, recorder }
    }

    /// Fetches a user in the caller's company.
    pub async fn get(&self, ctx: &ActorContext, id: UserId) -> AppResult<User> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if user.company_id.unwrap_or(user.id) != ctx.tenant_id {
            return Err(AppError::authorization(
                "You do not have access to this user",
            ));
        }
        Ok(user)
    }

    /// Lists everyone in the caller's company except the caller.
    pub async fn list_company(&self, ctx: &ActorContext) -> AppResult<Vec<User>> {
        self.store.list_company(ctx.tenant_id, ctx.user_id).await
    }

    /// Updates the caller's own profile and records an `update`
    /// activity with the pre- and post-mutation state.
    pub async fn update_profile(
        &self,
        ctx: &ActorContext,
        patch: UpdateProfile,
    ) -> AppResult<User> {
        let mut user = self
            .store
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let before = capture_snapshot(&user);

        if let Some(first_name) = patch.first_name {
            if first_name.trim().is_empty() {
                return Err(AppError::validation("First name cannot be empty"));
            }
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            if last_name.trim().is_empty() {
                return Err(AppError::validation("Last name cannot be empty"));
            }
            user.last_name = last_name;
        }
        if let Some(email) = patch.email {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email format"));
            }
            if let Some(existing) = self.store.find_by_email(&email).await? {
                if existing.id != ctx.user_id {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
            user.email = email;
        }
        if let Some(department) = patch.department {
            user.department = Some(department);
        }
        user.updated_at = Utc::now();

        let updated = self.store.update(&user).await?;
        info!(user_id = %ctx.user_id, "Profile updated");

        let changes = match (before, capture_snapshot(&updated)) {
            (Some(before), Some(after)) => Some(ChangeSet::updated(before, after)),
            _ => None,
        };
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Update,
                EntityKind::User,
                updated.id.into_uuid(),
                format!("Updated profile: {}", updated.full_name()),
                changes,
            )
            .await;

        Ok(updated)
    }
}
