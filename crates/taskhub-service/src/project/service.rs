//! Project CRUD and team membership, audited through the activity trail.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ProjectId, UserId};
use taskhub_core::{AppError, AppResult};
use taskhub_database::{ProjectStore, UserStore};
use taskhub_entity::activity::{ActivityAction, ChangeSet, EntityKind};
use taskhub_entity::project::{NewProject, Project, ProjectPatch, ProjectStatus};

use crate::activity::ActivityRecorder;
use crate::activity::recorder::capture_snapshot;
use crate::context::ActorContext;

/// Handles project lifecycle and team membership.
#[derive(Clone)]
pub struct ProjectService {
    /// Project persistence.
    store: Arc<dyn ProjectStore>,
    /// User lookups for membership changes.
    users: Arc<dyn UserStore>,
    /// Activity trail writer.
    recorder: ActivityRecorder,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        store: Arc<dyn ProjectStore>,
        users: Arc<dyn UserStore>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            store,
            users,
            recorder,
        }
    }

    /// Creates a project managed by the caller and records a `create`
    /// activity with a snapshot of the stored state.
    pub async fn create(&self, ctx: &ActorContext, req: NewProject) -> AppResult<Project> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Project name cannot be empty"));
        }

        let now = Utc::now();
        let project = Project {
            id: ProjectId::new(),
            name: req.name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            progress: 0,
            status: ProjectStatus::Active,
            manager_id: ctx.user_id,
            member_ids: req.member_ids,
            company_id: ctx.tenant_id,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(&project).await?;
        info!(project_id = %stored.id, name = %stored.name, "Project created");

        let changes = capture_snapshot(&stored).map(ChangeSet::created);
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Create,
                EntityKind::Project,
                stored.id.into_uuid(),
                format!("Created new project: {}", stored.name),
                changes,
            )
            .await;

        Ok(stored)
    }

    /// Fetches a project the caller may see.
    pub async fn get(&self, ctx: &ActorContext, id: ProjectId) -> AppResult<Project> {
        let project = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        self.authorize_read(ctx, &project)?;
        Ok(project)
    }

    /// Lists the caller's visible projects, newest first. Admins see
    /// the whole tenant; everyone else only projects they belong to.
    pub async fn list(
        &self,
        ctx: &ActorContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        let visible_to = (!ctx.is_admin()).then_some(ctx.user_id);
        self.store.list(ctx.tenant_id, visible_to, page).await
    }

    /// Applies a partial update and records an `update` activity whose
    /// changeset carries the state read before the mutation and the
    /// stored state after it.
    pub async fn update(
        &self,
        ctx: &ActorContext,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> AppResult<Project> {
        let mut project = self.get(ctx, id).await?;
        self.authorize_manage(ctx, &project)?;

        let before = capture_snapshot(&project);

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Project name cannot be empty"));
            }
            project.name = name;
        }
        if let Some(description) = patch.description {
            project.description = Some(description);
        }
        if let Some(start_date) = patch.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            project.end_date = Some(end_date);
        }
        if let Some(progress) = patch.progress {
            if !(0..=100).contains(&progress) {
                return Err(AppError::validation("Progress must be between 0 and 100"));
            }
            project.progress = progress;
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        project.updated_at = Utc::now();

        let updated = self.store.update(&project).await?;
        info!(project_id = %updated.id, "Project updated");

        let changes = match (before, capture_snapshot(&updated)) {
            (Some(before), Some(after)) => Some(ChangeSet::updated(before, after)),
            _ => None,
        };
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Update,
                EntityKind::Project,
                updated.id.into_uuid(),
                format!("Updated project: {}", updated.name),
                changes,
            )
            .await;

        Ok(updated)
    }

    /// Deletes a project and records a `delete` activity carrying the
    /// last known state.
    pub async fn delete(&self, ctx: &ActorContext, id: ProjectId) -> AppResult<()> {
        let project = self.get(ctx, id).await?;
        self.authorize_manage(ctx, &project)?;

        let before = capture_snapshot(&project);

        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Project not found"));
        }
        info!(project_id = %id, name = %project.name, "Project deleted");

        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Delete,
                EntityKind::Project,
                id.into_uuid(),
                format!("Deleted project: {}", project.name),
                before.map(ChangeSet::deleted),
            )
            .await;

        Ok(())
    }

    /// Adds a company user to the project team.
    pub async fn add_member(
        &self,
        ctx: &ActorContext,
        id: ProjectId,
        user_id: UserId,
    ) -> AppResult<Project> {
        let mut project = self.get(ctx, id).await?;
        self.authorize_manage(ctx, &project)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let user_tenant = user.company_id.unwrap_or(user.id);
        if user_tenant != ctx.tenant_id {
            return Err(AppError::authorization(
                "User does not belong to this company",
            ));
        }

        if project.member_ids.contains(&user_id) {
            return Err(AppError::conflict("User is already a team member"));
        }

        let before = capture_snapshot(&project);
        project.member_ids.push(user_id);
        project.updated_at = Utc::now();

        let updated = self.store.update(&project).await?;

        let changes = match (before, capture_snapshot(&updated)) {
            (Some(before), Some(after)) => Some(ChangeSet::updated(before, after)),
            _ => None,
        };
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Update,
                EntityKind::Project,
                updated.id.into_uuid(),
                format!("Added {} to project: {}", user.full_name(), updated.name),
                changes,
            )
            .await;

        Ok(updated)
    }

    /// Removes a user from the project team.
    pub async fn remove_member(
        &self,
        ctx: &ActorContext,
        id: ProjectId,
        user_id: UserId,
    ) -> AppResult<Project> {
        let mut project = self.get(ctx, id).await?;
        self.authorize_manage(ctx, &project)?;

        if !project.member_ids.contains(&user_id) {
            return Err(AppError::not_found("User is not a member of this project"));
        }

        let description = match self.users.find_by_id(user_id).await? {
            Some(user) => format!(
                "Removed {} from project: {}",
                user.full_name(),
                project.name
            ),
            None => format!("Removed a team member from project: {}", project.name),
        };

        let before = capture_snapshot(&project);
        project.member_ids.retain(|m| *m != user_id);
        project.updated_at = Utc::now();

        let updated = self.store.update(&project).await?;

        let changes = match (before, capture_snapshot(&updated)) {
            (Some(before), Some(after)) => Some(ChangeSet::updated(before, after)),
            _ => None,
        };
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Update,
                EntityKind::Project,
                updated.id.into_uuid(),
                description,
                changes,
            )
            .await;

        Ok(updated)
    }

    /// Read access: same tenant, and non-admins must be on the team.
    fn authorize_read(&self, ctx: &ActorContext, project: &Project) -> AppResult<()> {
        if project.company_id != ctx.tenant_id {
            return Err(AppError::authorization(
                "You do not have access to this project",
            ));
        }
        if !ctx.is_admin() && !project.involves(ctx.user_id) {
            return Err(AppError::authorization(
                "You do not have access to this project",
            ));
        }
        Ok(())
    }

    /// Mutation access: admins, or the managing user.
    fn authorize_manage(&self, ctx: &ActorContext, project: &Project) -> AppResult<()> {
        if ctx.is_admin() || project.manager_id == ctx.user_id {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only the project manager can modify this project",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FailingActivityStore, MemoryActivityStore, MemoryProjectStore, MemoryUserStore, make_user,
    };
    use serde_json::json;
    use taskhub_core::error::ErrorKind;
    use taskhub_entity::activity::ActivityAction;
    use taskhub_entity::user::UserRole;

    struct Fixture {
        activities: Arc<MemoryActivityStore>,
        users: Arc<MemoryUserStore>,
        service: ProjectService,
    }

    fn fixture() -> Fixture {
        let activities = Arc::new(MemoryActivityStore::new());
        let projects = Arc::new(MemoryProjectStore::new());
        let users = Arc::new(MemoryUserStore::new());
        let service = ProjectService::new(
            projects,
            users.clone(),
            ActivityRecorder::new(activities.clone()),
        );
        Fixture {
            activities,
            users,
            service,
        }
    }

    async fn admin(f: &Fixture) -> (ActorContext, taskhub_entity::user::User) {
        let user = make_user(UserRole::Admin, None);
        f.users.insert(&user).await.unwrap();
        (ActorContext::new(user.id, user.role, user.company_id), user)
    }

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: None,
            start_date: None,
            end_date: None,
            member_ids: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_records_activity_with_stored_snapshot() {
        let f = fixture();
        let (ctx, _) = admin(&f).await;

        let project = f
            .service
            .create(&ctx, new_project("Website Redesign"))
            .await
            .unwrap();

        let trail = f.activities.all();
        assert_eq!(trail.len(), 1);
        let record = &trail[0];
        assert_eq!(record.action, ActivityAction::Create);
        assert_eq!(record.entity_type, EntityKind::Project);
        assert_eq!(record.entity_id, project.id.into_uuid());
        assert_eq!(record.actor_id, ctx.user_id);
        assert_eq!(record.description, "Created new project: Website Redesign");

        let changes = &record.changes.as_ref().unwrap().0;
        assert!(changes.before.is_none());
        let after = changes.after.as_ref().unwrap();
        assert_eq!(after.field("name"), Some(&json!("Website Redesign")));
    }

    #[tokio::test]
    async fn test_update_changeset_before_is_premutation_state() {
        let f = fixture();
        let (ctx, _) = admin(&f).await;
        let project = f.service.create(&ctx, new_project("Old Name")).await.unwrap();

        let patch = ProjectPatch {
            name: Some("New Name".to_string()),
            progress: Some(40),
            ..ProjectPatch::default()
        };
        f.service.update(&ctx, project.id, patch).await.unwrap();

        let trail = f.activities.all();
        let record = trail.last().unwrap();
        assert_eq!(record.action, ActivityAction::Update);
        let changes = &record.changes.as_ref().unwrap().0;
        let before = changes.before.as_ref().unwrap();
        let after = changes.after.as_ref().unwrap();
        assert_eq!(before.field("name"), Some(&json!("Old Name")));
        assert_eq!(before.field("progress"), Some(&json!(0)));
        assert_eq!(after.field("name"), Some(&json!("New Name")));
        assert_eq!(after.field("progress"), Some(&json!(40)));
        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_delete_records_last_known_state_and_trail_survives() {
        let f = fixture();
        let (ctx, _) = admin(&f).await;
        let project = f.service.create(&ctx, new_project("Doomed")).await.unwrap();
        f.service
            .update(&ctx, project.id, ProjectPatch {
                progress: Some(10),
                ..ProjectPatch::default()
            })
            .await
            .unwrap();

        f.service.delete(&ctx, project.id).await.unwrap();

        let err = f.service.get(&ctx, project.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        // The project is gone; its full history is not.
        let trail = f.activities.all();
        assert_eq!(trail.len(), 3);
        let record = trail.last().unwrap();
        assert_eq!(record.action, ActivityAction::Delete);
        assert_eq!(record.description, "Deleted project: Doomed");
        let changes = &record.changes.as_ref().unwrap().0;
        assert!(changes.after.is_none());
        assert_eq!(
            changes.before.as_ref().unwrap().field("name"),
            Some(&json!("Doomed"))
        );
    }

    #[tokio::test]
    async fn test_create_succeeds_when_activity_store_is_down() {
        let projects = Arc::new(MemoryProjectStore::new());
        let users = Arc::new(MemoryUserStore::new());
        let service = ProjectService::new(
            projects,
            users.clone(),
            ActivityRecorder::new(Arc::new(FailingActivityStore)),
        );
        let user = make_user(UserRole::Admin, None);
        users.insert(&user).await.unwrap();
        let ctx = ActorContext::new(user.id, user.role, None);

        let project = service.create(&ctx, new_project("Resilient")).await.unwrap();
        assert!(service.get(&ctx, project.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_cross_tenant_get_is_forbidden() {
        let f = fixture();
        let (owner, _) = admin(&f).await;
        let (outsider, _) = admin(&f).await;
        let project = f.service.create(&owner, new_project("Private")).await.unwrap();

        let err = f.service.get(&outsider, project.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_non_member_employee_cannot_read() {
        let f = fixture();
        let (admin_ctx, admin_user) = admin(&f).await;
        let employee = make_user(UserRole::Employee, Some(admin_user.id));
        f.users.insert(&employee).await.unwrap();
        let employee_ctx = ActorContext::new(employee.id, employee.role, employee.company_id);

        let project = f.service.create(&admin_ctx, new_project("Team A only")).await.unwrap();
        let err = f.service.get(&employee_ctx, project.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        f.service
            .add_member(&admin_ctx, project.id, employee.id)
            .await
            .unwrap();
        assert!(f.service.get(&employee_ctx, project.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_member_twice_conflicts() {
        let f = fixture();
        let (ctx, admin_user) = admin(&f).await;
        let employee = make_user(UserRole::Employee, Some(admin_user.id));
        f.users.insert(&employee).await.unwrap();

        let project = f.service.create(&ctx, new_project("Team")).await.unwrap();
        f.service.add_member(&ctx, project.id, employee.id).await.unwrap();

        let err = f
            .service
            .add_member(&ctx, project.id, employee.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "User is already a team member");
    }

    #[tokio::test]
    async fn test_list_hides_other_peoples_projects_from_employees() {
        let f = fixture();
        let (admin_ctx, admin_user) = admin(&f).await;
        let employee = make_user(UserRole::Employee, Some(admin_user.id));
        f.users.insert(&employee).await.unwrap();
        let employee_ctx = ActorContext::new(employee.id, employee.role, employee.company_id);

        let mine = f.service.create(&admin_ctx, new_project("Mine")).await.unwrap();
        f.service.create(&admin_ctx, new_project("Not theirs")).await.unwrap();
        f.service.add_member(&admin_ctx, mine.id, employee.id).await.unwrap();

        let all = f.service.list(&admin_ctx, &PageRequest::default()).await.unwrap();
        assert_eq!(all.total, 2);

        let visible = f
            .service
            .list(&employee_ctx, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(visible.total, 1);
        assert_eq!(visible.items[0].name, "Mine");
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let f = fixture();
        let (ctx, _) = admin(&f).await;
        let err = f.service.create(&ctx, new_project("  ")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(f.activities.all().is_empty());
    }
}
