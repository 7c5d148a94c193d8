//! Task CRUD, audited through the activity trail.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ProjectId, TaskId, UserId};
use taskhub_core::{AppError, AppResult};
use taskhub_database::{ProjectStore, TaskStore};
use taskhub_entity::activity::{ActivityAction, ChangeSet, EntityKind};
use taskhub_entity::task::{NewTask, Task, TaskPatch, TaskStatus};

use crate::activity::ActivityRecorder;
use crate::activity::recorder::capture_snapshot;
use crate::context::ActorContext;

/// Handles task lifecycle within projects.
#[derive(Clone)]
pub struct TaskService {
    /// Task persistence.
    store: Arc<dyn TaskStore>,
    /// Parent-project lookups.
    projects: Arc<dyn ProjectStore>,
    /// Activity trail writer.
    recorder: ActivityRecorder,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(
        store: Arc<dyn TaskStore>,
        projects: Arc<dyn ProjectStore>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            store,
            projects,
            recorder,
        }
    }

    /// Creates a task inside one of the caller's projects and records a
    /// `create` activity with a snapshot of the stored state.
    pub async fn create(&self, ctx: &ActorContext, req: NewTask) -> AppResult<Task> {
        if req.title.trim().is_empty() {
            return Err(AppError::validation("Task title cannot be empty"));
        }

        let project = self
            .projects
            .find_by_id(req.project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        if project.company_id != ctx.tenant_id {
            return Err(AppError::authorization(
                "You do not have access to this project",
            ));
        }

        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            assignee_id: req.assignee_id,
            status: TaskStatus::Todo,
            priority: req.priority,
            due_date: req.due_date,
            company_id: ctx.tenant_id,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(&task).await?;
        info!(task_id = %stored.id, title = %stored.title, "Task created");

        let changes = capture_snapshot(&stored).map(ChangeSet::created);
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Create,
                EntityKind::Task,
                stored.id.into_uuid(),
                format!("Created new task: {}", stored.title),
                changes,
            )
            .await;

        Ok(stored)
    }

    /// Fetches a task in the caller's tenant.
    pub async fn get(&self, ctx: &ActorContext, id: TaskId) -> AppResult<Task> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))?;
        if task.company_id != ctx.tenant_id {
            return Err(AppError::authorization(
                "You do not have access to this task",
            ));
        }
        Ok(task)
    }

    /// Lists tasks in the caller's tenant, newest first. Non-admins see
    /// only their own assignments unless narrowing to a project.
    pub async fn list(
        &self,
        ctx: &ActorContext,
        project_id: Option<ProjectId>,
        assignee_id: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Task>> {
        let assignee_id = if ctx.is_admin() || project_id.is_some() {
            assignee_id
        } else {
            Some(ctx.user_id)
        };
        self.store
            .list(ctx.tenant_id, project_id, assignee_id, page)
            .await
    }

    /// Applies a partial update and records an `update` activity whose
    /// changeset carries the state read before the mutation and the
    /// stored state after it.
    pub async fn update(&self, ctx: &ActorContext, id: TaskId, patch: TaskPatch) -> AppResult<Task> {
        let mut task = self.get(ctx, id).await?;

        let before = capture_snapshot(&task);

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Task title cannot be empty"));
            }
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(assignee_id) = patch.assignee_id {
            task.assignee_id = assignee_id;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        task.updated_at = Utc::now();

        let updated = self.store.update(&task).await?;
        info!(task_id = %updated.id, "Task updated");

        let changes = match (before, capture_snapshot(&updated)) {
            (Some(before), Some(after)) => Some(ChangeSet::updated(before, after)),
            _ => None,
        };
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Update,
                EntityKind::Task,
                updated.id.into_uuid(),
                format!("Updated task: {}", updated.title),
                changes,
            )
            .await;

        Ok(updated)
    }

    /// Deletes a task and records a `delete` activity carrying the last
    /// known state.
    pub async fn delete(&self, ctx: &ActorContext, id: TaskId) -> AppResult<()> {
        let task = self.get(ctx, id).await?;

        let before = capture_snapshot(&task);

        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Task not found"));
        }
        info!(task_id = %id, title = %task.title, "Task deleted");

        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Delete,
                EntityKind::Task,
                id.into_uuid(),
                format!("Deleted task: {}", task.title),
                before.map(ChangeSet::deleted),
            )
            .await;

        Ok(())
    }
}
