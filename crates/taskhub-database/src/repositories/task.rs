//! Task repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ProjectId, TaskId, UserId};
use taskhub_entity::task::Task;

use crate::stores::TaskStore;

/// Repository for tasks.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn insert(&self, task: &Task) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, description, project_id, assignee_id, status, \
             priority, due_date, company_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.project_id)
        .bind(task.assignee_id)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.due_date)
        .bind(task.company_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create task", e))
    }

    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task", e))
    }

    async fn update(&self, task: &Task) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = $2, description = $3, assignee_id = $4, status = $5, \
             priority = $6, due_date = $7, updated_at = $8 WHERE id = $1 RETURNING *",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.assignee_id)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.due_date)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update task", e))
    }

    async fn delete(&self, id: TaskId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete task", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        company_id: UserId,
        project_id: Option<ProjectId>,
        assignee_id: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Task>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tasks WHERE company_id = $1 \
             AND ($2::uuid IS NULL OR project_id = $2) \
             AND ($3::uuid IS NULL OR assignee_id = $3)",
        )
        .bind(company_id)
        .bind(project_id)
        .bind(assignee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tasks", e))?;

        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE company_id = $1 \
             AND ($2::uuid IS NULL OR project_id = $2) \
             AND ($3::uuid IS NULL OR assignee_id = $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(company_id)
        .bind(project_id)
        .bind(assignee_id)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))?;

        Ok(PageResponse::new(tasks, page, total as u64))
    }
}
