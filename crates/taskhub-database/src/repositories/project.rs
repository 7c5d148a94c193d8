//! Project repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ProjectId, UserId};
use taskhub_entity::project::Project;

use crate::stores::ProjectStore;

/// Repository for projects.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for ProjectRepository {
    async fn insert(&self, project: &Project) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, name, description, start_date, end_date, progress, \
             status, manager_id, member_ids, company_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.progress)
        .bind(project.status)
        .bind(project.manager_id)
        .bind(&project.member_ids)
        .bind(project.company_id)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    async fn update(&self, project: &Project) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET name = $2, description = $3, start_date = $4, end_date = $5, \
             progress = $6, status = $7, member_ids = $8, updated_at = $9 \
             WHERE id = $1 RETURNING *",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.progress)
        .bind(project.status)
        .bind(&project.member_ids)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update project", e))
    }

    async fn delete(&self, id: ProjectId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        company_id: UserId,
        visible_to: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects WHERE company_id = $1 \
             AND ($2::uuid IS NULL OR manager_id = $2 OR $2 = ANY(member_ids))",
        )
        .bind(company_id)
        .bind(visible_to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count projects", e))?;

        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE company_id = $1 \
             AND ($2::uuid IS NULL OR manager_id = $2 OR $2 = ANY(member_ids)) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(company_id)
        .bind(visible_to)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))?;

        Ok(PageResponse::new(projects, page, total as u64))
    }
}
