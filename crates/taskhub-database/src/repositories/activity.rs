//! Activity trail repository implementation.
//!
//! The `activities` table is append-only: this repository exposes no
//! UPDATE or DELETE statement, and none exists anywhere in the codebase.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ActivityId, UserId};
use taskhub_entity::activity::{
    ActivityAction, ActivityCount, ActivityFilter, ActivityRecord, ActivityWithActor,
    ActorSummary, ChangeSet, DateRange, EntityKind, NewActivity,
};

use crate::stores::ActivityStore;

/// Columns selected for hydrated reads: the record plus the actor's
/// display fields left-joined from `users`.
const HYDRATED_COLUMNS: &str = "a.id, a.actor_id, a.action, a.entity_type, a.entity_id, \
     a.description, a.changes, a.company_id, a.created_at, \
     u.first_name AS actor_first_name, u.last_name AS actor_last_name, u.email AS actor_email";

/// Repository for activity records.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

/// Flat row shape for the hydrated join.
#[derive(Debug, FromRow)]
struct HydratedRow {
    id: ActivityId,
    actor_id: UserId,
    action: ActivityAction,
    entity_type: EntityKind,
    entity_id: Uuid,
    description: String,
    changes: Option<Json<ChangeSet>>,
    company_id: UserId,
    created_at: DateTime<Utc>,
    actor_first_name: Option<String>,
    actor_last_name: Option<String>,
    actor_email: Option<String>,
}

impl From<HydratedRow> for ActivityWithActor {
    fn from(row: HydratedRow) -> Self {
        let actor = match (row.actor_first_name, row.actor_last_name, row.actor_email) {
            (Some(first_name), Some(last_name), Some(email)) => Some(ActorSummary {
                id: row.actor_id,
                first_name,
                last_name,
                email,
            }),
            _ => None,
        };
        ActivityWithActor {
            record: ActivityRecord {
                id: row.id,
                actor_id: row.actor_id,
                action: row.action,
                entity_type: row.entity_type,
                entity_id: row.entity_id,
                description: row.description,
                changes: row.changes,
                company_id: row.company_id,
                created_at: row.created_at,
            },
            actor,
        }
    }
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for ActivityRepository {
    async fn append(&self, activity: NewActivity) -> AppResult<ActivityRecord> {
        let changes = activity.changes.map(Json);
        sqlx::query_as::<_, ActivityRecord>(
            "INSERT INTO activities (actor_id, action, entity_type, entity_id, description, changes, company_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(activity.actor_id)
        .bind(activity.action)
        .bind(activity.entity_type)
        .bind(activity.entity_id)
        .bind(&activity.description)
        .bind(changes)
        .bind(activity.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append activity record", e)
        })
    }

    async fn find_by_id(&self, id: ActivityId) -> AppResult<Option<ActivityWithActor>> {
        let sql = format!(
            "SELECT {HYDRATED_COLUMNS} FROM activities a \
             LEFT JOIN users u ON u.id = a.actor_id WHERE a.id = $1"
        );
        let row = sqlx::query_as::<_, HydratedRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find activity record", e)
            })?;
        Ok(row.map(ActivityWithActor::from))
    }

    async fn search(
        &self,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityWithActor>> {
        // Tenant scope is always the first condition; optional filters
        // are ANDed on with positional parameters, mirroring their bind
        // order below.
        let mut conditions = vec!["a.company_id = $1".to_string()];
        let mut param_idx = 2u32;

        if filter.entity_type.is_some() {
            conditions.push(format!("a.entity_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.action.is_some() {
            conditions.push(format!("a.action = ${param_idx}"));
            param_idx += 1;
        }
        if filter.actor_id.is_some() {
            conditions.push(format!("a.actor_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.entity_id.is_some() {
            conditions.push(format!("a.entity_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        let count_sql = format!("SELECT COUNT(*) FROM activities a {where_clause}");
        let select_sql = format!(
            "SELECT {HYDRATED_COLUMNS} FROM activities a \
             LEFT JOIN users u ON u.id = a.actor_id {where_clause} \
             ORDER BY a.created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(filter.company_id);
        let mut select_query =
            sqlx::query_as::<_, HydratedRow>(&select_sql).bind(filter.company_id);

        if let Some(entity_type) = filter.entity_type {
            count_query = count_query.bind(entity_type);
            select_query = select_query.bind(entity_type);
        }
        if let Some(action) = filter.action {
            count_query = count_query.bind(action);
            select_query = select_query.bind(action);
        }
        if let Some(actor_id) = filter.actor_id {
            count_query = count_query.bind(actor_id);
            select_query = select_query.bind(actor_id);
        }
        if let Some(entity_id) = filter.entity_id {
            count_query = count_query.bind(entity_id);
            select_query = select_query.bind(entity_id);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count activity records", e)
        })?;

        let rows = select_query
            .bind(page.limit as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search activity records", e)
            })?;

        Ok(PageResponse::new(
            rows.into_iter().map(ActivityWithActor::from).collect(),
            page,
            total as u64,
        ))
    }

    async fn count_by_entity_and_action(
        &self,
        company_id: UserId,
        range: Option<DateRange>,
    ) -> AppResult<Vec<ActivityCount>> {
        let counts = match range {
            Some(range) => {
                sqlx::query_as::<_, ActivityCount>(
                    "SELECT entity_type, action, COUNT(*) AS count FROM activities \
                     WHERE company_id = $1 AND created_at >= $2 AND created_at <= $3 \
                     GROUP BY entity_type, action ORDER BY entity_type, action",
                )
                .bind(company_id)
                .bind(range.start)
                .bind(range.end)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ActivityCount>(
                    "SELECT entity_type, action, COUNT(*) AS count FROM activities \
                     WHERE company_id = $1 GROUP BY entity_type, action \
                     ORDER BY entity_type, action",
                )
                .bind(company_id)
                .fetch_all(&self.pool)
                .await
            }
        };

        counts.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to aggregate activity counts", e)
        })
    }
}
