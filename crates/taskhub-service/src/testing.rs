//! In-memory store implementations for service tests.
//!
//! These satisfy the store traits with plain `Mutex`-guarded vectors so
//! service behavior can be exercised without a database. Ordering
//! mirrors the Postgres implementations: newest first, where "newest"
//! is insertion order since in-process appends are monotonic.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use taskhub_core::types::pagination::{PageRequest, PageResponse};
use taskhub_core::types::{ActivityId, MessageId, ProjectId, TaskId, UserId};
use taskhub_core::{AppError, AppResult};
use taskhub_database::{ActivityStore, MessageStore, ProjectStore, TaskStore, UserStore};
use taskhub_entity::activity::{
    ActivityCount, ActivityFilter, ActivityRecord, ActivityWithActor, ActorSummary, DateRange,
    NewActivity,
};
use taskhub_entity::message::Message;
use taskhub_entity::project::Project;
use taskhub_entity::task::Task;
use taskhub_entity::user::{User, UserRole};

/// In-memory activity trail.
#[derive(Default)]
pub struct MemoryActivityStore {
    records: Mutex<Vec<ActivityRecord>>,
    actors: Mutex<HashMap<UserId, ActorSummary>>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes actor hydration available for the given user.
    pub fn register_actor(&self, user: &User) {
        self.actors.lock().unwrap().insert(
            user.id,
            ActorSummary {
                id: user.id,
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                email: user.email.clone(),
            },
        );
    }

    /// All records in insertion order, for assertions.
    pub fn all(&self) -> Vec<ActivityRecord> {
        self.records.lock().unwrap().clone()
    }

    fn hydrate(&self, record: ActivityRecord) -> ActivityWithActor {
        let actor = self.actors.lock().unwrap().get(&record.actor_id).cloned();
        ActivityWithActor { record, actor }
    }
}

fn matches_filter(record: &ActivityRecord, filter: &ActivityFilter) -> bool {
    record.company_id == filter.company_id
        && filter.entity_type.is_none_or(|t| record.entity_type == t)
        && filter.action.is_none_or(|a| record.action == a)
        && filter.actor_id.is_none_or(|a| record.actor_id == a)
        && filter.entity_id.is_none_or(|e| record.entity_id == e)
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn append(&self, activity: NewActivity) -> AppResult<ActivityRecord> {
        let record = ActivityRecord {
            id: ActivityId::new(),
            actor_id: activity.actor_id,
            action: activity.action,
            entity_type: activity.entity_type,
            entity_id: activity.entity_id,
            description: activity.description,
            changes: activity.changes.map(sqlx::types::Json),
            company_id: activity.company_id,
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: ActivityId) -> AppResult<Option<ActivityWithActor>> {
        let record = self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned();
        Ok(record.map(|r| self.hydrate(r)))
    }

    async fn search(
        &self,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityWithActor>> {
        let matched: Vec<ActivityRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| matches_filter(r, filter))
            .cloned()
            .collect();
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .map(|r| self.hydrate(r))
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn count_by_entity_and_action(
        &self,
        company_id: UserId,
        range: Option<DateRange>,
    ) -> AppResult<Vec<ActivityCount>> {
        let records = self.records.lock().unwrap();
        let mut counts: Vec<ActivityCount> = Vec::new();
        for record in records.iter() {
            if record.company_id != company_id {
                continue;
            }
            if let Some(range) = range {
                if record.created_at < range.start || record.created_at > range.end {
                    continue;
                }
            }
            match counts
                .iter_mut()
                .find(|c| c.entity_type == record.entity_type && c.action == record.action)
            {
                Some(existing) => existing.count += 1,
                None => counts.push(ActivityCount {
                    entity_type: record.entity_type,
                    action: record.action,
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }
}

/// An activity store whose writes always fail, for exercising the
/// best-effort recording path.
pub struct FailingActivityStore;

#[async_trait]
impl ActivityStore for FailingActivityStore {
    async fn append(&self, _activity: NewActivity) -> AppResult<ActivityRecord> {
        Err(AppError::database("Activity store unavailable"))
    }

    async fn find_by_id(&self, _id: ActivityId) -> AppResult<Option<ActivityWithActor>> {
        Err(AppError::database("Activity store unavailable"))
    }

    async fn search(
        &self,
        _filter: &ActivityFilter,
        _page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityWithActor>> {
        Err(AppError::database("Activity store unavailable"))
    }

    async fn count_by_entity_and_action(
        &self,
        _company_id: UserId,
        _range: Option<DateRange>,
    ) -> AppResult<Vec<ActivityCount>> {
        Err(AppError::database("Activity store unavailable"))
    }
}

/// In-memory project store.
#[derive(Default)]
pub struct MemoryProjectStore {
    projects: Mutex<Vec<Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn insert(&self, project: &Project) -> AppResult<Project> {
        self.projects.lock().unwrap().push(project.clone());
        Ok(project.clone())
    }

    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn update(&self, project: &Project) -> AppResult<Project> {
        let mut projects = self.projects.lock().unwrap();
        let existing = projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        *existing = project.clone();
        Ok(project.clone())
    }

    async fn delete(&self, id: ProjectId) -> AppResult<bool> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() < before)
    }

    async fn list(
        &self,
        company_id: UserId,
        visible_to: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        let matched: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|p| p.company_id == company_id)
            .filter(|p| visible_to.is_none_or(|u| p.involves(u)))
            .cloned()
            .collect();
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }
}

/// In-memory task store.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: &Task) -> AppResult<Task> {
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn update(&self, task: &Task) -> AppResult<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let existing = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| AppError::not_found("Task not found"))?;
        *existing = task.clone();
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> AppResult<bool> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }

    async fn list(
        &self,
        company_id: UserId,
        project_id: Option<ProjectId>,
        assignee_id: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Task>> {
        let matched: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|t| t.company_id == company_id)
            .filter(|t| project_id.is_none_or(|p| t.project_id == p))
            .filter(|t| assignee_id.is_none_or(|a| t.assignee_id == a))
            .cloned()
            .collect();
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }
}

/// In-memory user store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::conflict("A user with this email already exists"));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        *existing = user.clone();
        Ok(user.clone())
    }

    async fn list_company(&self, company_id: UserId, exclude: UserId) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.id == company_id || u.company_id == Some(company_id))
            .filter(|u| u.id != exclude)
            .cloned()
            .collect())
    }
}

/// In-memory message store.
#[derive(Default)]
pub struct MemoryMessageStore {
    messages: Mutex<Vec<Message>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn insert(&self, message: &Message) -> AppResult<Message> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(message.clone())
    }

    async fn find_by_id(&self, id: MessageId) -> AppResult<Option<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        company_id: UserId,
        user_id: UserId,
    ) -> AppResult<Vec<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|m| m.company_id == company_id)
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: MessageId) -> AppResult<bool> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        Ok(messages.len() < before)
    }
}

/// Builds a user for tests; `company_id` is `None` for admins.
pub fn make_user(role: UserRole, company_id: Option<UserId>) -> User {
    let id = UserId::new();
    let now = Utc::now();
    User {
        id,
        first_name: "Alex".to_string(),
        last_name: "Taylor".to_string(),
        email: format!("{id}@example.com"),
        password_hash: "$argon2id$test".to_string(),
        role,
        company_name: role.is_admin().then(|| "Acme".to_string()),
        department: (!role.is_admin()).then(|| "Engineering".to_string()),
        company_id,
        created_at: now,
        updated_at: now,
    }
}
