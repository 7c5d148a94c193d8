//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::password::PasswordHasher;
use taskhub_core::config::AppConfig;
use taskhub_database::repositories::activity::ActivityRepository;
use taskhub_database::repositories::message::MessageRepository;
use taskhub_database::repositories::project::ProjectRepository;
use taskhub_database::repositories::task::TaskRepository;
use taskhub_database::repositories::user::UserRepository;
use taskhub_service::{
    ActivityQueryService, ActivityRecorder, AuthService, MessageService, ProjectService,
    TaskService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped (or internally `Arc`-backed) for cheap cloning across
/// tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool, used directly only by health checks.
    pub db_pool: PgPool,

    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Auth service (register/login/logout).
    pub auth_service: Arc<AuthService>,
    /// User service.
    pub user_service: Arc<UserService>,
    /// Project service.
    pub project_service: Arc<ProjectService>,
    /// Task service.
    pub task_service: Arc<TaskService>,
    /// Message service.
    pub message_service: Arc<MessageService>,
    /// Activity trail read side.
    pub activity_query: Arc<ActivityQueryService>,
}

impl AppState {
    /// Wires repositories and services onto a connected pool.
    pub fn new(config: Arc<AppConfig>, db_pool: PgPool) -> Self {
        let activity_repo = Arc::new(ActivityRepository::new(db_pool.clone()));
        let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
        let task_repo = Arc::new(TaskRepository::new(db_pool.clone()));
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let message_repo = Arc::new(MessageRepository::new(db_pool.clone()));

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());

        let recorder = ActivityRecorder::new(activity_repo.clone());

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            password_hasher,
            jwt_encoder,
            recorder.clone(),
            &config.auth,
        ));
        let user_service = Arc::new(UserService::new(user_repo.clone(), recorder.clone()));
        let project_service = Arc::new(ProjectService::new(
            project_repo.clone(),
            user_repo.clone(),
            recorder.clone(),
        ));
        let task_service = Arc::new(TaskService::new(task_repo, project_repo, recorder));
        let message_service = Arc::new(MessageService::new(message_repo, user_repo));
        let activity_query = Arc::new(ActivityQueryService::new(activity_repo));

        Self {
            config,
            db_pool,
            jwt_decoder,
            auth_service,
            user_service,
            project_service,
            task_service,
            message_service,
            activity_query,
        }
    }
}
