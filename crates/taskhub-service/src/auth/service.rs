//! Registration and credential-based login.
//!
//! Logins and logouts are recorded in the activity trail; registration
//! is not, because no authenticated actor exists yet.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use taskhub_auth::PasswordHasher;
use taskhub_auth::jwt::{IssuedToken, JwtEncoder};
use taskhub_core::config::auth::AuthConfig;
use taskhub_core::types::UserId;
use taskhub_core::{AppError, AppResult};
use taskhub_database::UserStore;
use taskhub_entity::activity::{ActivityAction, EntityKind};
use taskhub_entity::user::{User, UserRole};

use crate::activity::ActivityRecorder;
use crate::context::ActorContext;

/// Data submitted to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Account role.
    pub role: UserRole,
    /// Company name (admins).
    pub company_name: Option<String>,
    /// Department (employees).
    pub department: Option<String>,
    /// Owning admin's id (employees).
    pub company_id: Option<UserId>,
}

/// A successful login: the account plus its freshly issued token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The authenticated account.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: IssuedToken,
}

/// Handles account registration and credential verification.
#[derive(Clone)]
pub struct AuthService {
    /// User persistence.
    store: Arc<dyn UserStore>,
    /// Password hashing.
    hasher: Arc<PasswordHasher>,
    /// Token issuance.
    encoder: Arc<JwtEncoder>,
    /// Activity trail writer for login/logout records.
    recorder: ActivityRecorder,
    /// Minimum accepted password length.
    min_password_length: usize,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        recorder: ActivityRecorder,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            encoder,
            recorder,
            min_password_length: config.min_password_length,
        }
    }

    /// Registers a new account. Admins found a company; employees join
    /// the admin named in `company_id`.
    pub async fn register(&self, req: RegisterUser) -> AppResult<User> {
        if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
            return Err(AppError::validation("First and last name are required"));
        }
        if !req.email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        if req.password.len() < self.min_password_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        if self.store.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let (company_name, department, company_id) = match req.role {
            UserRole::Admin => {
                if req.company_name.as_deref().is_none_or(|s| s.trim().is_empty()) {
                    return Err(AppError::validation("Company name is required for admins"));
                }
                (req.company_name, None, None)
            }
            UserRole::Employee => {
                let company_id = req
                    .company_id
                    .ok_or_else(|| AppError::validation("Company is required for employees"))?;
                let owner = self
                    .store
                    .find_by_id(company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Company not found"))?;
                if !owner.role.is_admin() {
                    return Err(AppError::validation(
                        "Company must reference an admin account",
                    ));
                }
                (None, req.department, Some(company_id))
            }
        };

        let password_hash = self.hasher.hash_password(&req.password)?;
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password_hash,
            role: req.role,
            company_name,
            department,
            company_id,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(&user).await?;
        info!(user_id = %stored.id, role = ?stored.role, "User registered");
        Ok(stored)
    }

    /// Verifies credentials, issues a token, and records a `login`
    /// activity.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        let token = self.encoder.issue(user.id, user.role, user.company_id)?;
        info!(user_id = %user.id, "User logged in");

        let ctx = ActorContext::new(user.id, user.role, user.company_id);
        self.recorder
            .record_best_effort(
                &ctx,
                ActivityAction::Login,
                EntityKind::User,
                user.id.into_uuid(),
                format!("{} logged in", user.full_name()),
                None,
            )
            .await;

        Ok(AuthSession { user, token })
    }

    /// Records a `logout` activity for the caller. The token itself
    /// simply expires; no server-side session state exists.
    pub async fn logout(&self, ctx: &ActorContext) -> AppResult<()> {
        let description = match self.store.find_by_id(ctx.user_id).await? {
            Some(user) => format!("{} logged out", user.full_name()),
            None => "User logged out".to_string(),
        };
        self.recorder
            .record_best_effort(
                ctx,
                ActivityAction::Logout,
                EntityKind::User,
                ctx.user_id.into_uuid(),
                description,
                None,
            )
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryActivityStore, MemoryUserStore, make_user};
    use taskhub_core::error::ErrorKind;

    struct Fixture {
        users: Arc<MemoryUserStore>,
        activities: Arc<MemoryActivityStore>,
        service: AuthService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserStore::new());
        let activities = Arc::new(MemoryActivityStore::new());
        let config = AuthConfig {
            jwt_secret: "test-secret-at-least-32-bytes-long!!".to_string(),
            token_ttl_hours: 24,
            min_password_length: 8,
        };
        let service = AuthService::new(
            users.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config)),
            ActivityRecorder::new(activities.clone()),
            &config,
        );
        Fixture {
            users,
            activities,
            service,
        }
    }

    fn register_admin(email: &str) -> RegisterUser {
        RegisterUser {
            first_name: "Dana".to_string(),
            last_name: "Kim".to_string(),
            email: email.to_string(),
            password: "a-strong-password".to_string(),
            role: UserRole::Admin,
            company_name: Some("Acme".to_string()),
            department: None,
            company_id: None,
        }
    }

    #[tokio::test]
    async fn test_register_then_login_records_activity() {
        let f = fixture();
        let user = f
            .service
            .register(register_admin("dana@acme.test"))
            .await
            .unwrap();
        assert!(f.activities.all().is_empty());

        let session = f
            .service
            .login("dana@acme.test", "a-strong-password")
            .await
            .unwrap();
        assert_eq!(session.user.id, user.id);
        assert!(!session.token.token.is_empty());

        let trail = f.activities.all();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].action, ActivityAction::Login);
        assert_eq!(trail[0].entity_type, EntityKind::User);
        assert_eq!(trail[0].entity_id, user.id.into_uuid());
        assert_eq!(trail[0].company_id, user.id);
        assert!(trail[0].changes.is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_email() {
        let f = fixture();
        f.service
            .register(register_admin("dana@acme.test"))
            .await
            .unwrap();

        let err = f
            .service
            .login("dana@acme.test", "not-the-password")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        let err = f
            .service
            .login("nobody@acme.test", "a-strong-password")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(f.activities.all().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let f = fixture();
        f.service
            .register(register_admin("dana@acme.test"))
            .await
            .unwrap();
        let err = f
            .service
            .register(register_admin("dana@acme.test"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_short_password_is_rejected() {
        let f = fixture();
        let mut req = register_admin("dana@acme.test");
        req.password = "short".to_string();
        let err = f.service.register(req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_employee_joins_admin_company() {
        let f = fixture();
        let admin = f
            .service
            .register(register_admin("boss@acme.test"))
            .await
            .unwrap();

        let employee = f
            .service
            .register(RegisterUser {
                first_name: "Eli".to_string(),
                last_name: "Ng".to_string(),
                email: "eli@acme.test".to_string(),
                password: "a-strong-password".to_string(),
                role: UserRole::Employee,
                company_name: None,
                department: Some("Design".to_string()),
                company_id: Some(admin.id),
            })
            .await
            .unwrap();
        assert_eq!(employee.company_id, Some(admin.id));

        let session = f
            .service
            .login("eli@acme.test", "a-strong-password")
            .await
            .unwrap();
        // The employee's login lands in the admin's tenant trail.
        let trail = f.activities.all();
        assert_eq!(trail.last().unwrap().company_id, admin.id);
        assert_eq!(session.user.department.as_deref(), Some("Design"));
    }

    #[tokio::test]
    async fn test_employee_requires_existing_admin_company() {
        let f = fixture();
        let not_admin = make_user(UserRole::Employee, None);
        f.users.insert(&not_admin).await.unwrap();

        let mut req = register_admin("new@acme.test");
        req.role = UserRole::Employee;
        req.company_id = Some(not_admin.id);
        let err = f.service.register(req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut req = register_admin("new2@acme.test");
        req.role = UserRole::Employee;
        req.company_id = Some(UserId::new());
        let err = f.service.register(req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_logout_records_activity() {
        let f = fixture();
        let user = f
            .service
            .register(register_admin("dana@acme.test"))
            .await
            .unwrap();
        let ctx = ActorContext::new(user.id, user.role, user.company_id);

        f.service.logout(&ctx).await.unwrap();

        let trail = f.activities.all();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].action, ActivityAction::Logout);
        assert_eq!(trail[0].description, "Dana Kim logged out");
    }
}
