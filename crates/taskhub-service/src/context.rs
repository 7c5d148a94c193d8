//! Request context carrying the authenticated actor and resolved tenant.

use serde::{Deserialize, Serialize};

use taskhub_core::types::UserId;
use taskhub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the bearer token and passed into service methods so
/// that every operation knows *who* is acting and *which* tenant it is
/// scoped to. The tenant is resolved once here and never re-derived
/// downstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActorContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// Resolved tenant: the admin's own id, or the owning admin's id
    /// for employees.
    pub tenant_id: UserId,
}

impl ActorContext {
    /// Creates a context, resolving the tenant from role and company.
    ///
    /// Admins own their tenant; employees belong to the admin recorded
    /// in `company_id`. An employee with no company falls back to their
    /// own id rather than leaking into another tenant.
    pub fn new(user_id: UserId, role: UserRole, company_id: Option<UserId>) -> Self {
        let tenant_id = if role.is_admin() {
            user_id
        } else {
            company_id.unwrap_or(user_id)
        };
        Self {
            user_id,
            role,
            tenant_id,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
