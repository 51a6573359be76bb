//! API models for users and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::models::pagination::Pagination;
use crate::db::models::users::UserDBResponse;
use crate::types::UserId;

/// Platform role. A closed set: the authorization gate checks membership in a
/// required role set, never free-form strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular platform user (students)
    User,
    /// Administrator with content-management access
    Admin,
    /// Administrator who can also manage other accounts
    SuperAdmin,
}

impl Role {
    /// Whether this role is admin-class. Admin-class session tokens are
    /// re-checked against the database on every request.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

/// The set of roles accepted on general admin surfaces.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

/// The authenticated principal attached to a request, decoded from the
/// session token claims.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub display_name: String,
}

/// Request to update a user (admin surface)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserUpdate {
    /// New display name
    pub display_name: Option<String>,
    /// New role
    pub role: Option<Role>,
    /// Activate or deactivate the account. Deactivating an admin immediately
    /// invalidates their outstanding session tokens.
    pub is_active: Option<bool>,
}

/// Public representation of a user. Never includes the password hash or any
/// reset-token material.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(user: UserDBResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&UserDBResponse> for CurrentUser {
    fn from(user: &UserDBResponse) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            display_name: user.display_name.clone(),
        }
    }
}

/// Query parameters for listing users
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Case-insensitive substring match on email or display name
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_admin_classification() {
        assert!(!Role::User.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"super_admin\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
