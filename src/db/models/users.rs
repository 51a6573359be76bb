//! Database models for users.

use chrono::{DateTime, Utc};

use crate::api::models::users::{Role, UserUpdate};
use crate::types::UserId;

/// Database request for creating a new user. Carries an already-computed
/// password hash; hashing never happens in the database layer.
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
}

/// Database request for updating a user
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    /// When set, any outstanding reset token is cleared in the same statement
    pub password_hash: Option<String>,
}

impl From<UserUpdate> for UserUpdateDBRequest {
    fn from(update: UserUpdate) -> Self {
        Self {
            display_name: update.display_name,
            role: update.role,
            is_active: update.is_active,
            password_hash: None, // Regular updates don't include password changes
        }
    }
}

/// Database response for a user. Carries the password hash and reset-token
/// state; never serialized to API clients directly.
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
