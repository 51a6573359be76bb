//! Database repository for users.
//!
//! Owns the credential rows: password hashes, reset-token state, activity
//! flags. Emails are stored lowercased and looked up lowercased, so
//! `Alice@Example.com` and `alice@example.com` are the same account.

use crate::types::{abbrev_uuid, UserId};
use crate::{
    api::models::users::Role,
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest},
    },
};
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing users
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub skip: i64,
    pub limit: i64,
    /// Case-insensitive substring match on email or display name
    pub search: Option<String>,
}

impl UserFilter {
    pub fn new(skip: i64, limit: i64, search: Option<String>) -> Self {
        Self { skip, limit, search }
    }
}

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Users<'c> {
    type CreateRequest = UserCreateDBRequest;
    type UpdateRequest = UserUpdateDBRequest;
    type Response = UserDBResponse;
    type Id = UserId;
    type Filter = UserFilter;

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let user = sqlx::query_as!(
            UserDBResponse,
            r#"
            INSERT INTO users (email, password_hash, display_name, role)
            VALUES (LOWER($1), $2, $3, $4)
            RETURNING id, email, password_hash, display_name, role AS "role: Role",
                      is_active, reset_token, reset_token_expires_at, last_login_at,
                      created_at, updated_at
            "#,
            request.email,
            request.password_hash,
            request.display_name,
            request.role as Role,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let user = sqlx::query_as!(
            UserDBResponse,
            r#"
            SELECT id, email, password_hash, display_name, role AS "role: Role",
                   is_active, reset_token, reset_token_expires_at, last_login_at,
                   created_at, updated_at
            FROM users WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));
        let users = sqlx::query_as!(
            UserDBResponse,
            r#"
            SELECT id, email, password_hash, display_name, role AS "role: Role",
                   is_active, reset_token, reset_token_expires_at, last_login_at,
                   created_at, updated_at
            FROM users
            WHERE ($3::text IS NULL OR email ILIKE $3 OR display_name ILIKE $3)
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            filter.limit,
            filter.skip,
            pattern,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query!("DELETE FROM users WHERE id = $1", id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // A password change invalidates any outstanding reset token in the
        // same statement, so a stale reset link can never undo the change.
        let user = sqlx::query_as!(
            UserDBResponse,
            r#"
            UPDATE users SET
                display_name = COALESCE($2, display_name),
                role = COALESCE($3, role),
                is_active = COALESCE($4, is_active),
                password_hash = COALESCE($5, password_hash),
                reset_token = CASE WHEN $5::text IS NULL THEN reset_token ELSE NULL END,
                reset_token_expires_at = CASE WHEN $5::text IS NULL THEN reset_token_expires_at ELSE NULL END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, display_name, role AS "role: Role",
                      is_active, reset_token, reset_token_expires_at, last_login_at,
                      created_at, updated_at
            "#,
            id,
            request.display_name.as_deref(),
            request.role as Option<Role>,
            request.is_active,
            request.password_hash.as_deref(),
        )
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(user)
    }
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up a user by email, case-insensitively.
    #[instrument(skip(self, email), err)]
    pub async fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as!(
            UserDBResponse,
            r#"
            SELECT id, email, password_hash, display_name, role AS "role: Role",
                   is_active, reset_token, reset_token_expires_at, last_login_at,
                   created_at, updated_at
            FROM users WHERE email = LOWER($1)
            "#,
            email
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(user)
    }

    /// Count users matching the filter's search term (pagination ignored).
    #[instrument(skip(self, filter), err)]
    pub async fn count(&mut self, filter: &UserFilter) -> Result<i64> {
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));
        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM users
            WHERE ($1::text IS NULL OR email ILIKE $1 OR display_name ILIKE $1)
            "#,
            pattern,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(count)
    }

    /// Stamp a successful authentication on the account.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn record_login(&mut self, id: UserId) -> Result<()> {
        sqlx::query!("UPDATE users SET last_login_at = NOW() WHERE id = $1", id)
            .execute(&mut *self.db)
            .await?;

        Ok(())
    }

    /// Store a reset token on the user's row, replacing any outstanding one.
    /// Each account has at most one live reset token at a time.
    #[instrument(skip(self, token), fields(user_id = %abbrev_uuid(&id)), err)]
    pub async fn store_reset_token(&mut self, id: UserId, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
        let result = sqlx::query!(
            r#"
            UPDATE users SET
                reset_token = $2,
                reset_token_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
            id,
            token,
            expires_at,
        )
        .execute(&mut *self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// Atomically consume a reset token: if the token matches a row and is not
    /// expired, set the new password hash and clear the token in one
    /// conditional update. Returns `None` for an unknown, expired, or
    /// already-consumed token. Two racing calls with the same token cannot
    /// both succeed.
    #[instrument(skip_all, err)]
    pub async fn consume_reset_token(&mut self, token: &str, new_password_hash: &str) -> Result<Option<UserDBResponse>> {
        let user = sqlx::query_as!(
            UserDBResponse,
            r#"
            UPDATE users SET
                password_hash = $2,
                reset_token = NULL,
                reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE reset_token = $1 AND reset_token_expires_at > NOW()
            RETURNING id, email, password_hash, display_name, role AS "role: Role",
                      is_active, reset_token, reset_token_expires_at, last_login_at,
                      created_at, updated_at
            "#,
            token,
            new_password_hash,
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(user)
    }
}
