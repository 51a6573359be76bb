//! Admin user management endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    api::models::{
        pagination::PaginatedResponse,
        users::{CurrentUser, ListUsersQuery, UserResponse, UserUpdate},
    },
    auth::utils::{require_admin, require_super_admin},
    db::{
        handlers::{users::UserFilter, Repository, Users},
        models::users::UserUpdateDBRequest,
    },
    errors::Error,
    types::UserId,
    AppState,
};

/// List user accounts (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(ListUsersQuery),
    tag = "admin",
    responses(
        (status = 200, description = "Users", body = PaginatedResponse<UserResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>, Error> {
    require_admin(&current_user, "users")?;

    let (skip, limit) = query.pagination.params();
    let filter = UserFilter::new(skip, limit, query.search);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let users = repo.list(&filter).await?;
    let total_count = repo.count(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
        total_count,
        filter.skip,
        filter.limit,
    )))
}

/// Update a user account (admin; role changes require super admin)
#[utoipa::path(
    patch,
    path = "/api/v1/admin/users/{id}",
    request_body = UserUpdate,
    tag = "admin",
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not allowed"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(target_user_id = %id))]
pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<UserId>,
    Json(request): Json<UserUpdate>,
) -> Result<Json<UserResponse>, Error> {
    require_admin(&current_user, "users")?;

    // Changing roles is reserved for super admins
    if request.role.is_some() {
        require_super_admin(&current_user, "user roles")?;
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.update(id, &UserUpdateDBRequest::from(request)).await.map_err(|e| match e {
        crate::db::errors::DbError::NotFound => Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        },
        other => Error::Database(other),
    })?;

    Ok(Json(UserResponse::from(user)))
}
