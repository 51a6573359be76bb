//! Blog endpoints. Same published/draft split as the course catalog.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        blogs::{BlogCreate, BlogResponse, BlogUpdate, ListBlogsQuery},
        pagination::PaginatedResponse,
        users::CurrentUser,
    },
    auth::utils::require_admin,
    db::{
        handlers::{blogs::BlogFilter, Blogs, Repository},
        models::blogs::{BlogCreateDBRequest, BlogUpdateDBRequest},
    },
    errors::Error,
    types::BlogId,
    AppState,
};

async fn list_with_filter(state: &AppState, filter: BlogFilter) -> Result<PaginatedResponse<BlogResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    let blogs = repo.list(&filter).await?;
    let total_count = repo.count(&filter).await?;

    Ok(PaginatedResponse::new(
        blogs.into_iter().map(BlogResponse::from).collect(),
        total_count,
        filter.skip,
        filter.limit,
    ))
}

/// List published blog posts
#[utoipa::path(
    get,
    path = "/api/v1/blogs",
    params(ListBlogsQuery),
    tag = "blogs",
    responses(
        (status = 200, description = "Published blog posts", body = PaginatedResponse<BlogResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<ListBlogsQuery>,
) -> Result<Json<PaginatedResponse<BlogResponse>>, Error> {
    let (skip, limit) = query.pagination.params();
    let filter = BlogFilter::new(skip, limit, query.search, Some(true));
    Ok(Json(list_with_filter(&state, filter).await?))
}

/// Get a published blog post by id
#[utoipa::path(
    get,
    path = "/api/v1/blogs/{id}",
    tag = "blogs",
    responses(
        (status = 200, description = "Blog post", body = BlogResponse),
        (status = 404, description = "Blog post not found"),
    )
)]
#[tracing::instrument(skip_all, fields(blog_id = %id))]
pub async fn get_blog(State(state): State<AppState>, Path(id): Path<BlogId>) -> Result<Json<BlogResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    let blog = repo
        .get_by_id(id)
        .await?
        .filter(|b| b.is_published)
        .ok_or_else(|| Error::NotFound {
            resource: "Blog post".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(BlogResponse::from(blog)))
}

/// List all blog posts including drafts (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/blogs",
    params(ListBlogsQuery),
    tag = "admin",
    responses(
        (status = 200, description = "All blog posts", body = PaginatedResponse<BlogResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn admin_list_blogs(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListBlogsQuery>,
) -> Result<Json<PaginatedResponse<BlogResponse>>, Error> {
    require_admin(&current_user, "blogs")?;

    let (skip, limit) = query.pagination.params();
    let filter = BlogFilter::new(skip, limit, query.search, None);
    Ok(Json(list_with_filter(&state, filter).await?))
}

/// Create a blog post (admin)
#[utoipa::path(
    post,
    path = "/api/v1/admin/blogs",
    request_body = BlogCreate,
    tag = "admin",
    responses(
        (status = 201, description = "Blog post created", body = BlogResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_blog(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<BlogCreate>,
) -> Result<(StatusCode, Json<BlogResponse>), Error> {
    require_admin(&current_user, "blogs")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    let blog = repo.create(&BlogCreateDBRequest::from(request)).await?;
    Ok((StatusCode::CREATED, Json(BlogResponse::from(blog))))
}

/// Update a blog post (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/blogs/{id}",
    request_body = BlogUpdate,
    tag = "admin",
    responses(
        (status = 200, description = "Blog post updated", body = BlogResponse),
        (status = 404, description = "Blog post not found"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(blog_id = %id))]
pub async fn update_blog(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BlogId>,
    Json(request): Json<BlogUpdate>,
) -> Result<Json<BlogResponse>, Error> {
    require_admin(&current_user, "blogs")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    let blog = repo.update(id, &BlogUpdateDBRequest::from(request)).await.map_err(|e| match e {
        crate::db::errors::DbError::NotFound => Error::NotFound {
            resource: "Blog post".to_string(),
            id: id.to_string(),
        },
        other => Error::Database(other),
    })?;

    Ok(Json(BlogResponse::from(blog)))
}

/// Delete a blog post (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/blogs/{id}",
    tag = "admin",
    responses(
        (status = 204, description = "Blog post deleted"),
        (status = 404, description = "Blog post not found"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(blog_id = %id))]
pub async fn delete_blog(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BlogId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, "blogs")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Blogs::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Blog post".to_string(),
            id: id.to_string(),
        })
    }
}
