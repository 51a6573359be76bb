//! Course catalog endpoints.
//!
//! The public surface only sees published courses; the admin surface manages
//! the full catalog including drafts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        courses::{CourseCreate, CourseResponse, CourseUpdate, ListCoursesQuery},
        pagination::PaginatedResponse,
        users::CurrentUser,
    },
    auth::utils::require_admin,
    db::{
        handlers::{courses::CourseFilter, Courses, Repository},
        models::courses::{CourseCreateDBRequest, CourseUpdateDBRequest},
    },
    errors::Error,
    types::CourseId,
    AppState,
};

async fn list_with_filter(state: &AppState, filter: CourseFilter) -> Result<PaginatedResponse<CourseResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    let courses = repo.list(&filter).await?;
    let total_count = repo.count(&filter).await?;

    Ok(PaginatedResponse::new(
        courses.into_iter().map(CourseResponse::from).collect(),
        total_count,
        filter.skip,
        filter.limit,
    ))
}

/// List published courses
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(ListCoursesQuery),
    tag = "courses",
    responses(
        (status = 200, description = "Published courses", body = PaginatedResponse<CourseResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<PaginatedResponse<CourseResponse>>, Error> {
    let (skip, limit) = query.pagination.params();
    let filter = CourseFilter::new(skip, limit, query.search, Some(true));
    Ok(Json(list_with_filter(&state, filter).await?))
}

/// Get a published course by id
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    tag = "courses",
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 404, description = "Course not found"),
    )
)]
#[tracing::instrument(skip_all, fields(course_id = %id))]
pub async fn get_course(State(state): State<AppState>, Path(id): Path<CourseId>) -> Result<Json<CourseResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    // Unpublished courses are indistinguishable from missing ones here
    let course = repo
        .get_by_id(id)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| Error::NotFound {
            resource: "Course".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(CourseResponse::from(course)))
}

/// List all courses including drafts (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/courses",
    params(ListCoursesQuery),
    tag = "admin",
    responses(
        (status = 200, description = "All courses", body = PaginatedResponse<CourseResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn admin_list_courses(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<PaginatedResponse<CourseResponse>>, Error> {
    require_admin(&current_user, "courses")?;

    let (skip, limit) = query.pagination.params();
    let filter = CourseFilter::new(skip, limit, query.search, None);
    Ok(Json(list_with_filter(&state, filter).await?))
}

/// Create a course (admin)
#[utoipa::path(
    post,
    path = "/api/v1/admin/courses",
    request_body = CourseCreate,
    tag = "admin",
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), Error> {
    require_admin(&current_user, "courses")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    let course = repo.create(&CourseCreateDBRequest::from(request)).await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// Update a course (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/courses/{id}",
    request_body = CourseUpdate,
    tag = "admin",
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(course_id = %id))]
pub async fn update_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CourseId>,
    Json(request): Json<CourseUpdate>,
) -> Result<Json<CourseResponse>, Error> {
    require_admin(&current_user, "courses")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    let course = repo.update(id, &CourseUpdateDBRequest::from(request)).await.map_err(|e| match e {
        crate::db::errors::DbError::NotFound => Error::NotFound {
            resource: "Course".to_string(),
            id: id.to_string(),
        },
        other => Error::Database(other),
    })?;

    Ok(Json(CourseResponse::from(course)))
}

/// Delete a course (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/courses/{id}",
    tag = "admin",
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all, fields(course_id = %id))]
pub async fn delete_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, "courses")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Courses::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Course".to_string(),
            id: id.to_string(),
        })
    }
}
