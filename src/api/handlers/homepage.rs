//! Homepage document endpoints: public read, admin write.

use axum::{extract::State, Json};

use crate::{
    api::models::{homepage::{HomepageResponse, HomepageUpdate}, users::CurrentUser},
    auth::utils::require_admin,
    db::{handlers::Homepage, models::homepage::HomepageUpdateDBRequest},
    errors::Error,
    AppState,
};

/// Get the homepage content
#[utoipa::path(
    get,
    path = "/api/v1/homepage",
    tag = "homepage",
    responses(
        (status = 200, description = "Homepage content", body = HomepageResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_homepage(State(state): State<AppState>) -> Result<Json<HomepageResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Homepage::new(&mut conn);

    let homepage = repo.get().await?;
    Ok(Json(HomepageResponse::from(homepage)))
}

/// Update the homepage content (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/homepage",
    request_body = HomepageUpdate,
    tag = "admin",
    responses(
        (status = 200, description = "Homepage updated", body = HomepageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_homepage(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<HomepageUpdate>,
) -> Result<Json<HomepageResponse>, Error> {
    require_admin(&current_user, "homepage")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Homepage::new(&mut conn);

    let homepage = repo.update(&HomepageUpdateDBRequest::from(request)).await?;
    Ok(Json(HomepageResponse::from(homepage)))
}
