//! Referral endpoints: public submission, admin listing.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        pagination::PaginatedResponse,
        referrals::{ListReferralsQuery, ReferralCreate, ReferralResponse},
        users::CurrentUser,
    },
    auth::utils::require_admin,
    db::{
        handlers::{referrals::ReferralFilter, Referrals},
        models::referrals::ReferralCreateDBRequest,
    },
    errors::Error,
    AppState,
};

/// Submit a referral
#[utoipa::path(
    post,
    path = "/api/v1/referrals",
    request_body = ReferralCreate,
    tag = "referrals",
    responses(
        (status = 201, description = "Referral recorded", body = ReferralResponse),
        (status = 400, description = "Invalid input"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_referral(
    State(state): State<AppState>,
    Json(request): Json<ReferralCreate>,
) -> Result<(StatusCode, Json<ReferralResponse>), Error> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() || request.referral_code.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Name, email, and referral code are required".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Referrals::new(&mut conn);

    let referral = repo.create(&ReferralCreateDBRequest::from(request)).await?;
    Ok((StatusCode::CREATED, Json(ReferralResponse::from(referral))))
}

/// List referrals (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/referrals",
    params(ListReferralsQuery),
    tag = "admin",
    responses(
        (status = 200, description = "Referrals", body = PaginatedResponse<ReferralResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_referrals(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListReferralsQuery>,
) -> Result<Json<PaginatedResponse<ReferralResponse>>, Error> {
    require_admin(&current_user, "referrals")?;

    let (skip, limit) = query.pagination.params();
    let filter = ReferralFilter::new(skip, limit, query.referral_code);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Referrals::new(&mut conn);

    let referrals = repo.list(&filter).await?;
    let total_count = repo.count(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        referrals.into_iter().map(ReferralResponse::from).collect(),
        total_count,
        filter.skip,
        filter.limit,
    )))
}
