//! Student record endpoints: certificates and ID cards.
//!
//! Lookup is public and keyed by roll number; issuance is admin-only.
//! Roll-number lookups are identity-free, so a plain 404 on a miss is fine
//! here, unlike the auth surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        records::{CertificateCreate, CertificateResponse, IdCardCreate, IdCardResponse},
        users::CurrentUser,
    },
    auth::utils::require_admin,
    db::{
        handlers::{Certificates, IdCards},
        models::records::{CertificateCreateDBRequest, IdCardCreateDBRequest},
    },
    errors::Error,
    AppState,
};

/// Look up a certificate by roll number
#[utoipa::path(
    get,
    path = "/api/v1/certificates/{roll_number}",
    tag = "records",
    responses(
        (status = 200, description = "Certificate", body = CertificateResponse),
        (status = 404, description = "No certificate for this roll number"),
    )
)]
#[tracing::instrument(skip_all, fields(roll_number = %roll_number))]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(roll_number): Path<String>,
) -> Result<Json<CertificateResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Certificates::new(&mut conn);

    let cert = repo.get_by_roll_number(&roll_number).await?.ok_or_else(|| Error::NotFound {
        resource: "Certificate".to_string(),
        id: roll_number.clone(),
    })?;

    Ok(Json(CertificateResponse::from(cert)))
}

/// Issue a certificate (admin)
#[utoipa::path(
    post,
    path = "/api/v1/admin/certificates",
    request_body = CertificateCreate,
    tag = "admin",
    responses(
        (status = 201, description = "Certificate issued", body = CertificateResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Roll number already has a certificate"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_certificate(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<CertificateCreate>,
) -> Result<(StatusCode, Json<CertificateResponse>), Error> {
    require_admin(&current_user, "certificates")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Certificates::new(&mut conn);

    let cert = repo.create(&CertificateCreateDBRequest::from(request)).await?;
    Ok((StatusCode::CREATED, Json(CertificateResponse::from(cert))))
}

/// Look up an ID card by roll number
#[utoipa::path(
    get,
    path = "/api/v1/id-cards/{roll_number}",
    tag = "records",
    responses(
        (status = 200, description = "ID card", body = IdCardResponse),
        (status = 404, description = "No ID card for this roll number"),
    )
)]
#[tracing::instrument(skip_all, fields(roll_number = %roll_number))]
pub async fn get_id_card(State(state): State<AppState>, Path(roll_number): Path<String>) -> Result<Json<IdCardResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = IdCards::new(&mut conn);

    let card = repo.get_by_roll_number(&roll_number).await?.ok_or_else(|| Error::NotFound {
        resource: "ID card".to_string(),
        id: roll_number.clone(),
    })?;

    Ok(Json(IdCardResponse::from(card)))
}

/// Issue an ID card (admin)
#[utoipa::path(
    post,
    path = "/api/v1/admin/id-cards",
    request_body = IdCardCreate,
    tag = "admin",
    responses(
        (status = 201, description = "ID card issued", body = IdCardResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Roll number already has an ID card"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_id_card(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<IdCardCreate>,
) -> Result<(StatusCode, Json<IdCardResponse>), Error> {
    require_admin(&current_user, "id cards")?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = IdCards::new(&mut conn);

    let card = repo.create(&IdCardCreateDBRequest::from(request)).await?;
    Ok((StatusCode::CREATED, Json(IdCardResponse::from(card))))
}
