//! Authentication endpoints: register, login, password reset, password
//! change, and the current-user probe.
//!
//! Credential failures are deliberately uniform: a login against an unknown
//! email and a login with a wrong password return the same 401 body, and a
//! forgot-password request returns the same 200 message whether or not the
//! account exists.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    api::models::{
        auth::{
            AuthMessageResponse, AuthResponse, ChangePasswordRequest, LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest,
            RegisterRequest,
        },
        users::{CurrentUser, UserResponse},
    },
    auth::{password, session},
    db::{
        handlers::{Repository, Users},
        models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest},
    },
    email::EmailService,
    errors::Error,
    AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const RESET_REQUESTED: &str = "If an account with that email exists, a password reset link has been sent.";
const INVALID_RESET_TOKEN: &str = "Invalid or expired reset token";

fn validate_password(config: &crate::config::Config, password: &str) -> Result<(), Error> {
    let rules = &config.auth.native.password;
    if password.len() < rules.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", rules.min_length),
        });
    }
    if password.len() > rules.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", rules.max_length),
        });
    }
    Ok(())
}

async fn hash_on_blocking_thread(state: &AppState, password: String) -> Result<String, Error> {
    let params = password::Argon2Params::from(&state.config.auth.native.password);
    tokio::task::spawn_blocking(move || password::hash_password_with_params(&password, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })?
}

async fn verify_on_blocking_thread(password: String, hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })?
}

fn auth_response(user: UserDBResponse, state: &AppState) -> Result<AuthResponse, Error> {
    let current_user = CurrentUser::from(&user);
    let token = session::create_session_token(&current_user, &state.config)?;
    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    tag = "auth",
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Registration is disabled"),
        (status = 409, description = "Email already registered"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    if !state.config.auth.native.allow_registration {
        return Err(Error::Forbidden {
            message: "User registration is disabled".to_string(),
        });
    }

    validate_password(&state.config, &request.password)?;

    let password_hash = hash_on_blocking_thread(&state, request.password.clone()).await?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    let create_request = UserCreateDBRequest {
        email: request.email,
        password_hash,
        display_name: request.display_name,
        role: crate::api::models::users::Role::User,
    };
    // A duplicate email surfaces as a unique violation and maps to 409
    let created_user = user_repo.create(&create_request).await?;

    let response = auth_response(created_user, &state)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<AuthResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    let user = user_repo
        .get_user_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some(INVALID_CREDENTIALS.to_string()),
        })?;

    let is_valid = verify_on_blocking_thread(request.password.clone(), user.password_hash.clone()).await?;
    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some(INVALID_CREDENTIALS.to_string()),
        });
    }

    // Deactivated accounts get the same generic message as unknown emails and
    // wrong passwords, so login probes can't tell the cases apart. The
    // explicit "deactivated" message is reserved for the token extractor,
    // where the caller has already proven the credentials.
    if !user.is_active {
        return Err(Error::Unauthenticated {
            message: Some(INVALID_CREDENTIALS.to_string()),
        });
    }

    user_repo.record_login(user.id).await?;

    Ok(Json(auth_response(user, &state)?))
}

/// Request a password reset email
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = PasswordResetRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Reset email sent if the account exists", body = AuthMessageResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<Json<AuthMessageResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    // The response is identical whether or not the account exists
    if let Some(user) = user_repo.get_user_by_email(&request.email).await? {
        let token = password::generate_reset_token();
        let ttl = state.config.auth.native.password_reset_token_duration;
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl).map_err(|e| Error::Internal {
                operation: format!("convert reset token duration: {e}"),
            })?;

        user_repo.store_reset_token(user.id, &token, expires_at).await?;

        // Email delivery failure must not fail the request: the token is
        // stored and a later attempt can re-issue it.
        match EmailService::new(&state.config) {
            Ok(email_service) => {
                if let Err(e) = email_service.send_password_reset_email(&user.email, &user.display_name, &token).await {
                    tracing::warn!("Failed to send password reset email: {:#}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to initialize email service: {:#}", e);
            }
        }
    }

    Ok(Json(AuthMessageResponse {
        message: RESET_REQUESTED.to_string(),
    }))
}

/// Reset password with a token from the reset email
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = PasswordResetConfirmRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Password reset successful", body = AuthMessageResponse),
        (status = 400, description = "Invalid or expired token"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetConfirmRequest>,
) -> Result<Json<AuthMessageResponse>, Error> {
    validate_password(&state.config, &request.password)?;

    let new_password_hash = hash_on_blocking_thread(&state, request.password.clone()).await?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    // One conditional update covers unknown, expired, and already-used
    // tokens; the caller can't tell which case it hit.
    user_repo
        .consume_reset_token(&request.token, &new_password_hash)
        .await?
        .ok_or_else(|| Error::BadRequest {
            message: INVALID_RESET_TOKEN.to_string(),
        })?;

    Ok(Json(AuthMessageResponse {
        message: "Password has been reset successfully".to_string(),
    }))
}

/// Change password for the authenticated user
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    request_body = ChangePasswordRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Password changed successfully", body = AuthMessageResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Current password is incorrect"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<AuthMessageResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    let user = user_repo.get_by_id(current_user.id).await?.ok_or_else(|| Error::Unauthenticated {
        message: Some("Invalid session token".to_string()),
    })?;

    let is_valid = verify_on_blocking_thread(request.current_password.clone(), user.password_hash.clone()).await?;
    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some("Current password is incorrect".to_string()),
        });
    }

    validate_password(&state.config, &request.new_password)?;

    let new_password_hash = hash_on_blocking_thread(&state, request.new_password.clone()).await?;
    let update_request = UserUpdateDBRequest {
        password_hash: Some(new_password_hash),
        ..Default::default()
    };
    user_repo.update(current_user.id, &update_request).await?;

    Ok(Json(AuthMessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    let user = user_repo.get_by_id(current_user.id).await?.ok_or_else(|| Error::Unauthenticated {
        message: Some("Invalid session token".to_string()),
    })?;

    Ok(Json(UserResponse::from(user)))
}
