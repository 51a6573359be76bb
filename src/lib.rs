//! Backend for a course-selling education platform.
//!
//! The server exposes a JSON API under `/api/v1`: native email/password
//! authentication with JWT sessions, a public course and blog catalog,
//! certificate and ID-card lookups by roll number, referral submissions, and
//! an admin surface for managing all of it.
//!
//! # Architecture
//!
//! - **[`api`]**: HTTP handlers and request/response models
//! - **[`auth`]**: password hashing, session tokens, and the role gate
//! - **[`db`]**: repositories and database models
//! - **[`config`]**: YAML + environment configuration
//! - **[`email`]**: password-reset delivery
//!
//! [`Application`] wires these together: it connects the pool, runs
//! migrations, seeds the initial admin account, and serves the router.

use std::future::Future;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post, put},
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::handlers,
    api::models::users::Role,
    auth::password::{Argon2Params, hash_password_with_params},
    config::{Config, CorsOrigin},
    db::handlers::{Repository, Users},
    db::models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    openapi::ApiDoc,
};

/// Shared state for all request handlers.
#[derive(Clone, bon::Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// The embedded migrator for the `./migrations` directory.
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Ensure the configured super admin account exists.
///
/// Runs on every startup and is idempotent: if the account already exists its
/// password is refreshed from configuration (when one is configured), which
/// doubles as the recovery path for a locked-out admin. Without a configured
/// password no account is created.
pub async fn create_initial_admin_user(
    email: &str,
    password: Option<&str>,
    params: Argon2Params,
    db: &PgPool,
) -> anyhow::Result<()> {
    let mut conn = db.acquire().await?;
    let mut repo = Users::new(&mut conn);

    if let Some(existing) = repo.get_user_by_email(email).await? {
        if let Some(password) = password {
            let password_hash = hash_password_with_params(password, Some(params))?;
            repo.update(
                existing.id,
                &UserUpdateDBRequest {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;
            tracing::info!(email, "Refreshed initial admin password from configuration");
        }
        return Ok(());
    }

    let Some(password) = password else {
        tracing::warn!(email, "admin_password is not configured; skipping initial admin creation");
        return Ok(());
    };

    let password_hash = hash_password_with_params(password, Some(params))?;
    repo.create(&UserCreateDBRequest {
        email: email.to_string(),
        password_hash,
        display_name: "Administrator".to_string(),
        role: Role::SuperAdmin,
    })
    .await?;
    tracing::info!(email, "Created initial admin user");

    Ok(())
}

/// Build the CORS layer from configuration.
///
/// Methods and headers are explicit lists rather than wildcards so that
/// `allow_credentials` stays usable; wildcard origins with credentials are
/// rejected at config validation.
pub fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = &config.auth.security.cors;

    let mut layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(cors.allow_credentials);

    if cors.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard)) {
        layer = layer.allow_origin(tower_http::cors::Any);
    } else {
        let origins = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin {
                CorsOrigin::Url(url) => Some(url),
                CorsOrigin::Wildcard => None,
            })
            // Url renders with a trailing slash; Origin header values carry none
            .map(|url| HeaderValue::from_str(url.as_str().trim_end_matches('/')))
            .collect::<Result<Vec<_>, _>>()?;
        layer = layer.allow_origin(origins);
    }

    if let Some(max_age) = cors.max_age {
        layer = layer.max_age(Duration::from_secs(max_age));
    }

    Ok(layer)
}

async fn health() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
///
/// Public routes live under `/api/v1`; the admin surface is nested under
/// `/api/v1/admin` and every handler there runs the role gate itself.
/// Uploaded files are served as static assets under the configured public
/// prefix.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = create_cors_layer(&state.config)?;

    // The handler enforces the per-file cap while streaming; the body limit
    // only needs headroom for multipart framing.
    let upload_body_limit = state.config.uploads.max_file_size.saturating_add(1024 * 1024);

    let admin = Router::new()
        .route(
            "/courses",
            get(handlers::courses::admin_list_courses).post(handlers::courses::create_course),
        )
        .route(
            "/courses/{id}",
            put(handlers::courses::update_course).delete(handlers::courses::delete_course),
        )
        .route("/blogs", get(handlers::blogs::admin_list_blogs).post(handlers::blogs::create_blog))
        .route(
            "/blogs/{id}",
            put(handlers::blogs::update_blog).delete(handlers::blogs::delete_blog),
        )
        .route("/certificates", post(handlers::records::create_certificate))
        .route("/id-cards", post(handlers::records::create_id_card))
        .route("/referrals", get(handlers::referrals::list_referrals))
        .route("/homepage", put(handlers::homepage::update_homepage))
        .route("/users", get(handlers::users::list_users))
        .route("/users/{id}", patch(handlers::users::update_user))
        .route(
            "/uploads",
            post(handlers::uploads::upload_file).layer(DefaultBodyLimit::max(upload_body_limit)),
        );

    let api = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/forgot-password", post(handlers::auth::forgot_password))
        .route("/auth/reset-password", post(handlers::auth::reset_password))
        .route("/auth/change-password", post(handlers::auth::change_password))
        .route("/auth/me", get(handlers::auth::me))
        .route("/courses", get(handlers::courses::list_courses))
        .route("/courses/{id}", get(handlers::courses::get_course))
        .route("/blogs", get(handlers::blogs::list_blogs))
        .route("/blogs/{id}", get(handlers::blogs::get_blog))
        .route("/certificates/{roll_number}", get(handlers::records::get_certificate))
        .route("/id-cards/{roll_number}", get(handlers::records::get_id_card))
        .route("/referrals", post(handlers::referrals::create_referral))
        .route("/homepage", get(handlers::homepage::get_homepage))
        .nest("/admin", admin);

    let router = Router::new()
        .nest("/api/v1", api)
        .route("/healthz", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest_service(
            state.config.uploads.public_prefix.as_str(),
            ServeDir::new(&state.config.uploads.dir),
        )
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state);

    Ok(router)
}

/// The assembled application: pool, migrations, admin seed, and router.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        if config.secret_key.is_none() {
            tracing::warn!(
                "secret_key is not configured; session tokens are signed with the built-in \
                development secret. Set secret_key before exposing this server."
            );
        }

        let pool_settings = &config.database.pool;
        let mut pool_options = PgPoolOptions::new()
            .max_connections(pool_settings.max_connections)
            .min_connections(pool_settings.min_connections)
            .acquire_timeout(Duration::from_secs(pool_settings.acquire_timeout_secs));
        if pool_settings.idle_timeout_secs > 0 {
            pool_options = pool_options.idle_timeout(Duration::from_secs(pool_settings.idle_timeout_secs));
        }
        if pool_settings.max_lifetime_secs > 0 {
            pool_options = pool_options.max_lifetime(Duration::from_secs(pool_settings.max_lifetime_secs));
        }

        let pool = pool_options.connect(&config.database.url).await?;
        migrator().run(&pool).await?;

        create_initial_admin_user(
            &config.admin_email,
            config.admin_password.as_deref(),
            Argon2Params::from(&config.auth.native.password),
            &pool,
        )
        .await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Serve until the shutdown future resolves, then drain the pool.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_address()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        self.pool.close().await;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_test_server(self) -> anyhow::Result<axum_test::TestServer> {
        Ok(axum_test::TestServer::new(self.router)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::auth::AuthResponse;
    use crate::test_utils::{create_test_app, create_test_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    async fn login_token(server: &TestServer, email: &str, password: &str) -> String {
        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({"email": email, "password": password}))
            .await;
        response.assert_status_ok();
        response.json::<AuthResponse>().token
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool);
        server.get("/healthz").await.assert_status_ok();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_openapi_document_served(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool);
        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc = response.json::<Value>();
        assert!(doc["paths"]["/api/v1/auth/login"].is_object());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_login_me_flow(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool);

        let response = server
            .post("/api/v1/auth/register")
            .json(&json!({
                "email": "Student@Example.com",
                "password": "password123",
                "display_name": "Student One",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let registered = response.json::<AuthResponse>();
        assert_eq!(registered.user.email, "student@example.com");

        let token = login_token(&server, "student@example.com", "password123").await;

        let response = server.get("/api/v1/auth/me").authorization_bearer(&token).await;
        response.assert_status_ok();
        let me = response.json::<Value>();
        assert_eq!(me["email"], "student@example.com");
        assert_eq!(me["display_name"], "Student One");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_login_failures_are_uniform(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "known@example.com", "password123", Role::User).await;

        let wrong_password = server
            .post("/api/v1/auth/login")
            .json(&json!({"email": "known@example.com", "password": "not-the-password"}))
            .await;
        wrong_password.assert_status(StatusCode::UNAUTHORIZED);

        let unknown_email = server
            .post("/api/v1/auth/login")
            .json(&json!({"email": "nobody@example.com", "password": "password123"}))
            .await;
        unknown_email.assert_status(StatusCode::UNAUTHORIZED);

        // The two failure modes must be indistinguishable
        assert_eq!(wrong_password.json::<Value>(), unknown_email.json::<Value>());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_inactive_login_is_indistinguishable(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "dormant@example.com", "password123", Role::User).await;
        sqlx::query!("UPDATE users SET is_active = false WHERE email = $1", "dormant@example.com")
            .execute(&pool)
            .await
            .unwrap();

        // Correct password against a deactivated account must look exactly
        // like an unknown email
        let inactive = server
            .post("/api/v1/auth/login")
            .json(&json!({"email": "dormant@example.com", "password": "password123"}))
            .await;
        inactive.assert_status(StatusCode::UNAUTHORIZED);

        let unknown = server
            .post("/api/v1/auth/login")
            .json(&json!({"email": "nobody@example.com", "password": "password123"}))
            .await;
        unknown.assert_status(StatusCode::UNAUTHORIZED);

        assert_eq!(inactive.json::<Value>(), unknown.json::<Value>());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_change_password_flow(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "changer@example.com", "oldpassword1", Role::User).await;

        let token = login_token(&server, "changer@example.com", "oldpassword1").await;

        server
            .post("/api/v1/auth/change-password")
            .authorization_bearer(&token)
            .json(&json!({"current_password": "wrong-guess", "new_password": "newpassword2"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .post("/api/v1/auth/change-password")
            .authorization_bearer(&token)
            .json(&json!({"current_password": "oldpassword1", "new_password": "newpassword2"}))
            .await
            .assert_status_ok();

        server
            .post("/api/v1/auth/login")
            .json(&json!({"email": "changer@example.com", "password": "oldpassword1"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        login_token(&server, "changer@example.com", "newpassword2").await;
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_disabled_returns_forbidden(pool: PgPool) {
        let (mut config, _tmpdir) = crate::test_utils::create_test_config();
        config.auth.native.allow_registration = false;
        let server = crate::test_utils::create_test_app_with_config(pool, config);

        server
            .post("/api/v1/auth/register")
            .json(&json!({
                "email": "walkin@example.com",
                "password": "password123",
                "display_name": "Walk In",
            }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_password_reset_flow(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "reset@example.com", "oldpassword1", Role::User).await;

        server
            .post("/api/v1/auth/forgot-password")
            .json(&json!({"email": "reset@example.com"}))
            .await
            .assert_status_ok();

        let token = sqlx::query_scalar!("SELECT reset_token FROM users WHERE email = $1", "reset@example.com")
            .fetch_one(&pool)
            .await
            .unwrap()
            .expect("reset token stored");

        let response = server
            .post("/api/v1/auth/reset-password")
            .json(&json!({"token": token, "password": "newpassword2"}))
            .await;
        response.assert_status_ok();

        // Old credentials are dead, new ones work
        server
            .post("/api/v1/auth/login")
            .json(&json!({"email": "reset@example.com", "password": "oldpassword1"}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        login_token(&server, "reset@example.com", "newpassword2").await;

        // The token was consumed and cannot be replayed
        let replay = server
            .post("/api/v1/auth/reset-password")
            .json(&json!({"token": token, "password": "anotherpassword3"}))
            .await;
        replay.assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_forgot_password_does_not_reveal_accounts(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "exists@example.com", "password123", Role::User).await;

        let existing = server
            .post("/api/v1/auth/forgot-password")
            .json(&json!({"email": "exists@example.com"}))
            .await;
        existing.assert_status_ok();

        let missing = server
            .post("/api/v1/auth/forgot-password")
            .json(&json!({"email": "ghost@example.com"}))
            .await;
        missing.assert_status_ok();

        assert_eq!(existing.json::<Value>(), missing.json::<Value>());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_admin_routes_are_gated(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "user@example.com", "password123", Role::User).await;
        create_test_user(&pool, "admin@example.com", "password123", Role::Admin).await;

        server
            .get("/api/v1/admin/courses")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let user_token = login_token(&server, "user@example.com", "password123").await;
        server
            .get("/api/v1/admin/courses")
            .authorization_bearer(&user_token)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let admin_token = login_token(&server, "admin@example.com", "password123").await;
        server
            .get("/api/v1/admin/courses")
            .authorization_bearer(&admin_token)
            .await
            .assert_status_ok();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_deactivation_revokes_admin_sessions(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "admin@example.com", "password123", Role::Admin).await;

        let token = login_token(&server, "admin@example.com", "password123").await;
        server
            .get("/api/v1/admin/courses")
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        sqlx::query!("UPDATE users SET is_active = false WHERE email = $1", "admin@example.com")
            .execute(&pool)
            .await
            .unwrap();

        // The unexpired token stops working immediately
        server
            .get("/api/v1/admin/courses")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_role_changes_require_super_admin(pool: PgPool) {
        let (server, _config, _tmpdir) = create_test_app(pool.clone());
        create_test_user(&pool, "admin@example.com", "password123", Role::Admin).await;
        let target = create_test_user(&pool, "target@example.com", "password123", Role::User).await;

        let admin_token = login_token(&server, "admin@example.com", "password123").await;

        // Plain admins can edit accounts
        server
            .patch(&format!("/api/v1/admin/users/{}", target.id))
            .authorization_bearer(&admin_token)
            .json(&json!({"display_name": "Renamed"}))
            .await
            .assert_status_ok();

        // But not roles
        server
            .patch(&format!("/api/v1/admin/users/{}", target.id))
            .authorization_bearer(&admin_token)
            .json(&json!({"role": "admin"}))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_initial_admin_user_is_idempotent(pool: PgPool) {
        let params = crate::test_utils::test_argon2_params();
        create_initial_admin_user("root@example.com", Some("bootstrap-password"), params, &pool)
            .await
            .unwrap();
        create_initial_admin_user("root@example.com", Some("bootstrap-password"), params, &pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);
        let admin = repo.get_user_by_email("root@example.com").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::SuperAdmin);
        assert!(crate::auth::password::verify_password("bootstrap-password", &admin.password_hash).unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_initial_admin_user_without_password_skips(pool: PgPool) {
        let params = crate::test_utils::test_argon2_params();
        create_initial_admin_user("root@example.com", None, params, &pool).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Users::new(&mut conn);
        assert!(repo.get_user_by_email("root@example.com").await.unwrap().is_none());
    }
}
