//! Shared helpers for integration-style tests.
//!
//! `create_test_config` uses the file email transport and cheap Argon2
//! parameters so auth flows stay fast; the returned `TempDir` must be held
//! alive for as long as emails or uploads may be written.

use sqlx::PgPool;
use tempfile::TempDir;

use crate::{
    AppState,
    api::models::users::Role,
    auth::password::{Argon2Params, hash_password_with_params},
    build_router,
    config::{Config, EmailTransportConfig},
    db::handlers::{Repository, Users},
    db::models::users::{UserCreateDBRequest, UserDBResponse},
};

/// Argon2 parameters sized for test speed, not security.
pub fn test_argon2_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// A config suitable for tests: fixed signing secret, file email transport,
/// and uploads under a temp dir.
pub fn create_test_config() -> (Config, TempDir) {
    let tmpdir = tempfile::tempdir().expect("create temp dir");

    let mut config = Config::default();
    config.secret_key = Some("test-secret-key".to_string());
    config.email.transport = EmailTransportConfig::File {
        path: tmpdir.path().join("emails").to_string_lossy().to_string(),
    };
    config.uploads.dir = tmpdir.path().join("uploads").to_string_lossy().to_string();
    config.auth.native.password.argon2_memory_kib = 1024;
    config.auth.native.password.argon2_iterations = 1;
    config.auth.native.password.argon2_parallelism = 1;

    (config, tmpdir)
}

/// Build a test server over the full router with a test config.
pub fn create_test_app(pool: PgPool) -> (axum_test::TestServer, Config, TempDir) {
    let (config, tmpdir) = create_test_config();
    let server = create_test_app_with_config(pool, config.clone());
    (server, config, tmpdir)
}

/// Build a test server from an explicit config, for tests that toggle
/// config-driven behavior (registration disabled, etc).
pub fn create_test_app_with_config(pool: PgPool, config: Config) -> axum_test::TestServer {
    let state = AppState::builder().db(pool).config(config).build();
    let router = build_router(state).expect("build router");
    axum_test::TestServer::new(router).expect("create test server")
}

/// Insert a user directly, bypassing the registration endpoint.
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str, role: Role) -> UserDBResponse {
    let password_hash = hash_password_with_params(password, Some(test_argon2_params())).expect("hash password");

    let mut conn = pool.acquire().await.expect("acquire connection");
    let mut repo = Users::new(&mut conn);
    repo.create(&UserCreateDBRequest {
        email: email.to_string(),
        password_hash,
        display_name: "Test User".to_string(),
        role,
    })
    .await
    .expect("create user")
}
