//! JWT session token creation and verification.
//!
//! Session tokens are stateless HS256 JWTs carrying the principal's identity
//! and role. They are never stored server-side: a token dies by expiry, or,
//! for admin-class tokens, by the owning account being deactivated (that
//! liveness re-check lives in the request extractor, not here).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    api::models::users::{CurrentUser, Role},
    config::Config,
    errors::Error,
    types::UserId,
};

/// Fallback signing secret for development when `secret_key` is not
/// configured. Production deployments must override it; `Application::new`
/// logs a warning when this value is in use.
pub const DEV_FALLBACK_SECRET: &str = "coursectl-dev-secret-change-me";

/// The signing secret in effect: configured value or the development fallback.
pub fn signing_secret(config: &Config) -> &str {
    config.secret_key.as_deref().unwrap_or(DEV_FALLBACK_SECRET)
}

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,  // Subject (user ID)
    pub email: String,
    pub role: Role,
    pub name: String, // Display name
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

impl SessionClaims {
    /// Create new session claims for a user
    pub fn new(user: &CurrentUser, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.security.jwt_expiry;

        Self {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            name: user.display_name.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

impl From<SessionClaims> for CurrentUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            display_name: claims.name,
        }
    }
}

/// Create a JWT token for a user session
pub fn create_session_token(user: &CurrentUser, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(user, config);
    let key = EncodingKey::from_secret(signing_secret(config).as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a JWT session token.
///
/// Expired tokens and malformed/bad-signature tokens are distinguishable by
/// message but both map to 401; key and crypto failures map to 500.
pub fn verify_session_token(token: &str, config: &Config) -> Result<CurrentUser, Error> {
    let key = DecodingKey::from_secret(signing_secret(config).as_bytes());
    let validation = Validation::default();

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => Error::Unauthenticated {
            message: Some("Session expired".to_string()),
        },

        // Client errors (401) - malformed tokens, invalid claims
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::Unauthenticated {
            message: Some("Invalid session token".to_string()),
        },

        // Server errors (500) - key issues, internal failures
        jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_)
        | jsonwebtoken::errors::ErrorKind::RsaFailedSigning
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
        | jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
        | jsonwebtoken::errors::ErrorKind::MissingAlgorithm
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },

        // Catch-all for any future error variants (default to server error for safety)
        _ => Error::Internal {
            operation: format!("JWT verification (unknown error): {e}"),
        },
    })?;

    Ok(CurrentUser::from(token_data.claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, SecurityConfig};
    use std::time::Duration;
    use uuid::Uuid;

    fn create_test_config() -> Config {
        Config {
            secret_key: Some("test-secret-key-for-jwt".to_string()),
            auth: AuthConfig {
                security: SecurityConfig {
                    jwt_expiry: Duration::from_secs(3600), // 1 hour
                    cors: crate::config::CorsConfig::default(),
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn create_test_user() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            role: Role::User,
            display_name: "Test User".to_string(),
        }
    }

    #[test]
    fn test_create_and_verify_session_token() {
        let config = create_test_config();
        let user = create_test_user();

        let token = create_session_token(&user, &config).unwrap();
        assert!(!token.is_empty());

        let verified_user = verify_session_token(&token, &config).unwrap();

        assert_eq!(verified_user.id, user.id);
        assert_eq!(verified_user.email, user.email);
        assert_eq!(verified_user.role, user.role);
        assert_eq!(verified_user.display_name, user.display_name);
    }

    #[test]
    fn test_fallback_secret_when_unconfigured() {
        let mut config = create_test_config();
        config.secret_key = None;

        assert_eq!(signing_secret(&config), DEV_FALLBACK_SECRET);

        // Tokens still roundtrip on the fallback secret
        let user = create_test_user();
        let token = create_session_token(&user, &config).unwrap();
        assert!(verify_session_token(&token, &config).is_ok());
    }

    #[test]
    fn test_verify_invalid_token() {
        let config = create_test_config();

        let result = verify_session_token("invalid.token.here", &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let mut config = create_test_config();
        let user = create_test_user();

        // Create token with one secret
        let token = create_session_token(&user, &config).unwrap();

        // Try to verify with different secret
        config.secret_key = Some("different-secret".to_string());
        let result = verify_session_token(&token, &config);
        assert!(result.is_err());
        // Should be Unauthenticated (InvalidSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_verify_expired_token() {
        let config = create_test_config();
        let user = create_test_user();

        // Manually create an expired token by setting exp in the past
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            name: user.display_name.clone(),
            exp: (now - chrono::Duration::seconds(3600)).timestamp(), // 1 hour ago
            iat: now.timestamp(),
        };

        let key = EncodingKey::from_secret(config.secret_key.as_ref().unwrap().as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        let result = verify_session_token(&token, &config);
        match result.unwrap_err() {
            Error::Unauthenticated { message } => {
                assert_eq!(message.as_deref(), Some("Session expired"));
            }
            other => panic!("Expected Unauthenticated error, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_malformed_token() {
        let config = create_test_config();

        let malformed_tokens = vec!["not.a.token", "invalid", "", "too.many.parts.in.this.token"];

        for token in malformed_tokens {
            let result = verify_session_token(token, &config);
            match result.unwrap_err() {
                Error::Unauthenticated { message } => {
                    assert_eq!(message.as_deref(), Some("Invalid session token"), "token: {token}");
                }
                other => panic!("Expected Unauthenticated error for token {token}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_admin_role_roundtrips_in_claims() {
        let config = create_test_config();
        let user = CurrentUser {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            role: Role::SuperAdmin,
            display_name: "Admin".to_string(),
        };

        let token = create_session_token(&user, &config).unwrap();
        let verified = verify_session_token(&token, &config).unwrap();
        assert_eq!(verified.role, Role::SuperAdmin);
    }
}
