//! Extractor for the authenticated user.
//!
//! Requests authenticate with `Authorization: Bearer <session token>`. The
//! token is verified statelessly for regular users. Admin-class tokens are
//! additionally re-checked against the database on every request, so
//! deactivating an admin account revokes their outstanding tokens
//! immediately. Regular user tokens stay valid until expiry.

use crate::{
    api::models::users::CurrentUser,
    auth::session,
    db::{errors::DbError, handlers::{Repository, Users}},
    errors::{Error, Result},
    types::abbrev_uuid,
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

/// Extract the session token from the Authorization header.
/// Returns:
/// - None: no Authorization header present
/// - Some(Ok(token)): well-formed Bearer scheme
/// - Some(Err(error)): header present but not a usable Bearer token
fn extract_bearer_token(parts: &Parts) -> Option<Result<&str>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(_) => {
            return Some(Err(Error::Unauthenticated {
                message: Some("Invalid authorization header".to_string()),
            }))
        }
    };

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Some(Ok(token)),
        _ => Some(Err(Error::Unauthenticated {
            message: Some("Authorization header must use the Bearer scheme".to_string()),
        })),
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = match extract_bearer_token(parts) {
            Some(token) => token?,
            None => {
                trace!("No Authorization header on request");
                return Err(Error::Unauthenticated { message: None });
            }
        };

        let user = session::verify_session_token(token, &state.config)?;

        // Admin tokens are only as good as the account behind them. Look the
        // account up and require it to still exist and be active.
        if user.role.is_admin() {
            let mut conn = state.db.acquire().await.map_err(DbError::from)?;
            let mut users = Users::new(&mut conn);
            match users.get_by_id(user.id).await? {
                Some(record) if record.is_active => {
                    debug!(user_id = %abbrev_uuid(&user.id), "Admin session re-validated");
                }
                Some(_) => {
                    debug!(user_id = %abbrev_uuid(&user.id), "Admin session rejected: account deactivated");
                    return Err(Error::Unauthenticated {
                        message: Some("Account is deactivated".to_string()),
                    });
                }
                None => {
                    debug!(user_id = %abbrev_uuid(&user.id), "Admin session rejected: account no longer exists");
                    return Err(Error::Unauthenticated {
                        message: Some("Invalid session token".to_string()),
                    });
                }
            }
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .header(axum::http::header::AUTHORIZATION, value)
            .body(())
            .unwrap();
        request.into_parts().0
    }

    #[test]
    fn test_extract_bearer_token() {
        let parts = parts_with_auth("Bearer abc123");
        let token = extract_bearer_token(&parts).unwrap().unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_missing_header_is_none() {
        let request = Request::builder().uri("/api/v1/auth/me").body(()).unwrap();
        let parts = request.into_parts().0;
        assert!(extract_bearer_token(&parts).is_none());
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        let result = extract_bearer_token(&parts).unwrap();
        assert!(matches!(result, Err(Error::Unauthenticated { .. })));
    }

    #[test]
    fn test_empty_bearer_token_is_rejected() {
        let parts = parts_with_auth("Bearer ");
        let result = extract_bearer_token(&parts).unwrap();
        assert!(matches!(result, Err(Error::Unauthenticated { .. })));
    }
}
