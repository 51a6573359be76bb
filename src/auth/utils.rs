//! Authorization helpers for role-gated handlers.
//!
//! Role checks run after authentication, so a failed check always means a
//! known principal lacking access (403), never a missing one (401).

use crate::api::models::users::{CurrentUser, Role, ADMIN_ROLES};
use crate::errors::{Error, Result};

/// Require that the user's role is one of `required`.
pub fn require_roles(user: &CurrentUser, required: &[Role], resource: &str) -> Result<()> {
    if required.contains(&user.role) {
        Ok(())
    } else {
        Err(Error::InsufficientPermissions {
            required: required.to_vec(),
            resource: resource.to_string(),
        })
    }
}

/// Require an admin-class role (admin or super admin).
pub fn require_admin(user: &CurrentUser, resource: &str) -> Result<()> {
    require_roles(user, ADMIN_ROLES, resource)
}

/// Require the super admin role. Used for account management operations
/// like changing another user's role.
pub fn require_super_admin(user: &CurrentUser, resource: &str) -> Result<()> {
    require_roles(user, &[Role::SuperAdmin], resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user_with_role(role: Role) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            display_name: "Someone".to_string(),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user_with_role(Role::Admin), "courses").is_ok());
        assert!(require_admin(&user_with_role(Role::SuperAdmin), "courses").is_ok());

        let err = require_admin(&user_with_role(Role::User), "courses").unwrap_err();
        assert!(matches!(err, Error::InsufficientPermissions { .. }));
    }

    #[test]
    fn test_require_super_admin() {
        assert!(require_super_admin(&user_with_role(Role::SuperAdmin), "users").is_ok());
        assert!(require_super_admin(&user_with_role(Role::Admin), "users").is_err());
        assert!(require_super_admin(&user_with_role(Role::User), "users").is_err());
    }
}
