//! Authentication and authorization.
//!
//! Authentication is session-token based: clients log in with email and
//! password and receive a signed JWT, presented on later requests as
//! `Authorization: Bearer <token>`. Passwords are hashed with Argon2;
//! password resets go through single-use, expiring tokens.
//!
//! Authorization is a closed role set checked per handler. Admin-class
//! sessions are re-validated against the database on every request;
//! regular user sessions are stateless until expiry.
//!
//! # Modules
//!
//! - [`current_user`]: extractor for the authenticated user
//! - [`password`]: Argon2 hashing, verification, and reset-token generation
//! - [`session`]: session token creation and verification
//! - [`utils`]: role-gate helpers for handlers

pub mod current_user;
pub mod password;
pub mod session;
pub mod utils;
