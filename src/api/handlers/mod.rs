//! HTTP request handlers for all API endpoints.
//!
//! Handlers validate the request, run the role gate where the route is
//! protected, call the database repositories, and serialize the response.
//!
//! # Handler Modules
//!
//! - [`auth`]: registration, login, password reset/change, current user
//! - [`users`]: admin user management
//! - [`courses`]: course catalog, public and admin
//! - [`blogs`]: blog posts, public and admin
//! - [`records`]: certificates and ID cards by roll number
//! - [`referrals`]: public referral submission and admin listing
//! - [`homepage`]: the singleton homepage document
//! - [`uploads`]: admin file uploads
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which converts to an HTTP status
//! and a `{"error": ...}` JSON body.

pub mod auth;
pub mod blogs;
pub mod courses;
pub mod homepage;
pub mod records;
pub mod referrals;
pub mod uploads;
pub mod users;
