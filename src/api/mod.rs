//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! Public routes live under `/api/v1`, admin routes under `/api/v1/admin`.
//! Admin routes require an admin-class session token; see [`crate::auth`].
//!
//! All endpoints carry OpenAPI annotations via `utoipa`.

pub mod handlers;
pub mod models;
