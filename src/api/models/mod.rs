//! API request and response data models.
//!
//! Data structures used for HTTP request deserialization and response
//! serialization. These models define the public API contract.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: API models are distinct from database models,
//!   allowing independent evolution of API and storage representations
//! - **OpenAPI**: All models are annotated with `utoipa` for automatic API docs
//! - **No secret material**: responses never carry password hashes or reset
//!   tokens

pub mod auth;
pub mod blogs;
pub mod courses;
pub mod homepage;
pub mod pagination;
pub mod records;
pub mod referrals;
pub mod uploads;
pub mod users;
