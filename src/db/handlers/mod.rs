//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, provides strongly-typed
//! operations for one table, and returns domain models from
//! [`crate::db::models`]. CRUD-shaped repositories implement the
//! [`Repository`] trait; the record and homepage repositories expose only the
//! operations their tables support.
//!
//! # Available Repositories
//!
//! - [`Users`]: accounts, credentials, and reset-token lifecycle
//! - [`Courses`]: course catalog
//! - [`Blogs`]: blog posts
//! - [`Certificates`] / [`IdCards`]: student records keyed by roll number
//! - [`Referrals`]: referral submissions
//! - [`Homepage`]: the singleton homepage document

pub mod blogs;
pub mod courses;
pub mod homepage;
pub mod records;
pub mod referrals;
pub mod repository;
pub mod users;

pub use blogs::Blogs;
pub use courses::Courses;
pub use homepage::Homepage;
pub use records::{Certificates, IdCards};
pub use referrals::Referrals;
pub use repository::Repository;
pub use users::Users;
