//! Database layer for data persistence and access.
//!
//! Implements the data access layer using SQLx with PostgreSQL, following the
//! Repository pattern: API handlers call repositories in [`handlers`], which
//! construct queries and return record structs from [`models`].
//!
//! Migrations live in the `migrations/` directory and are exposed through
//! [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
