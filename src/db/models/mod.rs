//! Database entity models.
//!
//! Request/response types for the repository layer. These are distinct from
//! the API models: they carry storage-only fields (password hashes, reset
//! tokens) that must never cross the HTTP boundary.

pub mod blogs;
pub mod courses;
pub mod homepage;
pub mod records;
pub mod referrals;
pub mod users;
