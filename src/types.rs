//! Common type definitions.
//!
//! Type aliases for entity IDs (all UUIDs) plus small utilities shared across
//! the API and database layers.

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type CourseId = Uuid;
pub type BlogId = Uuid;
pub type CertificateId = Uuid;
pub type IdCardId = Uuid;
pub type ReferralId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
