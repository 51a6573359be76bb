//! Database models for courses.

use chrono::{DateTime, Utc};

use crate::api::models::courses::{CourseCreate, CourseUpdate};
use crate::types::CourseId;

/// Database request for creating a course
#[derive(Debug, Clone)]
pub struct CourseCreateDBRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub thumbnail_url: Option<String>,
    pub is_published: bool,
}

impl From<CourseCreate> for CourseCreateDBRequest {
    fn from(api: CourseCreate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            category: api.category,
            price_cents: api.price_cents,
            thumbnail_url: api.thumbnail_url,
            is_published: api.is_published,
        }
    }
}

/// Database request for updating a course
#[derive(Debug, Clone, Default)]
pub struct CourseUpdateDBRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub is_published: Option<bool>,
}

impl From<CourseUpdate> for CourseUpdateDBRequest {
    fn from(api: CourseUpdate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            category: api.category,
            price_cents: api.price_cents,
            thumbnail_url: api.thumbnail_url,
            is_published: api.is_published,
        }
    }
}

/// Database response for a course
#[derive(Debug, Clone)]
pub struct CourseDBResponse {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub thumbnail_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
