//! API models for the course catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::models::pagination::Pagination;
use crate::db::models::courses::CourseDBResponse;
use crate::types::CourseId;

/// Request to create a course
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseCreate {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Price in the smallest currency unit
    pub price_cents: i64,
    pub thumbnail_url: Option<String>,
    /// Unpublished courses are only visible on the admin surface
    #[serde(default)]
    pub is_published: bool,
}

/// Request to update a course. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Public representation of a course
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    #[schema(value_type = String, format = "uuid")]
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

impl From<CourseDBResponse> for CourseResponse {
    fn from(course: CourseDBResponse) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            category: course.category,
            price_cents: course.price_cents,
            thumbnail_url: course.thumbnail_url,
            is_published: course.is_published,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

/// Query parameters for listing courses
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCoursesQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Case-insensitive substring match on title or category
    pub search: Option<String>,
}
