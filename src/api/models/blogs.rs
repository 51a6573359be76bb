//! API models for blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::models::pagination::Pagination;
use crate::db::models::blogs::BlogDBResponse;
use crate::types::BlogId;

/// Request to create a blog post
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogCreate {
    pub title: String,
    pub body: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Request to update a blog post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Public representation of a blog post
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: BlogId,
    pub title: String,
    pub body: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogDBResponse> for BlogResponse {
    fn from(blog: BlogDBResponse) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            body: blog.body,
            author: blog.author,
            cover_image_url: blog.cover_image_url,
            is_published: blog.is_published,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

/// Query parameters for listing blog posts
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListBlogsQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Case-insensitive substring match on title or author
    pub search: Option<String>,
}
