//! Database models for blog posts.

use chrono::{DateTime, Utc};

use crate::api::models::blogs::{BlogCreate, BlogUpdate};
use crate::types::BlogId;

/// Database request for creating a blog post
#[derive(Debug, Clone)]
pub struct BlogCreateDBRequest {
    pub title: String,
    pub body: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub is_published: bool,
}

impl From<BlogCreate> for BlogCreateDBRequest {
    fn from(api: BlogCreate) -> Self {
        Self {
            title: api.title,
            body: api.body,
            author: api.author,
            cover_image_url: api.cover_image_url,
            is_published: api.is_published,
        }
    }
}

/// Database request for updating a blog post
#[derive(Debug, Clone, Default)]
pub struct BlogUpdateDBRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_published: Option<bool>,
}

impl From<BlogUpdate> for BlogUpdateDBRequest {
    fn from(api: BlogUpdate) -> Self {
        Self {
            title: api.title,
            body: api.body,
            author: api.author,
            cover_image_url: api.cover_image_url,
            is_published: api.is_published,
        }
    }
}

/// Database response for a blog post
#[derive(Debug, Clone)]
pub struct BlogDBResponse {
    pub id: BlogId,
    pub title: String,
    pub body: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
