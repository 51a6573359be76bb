//! API models for the singleton homepage content document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::homepage::HomepageDBResponse;

/// Request to update the homepage content. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HomepageUpdate {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub about: Option<String>,
    /// Set to an empty string to clear the announcement banner
    pub announcement: Option<String>,
    pub contact_email: Option<String>,
}

/// Public representation of the homepage content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomepageResponse {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub about: String,
    pub announcement: Option<String>,
    pub contact_email: String,
    pub updated_at: DateTime<Utc>,
}

impl From<HomepageDBResponse> for HomepageResponse {
    fn from(homepage: HomepageDBResponse) -> Self {
        Self {
            hero_title: homepage.hero_title,
            hero_subtitle: homepage.hero_subtitle,
            about: homepage.about,
            announcement: homepage.announcement,
            contact_email: homepage.contact_email,
            updated_at: homepage.updated_at,
        }
    }
}
