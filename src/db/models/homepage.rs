//! Database models for the singleton homepage document.

use chrono::{DateTime, Utc};

use crate::api::models::homepage::HomepageUpdate;

/// Database request for updating the homepage content
#[derive(Debug, Clone, Default)]
pub struct HomepageUpdateDBRequest {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub about: Option<String>,
    pub announcement: Option<String>,
    pub contact_email: Option<String>,
}

impl From<HomepageUpdate> for HomepageUpdateDBRequest {
    fn from(api: HomepageUpdate) -> Self {
        Self {
            hero_title: api.hero_title,
            hero_subtitle: api.hero_subtitle,
            about: api.about,
            announcement: api.announcement,
            contact_email: api.contact_email,
        }
    }
}

/// Database response for the homepage content
#[derive(Debug, Clone)]
pub struct HomepageDBResponse {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub about: String,
    pub announcement: Option<String>,
    pub contact_email: String,
    pub updated_at: DateTime<Utc>,
}
