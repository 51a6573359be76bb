//! Database models for referrals.

use chrono::{DateTime, Utc};

use crate::api::models::referrals::ReferralCreate;
use crate::types::ReferralId;

/// Database request for recording a referral
#[derive(Debug, Clone)]
pub struct ReferralCreateDBRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub referral_code: String,
}

impl From<ReferralCreate> for ReferralCreateDBRequest {
    fn from(api: ReferralCreate) -> Self {
        Self {
            name: api.name,
            email: api.email,
            phone: api.phone,
            referral_code: api.referral_code,
        }
    }
}

/// Database response for a referral
#[derive(Debug, Clone)]
pub struct ReferralDBResponse {
    pub id: ReferralId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub referral_code: String,
    pub created_at: DateTime<Utc>,
}
