//! API models for referral submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::models::pagination::Pagination;
use crate::db::models::referrals::ReferralDBResponse;
use crate::types::ReferralId;

/// Public request to submit a referral
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferralCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Code of the referring user/campaign
    pub referral_code: String,
}

/// Representation of a referral (admin surface only)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferralResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ReferralId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub referral_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReferralDBResponse> for ReferralResponse {
    fn from(referral: ReferralDBResponse) -> Self {
        Self {
            id: referral.id,
            name: referral.name,
            email: referral.email,
            phone: referral.phone,
            referral_code: referral.referral_code,
            created_at: referral.created_at,
        }
    }
}

/// Query parameters for listing referrals
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListReferralsQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Filter by referral code
    pub referral_code: Option<String>,
}
