//! API models for student records: certificates and ID cards, both looked up
//! publicly by roll number.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::records::{CertificateDBResponse, IdCardDBResponse};
use crate::types::{CertificateId, IdCardId};

/// Request to issue a certificate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CertificateCreate {
    /// Roll number (must be unique across certificates)
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub grade: Option<String>,
    pub issued_on: NaiveDate,
}

/// Public representation of a certificate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CertificateResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CertificateId,
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub grade: Option<String>,
    pub issued_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<CertificateDBResponse> for CertificateResponse {
    fn from(cert: CertificateDBResponse) -> Self {
        Self {
            id: cert.id,
            roll_number: cert.roll_number,
            student_name: cert.student_name,
            course_name: cert.course_name,
            grade: cert.grade,
            issued_on: cert.issued_on,
            created_at: cert.created_at,
        }
    }
}

/// Request to issue an ID card
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdCardCreate {
    /// Roll number (must be unique across ID cards)
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub photo_url: Option<String>,
    pub valid_until: NaiveDate,
}

/// Public representation of an ID card
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdCardResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: IdCardId,
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub photo_url: Option<String>,
    pub valid_until: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<IdCardDBResponse> for IdCardResponse {
    fn from(card: IdCardDBResponse) -> Self {
        Self {
            id: card.id,
            roll_number: card.roll_number,
            student_name: card.student_name,
            course_name: card.course_name,
            photo_url: card.photo_url,
            valid_until: card.valid_until,
            created_at: card.created_at,
        }
    }
}
