//! Database models for certificates and ID cards.

use chrono::{DateTime, NaiveDate, Utc};

use crate::api::models::records::{CertificateCreate, IdCardCreate};
use crate::types::{CertificateId, IdCardId};

/// Database request for issuing a certificate
#[derive(Debug, Clone)]
pub struct CertificateCreateDBRequest {
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub grade: Option<String>,
    pub issued_on: NaiveDate,
}

impl From<CertificateCreate> for CertificateCreateDBRequest {
    fn from(api: CertificateCreate) -> Self {
        Self {
            roll_number: api.roll_number,
            student_name: api.student_name,
            course_name: api.course_name,
            grade: api.grade,
            issued_on: api.issued_on,
        }
    }
}

/// Database response for a certificate
#[derive(Debug, Clone)]
pub struct CertificateDBResponse {
    pub id: CertificateId,
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub grade: Option<String>,
    pub issued_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for issuing an ID card
#[derive(Debug, Clone)]
pub struct IdCardCreateDBRequest {
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub photo_url: Option<String>,
    pub valid_until: NaiveDate,
}

impl From<IdCardCreate> for IdCardCreateDBRequest {
    fn from(api: IdCardCreate) -> Self {
        Self {
            roll_number: api.roll_number,
            student_name: api.student_name,
            course_name: api.course_name,
            photo_url: api.photo_url,
            valid_until: api.valid_until,
        }
    }
}

/// Database response for an ID card
#[derive(Debug, Clone)]
pub struct IdCardDBResponse {
    pub id: IdCardId,
    pub roll_number: String,
    pub student_name: String,
    pub course_name: String,
    pub photo_url: Option<String>,
    pub valid_until: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
