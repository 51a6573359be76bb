//! Database repositories for student records: certificates and ID cards.
//!
//! Both are issued by admins and looked up publicly by roll number. Roll
//! numbers are unique per record type, so these repos don't follow the
//! generic CRUD trait shape.

use crate::db::{
    errors::Result,
    models::records::{CertificateCreateDBRequest, CertificateDBResponse, IdCardCreateDBRequest, IdCardDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Certificates<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Certificates<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(roll_number = %request.roll_number), err)]
    pub async fn create(&mut self, request: &CertificateCreateDBRequest) -> Result<CertificateDBResponse> {
        let cert = sqlx::query_as!(
            CertificateDBResponse,
            r#"
            INSERT INTO certificates (roll_number, student_name, course_name, grade, issued_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
            request.roll_number,
            request.student_name,
            request.course_name,
            request.grade,
            request.issued_on,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(cert)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_roll_number(&mut self, roll_number: &str) -> Result<Option<CertificateDBResponse>> {
        let cert = sqlx::query_as!(
            CertificateDBResponse,
            "SELECT * FROM certificates WHERE roll_number = $1",
            roll_number
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(cert)
    }
}

pub struct IdCards<'c> {
    db: &'c mut PgConnection,
}

impl<'c> IdCards<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(roll_number = %request.roll_number), err)]
    pub async fn create(&mut self, request: &IdCardCreateDBRequest) -> Result<IdCardDBResponse> {
        let card = sqlx::query_as!(
            IdCardDBResponse,
            r#"
            INSERT INTO id_cards (roll_number, student_name, course_name, photo_url, valid_until)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
            request.roll_number,
            request.student_name,
            request.course_name,
            request.photo_url,
            request.valid_until,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(card)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_roll_number(&mut self, roll_number: &str) -> Result<Option<IdCardDBResponse>> {
        let card = sqlx::query_as!(IdCardDBResponse, "SELECT * FROM id_cards WHERE roll_number = $1", roll_number)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use chrono::NaiveDate;
    use sqlx::PgPool;

    fn cert_request(roll: &str) -> CertificateCreateDBRequest {
        CertificateCreateDBRequest {
            roll_number: roll.to_string(),
            student_name: "Asha Rao".to_string(),
            course_name: "Web Development".to_string(),
            grade: Some("A".to_string()),
            issued_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_certificate_roundtrip_by_roll_number(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Certificates::new(&mut conn);

        let created = repo.create(&cert_request("RN-1001")).await.unwrap();
        let found = repo.get_by_roll_number("RN-1001").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.student_name, "Asha Rao");

        assert!(repo.get_by_roll_number("RN-9999").await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_roll_number_is_unique_violation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Certificates::new(&mut conn);

        repo.create(&cert_request("RN-2002")).await.unwrap();
        let err = repo.create(&cert_request("RN-2002")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_id_card_roundtrip(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = IdCards::new(&mut conn);

        let request = IdCardCreateDBRequest {
            roll_number: "RN-3003".to_string(),
            student_name: "Ravi Kumar".to_string(),
            course_name: "Graphic Design".to_string(),
            photo_url: None,
            valid_until: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        };
        let created = repo.create(&request).await.unwrap();
        let found = repo.get_by_roll_number("RN-3003").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.course_name, "Graphic Design");
    }
}
