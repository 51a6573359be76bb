//! Database repository for referrals.
//!
//! Referrals are write-once from the public surface and only listed on the
//! admin surface, so there is no update path.

use crate::db::{
    errors::Result,
    models::referrals::{ReferralCreateDBRequest, ReferralDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing referrals
#[derive(Debug, Clone, Default)]
pub struct ReferralFilter {
    pub skip: i64,
    pub limit: i64,
    /// Exact match on the referral code
    pub referral_code: Option<String>,
}

impl ReferralFilter {
    pub fn new(skip: i64, limit: i64, referral_code: Option<String>) -> Self {
        Self { skip, limit, referral_code }
    }
}

pub struct Referrals<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Referrals<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(referral_code = %request.referral_code), err)]
    pub async fn create(&mut self, request: &ReferralCreateDBRequest) -> Result<ReferralDBResponse> {
        let referral = sqlx::query_as!(
            ReferralDBResponse,
            r#"
            INSERT INTO referrals (name, email, phone, referral_code)
            VALUES ($1, LOWER($2), $3, $4)
            RETURNING *
            "#,
            request.name,
            request.email,
            request.phone,
            request.referral_code,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(referral)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &ReferralFilter) -> Result<Vec<ReferralDBResponse>> {
        let referrals = sqlx::query_as!(
            ReferralDBResponse,
            r#"
            SELECT * FROM referrals
            WHERE ($3::text IS NULL OR referral_code = $3)
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            filter.limit,
            filter.skip,
            filter.referral_code.as_deref(),
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(referrals)
    }

    #[instrument(skip(self, filter), err)]
    pub async fn count(&mut self, filter: &ReferralFilter) -> Result<i64> {
        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM referrals
            WHERE ($1::text IS NULL OR referral_code = $1)
            "#,
            filter.referral_code.as_deref(),
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn referral(name: &str, code: &str) -> ReferralCreateDBRequest {
        ReferralCreateDBRequest {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            referral_code: code.to_string(),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_list_referrals(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Referrals::new(&mut conn);

        repo.create(&referral("Asha", "FRIEND10")).await.unwrap();
        repo.create(&referral("Ravi", "FRIEND10")).await.unwrap();
        repo.create(&referral("Mina", "CAMPUS")).await.unwrap();

        let all = repo.list(&ReferralFilter::new(0, 10, None)).await.unwrap();
        assert_eq!(all.len(), 3);

        let by_code = ReferralFilter::new(0, 10, Some("FRIEND10".to_string()));
        assert_eq!(repo.list(&by_code).await.unwrap().len(), 2);
        assert_eq!(repo.count(&by_code).await.unwrap(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_referral_email_is_lowercased(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Referrals::new(&mut conn);

        let mut request = referral("Case", "CODE1");
        request.email = "Case.Sensitive@Example.COM".to_string();
        let created = repo.create(&request).await.unwrap();
        assert_eq!(created.email, "case.sensitive@example.com");
    }
}
