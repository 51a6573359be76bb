//! Database repository for the singleton homepage document.
//!
//! The homepage table holds exactly one row, seeded by the migrations and
//! keyed by a constant TRUE primary key.

use crate::db::{
    errors::Result,
    models::homepage::{HomepageDBResponse, HomepageUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Homepage<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Homepage<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn get(&mut self) -> Result<HomepageDBResponse> {
        let homepage = sqlx::query_as!(
            HomepageDBResponse,
            "SELECT hero_title, hero_subtitle, about, announcement, contact_email, updated_at FROM homepage WHERE id"
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(homepage)
    }

    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, request: &HomepageUpdateDBRequest) -> Result<HomepageDBResponse> {
        let homepage = sqlx::query_as!(
            HomepageDBResponse,
            r#"
            UPDATE homepage SET
                hero_title = COALESCE($1, hero_title),
                hero_subtitle = COALESCE($2, hero_subtitle),
                about = COALESCE($3, about),
                announcement = CASE
                    WHEN $4::text IS NULL THEN announcement
                    WHEN $4 = '' THEN NULL
                    ELSE $4
                END,
                contact_email = COALESCE($5, contact_email),
                updated_at = NOW()
            WHERE id
            RETURNING hero_title, hero_subtitle, about, announcement, contact_email, updated_at
            "#,
            request.hero_title.as_deref(),
            request.hero_subtitle.as_deref(),
            request.about.as_deref(),
            request.announcement.as_deref(),
            request.contact_email.as_deref(),
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(homepage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_homepage_row_is_seeded(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Homepage::new(&mut conn);

        let homepage = repo.get().await.unwrap();
        assert_eq!(homepage.hero_title, "");
        assert!(homepage.announcement.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_partial_update_preserves_other_fields(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Homepage::new(&mut conn);

        let first = HomepageUpdateDBRequest {
            hero_title: Some("Learn with us".to_string()),
            contact_email: Some("hello@example.com".to_string()),
            ..Default::default()
        };
        repo.update(&first).await.unwrap();

        let second = HomepageUpdateDBRequest {
            announcement: Some("New batch starts Monday".to_string()),
            ..Default::default()
        };
        let updated = repo.update(&second).await.unwrap();

        assert_eq!(updated.hero_title, "Learn with us");
        assert_eq!(updated.contact_email, "hello@example.com");
        assert_eq!(updated.announcement.as_deref(), Some("New batch starts Monday"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_empty_announcement_clears_it(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Homepage::new(&mut conn);

        let set = HomepageUpdateDBRequest {
            announcement: Some("Temporary notice".to_string()),
            ..Default::default()
        };
        repo.update(&set).await.unwrap();

        let clear = HomepageUpdateDBRequest {
            announcement: Some(String::new()),
            ..Default::default()
        };
        let updated = repo.update(&clear).await.unwrap();
        assert!(updated.announcement.is_none());
    }
}
