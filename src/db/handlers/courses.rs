//! Database repository for the course catalog.

use crate::types::{abbrev_uuid, CourseId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::courses::{CourseCreateDBRequest, CourseDBResponse, CourseUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing courses
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub skip: i64,
    pub limit: i64,
    /// Case-insensitive substring match on title or category
    pub search: Option<String>,
    /// When set, only rows with a matching published flag
    pub published: Option<bool>,
}

impl CourseFilter {
    pub fn new(skip: i64, limit: i64, search: Option<String>, published: Option<bool>) -> Self {
        Self { skip, limit, search, published }
    }
}

pub struct Courses<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Courses<'c> {
    type CreateRequest = CourseCreateDBRequest;
    type UpdateRequest = CourseUpdateDBRequest;
    type Response = CourseDBResponse;
    type Id = CourseId;
    type Filter = CourseFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let course = sqlx::query_as!(
            CourseDBResponse,
            r#"
            INSERT INTO courses (title, description, category, price_cents, thumbnail_url, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
            request.title,
            request.description,
            request.category,
            request.price_cents,
            request.thumbnail_url,
            request.is_published,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self), fields(course_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let course = sqlx::query_as!(CourseDBResponse, "SELECT * FROM courses WHERE id = $1", id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(course)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));
        let courses = sqlx::query_as!(
            CourseDBResponse,
            r#"
            SELECT * FROM courses
            WHERE ($3::text IS NULL OR title ILIKE $3 OR category ILIKE $3)
              AND ($4::bool IS NULL OR is_published = $4)
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            filter.limit,
            filter.skip,
            pattern,
            filter.published,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(self), fields(course_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query!("DELETE FROM courses WHERE id = $1", id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(course_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let course = sqlx::query_as!(
            CourseDBResponse,
            r#"
            UPDATE courses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                price_cents = COALESCE($5, price_cents),
                thumbnail_url = COALESCE($6, thumbnail_url),
                is_published = COALESCE($7, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.category.as_deref(),
            request.price_cents,
            request.thumbnail_url.as_deref(),
            request.is_published,
        )
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(course)
    }
}

impl<'c> Courses<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Count courses matching the filter's search and published constraints.
    #[instrument(skip(self, filter), err)]
    pub async fn count(&mut self, filter: &CourseFilter) -> Result<i64> {
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));
        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM courses
            WHERE ($1::text IS NULL OR title ILIKE $1 OR category ILIKE $1)
              AND ($2::bool IS NULL OR is_published = $2)
            "#,
            pattern,
            filter.published,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use sqlx::PgPool;

    fn create_request(title: &str, published: bool) -> CourseCreateDBRequest {
        CourseCreateDBRequest {
            title: title.to_string(),
            description: "A course".to_string(),
            category: "programming".to_string(),
            price_cents: 4999,
            thumbnail_url: None,
            is_published: published,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_course(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Courses::new(&mut conn);

        let course = repo.create(&create_request("Rust Basics", true)).await.unwrap();
        assert_eq!(course.title, "Rust Basics");
        assert_eq!(course.price_cents, 4999);

        let fetched = repo.get_by_id(course.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, course.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_published_only(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Courses::new(&mut conn);

        repo.create(&create_request("Visible", true)).await.unwrap();
        repo.create(&create_request("Draft", false)).await.unwrap();

        let filter = CourseFilter::new(0, 10, None, Some(true));
        let courses = repo.list(&filter).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].title, "Visible");
        assert_eq!(repo.count(&filter).await.unwrap(), 1);

        let all = repo.list(&CourseFilter::new(0, 10, None, None)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_course_partial(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Courses::new(&mut conn);

        let course = repo.create(&create_request("Old Title", false)).await.unwrap();
        let update = CourseUpdateDBRequest {
            title: Some("New Title".to_string()),
            is_published: Some(true),
            ..Default::default()
        };
        let updated = repo.update(course.id, &update).await.unwrap();
        assert_eq!(updated.title, "New Title");
        assert!(updated.is_published);
        // Untouched fields survive
        assert_eq!(updated.description, "A course");
        assert!(updated.updated_at >= course.updated_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_course(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Courses::new(&mut conn);

        let course = repo.create(&create_request("Doomed", true)).await.unwrap();
        assert!(repo.delete(course.id).await.unwrap());
        assert!(!repo.delete(course.id).await.unwrap());
        assert!(repo.get_by_id(course.id).await.unwrap().is_none());
    }
}
