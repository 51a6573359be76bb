//! Database repository for blog posts.

use crate::types::{abbrev_uuid, BlogId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::blogs::{BlogCreateDBRequest, BlogDBResponse, BlogUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing blog posts
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub skip: i64,
    pub limit: i64,
    /// Case-insensitive substring match on title or author
    pub search: Option<String>,
    /// When set, only rows with a matching published flag
    pub published: Option<bool>,
}

impl BlogFilter {
    pub fn new(skip: i64, limit: i64, search: Option<String>, published: Option<bool>) -> Self {
        Self { skip, limit, search, published }
    }
}

pub struct Blogs<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Blogs<'c> {
    type CreateRequest = BlogCreateDBRequest;
    type UpdateRequest = BlogUpdateDBRequest;
    type Response = BlogDBResponse;
    type Id = BlogId;
    type Filter = BlogFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let blog = sqlx::query_as!(
            BlogDBResponse,
            r#"
            INSERT INTO blogs (title, body, author, cover_image_url, is_published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
            request.title,
            request.body,
            request.author,
            request.cover_image_url,
            request.is_published,
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(blog)
    }

    #[instrument(skip(self), fields(blog_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let blog = sqlx::query_as!(BlogDBResponse, "SELECT * FROM blogs WHERE id = $1", id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(blog)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));
        let blogs = sqlx::query_as!(
            BlogDBResponse,
            r#"
            SELECT * FROM blogs
            WHERE ($3::text IS NULL OR title ILIKE $3 OR author ILIKE $3)
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

        Ok(blogs)
    }

    #[instrument(skip(self), fields(blog_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query!("DELETE FROM blogs WHERE id = $1", id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(blog_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let blog = sqlx::query_as!(
            BlogDBResponse,
            r#"
            UPDATE blogs SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                author = COALESCE($4, author),
                cover_image_url = COALESCE($5, cover_image_url),
                is_published = COALESCE($6, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            id,
            request.title.as_deref(),
            request.body.as_deref(),
            request.author.as_deref(),
            request.cover_image_url.as_deref(),
            request.is_published,
        )
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(blog)
    }
}

impl<'c> Blogs<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Count blog posts matching the filter's search and published constraints.
    #[instrument(skip(self, filter), err)]
    pub async fn count(&mut self, filter: &BlogFilter) -> Result<i64> {
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));
        let count = sqlx::query_scalar!(
            r#"
            SELECT COUNT(*) AS "count!"
            FROM blogs
            WHERE ($1::text IS NULL OR title ILIKE $1 OR author ILIKE $1)
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

    fn create_request(title: &str, published: bool) -> BlogCreateDBRequest {
        BlogCreateDBRequest {
            title: title.to_string(),
            body: "Body text".to_string(),
            author: "Staff Writer".to_string(),
            cover_image_url: None,
            is_published: published,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_list_blogs(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Blogs::new(&mut conn);

        repo.create(&create_request("Launch Notes", true)).await.unwrap();
        repo.create(&create_request("Unfinished Draft", false)).await.unwrap();

        let published = repo.list(&BlogFilter::new(0, 10, None, Some(true))).await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Launch Notes");

        let by_author = BlogFilter::new(0, 10, Some("staff".to_string()), None);
        assert_eq!(repo.count(&by_author).await.unwrap(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_blog(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Blogs::new(&mut conn);

        let blog = repo.create(&create_request("Before", false)).await.unwrap();
        let update = BlogUpdateDBRequest {
            body: Some("Rewritten body".to_string()),
            is_published: Some(true),
            ..Default::default()
        };
        let updated = repo.update(blog.id, &update).await.unwrap();
        assert_eq!(updated.body, "Rewritten body");
        assert_eq!(updated.title, "Before");
        assert!(updated.is_published);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_missing_blog_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Blogs::new(&mut conn);

        let err = repo
            .update(uuid::Uuid::new_v4(), &BlogUpdateDBRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }
}
