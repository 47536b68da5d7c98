//! Publishers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        page::{Page, PageFilter},
        publisher::{CreatePublisher, Publisher, UpdatePublisher},
    },
};

#[derive(Clone)]
pub struct PublishersRepository {
    pool: Pool<Postgres>,
}

impl PublishersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search publishers with pagination
    pub async fn search(&self, filter: &PageFilter) -> AppResult<Page<Publisher>> {
        let where_clause = if filter.filter.is_some() {
            "WHERE CAST(id AS TEXT) LIKE $1 OR LOWER(name) LIKE $1"
        } else {
            ""
        };

        let count_query = format!("SELECT COUNT(*) FROM publishers {}", where_clause);
        let select_query = format!(
            "SELECT * FROM publishers {} ORDER BY id LIMIT {} OFFSET {}",
            where_clause,
            filter.page_size(),
            filter.offset()
        );

        let pattern = filter
            .filter
            .as_ref()
            .map(|term| format!("%{}%", term.to_lowercase()));

        let (total, publishers) = if let Some(ref pattern) = pattern {
            let total: i64 = sqlx::query_scalar(&count_query)
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?;
            let publishers = sqlx::query_as::<_, Publisher>(&select_query)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?;
            (total, publishers)
        } else {
            let total: i64 = sqlx::query_scalar(&count_query)
                .fetch_one(&self.pool)
                .await?;
            let publishers = sqlx::query_as::<_, Publisher>(&select_query)
                .fetch_all(&self.pool)
                .await?;
            (total, publishers)
        };

        Ok(Page::new(publishers, total, filter))
    }

    /// Get publisher by ID
    pub async fn get(&self, id: i32) -> AppResult<Option<Publisher>> {
        let publisher = sqlx::query_as::<_, Publisher>("SELECT * FROM publishers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(publisher)
    }

    /// Create a new publisher
    pub async fn create(&self, publisher: &CreatePublisher) -> AppResult<Publisher> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO publishers (name) VALUES ($1) RETURNING id",
        )
        .bind(&publisher.name)
        .fetch_one(&self.pool)
        .await?;

        self.get(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Failed to reload publisher {}", id)))
    }

    /// Update an existing publisher
    pub async fn update(&self, id: i32, publisher: &UpdatePublisher) -> AppResult<Publisher> {
        sqlx::query("UPDATE publishers SET name = $1, updated_at = NOW() WHERE id = $2")
            .bind(&publisher.name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Failed to reload publisher {}", id)))
    }

    /// Delete a publisher
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM publishers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Check whether any book references the publisher
    pub async fn has_books(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE publisher_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
