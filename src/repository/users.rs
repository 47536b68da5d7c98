//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        page::{Page, PageFilter},
        user::{CreateUser, UpdateUser, User},
    },
    repository::UserStore,
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search users with pagination
    pub async fn search(&self, filter: &PageFilter) -> AppResult<Page<User>> {
        let where_clause = if filter.filter.is_some() {
            "WHERE CAST(id AS TEXT) LIKE $1 OR LOWER(name) LIKE $1"
        } else {
            ""
        };

        let count_query = format!("SELECT COUNT(*) FROM users {}", where_clause);
        let select_query = format!(
            "SELECT * FROM users {} ORDER BY id LIMIT {} OFFSET {}",
            where_clause,
            filter.page_size(),
            filter.offset()
        );

        let pattern = filter
            .filter
            .as_ref()
            .map(|term| format!("%{}%", term.to_lowercase()));

        let (total, users) = if let Some(ref pattern) = pattern {
            let total: i64 = sqlx::query_scalar(&count_query)
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?;
            let users = sqlx::query_as::<_, User>(&select_query)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?;
            (total, users)
        } else {
            let total: i64 = sqlx::query_scalar(&count_query)
                .fetch_one(&self.pool)
                .await?;
            let users = sqlx::query_as::<_, User>(&select_query)
                .fetch_all(&self.pool)
                .await?;
            (total, users)
        };

        Ok(Page::new(users, total, filter))
    }

    /// Get user by ID
    pub async fn get(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Create a new user
    pub async fn create(&self, user: &CreateUser) -> AppResult<User> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (name) VALUES ($1) RETURNING id",
        )
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await?;

        self.get(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Failed to reload user {}", id)))
    }

    /// Update an existing user
    pub async fn update(&self, id: i32, user: &UpdateUser) -> AppResult<User> {
        sqlx::query("UPDATE users SET name = $1, updated_at = NOW() WHERE id = $2")
            .bind(&user.name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Failed to reload user {}", id)))
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Check whether the user has any rentals, open or closed
    pub async fn has_rentals(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rentals WHERE user_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
