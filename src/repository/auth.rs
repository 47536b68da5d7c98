//! Login accounts repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::auth::LoginUser};

#[derive(Clone)]
pub struct LoginsRepository {
    pool: Pool<Postgres>,
}

impl LoginsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get login account by email (primary authentication method)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<LoginUser>> {
        let account = sqlx::query_as::<_, LoginUser>(
            "SELECT * FROM login_users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM login_users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Create a new login account with an already-hashed password
    pub async fn create(&self, email: &str, password_hash: &str) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO login_users (email, password) VALUES ($1, $2) RETURNING id",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
