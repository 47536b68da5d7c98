//! Rentals repository for database operations
//!
//! Mutations here pair the rental row with its stock movement on the book
//! row inside one transaction, so no failure or concurrent request can leave
//! the two out of step.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        page::{Page, PageFilter},
        rental::{NewRental, Rental, RentalDetails},
    },
    repository::RentalStore,
};

#[derive(Clone)]
pub struct RentalsRepository {
    pool: Pool<Postgres>,
}

impl RentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalStore for RentalsRepository {
    async fn search(&self, filter: &PageFilter) -> AppResult<Page<RentalDetails>> {
        let where_clause = if filter.filter.is_some() {
            r#"
            WHERE CAST(r.id AS TEXT) LIKE $1
               OR CAST(r.book_id AS TEXT) LIKE $1
               OR CAST(r.user_id AS TEXT) LIKE $1
               OR TO_CHAR(r.rental_date, 'YYYY-MM-DD') LIKE $1
               OR TO_CHAR(r.forecast_date, 'YYYY-MM-DD') LIKE $1
               OR COALESCE(TO_CHAR(r.return_date, 'YYYY-MM-DD'), '') LIKE $1
               OR LOWER(r.status) LIKE $1
               OR LOWER(b.name) LIKE $1
               OR LOWER(u.name) LIKE $1
            "#
        } else {
            ""
        };

        let count_query = format!(
            r#"
            SELECT COUNT(*)
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            JOIN users u ON r.user_id = u.id
            {}
            "#,
            where_clause
        );
        let select_query = format!(
            r#"
            SELECT r.id, r.book_id, b.name AS book_name, r.user_id, u.name AS user_name,
                   r.rental_date, r.forecast_date, r.return_date, r.status
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            JOIN users u ON r.user_id = u.id
            {}
            ORDER BY r.id
            LIMIT {} OFFSET {}
            "#,
            where_clause,
            filter.page_size(),
            filter.offset()
        );

        let pattern = filter
            .filter
            .as_ref()
            .map(|term| format!("%{}%", term.to_lowercase()));

        let (total, rentals) = if let Some(ref pattern) = pattern {
            let total: i64 = sqlx::query_scalar(&count_query)
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?;
            let rentals = sqlx::query_as::<_, RentalDetails>(&select_query)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?;
            (total, rentals)
        } else {
            let total: i64 = sqlx::query_scalar(&count_query)
                .fetch_one(&self.pool)
                .await?;
            let rentals = sqlx::query_as::<_, RentalDetails>(&select_query)
                .fetch_all(&self.pool)
                .await?;
            (total, rentals)
        };

        Ok(Page::new(rentals, total, filter))
    }

    async fn list_all(&self) -> AppResult<Vec<RentalDetails>> {
        let rentals = sqlx::query_as::<_, RentalDetails>(
            r#"
            SELECT r.id, r.book_id, b.name AS book_name, r.user_id, u.name AS user_name,
                   r.rental_date, r.forecast_date, r.return_date, r.status
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            JOIN users u ON r.user_id = u.id
            ORDER BY r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    async fn get_details(&self, id: i32) -> AppResult<Option<RentalDetails>> {
        let rental = sqlx::query_as::<_, RentalDetails>(
            r#"
            SELECT r.id, r.book_id, b.name AS book_name, r.user_id, u.name AS user_name,
                   r.rental_date, r.forecast_date, r.return_date, r.status
            FROM rentals r
            JOIN books b ON r.book_id = b.id
            JOIN users u ON r.user_id = u.id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    async fn get(&self, id: i32) -> AppResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    async fn has_open_rental(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM rentals
                WHERE user_id = $1 AND book_id = $2 AND return_date IS NULL
            )
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, rental: &NewRental) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        // the quantity guard is what closes the last-copy race: two
        // concurrent creates cannot both pass it
        let taken = sqlx::query(
            r#"
            UPDATE books
            SET quantity = quantity - 1, rented = rented + 1, updated_at = NOW()
            WHERE id = $1 AND quantity > 0
            "#,
        )
        .bind(rental.book_id)
        .execute(&mut *tx)
        .await?;

        if taken.rows_affected() == 0 {
            return Err(AppError::BadRequest("Book is out of stock.".to_string()));
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO rentals (book_id, user_id, rental_date, forecast_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(rental.book_id)
        .bind(rental.user_id)
        .bind(rental.rental_date)
        .bind(rental.forecast_date)
        .bind(rental.status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn finalize_return(&self, rental: &Rental) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE books
            SET quantity = quantity + 1, rented = rented - 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(rental.book_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE rentals
            SET rental_date = $1, forecast_date = $2, return_date = $3, status = $4,
                updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(rental.rental_date)
        .bind(rental.forecast_date)
        .bind(rental.return_date)
        .bind(rental.status)
        .bind(rental.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn remove(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<(i32, Option<NaiveDate>)> =
            sqlx::query_as("DELETE FROM rentals WHERE id = $1 RETURNING book_id, return_date")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((book_id, return_date)) = deleted else {
            return Err(AppError::NotFound(format!("Rental with id {} not found", id)));
        };

        // only an open rental still holds a copy
        if return_date.is_none() {
            sqlx::query(
                r#"
                UPDATE books
                SET quantity = quantity + 1, rented = rented - 1, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
