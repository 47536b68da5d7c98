//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDetails, CreateBook, UpdateBook},
        page::{Page, PageFilter},
    },
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search books with pagination, publisher resolved
    pub async fn search(&self, filter: &PageFilter) -> AppResult<Page<BookDetails>> {
        let where_clause = if filter.filter.is_some() {
            r#"
            WHERE CAST(b.id AS TEXT) LIKE $1
               OR LOWER(b.name) LIKE $1
               OR LOWER(COALESCE(p.name, '')) LIKE $1
            "#
        } else {
            ""
        };

        let count_query = format!(
            "SELECT COUNT(*) FROM books b LEFT JOIN publishers p ON b.publisher_id = p.id {}",
            where_clause
        );
        let select_query = format!(
            r#"
            SELECT b.id, b.name, b.quantity, b.rented, b.publisher_id, p.name AS publisher_name
            FROM books b
            LEFT JOIN publishers p ON b.publisher_id = p.id
            {}
            ORDER BY b.id
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

        let (total, books) = if let Some(ref pattern) = pattern {
            let total: i64 = sqlx::query_scalar(&count_query)
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?;
            let books = sqlx::query_as::<_, BookDetails>(&select_query)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?;
            (total, books)
        } else {
            let total: i64 = sqlx::query_scalar(&count_query)
                .fetch_one(&self.pool)
                .await?;
            let books = sqlx::query_as::<_, BookDetails>(&select_query)
                .fetch_all(&self.pool)
                .await?;
            (total, books)
        };

        Ok(Page::new(books, total, filter))
    }

    /// Get book by ID with its publisher resolved
    pub async fn get_details(&self, id: i32) -> AppResult<Option<BookDetails>> {
        let book = sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.id, b.name, b.quantity, b.rented, b.publisher_id, p.name AS publisher_name
            FROM books b
            LEFT JOIN publishers p ON b.publisher_id = p.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<BookDetails> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO books (name, quantity, publisher_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&book.name)
        .bind(book.quantity)
        .bind(book.publisher_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_details(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Failed to reload book {}", id)))
    }

    /// Update an existing book; `rented` is left to the rental workflow
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<BookDetails> {
        sqlx::query(
            "UPDATE books SET name = $1, quantity = $2, publisher_id = $3, updated_at = NOW() WHERE id = $4",
        )
        .bind(&book.name)
        .bind(book.quantity)
        .bind(book.publisher_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_details(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Failed to reload book {}", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Check whether the book has any rentals, open or closed
    pub async fn has_rentals(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rentals WHERE book_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn get(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }
}
