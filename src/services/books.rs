//! Book management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDetails, CreateBook, UpdateBook},
        page::{Page, PageFilter},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Paged, filtered listing
    pub async fn get_all(&self, filter: &PageFilter) -> AppResult<Page<BookDetails>> {
        let page = self.repository.books.search(filter).await?;
        if page.items.is_empty() {
            return Err(AppError::NotFound("No books found.".to_string()));
        }
        Ok(page)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<BookDetails> {
        self.repository
            .books
            .get_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))
    }

    pub async fn create(&self, book: CreateBook) -> AppResult<BookDetails> {
        book.validate()?;
        self.ensure_publisher(book.publisher_id).await?;

        self.repository.books.create(&book).await
    }

    pub async fn update(&self, id: i32, book: UpdateBook) -> AppResult<BookDetails> {
        book.validate()?;

        if self.repository.books.get_details(id).await?.is_none() {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }
        self.ensure_publisher(book.publisher_id).await?;

        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Books referenced by any rental stay, so the rental
    /// history keeps its reference.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.books.get_details(id).await?.is_none() {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }
        if self.repository.books.has_rentals(id).await? {
            return Err(AppError::BadRequest(
                "Book has rentals and cannot be deleted.".to_string(),
            ));
        }

        self.repository.books.delete(id).await
    }

    async fn ensure_publisher(&self, publisher_id: Option<i32>) -> AppResult<()> {
        if let Some(publisher_id) = publisher_id {
            if self.repository.publishers.get(publisher_id).await?.is_none() {
                return Err(AppError::NotFound("Publisher not found.".to_string()));
            }
        }
        Ok(())
    }
}
