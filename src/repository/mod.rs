//! Repository layer for database operations

pub mod auth;
pub mod books;
pub mod publishers;
pub mod rentals;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        book::Book,
        page::{Page, PageFilter},
        rental::{NewRental, Rental, RentalDetails},
    },
};

/// Book access as consumed by the rental workflow
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn get(&self, id: i32) -> AppResult<Option<Book>>;
}

/// User access as consumed by the rental workflow
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Rental persistence as consumed by the rental workflow.
///
/// Every mutating operation pairs the rental write with its stock effect on
/// the book row inside a single transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// Paged listing; the filter term matches ids, dates, status and the
    /// joined book/user names.
    async fn search(&self, filter: &PageFilter) -> AppResult<Page<RentalDetails>>;

    /// Unpaged full listing
    async fn list_all(&self) -> AppResult<Vec<RentalDetails>>;

    /// Fetch by id with the referenced book and user resolved
    async fn get_details(&self, id: i32) -> AppResult<Option<RentalDetails>>;

    /// Fetch the bare row by id
    async fn get(&self, id: i32) -> AppResult<Option<Rental>>;

    /// True when the user already has an open rental of the book
    async fn has_open_rental(&self, user_id: i32, book_id: i32) -> AppResult<bool>;

    /// Insert the rental and take one copy off the shelf (quantity - 1,
    /// rented + 1). Fails without writing anything when no copy is left.
    async fn create(&self, rental: &NewRental) -> AppResult<i32>;

    /// Persist a returned rental and put its copy back (quantity + 1,
    /// rented - 1)
    async fn finalize_return(&self, rental: &Rental) -> AppResult<()>;

    /// Delete the rental; an open rental hands its copy back to stock
    async fn remove(&self, id: i32) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub publishers: publishers::PublishersRepository,
    pub rentals: rentals::RentalsRepository,
    pub logins: auth::LoginsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            publishers: publishers::PublishersRepository::new(pool.clone()),
            rentals: rentals::RentalsRepository::new(pool.clone()),
            logins: auth::LoginsRepository::new(pool.clone()),
            pool,
        }
    }
}
