//! Business logic services

pub mod auth;
pub mod books;
pub mod publishers;
pub mod rentals;
pub mod users;

use crate::{
    config::AuthConfig,
    repository::{
        books::BooksRepository, rentals::RentalsRepository, users::UsersRepository, Repository,
    },
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub publishers: publishers::PublishersService,
    pub rentals: rentals::RentalsService<RentalsRepository, BooksRepository, UsersRepository>,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            books: books::BooksService::new(repository.clone()),
            publishers: publishers::PublishersService::new(repository.clone()),
            rentals: rentals::RentalsService::new(
                repository.rentals.clone(),
                repository.books.clone(),
                repository.users.clone(),
            ),
            users: users::UsersService::new(repository),
        }
    }
}
