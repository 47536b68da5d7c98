//! Data models for Librarium

pub mod auth;
pub mod book;
pub mod page;
pub mod publisher;
pub mod rental;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthClaims, LoginUser};
pub use book::{Book, BookDetails};
pub use page::{Page, PageFilter};
pub use publisher::Publisher;
pub use rental::{NewRental, Rental, RentalDetails, RentalStatus};
pub use user::User;
