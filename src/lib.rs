//! Librarium Bookstore Rental Management
//!
//! A Rust REST JSON API server for a bookstore rental service, covering the
//! book catalog, publishers, renters and the rental lifecycle itself.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
