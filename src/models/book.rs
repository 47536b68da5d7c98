//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database.
///
/// `quantity` counts copies on the shelf, `rented` counts copies out with
/// renters. Only the rental workflow moves copies between the two.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub rented: i32,
    pub publisher_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with its publisher resolved, for listings and detail views
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub rented: i32,
    pub publisher_id: Option<i32>,
    pub publisher_name: Option<String>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    pub publisher_id: Option<i32>,
}

/// Update book request. `rented` is owned by the rental workflow and is not
/// settable here.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    pub publisher_id: Option<i32>,
}
