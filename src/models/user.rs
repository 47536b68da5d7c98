//! User (renter) model and related types
//!
//! Users here are the people who rent books. API credentials live in
//! [`crate::models::auth`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

/// Update user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}
