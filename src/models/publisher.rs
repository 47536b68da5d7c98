//! Publisher model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Publisher model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Publisher {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create publisher request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePublisher {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

/// Update publisher request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePublisher {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}
