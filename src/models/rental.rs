//! Rental model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle status of a rental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RentalStatus {
    /// Book is out and the forecast date has a say on the outcome
    Pending,
    /// Returned after the forecast date
    Late,
    /// Returned on or before the forecast date
    #[serde(rename = "On time")]
    OnTime,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "Pending",
            RentalStatus::Late => "Late",
            RentalStatus::OnTime => "On time",
        }
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RentalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(RentalStatus::Pending),
            "Late" => Ok(RentalStatus::Late),
            "On time" => Ok(RentalStatus::OnTime),
            _ => Err(format!("Invalid rental status: {}", s)),
        }
    }
}

// Stored as TEXT in the rentals table
impl sqlx::Type<Postgres> for RentalStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RentalStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RentalStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Rental model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rental {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub rental_date: NaiveDate,
    pub forecast_date: NaiveDate,
    /// Unset while the rental is still open
    pub return_date: Option<NaiveDate>,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    /// A rental stays open until the book comes back
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Rental with the referenced book and user resolved
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RentalDetails {
    pub id: i32,
    pub book_id: i32,
    pub book_name: String,
    pub user_id: i32,
    pub user_name: String,
    pub rental_date: NaiveDate,
    pub forecast_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: RentalStatus,
}

/// Create rental request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRental {
    #[validate(range(min = 1, message = "A book reference is required"))]
    pub book_id: i32,
    #[validate(range(min = 1, message = "A user reference is required"))]
    pub user_id: i32,
    pub rental_date: NaiveDate,
    pub forecast_date: NaiveDate,
}

/// Return request. Dates left out keep their stored values.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReturnRental {
    pub return_date: NaiveDate,
    pub rental_date: Option<NaiveDate>,
    pub forecast_date: Option<NaiveDate>,
}

impl ReturnRental {
    /// Overlay the request on the stored rental, producing the candidate the
    /// return rules are checked against. Pure; nothing is written here.
    pub fn apply_to(&self, rental: &Rental) -> Rental {
        let mut merged = rental.clone();
        merged.rental_date = self.rental_date.unwrap_or(rental.rental_date);
        merged.forecast_date = self.forecast_date.unwrap_or(rental.forecast_date);
        merged.return_date = Some(self.return_date);
        merged
    }
}

/// Insert payload built by the workflow once every rule has passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRental {
    pub book_id: i32,
    pub user_id: i32,
    pub rental_date: NaiveDate,
    pub forecast_date: NaiveDate,
    pub status: RentalStatus,
}
