//! Rental lifecycle workflow
//!
//! The one place where multi-entity rules live: stock movement on books,
//! date validation, duplicate-rental checks and status transitions. Rules
//! run first on plain values; the store is only touched once they all pass.

use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        page::{Page, PageFilter},
        rental::{CreateRental, NewRental, Rental, RentalDetails, RentalStatus, ReturnRental},
    },
    repository::{BookStore, RentalStore, UserStore},
};

/// Longest a rental may run, in days
const MAX_RENTAL_DAYS: i64 = 30;

#[derive(Clone)]
pub struct RentalsService<R, B, U> {
    rentals: R,
    books: B,
    users: U,
}

impl<R, B, U> RentalsService<R, B, U>
where
    R: RentalStore,
    B: BookStore,
    U: UserStore,
{
    pub fn new(rentals: R, books: B, users: U) -> Self {
        Self {
            rentals,
            books,
            users,
        }
    }

    /// Paged, filtered listing
    pub async fn get_all(&self, filter: &PageFilter) -> AppResult<Page<RentalDetails>> {
        let page = self.rentals.search(filter).await?;
        if page.items.is_empty() {
            return Err(AppError::NotFound("No rentals found.".to_string()));
        }
        Ok(page)
    }

    /// Full unpaged listing
    pub async fn list_all(&self) -> AppResult<Vec<RentalDetails>> {
        self.rentals.list_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<RentalDetails> {
        self.rentals
            .get_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found.".to_string()))
    }

    /// Start a rental. Every rule below must pass before anything is
    /// written; the store then takes the copy off the shelf and inserts the
    /// rental in one transaction.
    pub async fn create(&self, model: CreateRental) -> AppResult<i32> {
        model.validate()?;

        let book = self
            .books
            .get(model.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))?;

        if !self.users.exists(model.user_id).await? {
            return Err(AppError::NotFound("User not found.".to_string()));
        }

        let today = today();
        ensure_starts_today(model.rental_date, today)?;
        ensure_window(model.rental_date, model.forecast_date)?;

        if self
            .rentals
            .has_open_rental(model.user_id, model.book_id)
            .await?
        {
            return Err(AppError::BadRequest(
                "User already has an open rental of this book.".to_string(),
            ));
        }

        // snapshot check for the friendly error; the store re-checks the
        // quantity under its transaction
        if book.quantity < 1 {
            return Err(AppError::BadRequest("Book is out of stock.".to_string()));
        }

        let rental = NewRental {
            book_id: model.book_id,
            user_id: model.user_id,
            rental_date: model.rental_date,
            forecast_date: model.forecast_date,
            status: RentalStatus::Pending,
        };

        let id = self.rentals.create(&rental).await?;
        tracing::info!(
            "Rental {} created: book {} to user {}",
            id,
            model.book_id,
            model.user_id
        );

        Ok(id)
    }

    /// Return a rented book. The patch is merged over the stored rental,
    /// the merged candidate is validated, and only then does the store
    /// close the rental and put the copy back.
    pub async fn return_rental(&self, id: i32, patch: ReturnRental) -> AppResult<RentalStatus> {
        let current = self
            .rentals
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found.".to_string()))?;

        if !current.is_open() {
            return Err(AppError::BadRequest(
                "Rental has already been returned.".to_string(),
            ));
        }

        let mut candidate = patch.apply_to(&current);

        let today = today();
        ensure_returned_today(&candidate, today)?;
        candidate.status = status_on_return(candidate.forecast_date, today);

        self.rentals.finalize_return(&candidate).await?;
        tracing::info!("Rental {} closed as {}", id, candidate.status);

        Ok(candidate.status)
    }

    /// Delete a rental. An open rental hands its copy back to stock; a
    /// returned one already has.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let rental = self
            .rentals
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found.".to_string()))?;

        self.rentals.remove(rental.id).await?;
        tracing::info!("Rental {} deleted", id);

        Ok(())
    }
}

/// Calendar date the rules run against (UTC)
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn ensure_starts_today(rental_date: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if rental_date != today {
        return Err(AppError::BadRequest("Rental date must be today.".to_string()));
    }
    Ok(())
}

fn ensure_window(rental_date: NaiveDate, forecast_date: NaiveDate) -> AppResult<()> {
    if (forecast_date - rental_date).num_days() > MAX_RENTAL_DAYS {
        return Err(AppError::BadRequest(format!(
            "Rental period cannot exceed {} days.",
            MAX_RENTAL_DAYS
        )));
    }
    if forecast_date < rental_date {
        return Err(AppError::BadRequest(
            "Forecast date cannot be before the rental date.".to_string(),
        ));
    }
    Ok(())
}

fn ensure_returned_today(candidate: &Rental, today: NaiveDate) -> AppResult<()> {
    if candidate.return_date != Some(today) {
        return Err(AppError::BadRequest("Return date must be today.".to_string()));
    }
    Ok(())
}

/// Late when the book comes back after the forecast date
fn status_on_return(forecast_date: NaiveDate, return_date: NaiveDate) -> RentalStatus {
    if forecast_date < return_date {
        RentalStatus::Late
    } else {
        RentalStatus::OnTime
    }
}
