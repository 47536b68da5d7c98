//! Rental workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        page::{Page, PageFilter},
        rental::{CreateRental, RentalDetails, RentalStatus, ReturnRental},
    },
};

use super::{AuthenticatedUser, MessageResponse};

/// Response for a newly created rental
#[derive(Serialize, ToSchema)]
pub struct CreatedRentalResponse {
    /// Rental ID
    pub id: i32,
    /// Status message
    pub message: String,
}

/// Response for a completed return
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Outcome of the return
    pub status: RentalStatus,
    /// Status message
    pub message: String,
}

/// List rentals with pagination and free-text filter
#[utoipa::path(
    get,
    path = "/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(PageFilter),
    responses(
        (status = 200, description = "Paged list of rentals", body = Page<RentalDetails>),
        (status = 404, description = "No rentals matched"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<PageFilter>,
) -> AppResult<Json<Page<RentalDetails>>> {
    let page = state.services.rentals.get_all(&filter).await?;
    Ok(Json(page))
}

/// Get a rental by ID
#[utoipa::path(
    get,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental details", body = RentalDetails),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn get_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalDetails>> {
    let rental = state.services.rentals.get_by_id(id).await?;
    Ok(Json(rental))
}

/// Rent a book
#[utoipa::path(
    post,
    path = "/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    request_body = CreateRental,
    responses(
        (status = 201, description = "Rental created", body = CreatedRentalResponse),
        (status = 400, description = "Rule violation: dates, duplicate rental or stock"),
        (status = 404, description = "Book or user not found")
    )
)]
pub async fn create_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<CreateRental>,
) -> AppResult<(StatusCode, Json<CreatedRentalResponse>)> {
    let id = state.services.rentals.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedRentalResponse {
            id,
            message: "Book rented successfully.".to_string(),
        }),
    ))
}

/// Return a rented book
#[utoipa::path(
    put,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    request_body = ReturnRental,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 400, description = "Invalid return date or already returned"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn return_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<ReturnRental>,
) -> AppResult<Json<ReturnResponse>> {
    let status = state.services.rentals.return_rental(id, request).await?;

    Ok(Json(ReturnResponse {
        status,
        message: "Book returned successfully.".to_string(),
    }))
}

/// Delete a rental
#[utoipa::path(
    delete,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental deleted", body = MessageResponse),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn delete_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.rentals.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Rental deleted successfully.".to_string(),
    }))
}
