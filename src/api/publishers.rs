//! Publisher management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        page::{Page, PageFilter},
        publisher::{CreatePublisher, Publisher, UpdatePublisher},
    },
};

use super::{AuthenticatedUser, MessageResponse};

/// List publishers with pagination and free-text filter
#[utoipa::path(
    get,
    path = "/publishers",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(PageFilter),
    responses(
        (status = 200, description = "Paged list of publishers", body = Page<Publisher>),
        (status = 404, description = "No publishers matched"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_publishers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<PageFilter>,
) -> AppResult<Json<Page<Publisher>>> {
    let page = state.services.publishers.get_all(&filter).await?;
    Ok(Json(page))
}

/// Get a publisher by ID
#[utoipa::path(
    get,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    responses(
        (status = 200, description = "Publisher details", body = Publisher),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn get_publisher(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Publisher>> {
    let publisher = state.services.publishers.get_by_id(id).await?;
    Ok(Json(publisher))
}

/// Create a new publisher
#[utoipa::path(
    post,
    path = "/publishers",
    tag = "publishers",
    security(("bearer_auth" = [])),
    request_body = CreatePublisher,
    responses(
        (status = 201, description = "Publisher created", body = Publisher),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_publisher(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<CreatePublisher>,
) -> AppResult<(StatusCode, Json<Publisher>)> {
    let publisher = state.services.publishers.create(request).await?;
    Ok((StatusCode::CREATED, Json(publisher)))
}

/// Update an existing publisher
#[utoipa::path(
    put,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    request_body = UpdatePublisher,
    responses(
        (status = 200, description = "Publisher updated", body = Publisher),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn update_publisher(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePublisher>,
) -> AppResult<Json<Publisher>> {
    let publisher = state.services.publishers.update(id, request).await?;
    Ok(Json(publisher))
}

/// Delete a publisher without books
#[utoipa::path(
    delete,
    path = "/publishers/{id}",
    tag = "publishers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Publisher ID")),
    responses(
        (status = 200, description = "Publisher deleted", body = MessageResponse),
        (status = 400, description = "Publisher still has books"),
        (status = 404, description = "Publisher not found")
    )
)]
pub async fn delete_publisher(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.publishers.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Publisher deleted successfully.".to_string(),
    }))
}
