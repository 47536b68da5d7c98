//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::auth::CreateLogin};

use super::MessageResponse;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email of the login account
    pub email: String,
    /// Plain password, verified against the stored hash
    pub password: String,
}

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Register a new login account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = CreateLogin,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLogin>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account created successfully.".to_string(),
        }),
    ))
}

/// Authenticate and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let issued = state
        .services
        .auth
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}
