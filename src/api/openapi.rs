//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, publishers, rentals, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Librarium API",
        version = "1.0.0",
        description = "Bookstore Rental Management REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        // Publishers
        publishers::list_publishers,
        publishers::get_publisher,
        publishers::create_publisher,
        publishers::update_publisher,
        publishers::delete_publisher,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Rentals
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::return_rental,
        rentals::delete_rental,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::auth::CreateLogin,
            // Publishers
            crate::models::publisher::Publisher,
            crate::models::publisher::CreatePublisher,
            crate::models::publisher::UpdatePublisher,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Rentals
            crate::models::rental::Rental,
            crate::models::rental::RentalDetails,
            crate::models::rental::RentalStatus,
            crate::models::rental::CreateRental,
            crate::models::rental::ReturnRental,
            rentals::CreatedRentalResponse,
            rentals::ReturnResponse,
            // Shared
            crate::models::page::PageFilter,
            crate::api::MessageResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "publishers", description = "Publisher management"),
        (name = "users", description = "User management"),
        (name = "books", description = "Book and stock management"),
        (name = "rentals", description = "Rental workflow")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
