//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, categories, health, rentals, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.2.0",
        description = "Library catalog and rental ledger REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "Bookshelf API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::list_available,
        books::list_rented,
        // Rentals
        rentals::rent_book,
        rentals::return_book,
        // Categories
        categories::list_categories,
        categories::get_category_books,
        // Users
        users::list_users,
        users::get_user,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookWithAvailability,
            crate::models::book::CreateBook,
            crate::models::category::Category,
            crate::models::rental::Rental,
            crate::models::user::User,
            rentals::RentRequest,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "rentals", description = "Rental ledger"),
        (name = "categories", description = "Book categories"),
        (name = "users", description = "Library users")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
