//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::Value;

use crate::{error::AppResult, models::book::BookWithAvailability};

/// List all books with derived availability
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books ordered by id", body = Vec<BookWithAvailability>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookWithAvailability>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a book to the catalog
///
/// The body is accepted as free-form JSON and validated field by field in
/// declaration order; on success the payload is echoed back verbatim.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body(
        content = crate::models::book::CreateBook,
        description = "Book attributes. Validated field by field in declaration \
                       order, not schema-enforced; extra members are ignored and \
                       the payload is echoed back on success."
    ),
    responses(
        (status = 200, description = "Book created, input echoed back"),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse),
        (status = 404, description = "UPC already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    state.services.catalog.add_book(&payload).await?;

    // Legacy contract: the endpoint echoes the request payload
    Ok(Json(payload))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book with derived availability", body = BookWithAvailability),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookWithAvailability>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// List books with no open rental
#[utoipa::path(
    get,
    path = "/books/available",
    tag = "books",
    responses(
        (status = 200, description = "Available books ordered by id", body = Vec<BookWithAvailability>)
    )
)]
pub async fn list_available(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookWithAvailability>>> {
    let books = state.services.catalog.list_available().await?;
    Ok(Json(books))
}

/// List books currently rented out
#[utoipa::path(
    get,
    path = "/books/rented",
    tag = "books",
    responses(
        (status = 200, description = "Rented books ordered by id", body = Vec<BookWithAvailability>)
    )
)]
pub async fn list_rented(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookWithAvailability>>> {
    let books = state.services.ledger.list_overdue(Utc::now()).await?;
    Ok(Json(books))
}
