//! Rental endpoints: rent and return books

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Rent request body
#[derive(Deserialize, ToSchema)]
pub struct RentRequest {
    /// User renting the book
    pub user_id: Option<i32>,
}

/// Rent a book to a user
#[utoipa::path(
    post,
    path = "/books/{id}/rent",
    tag = "rentals",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = RentRequest,
    responses(
        (status = 200, description = "Book rented"),
        (status = 404, description = "Missing user_id, unknown user or unknown book"),
        (status = 403, description = "Book is already rented")
    )
)]
pub async fn rent_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
    Json(request): Json<RentRequest>,
) -> AppResult<String> {
    // The legacy API answered a missing user_id with 404
    let user_id = request
        .user_id
        .ok_or_else(|| AppError::NotFound("Missing user_id field".to_string()))?;

    state.services.ledger.rent(book_id, user_id, Utc::now()).await?;

    Ok(format!("Book id:{} has been successfully rented.", book_id))
}

/// Return a rented book
#[utoipa::path(
    put,
    path = "/books/{id}/return",
    tag = "rentals",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned"),
        (status = 404, description = "Book not found"),
        (status = 403, description = "Book is not rented")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
) -> AppResult<String> {
    state.services.ledger.return_book(book_id, Utc::now()).await?;

    Ok(format!("Book id:{} was successfully returned.", book_id))
}
