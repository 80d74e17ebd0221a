//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field was absent from the request payload
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field was present but malformed or out of range
    #[error("Invalid value for field {field}: {value}")]
    Validation { field: &'static str, value: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// UPC uniqueness violation on book creation
    #[error("That UPC already exists")]
    DuplicateUpc,

    /// Rent attempted while an open rental exists for the book
    #[error("Book is rented")]
    AlreadyRented,

    /// Return attempted with no open rental for the book
    #[error("Book is not rented currently")]
    NotRented,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for validation failures
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            // Validation failures answer with a JSON error body
            AppError::MissingField(_) | AppError::Validation { .. } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response(),
            AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, format!("Error: {}", message)).into_response()
            }
            // The legacy API answered duplicate UPCs with 404, preserved here
            AppError::DuplicateUpc => {
                (StatusCode::NOT_FOUND, format!("Error: {}", message)).into_response()
            }
            AppError::AlreadyRented | AppError::NotRented => {
                (StatusCode::FORBIDDEN, format!("Error: {}", message)).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
