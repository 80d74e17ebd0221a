//! Book model and creation-payload validation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Book row from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// Legacy stored counter carried over from bulk imports. Input-only
    /// metadata; the authoritative availability is derived from the ledger.
    pub available: i32,
    pub rating: i16,
    pub upc: String,
    pub url: String,
    pub category_id: i32,
}

/// Book with its category name and ledger-derived availability
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookWithAvailability {
    pub id: i32,
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub available: bool,
    pub rating: i16,
    pub upc: String,
    pub url: String,
    pub category: String,
}

/// Fields checked on book creation, in the order failures are reported
const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "price",
    "available",
    "rating",
    "url",
    "upc",
    "category",
];

/// Validated book-creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1))]
    pub title: String,
    /// Non-negative, enforced at extraction time
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub available: i32,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(min = 1))]
    pub upc: String,
    #[validate(length(min = 1))]
    pub category: String,
}

impl CreateBook {
    /// Extract and validate a book-creation payload.
    ///
    /// Every field is checked completely (present, well-typed, in range)
    /// before the next one is looked at, so the first failure in declaration
    /// order is the one reported, matching the legacy API contract.
    pub fn from_payload(data: &Value) -> Result<Self, AppError> {
        for field in REQUIRED_FIELDS {
            if data.get(field).is_none() {
                return Err(AppError::MissingField(field));
            }
            match field {
                "price" => price_field(data, field).map(drop)?,
                "available" => count_field(data, field).map(drop)?,
                "rating" => rating_field(data, field).map(drop)?,
                _ => string_field(data, field).map(drop)?,
            }
        }

        let book = Self {
            title: string_field(data, "title")?,
            price: price_field(data, "price")?,
            available: count_field(data, "available")?,
            rating: rating_field(data, "rating")?,
            url: string_field(data, "url")?,
            upc: string_field(data, "upc")?,
            category: string_field(data, "category")?,
        };

        if let Err(errors) = book.validate() {
            let fields = errors.field_errors();
            for field in REQUIRED_FIELDS {
                if fields.contains_key(field) {
                    return Err(invalid(data, field));
                }
            }
        }

        Ok(book)
    }
}

fn invalid(data: &Value, field: &'static str) -> AppError {
    AppError::Validation {
        field,
        value: data.get(field).cloned().unwrap_or(Value::Null).to_string(),
    }
}

fn string_field(data: &Value, field: &'static str) -> Result<String, AppError> {
    data[field]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| invalid(data, field))
}

fn price_field(data: &Value, field: &'static str) -> Result<Decimal, AppError> {
    data[field]
        .as_f64()
        .filter(|f| *f >= 0.0)
        .and_then(Decimal::from_f64_retain)
        .ok_or_else(|| invalid(data, field))
}

// The legacy payload allowed any non-negative number here; fractions are
// truncated on storage
fn count_field(data: &Value, field: &'static str) -> Result<i32, AppError> {
    data[field]
        .as_f64()
        .filter(|f| *f >= 0.0)
        .map(|f| f as i32)
        .ok_or_else(|| invalid(data, field))
}

// Ratings must be JSON integers in 1..=5, a float 4.5 is rejected outright
fn rating_field(data: &Value, field: &'static str) -> Result<i16, AppError> {
    data[field]
        .as_i64()
        .and_then(|n| i16::try_from(n).ok())
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| invalid(data, field))
}
