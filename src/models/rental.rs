//! Rental ledger entries and availability derivation
//!
//! A rental is append-only: once created, only `returned_at` may change, and
//! only from null to a timestamp at or after `rented_at`, exactly once. The
//! ledger guarantees at most one open rental per book at any time; everything
//! else (availability, overdue status) is derived from the log on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One entry in the rental ledger
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rental {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub rented_at: DateTime<Utc>,
    /// Null while the book is out
    pub returned_at: Option<DateTime<Utc>>,
}

impl Rental {
    /// An open rental means the book is currently out
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// A book is available iff none of its rentals is still open
pub fn is_available(rentals: &[Rental]) -> bool {
    rentals.iter().all(|r| !r.is_open())
}

/// A book is overdue iff it has an open rental that started before `as_of`.
/// The catalog carries no due dates, so every running rental counts as
/// overdue immediately.
pub fn is_overdue(rentals: &[Rental], as_of: DateTime<Utc>) -> bool {
    rentals.iter().any(|r| r.is_open() && r.rented_at < as_of)
}
