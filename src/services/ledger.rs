//! Rental ledger service
//!
//! Owns the rent/return lifecycle: Available → Rented → Available, with at
//! most one open rental per book at any time.

use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{book::BookWithAvailability, rental::Rental},
    repository::Repository,
};

#[derive(Clone)]
pub struct LedgerService {
    repository: Repository,
}

impl LedgerService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Rent a book to a user. Both must exist; the book must have no open
    /// rental.
    pub async fn rent(&self, book_id: i32, user_id: i32, now: DateTime<Utc>) -> AppResult<Rental> {
        // Verify the user exists; the book check shares the rent transaction
        self.repository.users.get_by_id(user_id).await?;
        self.repository.rentals.rent(book_id, user_id, now).await
    }

    /// Close the open rental for a book
    pub async fn return_book(&self, book_id: i32, now: DateTime<Utc>) -> AppResult<Rental> {
        self.repository.rentals.return_book(book_id, now).await
    }

    /// Books with an open rental that started before `now`, ordered by id
    pub async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<BookWithAvailability>> {
        let ids = self.repository.rentals.overdue_book_ids(now).await?;
        self.repository.books.list_by_ids(&ids).await
    }
}
