//! Rentals repository: the rental ledger
//!
//! Invariant: a book has at most one rental with `returned_at IS NULL`.
//! `rent` and `return_book` run their check-then-write inside a transaction
//! holding a row lock on the book, so two concurrent renters cannot both
//! observe "no open rental" and both insert. The partial unique index
//! `rentals_one_open_per_book` backstops the same invariant in the store.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::rental::Rental,
};

#[derive(Clone)]
pub struct RentalsRepository {
    pool: Pool<Postgres>,
}

impl RentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Full rental history for a book, oldest first
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<Rental>> {
        let rentals = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE book_id = $1 ORDER BY rented_at",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    /// Open a rental for the book, failing with `AlreadyRented` when one is
    /// already open. Check and insert execute in one transaction.
    pub async fn rent(
        &self,
        book_id: i32,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Rental> {
        let mut tx = self.pool.begin().await?;

        // Lock the book row to serialize concurrent rent/return attempts
        let book: Option<i32> =
            sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        if book.is_none() {
            return Err(AppError::NotFound(format!("Book id:{} not found", book_id)));
        }

        let already_rented: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM rentals WHERE book_id = $1 AND returned_at IS NULL)",
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_rented {
            return Err(AppError::AlreadyRented);
        }

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (book_id, user_id, rented_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_open_rental_conflict)?;

        tx.commit().await?;

        Ok(rental)
    }

    /// Close the open rental for the book, failing with `NotRented` when
    /// there is none. The update targets `returned_at IS NULL` directly, so
    /// a rental can only ever be closed once.
    pub async fn return_book(&self, book_id: i32, now: DateTime<Utc>) -> AppResult<Rental> {
        let mut tx = self.pool.begin().await?;

        let book: Option<i32> =
            sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        if book.is_none() {
            return Err(AppError::NotFound(format!("Book id:{} not found", book_id)));
        }

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals SET returned_at = $2
            WHERE book_id = $1 AND returned_at IS NULL
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotRented)?;

        tx.commit().await?;

        Ok(rental)
    }

    /// Ids of books whose open rental started before `as_of`, the catalog's
    /// notion of overdue
    pub async fn overdue_book_ids(&self, as_of: DateTime<Utc>) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT book_id FROM rentals WHERE returned_at IS NULL AND rented_at < $1",
        )
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

/// A violation of the one-open-rental index means another transaction won the
/// race; surface it as the same conflict the explicit check reports.
fn map_open_rental_conflict(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.constraint() == Some("rentals_one_open_per_book") => {
            AppError::AlreadyRented
        }
        _ => AppError::Database(e),
    }
}
