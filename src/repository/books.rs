//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookWithAvailability, CreateBook},
};

/// Shared projection joining the category name and deriving availability from
/// the rentals ledger
const BOOK_PROJECTION: &str = r#"
    SELECT b.id, b.title, b.price, b.rating, b.upc, b.url,
           c.name AS category,
           NOT EXISTS (
               SELECT 1 FROM rentals r
               WHERE r.book_id = b.id AND r.returned_at IS NULL
           ) AS available
    FROM books b
    JOIN categories c ON b.category_id = c.id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book id:{} not found", id)))
    }

    /// List all books with derived availability, ordered by id
    pub async fn list_all(&self) -> AppResult<Vec<BookWithAvailability>> {
        let books = sqlx::query_as::<_, BookWithAvailability>(&format!(
            "{} ORDER BY b.id",
            BOOK_PROJECTION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// List books with no open rental, ordered by id
    pub async fn list_available(&self) -> AppResult<Vec<BookWithAvailability>> {
        let books = sqlx::query_as::<_, BookWithAvailability>(&format!(
            r#"{}
            WHERE NOT EXISTS (
                SELECT 1 FROM rentals r
                WHERE r.book_id = b.id AND r.returned_at IS NULL
            )
            ORDER BY b.id"#,
            BOOK_PROJECTION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// List books by id set, ordered by id
    pub async fn list_by_ids(&self, ids: &[i32]) -> AppResult<Vec<BookWithAvailability>> {
        let books = sqlx::query_as::<_, BookWithAvailability>(&format!(
            "{} WHERE b.id = ANY($1) ORDER BY b.id",
            BOOK_PROJECTION
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// List books in a category, ordered by id
    pub async fn list_by_category(&self, category_id: i32) -> AppResult<Vec<BookWithAvailability>> {
        let books = sqlx::query_as::<_, BookWithAvailability>(&format!(
            "{} WHERE b.category_id = $1 ORDER BY b.id",
            BOOK_PROJECTION
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Check whether a UPC is already taken
    pub async fn upc_exists(&self, upc: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE upc = $1)")
                .bind(upc)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new book in the given category
    pub async fn create(&self, book: &CreateBook, category_id: i32) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, price, available, rating, upc, url, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(book.price)
        .bind(book.available)
        .bind(book.rating)
        .bind(&book.upc)
        .bind(&book.url)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("books_upc_key") => {
                AppError::DuplicateUpc
            }
            _ => AppError::Database(e),
        })?;

        Ok(created)
    }
}
