//! Catalog service: books and categories

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookWithAvailability, CreateBook},
        category::Category,
        rental,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books with derived availability
    pub async fn list_books(&self) -> AppResult<Vec<BookWithAvailability>> {
        self.repository.books.list_all().await
    }

    /// Get one book with availability derived from its rental history
    pub async fn get_book(&self, id: i32) -> AppResult<BookWithAvailability> {
        let book = self.repository.books.get_by_id(id).await?;
        let rentals = self.repository.rentals.list_for_book(id).await?;
        let category = self.repository.categories.get_by_id(book.category_id).await?;

        Ok(with_availability(book, category.name, rental::is_available(&rentals)))
    }

    /// Validate a book-creation payload and create the book, resolving its
    /// category with get-or-create semantics
    pub async fn add_book(&self, payload: &Value) -> AppResult<Book> {
        let request = CreateBook::from_payload(payload)?;

        if self.repository.books.upc_exists(&request.upc).await? {
            return Err(AppError::DuplicateUpc);
        }

        let category = self.repository.categories.get_or_create(&request.category).await?;

        self.repository.books.create(&request, category.id).await
    }

    /// List books currently on the shelf
    pub async fn list_available(&self) -> AppResult<Vec<BookWithAvailability>> {
        self.repository.books.list_available().await
    }

    /// List all categories
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list_all().await
    }

    /// List the books of a category identified by name
    pub async fn list_category_books(&self, name: &str) -> AppResult<Vec<BookWithAvailability>> {
        let category = self.repository.categories.get_by_name(name).await?;
        self.repository.books.list_by_category(category.id).await
    }
}

fn with_availability(book: Book, category: String, available: bool) -> BookWithAvailability {
    BookWithAvailability {
        id: book.id,
        title: book.title,
        price: book.price,
        available,
        rating: book.rating,
        upc: book.upc,
        url: book.url,
        category,
    }
}
