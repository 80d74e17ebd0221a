//! Data models for Bookshelf

pub mod book;
pub mod category;
pub mod rental;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookWithAvailability, CreateBook};
pub use category::Category;
pub use rental::Rental;
pub use user::User;
