//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod rentals;
pub mod users;
