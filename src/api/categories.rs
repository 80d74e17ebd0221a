//! Category endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{book::BookWithAvailability, category::Category},
};

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories ordered by name", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// List the books of a category
#[utoipa::path(
    get,
    path = "/categories/{name}",
    tag = "categories",
    params(
        ("name" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Books in the category ordered by id", body = Vec<BookWithAvailability>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category_books(
    State(state): State<crate::AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<BookWithAvailability>>> {
    let books = state.services.catalog.list_category_books(&name).await?;
    Ok(Json(books))
}
