//! API integration tests
//!
//! These tests run against a live server with its database migrated and at
//! least one user present. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8888/api";

/// A well-formed book payload with a unique UPC per call
fn book_payload() -> Value {
    let upc = format!(
        "test-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    );
    json!({
        "title": "A Light in the Attic",
        "price": 51.77,
        "available": 22,
        "rating": 3,
        "url": "http://books.toscrape.com/catalogue/a-light-in-the-attic_1000/",
        "upc": upc,
        "category": "Poetry",
    })
}

/// Create a book and return its id, looked up by UPC since the creation
/// endpoint echoes the input payload
async fn create_book(client: &Client) -> i64 {
    let payload = book_payload();
    let upc = payload["upc"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let books: Vec<Value> = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse books");

    books
        .iter()
        .find(|b| b["upc"] == upc.as_str())
        .and_then(|b| b["id"].as_i64())
        .expect("Created book not found in listing")
}

/// Pick any existing user
async fn first_user_id(client: &Client) -> i64 {
    let users: Vec<Value> = client
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to list users")
        .json()
        .await
        .expect("Failed to parse users");

    users
        .first()
        .and_then(|u| u["id"].as_i64())
        .expect("Test database has no users")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_book_echoes_payload() {
    let client = Client::new();
    let payload = book_payload();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["upc"], payload["upc"]);
    assert_eq!(body["title"], payload["title"]);
}

#[tokio::test]
#[ignore]
async fn test_create_book_missing_field() {
    let client = Client::new();
    let mut payload = book_payload();
    payload.as_object_mut().unwrap().remove("price");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Missing field: price");
}

#[tokio::test]
#[ignore]
async fn test_create_book_invalid_rating() {
    let client = Client::new();
    let mut payload = book_payload();
    payload["rating"] = json!(6);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("rating"));
}

#[tokio::test]
#[ignore]
async fn test_create_book_duplicate_upc() {
    let client = Client::new();
    let payload = book_payload();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Same UPC a second time keeps the legacy 404 answer
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_book_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_rent_missing_user_id() {
    let client = Client::new();
    let book_id = create_book(&client).await;

    let response = client
        .post(format!("{}/books/{}/rent", BASE_URL, book_id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_rent_unknown_book() {
    let client = Client::new();
    let user_id = first_user_id(&client).await;

    let response = client
        .post(format!("{}/books/999999999/rent", BASE_URL))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_rent_and_return_lifecycle() {
    let client = Client::new();
    let book_id = create_book(&client).await;
    let user_id = first_user_id(&client).await;

    // Fresh book starts available
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["available"], true);

    // Rent succeeds and the book goes out
    let response = client
        .post(format!("{}/books/{}/rent", BASE_URL, book_id))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["available"], false);

    // A second rent is rejected without opening another rental
    let response = client
        .post(format!("{}/books/{}/rent", BASE_URL, book_id))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Return closes the rental and restores availability
    let response = client
        .put(format!("{}/books/{}/return", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["available"], true);

    // Returning again is rejected
    let response = client
        .put(format!("{}/books/{}/return", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_rents_open_exactly_one_rental() {
    let client = Client::new();
    let book_id = create_book(&client).await;
    let user_id = first_user_id(&client).await;

    // Two renters race for the same book; the ledger must let exactly one in
    let first = client
        .post(format!("{}/books/{}/rent", BASE_URL, book_id))
        .json(&json!({ "user_id": user_id }))
        .send();
    let second = client
        .post(format!("{}/books/{}/rent", BASE_URL, book_id))
        .json(&json!({ "user_id": user_id }))
        .send();

    let (first, second) = tokio::join!(first, second);
    let statuses = [
        first.expect("Failed to send request").status().as_u16(),
        second.expect("Failed to send request").status().as_u16(),
    ];

    assert!(statuses.contains(&200), "statuses: {:?}", statuses);
    assert!(statuses.contains(&403), "statuses: {:?}", statuses);

    // Exactly one open rental: a single return closes it, the next is refused
    let response = client
        .put(format!("{}/books/{}/return", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/books/{}/return", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_rented_listing_tracks_open_rentals() {
    let client = Client::new();
    let book_id = create_book(&client).await;
    let user_id = first_user_id(&client).await;

    let response = client
        .post(format!("{}/books/{}/rent", BASE_URL, book_id))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let rented: Vec<Value> = client
        .get(format!("{}/books/rented", BASE_URL))
        .send()
        .await
        .expect("Failed to list rented books")
        .json()
        .await
        .expect("Failed to parse rented books");
    assert!(rented.iter().any(|b| b["id"].as_i64() == Some(book_id)));

    let available: Vec<Value> = client
        .get(format!("{}/books/available", BASE_URL))
        .send()
        .await
        .expect("Failed to list available books")
        .json()
        .await
        .expect("Failed to parse available books");
    assert!(!available.iter().any(|b| b["id"].as_i64() == Some(book_id)));

    // Cleanup: close the rental
    let _ = client
        .put(format!("{}/books/{}/return", BASE_URL, book_id))
        .send()
        .await;
}
