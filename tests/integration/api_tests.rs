//! API integration tests
//!
//! These run against a live server (and its MongoDB collection):
//! `cargo test -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

fn unique_book(title: &str) -> Value {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    json!({
        "author": format!("it-{}", nanos),
        "title": title,
        "publisher": "Integration",
        "status": 1,
        "rating": 0,
        "publish_date": "2019"
    })
}

async fn create_book(client: &Client, book: &Value) -> String {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(book)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    response.text().await.expect("Failed to read id")
}

async fn delete_book(client: &Client, id: &str) {
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await;
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
async fn test_create_get_and_delete_book() {
    let client = Client::new();
    let book = unique_book("Create and delete");
    let id = create_book(&client, &book).await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["_id"], id);
    assert_eq!(body["author"], book["author"]);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_book() {
    let client = Client::new();
    let book = unique_book("Duplicate");
    let id = create_book(&client, &book).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    delete_book(&client, &id).await;
}

#[tokio::test]
#[ignore]
async fn test_checkout_cycle_and_rating() {
    let client = Client::new();
    let id = create_book(&client, &unique_book("Checkout cycle")).await;

    let checkout = format!("{}/books/checkout/{}", BASE_URL, id);
    let checkin = format!("{}/books/checkin/{}", BASE_URL, id);

    let status = |r: reqwest::Response| r.status();
    assert_eq!(status(client.put(&checkout).send().await.unwrap()), StatusCode::OK);
    assert_eq!(status(client.put(&checkout).send().await.unwrap()), StatusCode::BAD_REQUEST);
    assert_eq!(status(client.put(&checkin).send().await.unwrap()), StatusCode::OK);
    assert_eq!(status(client.put(&checkin).send().await.unwrap()), StatusCode::BAD_REQUEST);

    let rate = |r: &str| format!("{}/books/{}/rate/{}", BASE_URL, id, r);
    assert_eq!(status(client.put(rate("2")).send().await.unwrap()), StatusCode::OK);
    assert_eq!(status(client.put(rate("7")).send().await.unwrap()), StatusCode::BAD_REQUEST);
    assert_eq!(status(client.put(rate("x")).send().await.unwrap()), StatusCode::BAD_REQUEST);

    let body: Value = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["rating"], 2);
    assert_eq!(body["status"], 1);

    delete_book(&client, &id).await;
}

#[tokio::test]
#[ignore]
async fn test_list_books_by_author() {
    let client = Client::new();
    let book = unique_book("Listed");
    let id = create_book(&client, &book).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("author", book["author"].as_str().unwrap()), ("size", "5")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("list is an array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["_id"], id);

    delete_book(&client, &id).await;
}
