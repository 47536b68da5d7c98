//! API integration tests

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const TEST_EMAIL: &str = "tests@librarium.dev";
const TEST_PASSWORD: &str = "integration-password";

fn today() -> String {
    Utc::now().date_naive().to_string()
}

fn days_from_today(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).to_string()
}

/// Helper to get an authenticated client
async fn get_auth_token(client: &Client) -> String {
    // the account may already exist from an earlier run; login decides
    let _ = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to send register request");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create a book with the given stock, returning its id
async fn create_book(client: &Client, token: &str, name: &str, quantity: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": name,
            "quantity": quantity,
            "publisher_id": null
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

/// Helper to create a user, returning its id
async fn create_user(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No user ID")
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
async fn test_login() {
    let client = Client::new();
    let _ = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["expires_in"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    let _ = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": TEST_EMAIL,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_rejects_short_password() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "email": "short@librarium.dev",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "ValidationError");
    assert!(body["details"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_invalid_token_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", "Bearer not-a-token")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    create_book(&client, &token, "Listing Probe", 3).await;

    let response = client
        .get(format!("{}/books?page=1&per_page=5", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert!(body["total_pages"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_publisher_crud() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create publisher
    let response = client
        .post(format!("{}/publishers", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Crud House" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let publisher_id = body["id"].as_i64().expect("No publisher ID");

    // Rename it
    let response = client
        .put(format!("{}/publishers/{}", BASE_URL, publisher_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Crud House Renamed" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Crud House Renamed");

    // Delete it
    let response = client
        .delete(format!("{}/publishers/{}", BASE_URL, publisher_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Publisher deleted successfully.");
}

#[tokio::test]
#[ignore]
async fn test_rental_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, "Lifecycle Probe", 1).await;
    let user_id = create_user(&client, &token, "Lifecycle Renter").await;

    // Rent the only copy
    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "user_id": user_id,
            "rental_date": today(),
            "forecast_date": days_from_today(7)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let rental_id = body["id"].as_i64().expect("No rental ID");

    // The copy left the shelf
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["quantity"], 0);
    assert_eq!(body["rented"], 1);

    // The rental shows up resolved and pending
    let response = client
        .get(format!("{}/rentals/{}", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book_name"], "Lifecycle Probe");
    assert_eq!(body["user_name"], "Lifecycle Renter");
    assert_eq!(body["status"], "Pending");

    // Return it the same day
    let response = client
        .put(format!("{}/rentals/{}", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "return_date": today() }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "On time");

    // The copy is back
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["quantity"], 1);
    assert_eq!(body["rented"], 0);

    // Cleanup: delete the rental
    let response = client
        .delete(format!("{}/rentals/{}", BASE_URL, rental_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_rental_out_of_stock() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, "Scarce Probe", 1).await;
    let first_user = create_user(&client, &token, "First Renter").await;
    let second_user = create_user(&client, &token, "Second Renter").await;

    // First renter takes the only copy
    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "user_id": first_user,
            "rental_date": today(),
            "forecast_date": days_from_today(7)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    // Second renter is turned away
    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "user_id": second_user,
            "rental_date": today(),
            "forecast_date": days_from_today(7)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    let message = body["message"].as_str().expect("No message");
    assert!(message.contains("out of stock"));
}

#[tokio::test]
#[ignore]
async fn test_rental_rejects_wrong_start_date() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let book_id = create_book(&client, &token, "Backdated Probe", 1).await;
    let user_id = create_user(&client, &token, "Backdated Renter").await;

    let response = client
        .post(format!("{}/rentals", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "user_id": user_id,
            "rental_date": days_from_today(-1),
            "forecast_date": days_from_today(7)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unknown_rental_is_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/rentals/999999", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
