//! API integration tests
//!
//! These need a running server backed by a disposable database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn sample_visitor() -> Value {
    json!({
        "fullName": "Ntuthuko Sokutu",
        "age": 30,
        "dateOfVisit": "2023-12-13",
        "timeOfVisit": "09:30",
        "assistantName": "Assistant Smith",
        "comments": "Dropped off a parcel."
    })
}

/// Helper to add a visitor and return its id
async fn add_visitor(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/visitors", BASE_URL))
        .json(&sample_visitor())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["visitor"]["id"].as_i64().expect("No visitor ID")
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
async fn test_add_then_view_visitor() {
    let client = Client::new();
    let id = add_visitor(&client).await;

    let response = client
        .get(format!("{}/visitors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Visitor Found");
    assert_eq!(body["visitor"]["fullName"], "Ntuthuko Sokutu");
    assert_eq!(body["visitor"]["dateOfVisit"], "2023-12-13");
    assert_eq!(body["visitor"]["timeOfVisit"], "09:30");
}

#[tokio::test]
#[ignore]
async fn test_last_visitor_is_latest_insert() {
    let client = Client::new();
    let id = add_visitor(&client).await;

    let response = client
        .get(format!("{}/visitors/last", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].as_i64().expect("No id") >= id);
}

#[tokio::test]
#[ignore]
async fn test_update_visitor_field() {
    let client = Client::new();
    let id = add_visitor(&client).await;

    let response = client
        .patch(format!("{}/visitors/{}", BASE_URL, id))
        .json(&json!({ "column": "age", "value": 31 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["visitor"]["age"], 31);

    let response = client
        .patch(format!("{}/visitors/{}", BASE_URL, id))
        .json(&json!({ "column": "age", "value": 150 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let response = client
        .patch(format!("{}/visitors/{}", BASE_URL, id))
        .json(&json!({ "column": "comments", "value": null }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_delete_visitor_twice() {
    let client = Client::new();
    let id = add_visitor(&client).await;

    let response = client
        .delete(format!("{}/visitors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/visitors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], format!("Visitor with ID {} not found.", id));
}

#[tokio::test]
#[ignore]
async fn test_invalid_visitor_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/visitors/not-a-number", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
