#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Request bodies the fake backend received on `POST /api/transactions`.
pub type Received = Arc<Mutex<Vec<Value>>>;

pub struct Backend {
    pub api_url: String,
    pub received: Received
}

impl Backend {
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().map(|bodies| bodies.clone()).unwrap_or_default()
    }
}

/// Serves a canned version of the transaction API on an ephemeral port.
///
/// User `user_1` has two transactions; `broken` answers 500, `garbled` answers
/// with the wrong shape and `slow` takes two seconds.
pub async fn spawn_backend() -> Result<Backend> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let received = Received::default();

    let app = Router::new()
        .route("/api/transactions", post(create))
        .route("/api/transactions/summary/{user_id}", get(summary))
        .route("/api/transactions/{key}", get(list).delete(remove))
        .with_state(received.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(Backend {
        api_url: format!("http://{address}/api"),
        received
    })
}

async fn list(Path(user_id): Path<String>) -> Response {
    match user_id.as_str() {
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "database unavailable" }))).into_response(),
        "garbled" => Json(json!({ "not": "a list" })).into_response(),
        "user_1" => Json(json!([
            { "id": 2, "user_id": "user_1", "title": "Coffee", "amount": "-4.50", "category": "Food & Drinks", "created_at": "2025-07-02T08:15:00.000Z" },
            { "id": 1, "user_id": "user_1", "title": "Salary", "amount": "100.00", "category": "Income", "created_at": "2025-07-01" }
        ])).into_response(),
        _ => Json(json!([])).into_response()
    }
}

async fn summary(Path(user_id): Path<String>) -> Response {
    match user_id.as_str() {
        "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "balance": 0, "income": 0, "expense": 0 })).into_response()
        }
        "user_1" => Json(json!({ "balance": "95.50", "income": "100.00", "expense": "-4.50" })).into_response(),
        _ => Json(json!({ "balance": 0, "income": 0, "expense": 0 })).into_response()
    }
}

async fn create(State(received): State<Received>, Json(body): Json<Value>) -> Response {
    if let Ok(mut bodies) = received.lock() {
        bodies.push(body.clone());
    }

    match body["title"].as_str() {
        Some("Reject") => (StatusCode::BAD_REQUEST, Json(json!({ "error": "Title is not allowed" }))).into_response(),
        Some("Ack") => (StatusCode::CREATED, Json(json!({ "message": "ok" }))).into_response(),
        _ => (StatusCode::CREATED, Json(json!({
            "id": 99,
            "user_id": body["user_id"],
            "title": body["title"],
            "amount": body["amount"],
            "category": body["category"],
            "created_at": "2025-07-03T12:00:00Z"
        }))).into_response()
    }
}

async fn remove(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "404" => StatusCode::NOT_FOUND.into_response(),
        _ => Json(json!({ "message": "Transaction deleted successfully" })).into_response()
    }
}
