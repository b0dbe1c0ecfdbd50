//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use food_server::{Config, ServerState, build_app};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh, migrated in-memory database
pub async fn app() -> Router {
    let config = Config::with_overrides("./target/test-data", 0);
    let state = ServerState::in_memory(config).await.unwrap();
    build_app(state)
}

/// Router over a database file (multi-connection pool)
pub async fn file_app(dir: &tempfile::TempDir) -> Router {
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    build_app(state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    read(app, request).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    read(app, request).await
}

async fn read(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// POST and return the new record's id
pub async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, value) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {value}");
    value["id"].as_i64().unwrap()
}

pub async fn menu_item(app: &Router, name: &str, price: f64) -> i64 {
    create(
        app,
        "/api/menu-items",
        serde_json::json!({ "name": name, "category": "Mains", "price": price }),
    )
    .await
}
