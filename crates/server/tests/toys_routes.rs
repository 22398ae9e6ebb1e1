//! Router-level tests: requests are driven through the `Router` without a socket.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use configs::{AppConfig, IdStrategy};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::startup::build_app;

fn app() -> Router {
    build_app(&AppConfig::default())
}

fn app_with(strategy: IdStrategy) -> Router {
    let mut cfg = AppConfig::default();
    cfg.store.id_strategy = strategy;
    build_app(&cfg)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn ids(list: &Value) -> Vec<u64> {
    list["toys"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, body) = send_json(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn fresh_list_returns_seed_records_in_order() {
    let (status, body) = send_json(&app(), Method::GET, "/toys", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"toys": [
            {"id": 1, "name": "Toy Car", "color": "Red"},
            {"id": 2, "name": "Toy Robot", "color": "Blue"}
        ]})
    );
}

#[tokio::test]
async fn create_returns_201_and_is_listed() {
    let app = app();
    let (status, created) =
        send_json(&app, Method::POST, "/toys", Some(json!({"name": "X", "color": "Y"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({"id": 3, "name": "X", "color": "Y"}));

    let (_, list) = send_json(&app, Method::GET, "/toys", None).await;
    assert_eq!(ids(&list), vec![1, 2, 3]);
    assert_eq!(list["toys"][2], created);
}

#[tokio::test]
async fn create_keeps_arbitrary_fields_and_ignores_client_id() {
    let app = app();
    let (status, created) = send_json(
        &app,
        Method::POST,
        "/toys",
        Some(json!({"id": 77, "name": "Kite", "tags": ["outdoor"], "price": 9.5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 3);
    assert_eq!(created["tags"], json!(["outdoor"]));
    assert_eq!(created["price"], json!(9.5));
}

#[tokio::test]
async fn update_merges_fields() {
    let app = app();
    let (status, body) =
        send_json(&app, Method::PUT, "/toys/1", Some(json!({"color": "Green"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Toy Car", "color": "Green"}));

    let (_, list) = send_json(&app, Method::GET, "/toys", None).await;
    assert_eq!(list["toys"][0]["color"], "Green");
    assert_eq!(list["toys"][1]["color"], "Blue");
}

#[tokio::test]
async fn update_cannot_rewrite_id() {
    let app = app();
    let (status, body) =
        send_json(&app, Method::PUT, "/toys/2", Some(json!({"id": 1, "size": "L"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["size"], "L");
}

#[tokio::test]
async fn update_missing_toy_is_404() {
    let (status, body) =
        send_json(&app(), Method::PUT, "/toys/9999", Some(json!({"color": "Green"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Toy not found"}));
}

#[tokio::test]
async fn delete_returns_empty_204_then_404() {
    let app = app();
    let (status, bytes) = send(&app, Method::DELETE, "/toys/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let (_, list) = send_json(&app, Method::GET, "/toys", None).await;
    assert_eq!(ids(&list), vec![1]);

    let (status, body) = send_json(&app, Method::DELETE, "/toys/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Toy not found");
}

#[tokio::test]
async fn count_strategy_reproduces_duplicate_ids() {
    let app = app_with(IdStrategy::Count);
    let (status, _) = send(&app, Method::DELETE, "/toys/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, a) = send_json(&app, Method::POST, "/toys", Some(json!({"name": "A"}))).await;
    let (_, b) = send_json(&app, Method::POST, "/toys", Some(json!({"name": "B"}))).await;
    assert_eq!(a["id"], 2);
    assert_eq!(b["id"], 3);

    let (_, list) = send_json(&app, Method::GET, "/toys", None).await;
    assert_eq!(ids(&list), vec![2, 2, 3]);
}

#[tokio::test]
async fn monotonic_strategy_keeps_ids_unique_after_delete() {
    let app = app_with(IdStrategy::Monotonic);
    send(&app, Method::DELETE, "/toys/1", None).await;
    let (_, a) = send_json(&app, Method::POST, "/toys", Some(json!({"name": "A"}))).await;
    let (_, b) = send_json(&app, Method::POST, "/toys", Some(json!({"name": "B"}))).await;
    assert_eq!(a["id"], 3);
    assert_eq!(b["id"], 4);

    let (_, list) = send_json(&app, Method::GET, "/toys", None).await;
    assert_eq!(ids(&list), vec![2, 3, 4]);
}

#[tokio::test]
async fn malformed_bodies_are_rejected_by_the_extractor() {
    let app = app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/toys")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/toys", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/toys")
        .body(Body::from(r#"{"name":"X"}"#))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    // nothing was stored
    let (_, list) = send_json(&app, Method::GET, "/toys", None).await;
    assert_eq!(ids(&list), vec![1, 2]);
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/toys/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    // negative ids never parse as u64, so they are rejected before any lookup
    let (status, _) =
        send(&app, Method::PUT, "/toys/-1", Some(json!({"color": "Green"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unseeded_store_starts_empty() {
    let mut cfg = AppConfig::default();
    cfg.store.seed = false;
    let app = build_app(&cfg);
    let (_, list) = send_json(&app, Method::GET, "/toys", None).await;
    assert_eq!(list, json!({"toys": []}));
    let (_, created) = send_json(&app, Method::POST, "/toys", Some(json!({"name": "A"}))).await;
    assert_eq!(created["id"], 1);
}
