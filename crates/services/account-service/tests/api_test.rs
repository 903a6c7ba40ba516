//! HTTP tests for the account endpoints.
//!
//! The router runs against an in-memory SQLite database, so these cover
//! extraction, validation, service rules and error bodies end to end.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::DatabaseConfig;
use domain::{DomainResult, Password, PasswordHasher};

use account_service_lib::api::{create_router, AppState};
use account_service_lib::infra::Database;

struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, plain_text: &str) -> DomainResult<Password> {
        Ok(Password::from_hash(format!("hashed:{}", plain_text)))
    }
}

async fn test_database() -> Database {
    Database::connect(&DatabaseConfig::single("sqlite::memory:"))
        .await
        .expect("in-memory database")
}

fn router_for(db: Database) -> Router {
    let state = AppState::from_database(Arc::new(db), Arc::new(PrefixHasher));
    create_router(state)
}

async fn test_app() -> Router {
    router_for(test_database().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn register_alice(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/users/register",
        Some(json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "secret1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_register_then_get_then_update_flow() {
    let app = test_app().await;

    let created = register_alice(&app).await;
    assert_eq!(created["username"], "alice");
    assert_eq!(created["email"], "alice@x.com");
    assert_eq!(created["role"], "USER");
    assert_eq!(created["enabled"], true);
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", id),
        Some(json!({ "enabled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["enabled"], false);
    assert_eq!(updated["username"], "alice");
}

#[tokio::test]
async fn test_register_duplicate_username_returns_conflict() {
    let app = test_app().await;
    register_alice(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/register",
        Some(json!({
            "username": "alice",
            "email": "other@x.com",
            "password": "secret2"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["message"], "username already exists");
}

#[tokio::test]
async fn test_register_with_invalid_email_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/register",
        Some(json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "secret1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Email should be valid");
}

#[tokio::test]
async fn test_register_with_missing_field_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/register",
        Some(json!({ "username": "alice", "email": "alice@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_with_blank_password_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/register",
        Some(json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": ""
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Password is required");
}

#[tokio::test]
async fn test_validation_messages_are_sorted_by_field_name() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/register",
        Some(json!({
            "username": "",
            "email": "not-an-email",
            "password": "secret1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Email should be valid, Username is required"
    );
}

#[tokio::test]
async fn test_get_unknown_user_returns_not_found() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/users/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_email_change_is_rejected_and_nothing_persists() {
    let app = test_app().await;
    let created = register_alice(&app).await;
    let uri = format!("/api/users/{}", created["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "username": "alice2", "email": "new@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "REJECTED_FIELD_CHANGE");
    assert_eq!(body["error"]["message"], "email cannot be modified");

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_with_empty_username_is_rejected() {
    let app = test_app().await;
    let created = register_alice(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}", created["id"]),
        Some(json!({ "username": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Username cannot be empty");
}

#[tokio::test]
async fn test_update_unknown_user_returns_not_found() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/users/42",
        Some(json!({ "enabled": false })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_database_status() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_hides_database_error_details() {
    let db = test_database().await;
    db.get_connection().close().await.unwrap();
    let app = router_for(db);

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert_eq!(body["services"]["database"]["error"], "unreachable");
    assert!(!body.to_string().to_lowercase().contains("pool"));
}

#[tokio::test]
async fn test_openapi_document_lists_account_paths() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users/register"].is_object());
    assert!(body["paths"]["/api/users/{id}"].is_object());
}
