use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use offbeat_client::ApiClient;
use offbeat_core::model::{Credentials, PhoneNumber};
use offbeat_core::{Route, SessionStore};
use serde_json::{Value, json};

async fn spawn_server() -> String {
    let router = Router::new()
        .route("/api/echo-auth", get(echo_auth))
        .route("/api/me", get(always_unauthorized))
        .route("/api/bookings", post(reject_booking))
        .route("/api/profile", post(echo_body))
        .route("/api/empty", get(|| async { StatusCode::NO_CONTENT }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "authorization": auth }))
}

async fn always_unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Token expired" })),
    )
}

async fn reject_booking() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": { "seats": ["Must be at least 1"] } })),
    )
}

async fn echo_body(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "received": body, "contentType": content_type }))
}

async fn signed_in_session() -> SessionStore {
    let session = SessionStore::in_memory();
    session
        .login(Credentials::phone(PhoneNumber::parse("9876543210").unwrap()))
        .await
        .unwrap();
    session
}

fn client(base: &str, session: SessionStore) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5), session).unwrap()
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let base = spawn_server().await;
    let api = client(&base, signed_in_session().await);

    let body: Value = api.get("/echo-auth").await.unwrap();

    assert_eq!(body["authorization"], "Bearer mock-jwt-token");
}

#[tokio::test]
async fn no_header_without_session() {
    let base = spawn_server().await;
    let api = client(&base, SessionStore::in_memory());

    let body: Value = api.get("echo-auth").await.unwrap();

    assert!(body["authorization"].is_null());
}

#[tokio::test]
async fn unauthorized_ends_session_and_redirects() {
    let base = spawn_server().await;
    let session = signed_in_session().await;
    let redirected = Arc::new(Mutex::new(None));
    let api = client(&base, session.clone()).with_unauthorized_hook({
        let redirected = redirected.clone();
        move |route| *redirected.lock().unwrap() = Some(route)
    });

    let err = api.get::<Value>("/me").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message, "Token expired");
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert_eq!(*redirected.lock().unwrap(), Some(Route::EnterPhone));

    // Later requests go out without a token.
    let body: Value = api.get("/echo-auth").await.unwrap();
    assert!(body["authorization"].is_null());
}

#[tokio::test]
async fn validation_errors_are_normalized() {
    let base = spawn_server().await;
    let api = client(&base, signed_in_session().await);

    let err = api
        .post::<_, Value>("/bookings", &json!({ "seats": 0 }))
        .await
        .unwrap_err();

    assert_eq!(err.status, 422);
    assert_eq!(err.message, "Validation failed. Please check your input.");
    assert_eq!(err.field_errors("seats"), ["Must be at least 1"]);
}

#[tokio::test]
async fn missing_route_uses_default_message() {
    let base = spawn_server().await;
    let api = client(&base, SessionStore::in_memory());

    let err = api.get::<Value>("/nowhere").await.unwrap_err();

    assert_eq!(err.status, 404);
    assert_eq!(err.message, "The requested resource was not found.");
}

#[tokio::test]
async fn json_body_is_sent() {
    let base = spawn_server().await;
    let api = client(&base, signed_in_session().await);

    let body: Value = api
        .post("/profile", &json!({ "fullName": "Asha" }))
        .await
        .unwrap();

    assert_eq!(body["received"]["fullName"], "Asha");
    assert_eq!(body["contentType"], "application/json");
}

#[tokio::test]
async fn empty_success_decodes_as_unit() {
    let base = spawn_server().await;
    let api = client(&base, SessionStore::in_memory());

    let result: Option<Value> = api.get("/empty").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn connection_failure_maps_to_500() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let session = signed_in_session().await;
    let api = client(&format!("http://{}", addr), session.clone());

    let err = api.get::<Value>("/anything").await.unwrap_err();

    assert_eq!(err.status, 500);
    assert!(session.is_authenticated());
}
