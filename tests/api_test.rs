//! End-to-end API tests over a SQLite-backed application.
//!
//! Each test drives the real router with the real services; only the
//! store (SQLite in memory) and the notifier differ from production.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use stash_api::api::{create_router, AppState};
use stash_api::config::Config;
use stash_api::domain::CreateUser;
use stash_api::infra::Database;
use stash_api::jobs::LogNotifier;

use common::{random_email, random_password, test_db};

/// Router plus direct service handles for seeding
struct TestApp {
    router: Router,
    state: AppState,
}

async fn test_app() -> TestApp {
    let conn = test_db().await;
    let database = Arc::new(Database::from_connection(conn));
    let config = Config::test_defaults();

    let state = AppState::from_config(database, config, Arc::new(LogNotifier));
    let router = create_router(state.clone());

    TestApp { router, state }
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    (status, value)
}

/// Log in through the API and return the bearer token
async fn login(router: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/api/v1/login/access-token",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

/// Seed a user directly through the service layer
async fn seed_user(state: &AppState, superuser: bool) -> (String, String) {
    let email = random_email();
    let password = random_password();

    state
        .user_service
        .create(CreateUser {
            email: email.clone(),
            password: password.clone(),
            full_name: None,
            is_active: true,
            is_superuser: superuser,
        })
        .await
        .unwrap();

    (email, password)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;

    let (status, body) = send(&app.router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app().await;

    let (status, body) = send(&app.router, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Welcome to Stash API".to_string()));
}

#[tokio::test]
async fn test_login_and_test_token() {
    let app = test_app().await;
    let (email, password) = seed_user(&app.state, false).await;

    let token = login(&app.router, &email, &password).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/login/test-token",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], email);
}

#[tokio::test]
async fn test_login_wrong_password_is_uniform_bad_request() {
    let app = test_app().await;
    let (email, _) = seed_user(&app.state, false).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/login/access-token",
        None,
        Some(json!({ "email": email, "password": "wrong-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Incorrect email or password");

    // Unknown email gets the identical answer
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/login/access-token",
        None,
        Some(json!({ "email": random_email(), "password": "wrong-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Incorrect email or password");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app().await;

    let (status, _) = send(&app.router, "GET", "/api/v1/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app.router, "GET", "/api/v1/items", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        "GET",
        "/api/v1/items",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_listing_is_superuser_only() {
    let app = test_app().await;
    let (email, password) = seed_user(&app.state, false).await;
    let (admin_email, admin_password) = seed_user(&app.state, true).await;

    let token = login(&app.router, &email, &password).await;
    let (status, _) = send(&app.router, "GET", "/api/v1/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = login(&app.router, &admin_email, &admin_password).await;
    let (status, body) = send(
        &app.router,
        "GET",
        "/api/v1/users",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_superuser_creates_users_over_api() {
    let app = test_app().await;
    let (admin_email, admin_password) = seed_user(&app.state, true).await;
    let admin_token = login(&app.router, &admin_email, &admin_password).await;

    let email = random_email();
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/users",
        Some(&admin_token),
        Some(json!({ "email": email, "password": "brand-new-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    assert!(body.get("hashed_password").is_none());

    // Same email again conflicts
    let (status, _) = send(
        &app.router,
        "POST",
        "/api/v1/users",
        Some(&admin_token),
        Some(json!({ "email": email, "password": "brand-new-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_item_crud_with_ownership() {
    let app = test_app().await;
    let (alice_email, alice_password) = seed_user(&app.state, false).await;
    let (bob_email, bob_password) = seed_user(&app.state, false).await;
    let (admin_email, admin_password) = seed_user(&app.state, true).await;

    let alice = login(&app.router, &alice_email, &alice_password).await;
    let bob = login(&app.router, &bob_email, &bob_password).await;
    let admin = login(&app.router, &admin_email, &admin_password).await;

    // Alice creates an item
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/v1/items",
        Some(&alice),
        Some(json!({ "title": "Foo", "description": "Fighters" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = body["id"].as_i64().unwrap();
    let item_uri = format!("/api/v1/items/{}", item_id);

    // Bob can neither read nor modify it
    let (status, _) = send(&app.router, "GET", &item_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app.router,
        "PUT",
        &item_uri,
        Some(&bob),
        Some(json!({ "description": "Bar" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Bob's listing does not contain it either
    let (status, body) = send(&app.router, "GET", "/api/v1/items", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    // The superuser sees and may edit everything
    let (status, _) = send(&app.router, "GET", &item_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app.router,
        "PUT",
        &item_uri,
        Some(&admin),
        Some(json!({ "description": "Bar" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Bar");
    assert_eq!(body["title"], "Foo");

    // Alice deletes her item and gets the snapshot back
    let (status, body) = send(&app.router, "DELETE", &item_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Foo");

    let (status, _) = send(&app.router, "GET", &item_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_valid_token_for_missing_user_is_not_found() {
    use stash_api::services::tokens;
    use stash_api::services::{MockItemService, MockUserService};

    let conn = test_db().await;
    let database = Arc::new(Database::from_connection(conn));
    let config = Config::test_defaults();

    // The subject encoded in the token no longer exists in the store
    let mut users = MockUserService::new();
    users.expect_get_by_id().returning(|_| Ok(None));

    let state = AppState::new(
        Arc::new(users),
        Arc::new(MockItemService::new()),
        database,
        config.clone(),
    );
    let router = create_router(state);

    let token = tokens::issue_access_token(123, &config).unwrap();
    let (status, _) = send(&router, "GET", "/api/v1/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_recovery_unknown_user_is_not_found() {
    let app = test_app().await;

    let (status, _) = send(
        &app.router,
        "POST",
        &format!("/api/v1/password-recovery/{}", random_email()),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_validation_rejects_bad_email() {
    let app = test_app().await;

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/v1/login/access-token",
        None,
        Some(json!({ "email": "not-an-email", "password": "whatever-pass" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
