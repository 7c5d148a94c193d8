//! Integration tests for the HTTP surface: routing, authentication
//! extraction, request validation, and error envelopes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/projects", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], json!(false));
    assert_eq!(response.body["error"], json!("AUTHENTICATION"));
}

#[tokio::test]
async fn test_non_bearer_authorization_header_rejected() {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/tasks")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_bearer_token_rejected() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/activities/recent", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], json!("AUTHENTICATION"));
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "first_name": "Sam",
                "last_name": "Rivera",
                "email": "not-an-email",
                "password": "password123",
                "role": "admin",
                "company_name": "Rivera Consulting",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("VALIDATION"));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "first_name": "Sam",
                "last_name": "Rivera",
                "email": "sam@example.com",
                "password": "short",
                "role": "admin",
                "company_name": "Rivera Consulting",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], json!("VALIDATION"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/does-not-exist", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(response.body["data"]["status"], json!("degraded"));
    assert_eq!(response.body["data"]["database"], json!("unavailable"));
}
