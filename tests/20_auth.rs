mod common;

use axum::http::StatusCode;
use serde_json::json;

use buildpro_api::auth::Role;

#[tokio::test]
async fn register_rejects_short_passwords() {
    let payload = json!({
        "name": "Ann Lee",
        "email": "ann@example.com",
        "password": "short",
    });
    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/api/v1/auth/register",
        None,
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let payload = json!({
        "name": "Ann Lee",
        "email": "not-an-email",
        "password": "secret123",
    });
    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/api/v1/auth/register",
        None,
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["errors"]["email"].is_array());
}

#[tokio::test]
async fn login_requires_both_credentials() {
    let payload = json!({ "email": "ann@example.com" });
    let (status, body) = common::send(
        common::test_app(),
        "POST",
        "/api/v1/auth/login",
        None,
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn profile_requires_a_token() {
    let (status, body) =
        common::send(common::test_app(), "GET", "/api/v1/auth/profile", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn profile_rejects_garbage_tokens() {
    let (status, body) = common::send(
        common::test_app(),
        "GET",
        "/api/v1/auth/profile",
        Some("not.a.jwt"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn non_bearer_schemes_are_rejected() {
    let token = common::token_for(Role::CompanyAdmin);
    let app = common::test_app();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/auth/profile")
        .header("authorization", format!("Basic {}", token))
        .body(axum::body::Body::empty())
        .expect("request");

    let response = tower::ServiceExt::oneshot(app, request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_resources_are_closed_without_a_token() {
    for uri in ["/api/v1/projects", "/api/v1/tasks", "/api/v1/team"] {
        let (status, _) = common::send(common::test_app(), "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "expected 401 for {uri}");
    }
}
