//! Integration tests for the identity endpoints.

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, session_from};

#[tokio::test]
async fn test_register_returns_token_pair() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/identity/api/auth/register",
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["username"], "alice");
    let session = session_from(&response.body);
    assert_eq!(session.email, "alice@example.com");
    assert!(!session.access_token.is_empty());
    assert!(!session.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.register("alice", "alice@example.com", "secret1").await;

    let response = app
        .request(
            "POST",
            "/identity/api/auth/register",
            Some(json!({
                "username": "alice2",
                "email": "alice@example.com",
                "password": "other-pass",
            })),
            None,
        )
        .await;
    response.assert_error(StatusCode::CONFLICT, "CONFLICT");

    // The original account is untouched and no second one was created.
    let second = app
        .request(
            "POST",
            "/identity/api/auth/login",
            Some(json!({ "email": "alice@example.com", "password": "other-pass" })),
            None,
        )
        .await;
    second.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let first = app
        .request(
            "POST",
            "/identity/api/auth/login",
            Some(json!({ "email": "alice@example.com", "password": "secret1" })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/identity/api/auth/register",
            Some(json!({
                "username": "bob",
                "email": "not-an-email",
                "password": "secret1",
            })),
            None,
        )
        .await;

    response.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_login_failure_message_is_identical() {
    let app = TestApp::new().await;
    app.register("alice", "alice@example.com", "secret1").await;

    let wrong_password = app
        .request(
            "POST",
            "/identity/api/auth/login",
            Some(json!({ "email": "alice@example.com", "password": "nope-nope" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/identity/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "nope-nope" })),
            None,
        )
        .await;

    wrong_password.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    unknown_email.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let app = TestApp::new().await;
    let session = app.register("alice", "alice@example.com", "secret1").await;

    let response = app
        .request(
            "POST",
            "/identity/api/auth/refresh-token",
            Some(json!(session.refresh_token)),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let rotated = session_from(&response.body);
    assert_ne!(rotated.refresh_token, session.refresh_token);

    let old = app
        .state
        .stores
        .tokens
        .find_by_token(&session.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert!(old.revoked_at.is_some());
    assert_eq!(old.replaced_by_token.as_deref(), Some(rotated.refresh_token.as_str()));

    // The used token is dead; the replacement works.
    let reuse = app
        .request(
            "POST",
            "/identity/api/auth/refresh-token",
            Some(json!({ "refresh_token": session.refresh_token })),
            None,
        )
        .await;
    reuse.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let next = app
        .request(
            "POST",
            "/identity/api/auth/refresh-token",
            Some(json!({ "refresh_token": rotated.refresh_token })),
            None,
        )
        .await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_with_expired_token_fails() {
    let app = TestApp::new().await;
    let session = app.register("alice", "alice@example.com", "secret1").await;

    app.clock.advance(Duration::days(8));

    let response = app
        .request(
            "POST",
            "/identity/api/auth/refresh-token",
            Some(json!(session.refresh_token)),
            None,
        )
        .await;
    response.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/identity/api/auth/refresh-token",
            Some(json!("")),
            None,
        )
        .await;
    response.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_revoke_blocks_refresh() {
    let app = TestApp::new().await;
    let session = app.register("alice", "alice@example.com", "secret1").await;

    let revoke = app
        .request(
            "POST",
            "/identity/api/auth/revoke-token",
            Some(json!(session.refresh_token)),
            None,
        )
        .await;
    assert_eq!(revoke.status, StatusCode::OK);
    assert_eq!(revoke.body["data"], true);

    let refresh = app
        .request(
            "POST",
            "/identity/api/auth/refresh-token",
            Some(json!(session.refresh_token)),
            None,
        )
        .await;
    refresh.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    // Revoking again still succeeds; unknown tokens do not.
    let again = app
        .request(
            "POST",
            "/identity/api/auth/revoke-token",
            Some(json!(session.refresh_token)),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);

    let unknown = app
        .request(
            "POST",
            "/identity/api/auth/revoke-token",
            Some(json!("does-not-exist")),
            None,
        )
        .await;
    unknown.assert_error(StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_protected_route_requires_bearer() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/file/api/files", None, None).await;
    missing.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let garbage = app
        .request("GET", "/file/api/files", None, Some("not.a.jwt"))
        .await;
    garbage.assert_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], true);
}
