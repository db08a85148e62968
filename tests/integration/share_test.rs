//! Integration tests for share links.

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use filestore_core::traits::NotificationKind;

use crate::helpers::TestApp;

async fn create_link(app: &TestApp, token: &str, file_id: &str, email: &str) -> String {
    let response = app
        .request(
            "POST",
            "/file/api/fileshares/create-link",
            Some(json!({ "file_id": file_id, "email": email })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"]["share_token"]
        .as_str()
        .expect("No share token")
        .to_string()
}

#[tokio::test]
async fn test_owner_creates_link() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "plan.pdf", b"%PDF").await;

    let response = app
        .request(
            "POST",
            "/file/api/fileshares/create-link",
            Some(json!({ "file_id": id, "email": "bob@example.com", "permission": "read_write" })),
            Some(&alice.access_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let link = &response.body["data"];
    assert_eq!(link["shared_with_email"], "bob@example.com");
    assert_eq!(link["permission"], "read_write");
    assert_eq!(link["share_token"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_only_owner_can_share() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let mallory = app.register("mallory", "mallory@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "plan.pdf", b"%PDF").await;

    let response = app
        .request(
            "POST",
            "/file/api/fileshares/create-link",
            Some(json!({ "file_id": id, "email": "mallory@example.com" })),
            Some(&mallory.access_token),
        )
        .await;
    response.assert_error(StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_create_link_validates_email() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "plan.pdf", b"%PDF").await;

    let response = app
        .request(
            "POST",
            "/file/api/fileshares/create-link",
            Some(json!({ "file_id": id, "email": "bob" })),
            Some(&alice.access_token),
        )
        .await;
    response.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_accept_is_anonymous_and_single_use() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "plan.pdf", b"%PDF").await;
    let token = create_link(&app, &alice.access_token, &id, "bob@example.com").await;

    let accept = app
        .request("POST", "/file/api/fileshares/accept", Some(json!(token)), None)
        .await;
    assert_eq!(accept.status, StatusCode::OK, "{:?}", accept.body);
    assert_eq!(accept.body["data"], true);

    let again = app
        .request(
            "POST",
            "/file/api/fileshares/accept",
            Some(json!({ "share_token": token })),
            None,
        )
        .await;
    again.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_accept_after_expiry_fails() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "plan.pdf", b"%PDF").await;
    let token = create_link(&app, &alice.access_token, &id, "bob@example.com").await;

    app.clock.advance(Duration::days(7) + Duration::seconds(1));

    let accept = app
        .request("POST", "/file/api/fileshares/accept", Some(json!(token)), None)
        .await;
    accept.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
    assert_eq!(accept.body["message"], "Invalid or expired share token.");
}

#[tokio::test]
async fn test_reject_deletes_share() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "plan.pdf", b"%PDF").await;
    let token = create_link(&app, &alice.access_token, &id, "bob@example.com").await;

    let reject = app
        .request("POST", "/file/api/fileshares/reject", Some(json!(token)), None)
        .await;
    assert_eq!(reject.status, StatusCode::OK);

    assert!(app
        .state
        .stores
        .shares
        .find_by_token(&token)
        .await
        .unwrap()
        .is_none());

    let accept = app
        .request("POST", "/file/api/fileshares/accept", Some(json!(token)), None)
        .await;
    accept.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_recipient_lists_accepted_shares() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let accepted = app.upload_one(&alice.access_token, "accepted.txt", b"a").await;
    let pending = app.upload_one(&alice.access_token, "pending.txt", b"p").await;

    let token = create_link(&app, &alice.access_token, &accepted, &bob.email).await;
    create_link(&app, &alice.access_token, &pending, &bob.email).await;
    app.request("POST", "/file/api/fileshares/accept", Some(json!(token)), None)
        .await;

    let response = app
        .request("GET", "/file/api/fileshares", None, Some(&bob.access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let shares = response.body["data"].as_array().unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0]["file_name"], "accepted.txt");
    assert_eq!(shares[0]["shared_by"], "alice");
    assert_eq!(shares[0]["is_accepted"], true);

    let own = app
        .request("GET", "/file/api/fileshares", None, Some(&alice.access_token))
        .await;
    assert!(own.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_accept_notifies_owner() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "plan.pdf", b"%PDF").await;
    let token = create_link(&app, &alice.access_token, &id, "bob@example.com").await;

    let owner = app.user_id(&alice.email).await;
    let mut notifications = app.state.notification_hub.subscribe(owner);

    app.request("POST", "/file/api/fileshares/accept", Some(json!(token)), None)
        .await;

    let message = notifications.try_recv().expect("Owner was not notified");
    assert_eq!(message.event, NotificationKind::FileShareAccepted.event_name());
    assert!(message.message.contains("bob@example.com"));
}
