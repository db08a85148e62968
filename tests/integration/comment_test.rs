//! Integration tests for comments.

use http::StatusCode;
use serde_json::{Value, json};

use filestore_core::traits::NotificationKind;

use crate::helpers::TestApp;

async fn add_comment(
    app: &TestApp,
    token: &str,
    file_id: &str,
    content: &str,
    parent: Option<&str>,
) -> Value {
    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({
                "file_id": file_id,
                "content": content,
                "parent_comment_id": parent,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"].clone()
}

async fn list_comments(app: &TestApp, token: &str, file_id: &str) -> Vec<Value> {
    let response = app
        .request(
            "GET",
            &format!("/api/comments/file/{file_id}"),
            None,
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_any_user_comments_on_existing_file() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "draft.md", b"# Draft").await;

    let comment = add_comment(&app, &bob.access_token, &id, "  Looks good  ", None).await;
    assert_eq!(comment["content"], "Looks good");
    assert_eq!(comment["username"], "bob");

    let listed = list_comments(&app, &alice.access_token, &id).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], comment["id"]);
}

#[tokio::test]
async fn test_comment_on_missing_file_fails() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;

    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({
                "file_id": "0190b8a4-8f3c-7c2a-9a51-3f1f5a0c2d11",
                "content": "hello?",
            })),
            Some(&alice.access_token),
        )
        .await;
    response.assert_error(StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "draft.md", b"# Draft").await;

    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({ "file_id": id, "content": "   " })),
            Some(&alice.access_token),
        )
        .await;
    response.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_only_author_deletes_comment() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "draft.md", b"# Draft").await;

    let comment = add_comment(&app, &bob.access_token, &id, "mine", None).await;
    let path = format!("/api/comments/{}", comment["id"].as_str().unwrap());

    // Even the file owner cannot delete someone else's comment.
    let by_owner = app
        .request("DELETE", &path, None, Some(&alice.access_token))
        .await;
    by_owner.assert_error(StatusCode::NOT_FOUND, "NOT_FOUND");
    assert_eq!(list_comments(&app, &bob.access_token, &id).await.len(), 1);

    let by_author = app
        .request("DELETE", &path, None, Some(&bob.access_token))
        .await;
    assert_eq!(by_author.status, StatusCode::OK);
    assert!(list_comments(&app, &bob.access_token, &id).await.is_empty());
    let malformed = app
        .request("DELETE", "/api/comments/nope", None, Some(&bob.access_token))
        .await;
    malformed.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_thread_nests_replies() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "draft.md", b"# Draft").await;

    let root = add_comment(&app, &bob.access_token, &id, "question", None).await;
    let root_id = root["id"].as_str().unwrap();
    add_comment(&app, &alice.access_token, &id, "answer", Some(root_id)).await;
    add_comment(&app, &bob.access_token, &id, "separate", None).await;

    let flat = list_comments(&app, &alice.access_token, &id).await;
    assert_eq!(flat.len(), 3);
    let contents: Vec<_> = flat.iter().map(|c| c["content"].as_str().unwrap()).collect();
    assert_eq!(contents, ["question", "answer", "separate"]);

    let response = app
        .request(
            "GET",
            &format!("/api/comments/file/{id}/thread"),
            None,
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let thread = response.body["data"].as_array().unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0]["content"], "question");
    assert_eq!(thread[0]["replies"][0]["content"], "answer");
    assert_eq!(thread[0]["replies"][0]["username"], "alice");
}

#[tokio::test]
async fn test_reply_must_target_same_file() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let first = app.upload_one(&alice.access_token, "a.md", b"a").await;
    let second = app.upload_one(&alice.access_token, "b.md", b"b").await;

    let root = add_comment(&app, &alice.access_token, &first, "on a", None).await;

    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({
                "file_id": second,
                "content": "misplaced",
                "parent_comment_id": root["id"],
            })),
            Some(&alice.access_token),
        )
        .await;
    response.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_comment_with_replies_cannot_be_deleted() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "draft.md", b"# Draft").await;

    let root = add_comment(&app, &alice.access_token, &id, "root", None).await;
    let root_path = format!("/api/comments/{}", root["id"].as_str().unwrap());
    let reply = add_comment(
        &app,
        &bob.access_token,
        &id,
        "reply",
        Some(root["id"].as_str().unwrap()),
    )
    .await;
    let reply_path = format!("/api/comments/{}", reply["id"].as_str().unwrap());

    let blocked = app
        .request("DELETE", &root_path, None, Some(&alice.access_token))
        .await;
    blocked.assert_error(StatusCode::CONFLICT, "CONFLICT");
    assert_eq!(list_comments(&app, &alice.access_token, &id).await.len(), 2);

    let reply_gone = app
        .request("DELETE", &reply_path, None, Some(&bob.access_token))
        .await;
    assert_eq!(reply_gone.status, StatusCode::OK);

    let root_gone = app
        .request("DELETE", &root_path, None, Some(&alice.access_token))
        .await;
    assert_eq!(root_gone.status, StatusCode::OK);
    assert!(list_comments(&app, &alice.access_token, &id).await.is_empty());
}

#[tokio::test]
async fn test_comment_notifies_file_owner() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "draft.md", b"# Draft").await;

    let owner = app.user_id(&alice.email).await;
    let mut notifications = app.state.notification_hub.subscribe(owner);

    // The owner's own comment is not announced to them.
    add_comment(&app, &alice.access_token, &id, "note to self", None).await;
    assert!(notifications.try_recv().is_err());

    add_comment(&app, &bob.access_token, &id, "nice", None).await;
    let message = notifications.try_recv().expect("Owner was not notified");
    assert_eq!(message.event, NotificationKind::NewComment.event_name());
}
