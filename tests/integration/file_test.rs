//! Integration tests for upload, download, listing and deletion.

use chrono::Duration;
use http::{StatusCode, header};

use filestore_core::types::id::FileId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_owner_downloads_uploaded_bytes() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;

    let response = app
        .upload(
            &alice.access_token,
            &[("report.txt", &b"quarterly numbers"[..])],
            Some("Q3"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let uploaded = &response.body["data"]["files"][0];
    assert_eq!(uploaded["file_name"], "report.txt");
    assert_eq!(uploaded["file_size"], 17);
    assert_eq!(uploaded["description"], "Q3");

    let id = uploaded["id"].as_str().unwrap();
    let download = app.download(&alice.access_token, id).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(&download.body[..], b"quarterly numbers");
    let disposition = download.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap();
    assert!(disposition.contains("report.txt"));
}

#[tokio::test]
async fn test_other_user_cannot_download() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;

    let id = app.upload_one(&alice.access_token, "private.txt", b"mine").await;

    let download = app.download(&bob.access_token, &id).await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
    let body: serde_json::Value = serde_json::from_slice(&download.body).unwrap();
    assert_eq!(body["message"], "File not found or unauthorized.");
}

#[tokio::test]
async fn test_upload_skips_empty_payloads() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;

    let response = app
        .upload(
            &alice.access_token,
            &[("empty.bin", &b""[..]), ("data.bin", &b"\x00\x01\x02"[..])],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let files = response.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["file_name"], "data.bin");
}

#[tokio::test]
async fn test_list_is_paged_newest_first() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;

    for name in ["one.txt", "two.txt", "three.txt"] {
        app.upload_one(&alice.access_token, name, b"x").await;
        app.clock.advance(Duration::seconds(1));
    }
    app.upload_one(&bob.access_token, "bobs.txt", b"y").await;

    let first = app
        .request(
            "GET",
            "/file/api/files?page=1&size=2",
            None,
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let page = &first.body["data"];
    assert_eq!(page["total_count"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next"], true);
    let names: Vec<_> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["file_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["three.txt", "two.txt"]);

    let second = app
        .request(
            "GET",
            "/file/api/files?page=2&size=2",
            None,
            Some(&alice.access_token),
        )
        .await;
    let items = second.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["file_name"], "one.txt");
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    app.upload_one(&alice.access_token, "one.txt", b"x").await;

    let response = app
        .request(
            "GET",
            "/file/api/files?page=18446744073709551615&size=100",
            None,
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["data"];
    assert_eq!(page["total_count"], 1);
    assert!(page["items"].as_array().unwrap().is_empty());
    assert_eq!(page["has_next"], false);
}

#[tokio::test]
async fn test_malformed_file_id_uses_error_envelope() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;

    let download = app
        .request(
            "GET",
            "/file/api/files/not-a-uuid/download",
            None,
            Some(&alice.access_token),
        )
        .await;
    download.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");

    let delete = app
        .request("DELETE", "/file/api/files/42", None, Some(&alice.access_token))
        .await;
    delete.assert_error(StatusCode::BAD_REQUEST, "VALIDATION");
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let app = TestApp::with_config(|config| config.server.max_upload_size_bytes = 1024).await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;

    let big = vec![7u8; 4096];
    let response = app
        .upload(&alice.access_token, &[("big.bin", &big[..])], None)
        .await;
    response.assert_error(StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE");

    let listed = app
        .request("GET", "/file/api/files", None, Some(&alice.access_token))
        .await;
    assert_eq!(listed.body["data"]["total_count"], 0);
}

#[tokio::test]
async fn test_delete_removes_blob_and_metadata() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "gone.txt", b"bye").await;

    let file_id: FileId = id.parse().unwrap();
    let stored = app
        .state
        .stores
        .files
        .find_by_id(file_id)
        .await
        .unwrap()
        .unwrap();
    assert!(app.state.storage.exists(&stored.file_path).await.unwrap());

    let path = format!("/file/api/files/{id}");
    let response = app
        .request("DELETE", &path, None, Some(&alice.access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], true);

    assert!(!app.state.storage.exists(&stored.file_path).await.unwrap());
    assert!(app.state.stores.files.find_by_id(file_id).await.unwrap().is_none());

    let again = app
        .request("DELETE", &path, None, Some(&alice.access_token))
        .await;
    again.assert_error(StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_by_other_user_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.register("alice", "alice@example.com", "secret1").await;
    let bob = app.register("bob", "bob@example.com", "secret1").await;
    let id = app.upload_one(&alice.access_token, "keep.txt", b"keep").await;

    let response = app
        .request(
            "DELETE",
            &format!("/file/api/files/{id}"),
            None,
            Some(&bob.access_token),
        )
        .await;
    response.assert_error(StatusCode::NOT_FOUND, "NOT_FOUND");

    let download = app.download(&alice.access_token, &id).await;
    assert_eq!(download.status, StatusCode::OK);
}
