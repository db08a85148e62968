//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use filestore_api::{AppState, build_app, build_state};
use filestore_core::config::AppConfig;
use filestore_core::traits::ManualClock;
use filestore_core::types::id::UserId;
use filestore_database::{MemoryDatabase, Stores};
use filestore_storage::LocalStorageProvider;

const BOUNDARY: &str = "filestore-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching stores and the hub directly
    pub state: AppState,
    /// Clock every service reads
    pub clock: Arc<ManualClock>,
    _upload_dir: TempDir,
}

/// Tokens and identity returned by register and login
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub email: String,
}

impl TestApp {
    /// Create a new test application with empty in-memory stores
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default config
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let mut config = AppConfig::default();
        adjust(&mut config);
        config.storage.upload_root = upload_dir.path().display().to_string();
        config.validate().expect("Default config must be valid");

        let storage = LocalStorageProvider::new(upload_dir.path())
            .await
            .expect("Failed to init storage");
        let clock = Arc::new(ManualClock::starting_now());
        let stores = Stores::from_memory(&MemoryDatabase::new());

        let state = build_state(config, stores, Arc::new(storage), clock.clone());
        let router = build_app(state.clone());

        Self {
            router,
            state,
            clock,
            _upload_dir: upload_dir,
        }
    }

    /// Register an account and return its tokens
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Session {
        let response = self
            .request(
                "POST",
                "/identity/api/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        session_from(&response.body)
    }

    /// Look up a user id by email
    pub async fn user_id(&self, email: &str) -> UserId {
        self.state
            .stores
            .users
            .find_by_email(email)
            .await
            .expect("User lookup failed")
            .expect("User not found")
            .id
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await.into_json()
    }

    /// Upload `(file name, content)` pairs in one multipart request
    pub async fn upload(
        &self,
        token: &str,
        files: &[(&str, &[u8])],
        description: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, data) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(description) = description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\n{description}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/file/api/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await.into_json()
    }

    /// Upload a single file and return its id as a string
    pub async fn upload_one(&self, token: &str, name: &str, data: &[u8]) -> String {
        let response = self.upload(token, &[(name, data)], None).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["files"][0]["id"]
            .as_str()
            .expect("No file id in upload response")
            .to_string()
    }

    /// Download a file, returning the raw response
    pub async fn download(&self, token: &str, file_id: &str) -> RawResponse {
        let req = Request::builder()
            .method("GET")
            .uri(format!("/file/api/files/{file_id}/download"))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }
}

/// Extract the token pair from an auth response body
pub fn session_from(body: &Value) -> Session {
    let data = &body["data"];
    Session {
        access_token: data["access_token"]
            .as_str()
            .expect("No access_token in response")
            .to_string(),
        refresh_token: data["refresh_token"]
            .as_str()
            .expect("No refresh_token in response")
            .to_string(),
        email: data["email"].as_str().unwrap_or_default().to_string(),
    }
}

/// Response from a test request, body parsed as JSON
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Assert the standard failure envelope with the given kind
    pub fn assert_error(&self, status: StatusCode, kind: &str) {
        assert_eq!(self.status, status, "{:?}", self.body);
        assert_eq!(self.body["success"], false);
        assert_eq!(self.body["error"], kind);
    }
}

/// Unparsed response
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    fn into_json(self) -> TestResponse {
        TestResponse {
            status: self.status,
            body: serde_json::from_slice(&self.body).unwrap_or(Value::Null),
        }
    }
}
