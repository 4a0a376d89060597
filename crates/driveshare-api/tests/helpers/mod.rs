//! Shared test helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use driveshare_api::auth::Claims;
use driveshare_api::{AppState, build_app};
use driveshare_core::config::AppConfig;
use driveshare_core::types::UserProfile;
use driveshare_database::IndexBackend;
use driveshare_database::memory::{MemoryIdentityProvider, MemoryTreeIndex};
use driveshare_storage::providers::MemoryStorageProvider;

pub const SECRET: &str = "api-test-secret";
pub const BOUNDARY: &str = "driveshare-test-boundary";

/// Test application over in-memory backends.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Tree index handle for direct manipulation
    pub index: MemoryTreeIndex,
    /// Identity handle for seeding profiles
    pub identity: MemoryIdentityProvider,
    /// Object store handle
    pub storage: MemoryStorageProvider,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = SECRET.to_string();
        config.share.public_base_url = "https://drive.example.com".to_string();

        let index = MemoryTreeIndex::new();
        let identity = MemoryIdentityProvider::new();
        let storage = MemoryStorageProvider::new("api-bucket");

        let backend = IndexBackend::memory(index.clone(), identity.clone());
        let state = AppState::new(config, backend, Arc::new(storage.clone()));

        Self {
            router: build_app(state),
            index,
            identity,
            storage,
        }
    }

    /// Seeds a profile and returns a bearer token for it.
    pub fn user(&self, first: &str, last: &str) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        self.identity.insert_profile(UserProfile {
            user_id,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            full_name: None,
        });
        (user_id, token_for(user_id, SECRET, 3600))
    }

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
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Uploads `body` as the multipart `file` field.
    pub async fn upload(&self, folder_id: &str, name: &str, body: &str, token: &str) -> TestResponse {
        let payload = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {body}\r\n\
             --{BOUNDARY}--\r\n"
        );
        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/folders/{folder_id}/files"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(payload))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

pub fn token_for(user_id: Uuid, secret: &str, ttl_seconds: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + ttl_seconds,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `data.<field>` as a string.
    pub fn str(&self, field: &str) -> String {
        self.body["data"][field]
            .as_str()
            .unwrap_or_else(|| panic!("missing data.{field} in {}", self.body))
            .to_string()
    }

    /// The `error` code of an error body.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
