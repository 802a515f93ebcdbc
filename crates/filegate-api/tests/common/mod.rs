//! Common test utilities for the API integration tests
#![allow(dead_code)]

use axum::{Router, body::Body, http::Request};
use filegate_api::ApiContext;
use filegate_core::models::AppConfig;
use filegate_core::services::{
    ExtensionService, InMemoryExtensionRepository, LocalStorageService, StorageService,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "filegate-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub ctx: Arc<ApiContext>,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_max_upload_size(64 * 1024).await
    }

    pub async fn with_max_upload_size(max_upload_size: usize) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let upload_dir = dir.path().join("uploads");

        let config = AppConfig::builder()
            .upload_dir(upload_dir.clone())
            .max_upload_size(max_upload_size)
            .build();

        let storage: Arc<dyn StorageService> = Arc::new(LocalStorageService::new(upload_dir));
        storage.ensure_ready().await.expect("Failed to prepare storage");

        let extensions = Arc::new(ExtensionService::new(Arc::new(
            InMemoryExtensionRepository::new(),
        )));
        extensions.initialize().await.expect("Failed to seed catalog");

        let ctx = ApiContext::from_parts(config, extensions, storage);
        let router = filegate_api::router(Arc::clone(&ctx));

        Self { router, ctx, dir }
    }

    /// Sends a request and returns the status with the parsed JSON body
    pub async fn send(&self, request: Request<Body>) -> (u16, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status().as_u16();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (u16, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> (u16, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn put(&self, uri: &str) -> (u16, Value) {
        self.send(Request::put(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (u16, Value) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn upload(&self, filename: &str, content: &[u8]) -> (u16, Value) {
        self.send(multipart_request("file", Some(filename), content))
            .await
    }

    /// Id of a seeded fixed extension
    pub async fn fixed_id(&self, extension: &str) -> i64 {
        let (_, body) = self.get("/api/extensions/fixed").await;
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["extensionName"] == extension)
            .and_then(|e| e["id"].as_i64())
            .unwrap()
    }
}

/// Builds a multipart upload request with a single part
pub fn multipart_request(field: &str, filename: Option<&str>, content: &[u8]) -> Request<Body> {
    let disposition = match filename {
        Some(name) => format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, name
        ),
        None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", field),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::post("/api/files/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
