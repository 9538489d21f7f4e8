//! Request builders and a throwaway server for handler tests.

use crate::build_router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use geotag::storage::TagStore;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "geotag-test-boundary";

/// Router over a store in a fresh temporary directory.
pub struct TestServer {
    app: Router,
    path: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("tags.json");
        let store = Arc::new(TagStore::open(&path));

        Self {
            app: build_router(store, None),
            path,
            _dir: dir,
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.path
    }

    /// Sends one request and decodes the JSON response body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router call failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response was not JSON")
        };
        (status, body)
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One part of a multipart body.
pub struct MultipartPart<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    value: &'a str,
}

impl<'a> MultipartPart<'a> {
    pub fn field(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            value,
        }
    }

    pub fn file(name: &'a str, filename: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: Some(filename),
            value,
        }
    }
}

pub fn multipart(uri: &str, parts: &[MultipartPart<'_>]) -> Request<Body> {
    let mut body = String::new();
    for part in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match part.filename {
            Some(filename) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, filename
                ));
                body.push_str("Content-Type: text/plain\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n",
                    part.name
                ));
            }
        }
        body.push_str("\r\n");
        body.push_str(part.value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
