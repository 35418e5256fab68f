/// Common test utilities and fixtures
use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use keepsake_server::{config::ServerConfig, create_router, state::AppState};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Media tree on disk plus a router serving it
pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
}

impl TestApp {
    /// Empty `static/` and `web/` directories
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static/images")).unwrap();
        fs::create_dir_all(dir.path().join("web")).unwrap();

        let mut config = ServerConfig::default();
        config.media.static_dir = dir.path().join("static");
        config.media.web_dir = dir.path().join("web");

        let router = create_router(AppState::new(config));
        Self { dir, router }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the temp root, creating parent directories
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Send a GET request, returning status and body
    pub async fn get(&self, uri: &str) -> (axum::http::StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}
