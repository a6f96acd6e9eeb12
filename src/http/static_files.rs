//! Static file fallback.
//!
//! Serves `root/<request path>` for requests no route claimed. Percent
//! decoding, `index.html` resolution for directories and rejection of paths
//! escaping the root are handled by tower-http's `ServeDir`.

use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// A directory served as the fallback for unmatched paths.
#[derive(Debug, Clone)]
pub struct StaticRoot {
    dir: PathBuf,
    service: ServeDir,
}

impl StaticRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let service = ServeDir::new(&dir).append_index_html_on_directories(true);
        Self { dir, service }
    }

    /// `None` when the configured directory is empty.
    pub fn from_config(dir: &str) -> Option<Self> {
        if dir.is_empty() {
            None
        } else {
            Some(Self::new(dir))
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn serve(&self, request: Request<Body>) -> Response {
        let path = request.uri().path().to_string();

        match self.service.clone().oneshot(request).await {
            Ok(response) => {
                tracing::trace!(root = %self.dir.display(), path = %path, status = %response.status(), "Serve");
                response.map(Body::new)
            }
            Err(e) => {
                tracing::warn!(root = %self.dir.display(), path = %path, error = %e, "Static file error");
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}
