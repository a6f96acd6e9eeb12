//! Request dispatch.
//!
//! Every request goes through [`Dispatcher::handle`]:
//!
//! ```text
//! path ─▶ RouteTable::match_path ─┬─ Some(route) ─▶ Forwarder (rewrite + stream)
//!                                 └─ None ─┬─ static root ─▶ StaticRoot
//!                                          └─ none ────────▶ 404, empty body
//! ```
//!
//! Routing looks at the path only; method, headers and body never
//! influence the decision.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::forward::Forwarder;
use crate::http::static_files::StaticRoot;
use crate::routing::RouteTable;

/// Stateless per-request decision engine over a frozen route table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    forwarder: Forwarder,
    static_root: Option<StaticRoot>,
}

impl Dispatcher {
    pub fn new(routes: Arc<RouteTable>, forwarder: Forwarder, static_root: Option<StaticRoot>) -> Self {
        Self {
            routes,
            forwarder,
            static_root,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub async fn handle(&self, request: Request<Body>) -> Response {
        let client_addr = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        if let Some(route) = self.routes.match_path(request.uri().path()) {
            return self.forwarder.forward(route, request, client_addr).await;
        }

        match &self.static_root {
            Some(root) => root.serve(request).await,
            None => {
                tracing::trace!(path = %request.uri().path(), "Not found");
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}

/// Axum entry point for every path and method.
pub async fn dispatch_handler(State(dispatcher): State<Dispatcher>, request: Request<Body>) -> Response {
    dispatcher.handle(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher(static_root: Option<StaticRoot>) -> Dispatcher {
        let routes = RouteTable::build([("/api", "http://127.0.0.1:1/svc")]);
        Dispatcher::new(Arc::new(routes), Forwarder::new(None), static_root)
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_unmatched_without_static_root_is_empty_404() {
        let response = dispatcher(None).handle(request("/unknown")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_falls_back_to_static_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "welcome").unwrap();

        let response = dispatcher(Some(StaticRoot::new(dir.path()))).handle(request("/")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"welcome");
    }

    #[tokio::test]
    async fn test_matched_route_never_reaches_static_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("api")).unwrap();
        std::fs::write(dir.path().join("api/data.json"), "{}").unwrap();

        // Port 1 refuses connections, so forwarding yields a gateway error.
        let response = dispatcher(Some(StaticRoot::new(dir.path())))
            .handle(request("/api/data.json"))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
