//! Backend forwarding.
//!
//! # Responsibilities
//! - Point the request at the rewritten backend URL
//! - Stream the backend response back unchanged (minus hop-by-hop headers)
//! - Map upstream failures to gateway responses
//!
//! # Design Decisions
//! - Outbound requests always use HTTP/1.1 over a pooled client
//! - Unreachable backend → 502, elapsed upstream timeout → 504
//! - No retries; a failure only affects its own request

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode, Version},
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::headers::{append_forwarded_for, strip_hop_by_hop};
use crate::routing::{rewrite, RouteEntry};

/// Sends matched requests to their backends.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    timeout: Option<Duration>,
}

impl Forwarder {
    pub fn new(timeout: Option<Duration>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client, timeout }
    }

    /// Forward `request` to the backend of `route`.
    pub async fn forward(
        &self,
        route: &RouteEntry,
        request: Request<Body>,
        client_addr: Option<SocketAddr>,
    ) -> Response {
        let (mut parts, body) = request.into_parts();

        let outbound = rewrite(&parts.uri, route.prefix(), route.target());
        let uri = match outbound.to_uri() {
            Ok(uri) => uri,
            Err(e) => {
                tracing::error!(url = %outbound, error = %e, "Rewritten url is not a valid uri");
                return StatusCode::BAD_GATEWAY.into_response();
            }
        };

        tracing::trace!(prefix = %route.prefix(), to = %uri, "Proxy");

        parts.uri = uri;
        parts.version = Version::HTTP_11;
        strip_hop_by_hop(&mut parts.headers);
        if let Some(addr) = client_addr {
            append_forwarded_for(&mut parts.headers, addr.ip());
        }

        let exchange = self.client.request(Request::from_parts(parts, body));
        let result: Result<Response<Incoming>, _> = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(to = %outbound, timeout = ?limit, "Upstream timed out");
                    return StatusCode::GATEWAY_TIMEOUT.into_response();
                }
            },
            None => exchange.await,
        };

        match result {
            Ok(response) => {
                let (mut parts, body) = response.into_parts();
                strip_hop_by_hop(&mut parts.headers);
                tracing::debug!(to = %outbound, status = %parts.status, "Upstream responded");
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(to = %outbound, error = %e, "Upstream error");
                StatusCode::BAD_GATEWAY.into_response()
            }
        }
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
