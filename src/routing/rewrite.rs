//! Outbound URL rewriting.
//!
//! # Responsibilities
//! - Replace scheme and host with the backend's
//! - Move the path from the proxy namespace into the backend namespace
//! - Merge the backend's fixed query with the request query
//!
//! # Design Decisions
//! - Pure function over explicit inputs, no request or transport needed
//! - Headers, method and body are never touched here
//! - A path that contains the prefix more than once is forwarded as is,
//!   keeping its own query and dropping the backend's
//! - Matching and splitting use the escaped path, so `/%61pi` is not `/api`

use axum::http::Uri;

use crate::routing::target::BackendTarget;

/// The rewritten destination of a forwarded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundUrl {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query: String,
}

impl OutboundUrl {
    /// Convert into an absolute-form URI for the HTTP client.
    pub fn to_uri(&self) -> Result<Uri, axum::http::Error> {
        let path_and_query = if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        };

        Uri::builder()
            .scheme(self.scheme.as_str())
            .authority(self.host.as_str())
            .path_and_query(path_and_query)
            .build()
    }
}

impl std::fmt::Display for OutboundUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

/// Compute where a request matched by `prefix` is sent on `target`.
pub fn rewrite(request: &Uri, prefix: &str, target: &BackendTarget) -> OutboundUrl {
    let path = request.path();
    let request_query = request.query().unwrap_or_default();
    let parts: Vec<&str> = path.split(prefix).collect();

    // Path and query move together; a path the prefix splits into more than
    // two parts is forwarded with its own query only.
    let (path, query) = match parts.as_slice() {
        [_, remainder] => (
            single_joining_slash(target.base_path(), remainder),
            merge_query(target.raw_query(), request_query),
        ),
        _ => (path.to_string(), request_query.to_string()),
    };

    OutboundUrl {
        scheme: target.scheme().to_string(),
        host: target.host().to_string(),
        path,
        query,
    }
}

/// Join two path fragments with exactly one slash between them.
pub fn single_joining_slash(base: &str, remainder: &str) -> String {
    match (base.ends_with('/'), remainder.starts_with('/')) {
        (true, true) => format!("{}{}", base, &remainder[1..]),
        (false, false) => format!("{}/{}", base, remainder),
        _ => format!("{}{}", base, remainder),
    }
}

/// Target query first, joined with `&` only when both sides are present.
pub fn merge_query(target_query: &str, request_query: &str) -> String {
    if target_query.is_empty() || request_query.is_empty() {
        format!("{}{}", target_query, request_query)
    } else {
        format!("{}&{}", target_query, request_query)
    }
}
