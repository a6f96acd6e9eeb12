//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Compile configured proxy bindings into route entries
//! - Look up the matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan in configuration order
//! - First match wins, not longest match; configuration order is priority
//! - A bad binding is skipped with a warning, never fatal
//! - Prefixes are compared with the escaped path the client sent; no
//!   percent-decoding happens before matching

use crate::config::ProxyRoute;
use crate::routing::matcher::PathPrefixMatcher;
use crate::routing::target::BackendTarget;

/// A compiled prefix → backend binding.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    matcher: PathPrefixMatcher,
    target: BackendTarget,
}

impl RouteEntry {
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn target(&self) -> &BackendTarget {
        &self.target
    }
}

/// Ordered routes, evaluated top to bottom.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build the table from configured bindings, skipping invalid ones.
    pub fn from_config(routes: &[ProxyRoute]) -> Self {
        Self::build(routes.iter().map(|r| (r.proxy.as_str(), r.to.as_str())))
    }

    /// Build the table from `(prefix, target url)` pairs in priority order.
    pub fn build<'a, I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries = Vec::new();

        for (prefix, to) in bindings {
            if prefix.is_empty() {
                tracing::warn!(to = %to, "Skipping proxy with empty path prefix");
                continue;
            }

            match BackendTarget::parse(to) {
                Ok(target) => {
                    tracing::debug!(prefix = %prefix, target = %target, "Route registered");
                    entries.push(RouteEntry {
                        matcher: PathPrefixMatcher::new(prefix),
                        target,
                    });
                }
                Err(e) => {
                    tracing::warn!(prefix = %prefix, error = %e, "Could not parse proxy target, skipping");
                }
            }
        }

        Self { entries }
    }

    /// Find the first route whose prefix begins `path`.
    pub fn match_path(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.matcher.matches(path))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
