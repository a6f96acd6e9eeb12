//! Path-routing HTTP front door.
//!
//! Forwards requests whose path starts with a configured prefix to that
//! prefix's backend, rewriting the URL into the backend's namespace, and
//! serves everything else from a static directory.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::{HttpServer, ServeError};
pub use lifecycle::Shutdown;
