//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! The core never parses files itself; it consumes a `ProxyConfig`.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Local bind address. Empty means resolve from the environment.
    pub addr: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Static content root. Empty disables the file fallback.
    #[serde(rename = "static")]
    pub static_dir: String,

    /// Upper bound on a single backend exchange. Unset means no limit.
    pub upstream_timeout_secs: Option<u64>,

    /// How long in-flight requests may drain after stop, in seconds.
    pub shutdown_timeout_secs: u64,

    /// Prefix bindings, highest priority first.
    pub proxies: Vec<ProxyRoute>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            addr: String::new(),
            log_level: "info".to_string(),
            static_dir: String::new(),
            upstream_timeout_secs: None,
            shutdown_timeout_secs: 5,
            proxies: Vec::new(),
        }
    }
}

impl ProxyConfig {
    /// Configuration used when no file is given: serve the current
    /// directory on the default address.
    pub fn local_static() -> Self {
        Self {
            addr: crate::config::address::DEFAULT_SERVER_ADDR.to_string(),
            log_level: "debug".to_string(),
            static_dir: ".".to_string(),
            ..Self::default()
        }
    }
}

/// A single prefix → backend binding.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProxyRoute {
    /// Path prefix to match, e.g. `/api`.
    pub proxy: String,

    /// Backend url, e.g. `http://127.0.0.1:9000/svc`.
    pub to: String,
}
