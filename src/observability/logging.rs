//! Structured logging.
//!
//! # Responsibilities
//! - Map the configured log level onto a tracing filter
//! - Install the process-wide subscriber (binary only)
//!
//! # Design Decisions
//! - The library only emits events; whoever embeds it owns the subscriber
//! - `RUST_LOG` overrides the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Normalize a configured level name to a tracing level.
pub fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "fatal" => "error",
        _ => "info",
    }
}

/// Filter directive used when `RUST_LOG` is not set.
pub fn filter_directive(level: &str) -> String {
    let level = normalize_level(level);
    format!("pathgate={level},tower_http={level}")
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_directive(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("DEBUG"), "debug");
        assert_eq!(normalize_level(" Trace "), "trace");
        assert_eq!(normalize_level("FATAL"), "error");
        assert_eq!(normalize_level("warning"), "warn");
        assert_eq!(normalize_level("nonsense"), "info");
        assert_eq!(normalize_level(""), "info");
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("WARN"), "pathgate=warn,tower_http=warn");
    }
}
