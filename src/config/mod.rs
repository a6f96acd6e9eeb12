//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), or ProxyConfig::local_static() without one
//!     → loader.rs (parse & deserialize)
//!     → ProxyConfig (immutable)
//!     → address.rs (resolve bind address, env fallback)
//!     → handed to HttpServer once at setup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Bad proxy targets are not a load error; the route table skips them

pub mod address;
pub mod loader;
pub mod schema;

pub use address::resolve_bind_address;
pub use loader::{load_config, ConfigError};
pub use schema::{ProxyConfig, ProxyRoute};
