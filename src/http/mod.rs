//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, lifecycle, trace layer)
//!     → dispatch.rs (route lookup, fallback decision)
//!     → forward.rs + headers.rs (rewrite, strip hop-by-hop, stream back)
//!       or static_files.rs (file from the static root)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod forward;
pub mod headers;
pub mod server;
pub mod static_files;

pub use dispatch::Dispatcher;
pub use server::{HttpServer, ServeError};
