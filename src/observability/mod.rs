//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → tracing.rs (per-request span with a request id)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout), installed by the binary
//! ```

pub mod logging;
pub mod tracing;
