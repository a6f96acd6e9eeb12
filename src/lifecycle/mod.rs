//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Config → RouteTable → HttpServer::new → start() binds and serves
//!
//! Shutdown (shutdown.rs):
//!     stop() / signal → latched trigger → stop accepting → drain → Stopped
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → caller invokes stop()
//! ```
//!
//! # Design Decisions
//! - The library never installs signal handlers on its own
//! - Stop is idempotent and may arrive before start

pub mod phase;
pub mod shutdown;
pub mod signals;

pub use phase::Phase;
pub use shutdown::Shutdown;
