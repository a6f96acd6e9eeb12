//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     ProxyRoute[] (configuration order)
//!     → target.rs (parse backend url, skip invalid)
//!     → matcher.rs (literal prefix matcher)
//!     → Freeze as immutable RouteTable
//!
//! Per request:
//!     path → router.rs (first match) → rewrite.rs (outbound url)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by configuration)

pub mod matcher;
pub mod rewrite;
pub mod router;
pub mod target;

pub use rewrite::{rewrite, OutboundUrl};
pub use router::{RouteEntry, RouteTable};
pub use target::{BackendTarget, TargetError};
