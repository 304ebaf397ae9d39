//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and dispatcher produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (dispatch counters via the `metrics` facade)
//!
//! Consumers:
//!     → whatever subscriber / recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber is opt-in
//! - Metrics are cheap counter increments, a no-op without a recorder

pub mod logging;
pub mod metrics;
