//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Build, reload and match paths produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, gauges, histograms via `metrics`)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are cheap (no-ops until a recorder is installed)
//! - The library never installs a global subscriber or recorder itself

pub mod logging;
pub mod metrics;
