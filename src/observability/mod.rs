//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Workflows and clients produce:
//!     → logging.rs (structured log events on stderr, one span per run)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → terminal / CI log capture
//!     → optional Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;
