//! Resilience helpers.
//!
//! The deploy workflow itself never retries: a failed broadcast or an
//! expired confirmation wait ends the run. The one polling loop is the
//! Etherscan verification status check, which waits on a queued job and
//! spaces its checks with [`backoff::Backoff`].

pub mod backoff;

pub use backoff::Backoff;
