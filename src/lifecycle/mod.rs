//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     .env → Load config → Validate → Logging → Metrics → run command
//!
//! Exit:
//!     Ok → 0, Err → message on stderr, 1
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Each binary runs exactly one command and exits

pub mod startup;
