//! Source verification subsystem.
//!
//! # Data Flow
//! ```text
//! deployed address + constructor args
//!     → VerificationService::verify
//!     → etherscan.rs (already verified? → submit → poll status)
//!     → VerificationOutcome
//! ```
//!
//! Verification is best-effort: the deploy workflow downgrades every
//! [`VerificationError`] to a warning and a [`VerificationOutcome::Failed`].

pub mod etherscan;

use std::fmt;

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use thiserror::Error;

pub use etherscan::{EtherscanVerifier, SourceBundle};

/// What to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub address: Address,
    /// ABI-encoded constructor arguments (empty when there are none).
    pub constructor_args: Bytes,
}

/// How verification ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
    /// Not attempted.
    Skipped(String),
    /// Attempted and failed; the deployment still stands.
    Failed(String),
}

impl VerificationOutcome {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::AlreadyVerified => "already_verified",
            Self::Skipped(_) => "skipped",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => f.write_str("verified"),
            Self::AlreadyVerified => f.write_str("already verified"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

#[derive(Debug, Error)]
pub enum VerificationError {
    /// Transport failure. The request URL is stripped since it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The submission was refused outright.
    #[error("verification request rejected: {0}")]
    Rejected(String),

    /// The explorer compiled the source and it did not match.
    #[error("verification failed: {0}")]
    Failed(String),

    #[error("verification {guid} still pending after {attempts} status checks")]
    StatusTimeout { guid: String, attempts: u32 },

    #[error("unexpected explorer response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for VerificationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// A remote service that matches deployed bytecode to published source.
#[async_trait]
pub trait VerificationService: Send + Sync {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(VerificationOutcome::Verified.to_string(), "verified");
        assert_eq!(
            VerificationOutcome::Failed("bytecode mismatch".into()).to_string(),
            "failed: bytecode mismatch"
        );
        assert_eq!(VerificationOutcome::AlreadyVerified.label(), "already_verified");
    }
}
