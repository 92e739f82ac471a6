//! Top-level errors for the deploy, interact and whoami commands.
//!
//! Every variant is fatal and ends the process with exit code 1.
//! Verification problems never reach this type.

use thiserror::Error;

use crate::blockchain::ChainError;
use crate::config::ConfigError;
use crate::contract::ArtifactError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// The transaction could not be signed, broadcast, or it reverted.
    #[error("submission failed: {0}")]
    Submission(#[source] ChainError),

    /// Confirmation depth not reached within the deadline.
    #[error("confirmation timeout: {observed}/{required} confirmations after {waited_secs}s")]
    ConfirmationTimeout {
        required: u64,
        observed: u64,
        waited_secs: u64,
    },

    /// The chain could not be queried while waiting for confirmations.
    #[error("confirmation failed: {0}")]
    Confirmation(#[source] ChainError),

    /// A read-only call failed.
    #[error("query failed: {0}")]
    Query(#[source] ChainError),
}

impl WorkflowError {
    /// Classify an error raised while waiting on a transaction.
    pub fn from_confirmation(err: ChainError) -> Self {
        match err {
            ChainError::ConfirmationTimeout {
                required,
                observed,
                waited_secs,
            } => Self::ConfirmationTimeout {
                required,
                observed,
                waited_secs,
            },
            reverted @ ChainError::Reverted(_) => Self::Submission(reverted),
            other => Self::Confirmation(other),
        }
    }
}
