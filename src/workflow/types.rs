//! Workflow inputs, outputs and events.

use std::time::Duration;

use alloy::primitives::{Address, Bytes, TxHash};

use crate::config::DeploymentConfig;
use crate::contract::{ArtifactError, ContractArtifact};
use crate::verify::VerificationOutcome;

/// Contract to deploy. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub contract_name: String,
    pub bytecode: Bytes,
    /// ABI-encoded constructor arguments.
    pub constructor_args: Bytes,
}

impl DeploymentRequest {
    /// Request for a contract without constructor arguments.
    pub fn from_artifact(artifact: &ContractArtifact) -> Result<Self, ArtifactError> {
        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(artifact.contract_name.clone()));
        }
        Ok(Self {
            contract_name: artifact.contract_name.clone(),
            bytecode: artifact.bytecode.clone(),
            constructor_args: Bytes::new(),
        })
    }

    /// Init code: bytecode followed by the encoded constructor arguments.
    pub fn creation_code(&self) -> Bytes {
        [&self.bytecode[..], &self.constructor_args[..]]
            .concat()
            .into()
    }
}

/// Outcome of a successful deployment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub confirmations: u64,
    pub verification: VerificationOutcome,
}

/// Progress notifications, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    Submitted {
        tx_hash: TxHash,
        contract_address: Address,
    },
    Confirmation {
        current: u64,
        required: u64,
    },
    Confirmed {
        block_number: u64,
        confirmations: u64,
    },
    VerificationStarted {
        address: Address,
    },
    VerificationFinished(VerificationOutcome),
    Completed(DeploymentResult),
}

/// Timing knobs for transaction waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub confirmations: u64,
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
}

impl WorkflowOptions {
    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self {
            confirmations: config.confirmations,
            confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self::from_config(&DeploymentConfig::default())
    }
}
