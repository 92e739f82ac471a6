//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node refused the transaction (insufficient funds, nonce conflict, ...).
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// Transaction was mined but reverted.
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    /// Required confirmation depth was not reached in time.
    #[error("Transaction not confirmed: {observed}/{required} confirmations after {waited_secs} seconds")]
    ConfirmationTimeout {
        required: u64,
        observed: u64,
        waited_secs: u64,
    },

    /// Invalid or missing private key.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Connected node reports a different chain.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Return data did not match the expected ABI.
    #[error("Failed to decode call result: {0}")]
    Decode(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Inclusion state of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// No receipt yet.
    Pending,
    /// Mined; the inclusion block counts as the first confirmation.
    Included { block_number: u64, confirmations: u64 },
}

/// A broadcast contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeployment {
    pub tx_hash: TxHash,
    /// CREATE address derived from sender and nonce.
    pub contract_address: Address,
}

/// A transaction that reached the requested depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedTransaction {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub confirmations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(11_155_111u64);
        assert_eq!(chain_id.0, 11_155_111);
        assert_eq!(u64::from(chain_id), 11_155_111);
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = ChainError::ConfirmationTimeout {
            required: 6,
            observed: 2,
            waited_secs: 600,
        };
        assert_eq!(
            err.to_string(),
            "Transaction not confirmed: 2/6 confirmations after 600 seconds"
        );

        let err = ChainError::ChainMismatch {
            expected: 11_155_111,
            actual: 1,
        };
        assert!(err.to_string().contains("11155111"));
    }
}
