//! The chain capability the workflows depend on.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

use crate::blockchain::types::{ChainResult, ConfirmationStatus, PendingDeployment};

/// Everything the deploy, interact and whoami flows need from a chain.
///
/// [`RpcChainClient`](crate::blockchain::RpcChainClient) is the JSON-RPC
/// implementation; tests substitute scripted doubles.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address transactions are sent from.
    fn signer_address(&self) -> Address;

    /// Broadcast a contract creation with the given init code.
    async fn deploy(&self, creation_code: Bytes) -> ChainResult<PendingDeployment>;

    /// Broadcast a state-changing call.
    async fn send_transaction(&self, to: Address, input: Bytes) -> ChainResult<TxHash>;

    /// Current inclusion depth of a transaction.
    async fn confirmation_status(&self, tx_hash: TxHash) -> ChainResult<ConfirmationStatus>;

    /// Native-token balance in wei.
    async fn balance(&self, address: Address) -> ChainResult<U256>;

    /// Read-only `eth_call` from the signer's address.
    async fn call(&self, to: Address, input: Bytes) -> ChainResult<Bytes>;
}
