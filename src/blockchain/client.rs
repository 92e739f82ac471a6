//! JSON-RPC chain client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint and check the chain id
//! - Sign and broadcast contract creations and calls at a fixed gas price
//! - Query receipts, block height, balances and `eth_call` results
//! - Bound every request with the configured timeout

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportResult;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::chain::ChainClient;
use crate::blockchain::types::{
    ChainError, ChainId, ChainResult, ConfirmationStatus, PendingDeployment,
};
use crate::blockchain::wallet::Wallet;
use crate::config::NetworkConfig;
use crate::observability::metrics;

/// Chain client backed by an alloy HTTP provider with a local signer.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    wallet: Wallet,
    config: NetworkConfig,
    timeout_duration: Duration,
}

impl RpcChainClient {
    /// Connect to `rpc_url` and make sure it serves the configured chain.
    pub async fn connect(config: &NetworkConfig, rpc_url: &str, wallet: Wallet) -> ChainResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| ChainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url);

        let client = Self {
            provider: Arc::new(provider),
            wallet,
            config: config.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        };

        client.verify_chain_id().await?;
        tracing::info!(
            network = %config.name,
            chain_id = config.chain_id,
            signer = %client.wallet.address(),
            "Chain client connected"
        );

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        self.rpc("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        self.rpc("eth_blockNumber", self.provider.get_block_number()).await
    }

    /// Run one RPC request under the timeout.
    async fn rpc<T, F>(&self, method: &'static str, request: F) -> ChainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeout_duration, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                metrics::record_rpc_error(method);
                Err(ChainError::Rpc(format!("{}: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                metrics::record_rpc_error(method);
                Err(ChainError::Timeout(self.config.rpc_timeout_secs))
            }
        }
    }

    /// Legacy transaction skeleton from the signer with an explicit nonce.
    fn base_request(&self, nonce: u64) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_nonce(nonce)
            .with_chain_id(self.config.chain_id)
            .with_gas_price(self.config.gas_price_wei())
    }

    async fn next_nonce(&self) -> ChainResult<u64> {
        self.rpc(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(self.wallet.address()),
        )
        .await
    }

    /// Sign and broadcast; node-side refusals become [`ChainError::Rejected`].
    async fn broadcast(&self, tx: TransactionRequest) -> ChainResult<TxHash> {
        match timeout(self.timeout_duration, self.provider.send_transaction(tx)).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => {
                metrics::record_rpc_error("eth_sendRawTransaction");
                Err(ChainError::Rejected(e.to_string()))
            }
            Err(_) => Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    fn signer_address(&self) -> Address {
        self.wallet.address()
    }

    async fn deploy(&self, creation_code: Bytes) -> ChainResult<PendingDeployment> {
        let nonce = self.next_nonce().await?;
        let tx = self.base_request(nonce).with_deploy_code(creation_code);
        let tx_hash = self.broadcast(tx).await?;

        Ok(PendingDeployment {
            tx_hash,
            contract_address: self.wallet.address().create(nonce),
        })
    }

    async fn send_transaction(&self, to: Address, input: Bytes) -> ChainResult<TxHash> {
        let nonce = self.next_nonce().await?;
        let tx = self.base_request(nonce).with_to(to).with_input(input);
        self.broadcast(tx).await
    }

    async fn confirmation_status(&self, tx_hash: TxHash) -> ChainResult<ConfirmationStatus> {
        let receipt = match self
            .rpc(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash),
            )
            .await?
        {
            Some(receipt) => receipt,
            None => return Ok(ConfirmationStatus::Pending),
        };

        if !receipt.status() {
            return Err(ChainError::Reverted(tx_hash));
        }

        let Some(block_number) = receipt.block_number else {
            return Ok(ConfirmationStatus::Pending);
        };
        let latest = self.get_block_number().await?;

        Ok(ConfirmationStatus::Included {
            block_number,
            confirmations: confirmations_at(block_number, latest),
        })
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        self.rpc("eth_getBalance", self.provider.get_balance(address)).await
    }

    async fn call(&self, to: Address, input: Bytes) -> ChainResult<Bytes> {
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_input(input);
        self.rpc("eth_call", self.provider.call(tx)).await
    }
}

/// Depth of a transaction mined in `block_number` when the head is `latest`.
fn confirmations_at(block_number: u64, latest: u64) -> u64 {
    latest.saturating_sub(block_number) + 1
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("network", &self.config.name)
            .field("chain_id", &self.config.chain_id)
            .field("signer", &self.wallet.address())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_config() -> NetworkConfig {
        NetworkConfig {
            chain_id: 31337, // Anvil default
            rpc_timeout_secs: 2,
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn test_confirmation_depth() {
        assert_eq!(confirmations_at(100, 100), 1);
        assert_eq!(confirmations_at(100, 105), 6);
        // A lagging head never yields zero once a receipt exists
        assert_eq!(confirmations_at(100, 99), 1);
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 31337).unwrap();
        let err = RpcChainClient::connect(&test_config(), "not a url", wallet)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_connect() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 31337).unwrap();
        // Port 9 (discard) is not an RPC server
        let result = RpcChainClient::connect(&test_config(), "http://127.0.0.1:9", wallet).await;
        assert!(matches!(
            result,
            Err(ChainError::Rpc(_)) | Err(ChainError::Timeout(_))
        ));
    }
}
