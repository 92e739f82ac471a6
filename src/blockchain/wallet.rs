//! Signer construction.
//!
//! # Security
//! - The private key comes from configuration (`PRIVATE_KEY`)
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::blockchain::types::{ChainError, ChainResult};
use crate::config::loader::PRIVATE_KEY_ENV_VAR;
use crate::config::DeployerConfig;

/// Local signer bound to a chain id.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for EIP-155 replay protection
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> ChainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ChainError::Wallet(format!("Invalid private key format: {}", e)))?;
        let signer = signer.with_chain_id(Some(chain_id));

        tracing::debug!(address = %signer.address(), chain_id, "Wallet initialized");

        Ok(Self { signer })
    }

    /// Build the wallet from the account section of the configuration.
    pub fn from_config(config: &DeployerConfig) -> ChainResult<Self> {
        let key = config
            .accounts
            .private_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ChainError::Wallet(format!("{} is not set", PRIVATE_KEY_ENV_VAR))
            })?;
        Self::from_private_key(key.expose(), config.network.chain_id)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Wallet handle for a provider's signing filler.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
