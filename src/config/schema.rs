//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the deployer.
//! All types derive Serde traits for deserialization from an optional TOML
//! file; environment variables are layered on top by the loader.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use alloy::primitives::Address;

/// Sepolia chain identifier.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Root configuration for the deployer.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DeployerConfig {
    /// Target network (RPC endpoint, chain id, gas price).
    pub network: NetworkConfig,

    /// Signing account.
    pub accounts: AccountConfig,

    /// Contract artifact and deployed instance.
    pub contract: ContractConfig,

    /// Confirmation depth and timing for deployments.
    pub deployment: DeploymentConfig,

    /// Etherscan verification settings.
    pub etherscan: EtherscanConfig,

    /// Compiler settings the artifact was built with.
    pub compiler: CompilerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A credential that must never appear in logs.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Human-readable network name used in output.
    pub name: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: Option<String>,

    /// Infura project id, used to build the endpoint when `rpc_url` is unset.
    pub infura_project_id: Option<String>,

    /// Chain ID (11155111 for Sepolia).
    pub chain_id: u64,

    /// Fixed legacy gas price in gwei.
    pub gas_price_gwei: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Block explorer base URL.
    pub explorer_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "Sepolia Testnet".to_string(),
            rpc_url: None,
            infura_project_id: None,
            chain_id: SEPOLIA_CHAIN_ID,
            gas_price_gwei: 20,
            rpc_timeout_secs: 30,
            explorer_url: "https://sepolia.etherscan.io".to_string(),
        }
    }
}

impl NetworkConfig {
    /// The RPC endpoint, falling back to an Infura URL built from the project id.
    pub fn resolved_rpc_url(&self) -> Option<String> {
        if let Some(url) = self.rpc_url.as_ref().filter(|u| !u.is_empty()) {
            return Some(url.clone());
        }
        self.infura_project_id
            .as_ref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://sepolia.infura.io/v3/{}", id))
    }

    /// Gas price in wei.
    pub fn gas_price_wei(&self) -> u128 {
        self.gas_price_gwei as u128 * 1_000_000_000
    }

    /// Explorer page for an address.
    pub fn explorer_address_url(&self, address: &Address) -> String {
        format!("{}/address/{}", self.explorer_url.trim_end_matches('/'), address)
    }
}

/// Signing account configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AccountConfig {
    /// Hex-encoded private key (with or without 0x prefix).
    pub private_key: Option<Secret>,
}

/// Contract artifact and deployed instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Contract name, used in output.
    pub name: String,

    /// Path to the compiled artifact JSON.
    pub artifact_path: PathBuf,

    /// Path to the build-info JSON. Located via the artifact's `.dbg.json` when unset.
    pub build_info_path: Option<PathBuf>,

    /// Address of an already-deployed instance (used by `interact`).
    pub address: Option<String>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            name: "ProofPayNetwork".to_string(),
            artifact_path: PathBuf::from(
                "artifacts/contracts/ProofPayNetwork.sol/ProofPayNetwork.json",
            ),
            build_info_path: None,
            address: None,
        }
    }
}

/// Deployment confirmation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Confirmations required before verification.
    pub confirmations: u64,

    /// Upper bound on the confirmation wait in seconds.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Submit the source to Etherscan after deployment.
    pub verify: bool,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            confirmations: 6,
            confirmation_timeout_secs: 600,
            poll_interval_ms: 4_000,
            verify: true,
        }
    }
}

/// Etherscan verification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EtherscanConfig {
    /// API key. Verification is skipped when unset.
    pub api_key: Option<Secret>,

    /// Etherscan v2 multichain API endpoint.
    pub api_url: String,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Base delay between verification status checks in milliseconds.
    pub status_poll_base_ms: u64,

    /// Maximum delay between verification status checks in milliseconds.
    pub status_poll_max_ms: u64,

    /// Number of status checks before giving up.
    pub max_status_checks: u32,
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.etherscan.io/v2/api".to_string(),
            request_timeout_secs: 30,
            status_poll_base_ms: 3_000,
            status_poll_max_ms: 15_000,
            max_status_checks: 10,
        }
    }
}

/// Solidity compiler settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub version: String,
    pub optimizer_enabled: bool,
    pub optimizer_runs: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            version: "0.8.19".to_string(),
            optimizer_enabled: true,
            optimizer_runs: 200,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus exporter bind address; no exporter when unset.
    ///
    /// The listener lives only as long as the command, so a scraper sees it
    /// mainly during a long confirmation wait.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
