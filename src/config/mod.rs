//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (dotenvy, optional)
//!     → optional TOML file (PROOFPAY_CONFIG or --config)
//!     → loader.rs (deserialize, then environment overrides)
//!     → validation.rs (semantic checks)
//!     → DeployerConfig (validated, immutable)
//!     → passed by reference to each command
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; nothing reads the environment afterwards
//! - All fields have defaults targeting Sepolia
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_process_env, ConfigError};
pub use schema::{
    AccountConfig, CompilerConfig, ContractConfig, DeployerConfig, DeploymentConfig,
    EtherscanConfig, NetworkConfig, ObservabilityConfig, Secret, SEPOLIA_CHAIN_ID,
};
