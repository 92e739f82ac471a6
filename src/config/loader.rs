//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{DeployerConfig, Secret};
use crate::config::validation::{validate_config, ValidationError};

pub const RPC_URL_ENV_VAR: &str = "SEPOLIA_RPC_URL";
pub const INFURA_PROJECT_ID_ENV_VAR: &str = "INFURA_PROJECT_ID";
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";
pub const ETHERSCAN_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";
pub const CONTRACT_ADDRESS_ENV_VAR: &str = "CONTRACT_ADDRESS";
/// Path to an optional TOML configuration file.
pub const CONFIG_PATH_ENV_VAR: &str = "PROOFPAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: TOML file (if any), then environment overrides, then validation.
///
/// `env` resolves a variable name to its value. Binaries pass a lookup over
/// the process environment; tests pass a map.
pub fn load_config<F>(path: Option<&Path>, env: F) -> Result<DeployerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => DeployerConfig::default(),
    };

    apply_env_overrides(&mut config, &env);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration from the process environment.
///
/// The file path comes from `explicit_path` or `PROOFPAY_CONFIG`.
pub fn load_from_process_env(explicit_path: Option<&Path>) -> Result<DeployerConfig, ConfigError> {
    let lookup = |key: &str| std::env::var(key).ok();
    let env_path = lookup(CONFIG_PATH_ENV_VAR)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    let path = explicit_path.map(Path::to_path_buf).or(env_path);
    load_config(path.as_deref(), lookup)
}

fn read_file(path: &Path) -> Result<DeployerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Layer environment variables over the file configuration.
///
/// Empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut DeployerConfig, env: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(RPC_URL_ENV_VAR) {
        config.network.rpc_url = Some(url);
    }
    if let Some(id) = get(INFURA_PROJECT_ID_ENV_VAR) {
        config.network.infura_project_id = Some(id);
    }
    if let Some(key) = get(PRIVATE_KEY_ENV_VAR) {
        config.accounts.private_key = Some(Secret::new(key.trim()));
    }
    if let Some(key) = get(ETHERSCAN_API_KEY_ENV_VAR) {
        config.etherscan.api_key = Some(Secret::new(key.trim()));
    }
    if let Some(address) = get(CONTRACT_ADDRESS_ENV_VAR) {
        config.contract.address = Some(address.trim().to_string());
    }
}
