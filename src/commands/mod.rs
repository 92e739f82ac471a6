//! Command entry points shared by the `proofpay` CLI and the standalone binaries.
//!
//! Each command builds the real JSON-RPC and Etherscan clients from a
//! validated [`DeployerConfig`](crate::config::DeployerConfig), runs the
//! matching workflow and prints its report to stdout.

pub mod deploy;
pub mod interact;
pub mod whoami;

use crate::config::loader::RPC_URL_ENV_VAR;
use crate::config::{ConfigError, DeployerConfig};

fn require_rpc_url(config: &DeployerConfig) -> Result<String, ConfigError> {
    config
        .network
        .resolved_rpc_url()
        .ok_or(ConfigError::Missing(RPC_URL_ENV_VAR))
}
