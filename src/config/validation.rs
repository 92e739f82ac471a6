//! Configuration validation.
//!
//! Serde handles the syntax; this module checks value ranges and that URLs
//! and addresses parse. Every problem is collected, not just the first.

use std::fmt;
use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::DeployerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &DeployerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let network = &config.network;
    if network.chain_id == 0 {
        errors.push(ValidationError::new("network.chain_id", "must be non-zero"));
    }
    if network.gas_price_gwei == 0 {
        errors.push(ValidationError::new("network.gas_price_gwei", "must be greater than 0"));
    }
    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be greater than 0"));
    }
    if let Some(url) = network.resolved_rpc_url() {
        if let Err(e) = url.parse::<url::Url>() {
            errors.push(ValidationError::new(
                "network.rpc_url",
                format!("invalid URL '{}': {}", url, e),
            ));
        }
    }

    let deployment = &config.deployment;
    if deployment.confirmations == 0 {
        errors.push(ValidationError::new("deployment.confirmations", "must be at least 1"));
    }
    if deployment.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "deployment.confirmation_timeout_secs",
            "must be greater than 0",
        ));
    }
    if deployment.poll_interval_ms == 0 {
        errors.push(ValidationError::new("deployment.poll_interval_ms", "must be greater than 0"));
    }

    let etherscan = &config.etherscan;
    if let Err(e) = etherscan.api_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "etherscan.api_url",
            format!("invalid URL '{}': {}", etherscan.api_url, e),
        ));
    }
    if etherscan.max_status_checks == 0 {
        errors.push(ValidationError::new("etherscan.max_status_checks", "must be at least 1"));
    }
    if etherscan.status_poll_base_ms > etherscan.status_poll_max_ms {
        errors.push(ValidationError::new(
            "etherscan.status_poll_base_ms",
            "must not exceed status_poll_max_ms",
        ));
    }

    if let Some(address) = config.contract.address.as_deref() {
        if address.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                "contract.address",
                format!("'{}' is not a valid address", address),
            ));
        }
    }

    if let Some(addr) = config.observability.metrics_address.as_deref() {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("'{}' is not a socket address (host:port)", addr),
            ));
        }
    }

    if config.compiler.version.trim().is_empty() {
        errors.push(ValidationError::new("compiler.version", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
