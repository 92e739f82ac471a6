use std::sync::Arc;

use alloy::primitives::Address;

use crate::blockchain::{ChainClient, RpcChainClient, Wallet};
use crate::config::loader::CONTRACT_ADDRESS_ENV_VAR;
use crate::config::validation::ValidationError;
use crate::config::{ConfigError, DeployerConfig};
use crate::contract::ProofSubmission;
use crate::error::WorkflowError;
use crate::workflow::{Interaction, InteractionReport, WorkflowOptions};

/// Submit the sample proof to the deployed contract and list the signer's proofs.
pub async fn run(config: &DeployerConfig) -> Result<InteractionReport, WorkflowError> {
    let contract = contract_address(config)?;
    let rpc_url = super::require_rpc_url(config)?;
    let wallet = Wallet::from_config(config).map_err(WorkflowError::Submission)?;
    let chain = RpcChainClient::connect(&config.network, &rpc_url, wallet)
        .await
        .map_err(WorkflowError::Submission)?;

    println!(
        "Testing {} at {} as: {}",
        config.contract.name,
        contract,
        chain.signer_address()
    );

    let interaction = Interaction::new(
        Arc::new(chain),
        contract,
        WorkflowOptions::from_config(&config.deployment),
    );
    let report = interaction.run(&ProofSubmission::sample()).await?;

    println!("Transaction hash: {}", report.tx_hash);
    println!("Proof submitted successfully");
    println!("User proofs: {:?}", report.proofs);

    Ok(report)
}

fn contract_address(config: &DeployerConfig) -> Result<Address, ConfigError> {
    let raw = config
        .contract
        .address
        .as_deref()
        .ok_or(ConfigError::Missing(CONTRACT_ADDRESS_ENV_VAR))?;
    raw.parse().map_err(|_| {
        ConfigError::Validation(vec![ValidationError {
            field: "contract.address",
            message: format!("'{}' is not a valid address", raw),
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_address_required() {
        let config = DeployerConfig::default();
        let err = contract_address(&config).unwrap_err();
        assert_eq!(err.to_string(), "missing required setting: CONTRACT_ADDRESS");
    }

    #[test]
    fn test_contract_address_from_cli_is_checked() {
        let mut config = DeployerConfig::default();
        config.contract.address = Some("YOUR_DEPLOYED_CONTRACT_ADDRESS".to_string());
        let err = contract_address(&config).unwrap_err();
        assert!(err.to_string().contains("contract.address"));
    }

    #[test]
    fn test_contract_address_parsed() {
        let mut config = DeployerConfig::default();
        config.contract.address = Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string());
        let address = contract_address(&config).unwrap();
        assert_eq!(
            address.to_string().to_lowercase(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
    }
}
