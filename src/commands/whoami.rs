use crate::blockchain::{RpcChainClient, Wallet};
use crate::config::DeployerConfig;
use crate::error::WorkflowError;
use crate::workflow::{whoami, AccountSummary};

/// Print the signer address and its balance on the configured network.
pub async fn run(config: &DeployerConfig) -> Result<AccountSummary, WorkflowError> {
    let rpc_url = super::require_rpc_url(config)?;
    let wallet = Wallet::from_config(config).map_err(WorkflowError::Query)?;
    let chain = RpcChainClient::connect(&config.network, &rpc_url, wallet)
        .await
        .map_err(WorkflowError::Query)?;

    let summary = whoami(&chain).await?;

    println!("Deployer address: {}", summary.address);
    println!("{} balance: {} ETH", config.network.name, summary.balance_ether());

    Ok(summary)
}
