//! Signer identity and balance.

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};

use crate::blockchain::ChainClient;
use crate::error::WorkflowError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub address: Address,
    /// Balance in wei.
    pub balance: U256,
}

impl AccountSummary {
    /// Balance in ether with full precision.
    pub fn balance_ether(&self) -> String {
        format_ether(self.balance)
    }
}

/// Look up the signer's native balance. Read-only.
pub async fn whoami(chain: &dyn ChainClient) -> Result<AccountSummary, WorkflowError> {
    let address = chain.signer_address();
    let balance = chain.balance(address).await.map_err(WorkflowError::Query)?;
    tracing::debug!(address = %address, balance = %balance, "Fetched balance");
    Ok(AccountSummary { address, balance })
}
