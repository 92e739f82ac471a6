//! Smoke-test calls against a deployed contract.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};

use crate::blockchain::{ChainClient, ConfirmationWaiter};
use crate::contract::proofpay::{decode_user_proofs, user_proofs_calldata};
use crate::contract::ProofSubmission;
use crate::error::WorkflowError;
use crate::observability::metrics;
use crate::workflow::types::WorkflowOptions;

/// Result of one interaction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionReport {
    pub tx_hash: TxHash,
    pub user: Address,
    pub proofs: Vec<U256>,
}

/// `submitProof` followed by `getUserProofs` for the signer.
pub struct Interaction {
    chain: Arc<dyn ChainClient>,
    contract: Address,
    options: WorkflowOptions,
}

impl Interaction {
    pub fn new(chain: Arc<dyn ChainClient>, contract: Address, options: WorkflowOptions) -> Self {
        Self {
            chain,
            contract,
            options,
        }
    }

    /// Submit `proof`, wait for inclusion, then read back the signer's proofs.
    pub async fn run(&self, proof: &ProofSubmission) -> Result<InteractionReport, WorkflowError> {
        let user = self.chain.signer_address();
        tracing::info!(contract = %self.contract, user = %user, "Submitting proof");

        let tx_hash = match self.chain.send_transaction(self.contract, proof.calldata()).await {
            Ok(tx_hash) => {
                metrics::record_submission("call", true);
                tx_hash
            }
            Err(e) => {
                metrics::record_submission("call", false);
                return Err(WorkflowError::Submission(e));
            }
        };
        tracing::info!(tx_hash = %tx_hash, "Proof transaction sent, waiting for inclusion");

        ConfirmationWaiter::new(
            self.chain.as_ref(),
            self.options.poll_interval,
            self.options.confirmation_timeout,
        )
        .wait(tx_hash, 1, |_| {})
        .await
        .map_err(WorkflowError::from_confirmation)?;

        let raw = self
            .chain
            .call(self.contract, user_proofs_calldata(user))
            .await
            .map_err(WorkflowError::Query)?;
        let proofs = decode_user_proofs(&raw).map_err(WorkflowError::Query)?;

        Ok(InteractionReport {
            tx_hash,
            user,
            proofs,
        })
    }
}
