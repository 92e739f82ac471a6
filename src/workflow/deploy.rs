//! Deploy → confirm → verify → report.

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::{ChainClient, ConfirmationWaiter};
use crate::error::WorkflowError;
use crate::observability::metrics;
use crate::verify::{VerificationOutcome, VerificationRequest, VerificationService};
use crate::workflow::report::Reporter;
use crate::workflow::types::{DeploymentRequest, DeploymentResult, WorkflowEvent, WorkflowOptions};

/// Whether and how the source gets verified after deployment.
pub enum VerificationStage {
    Enabled(Arc<dyn VerificationService>),
    /// Reason shown in the outcome.
    Disabled(String),
}

/// One-shot contract deployment.
///
/// Submission and confirmation failures end the run with an error.
/// Verification is attempted only after the confirmation depth is reached
/// and its failures are reported in [`DeploymentResult::verification`].
pub struct DeploymentWorkflow {
    chain: Arc<dyn ChainClient>,
    reporter: Arc<dyn Reporter>,
    verification: VerificationStage,
    options: WorkflowOptions,
}

impl DeploymentWorkflow {
    /// Workflow without verification.
    pub fn new(chain: Arc<dyn ChainClient>, reporter: Arc<dyn Reporter>, options: WorkflowOptions) -> Self {
        Self {
            chain,
            reporter,
            verification: VerificationStage::Disabled("verification not configured".to_string()),
            options,
        }
    }

    pub fn with_verification(mut self, verification: VerificationStage) -> Self {
        self.verification = verification;
        self
    }

    pub fn with_verifier(self, verifier: Arc<dyn VerificationService>) -> Self {
        self.with_verification(VerificationStage::Enabled(verifier))
    }

    pub async fn run(&self, request: &DeploymentRequest) -> Result<DeploymentResult, WorkflowError> {
        let span = tracing::info_span!(
            "deploy",
            run_id = %Uuid::new_v4(),
            contract = %request.contract_name,
        );
        self.run_inner(request).instrument(span).await
    }

    async fn run_inner(&self, request: &DeploymentRequest) -> Result<DeploymentResult, WorkflowError> {
        let required = self.options.confirmations;
        tracing::info!(
            signer = %self.chain.signer_address(),
            confirmations = required,
            "Deploying contract"
        );

        // 1. Submit
        let pending = match self.chain.deploy(request.creation_code()).await {
            Ok(pending) => {
                metrics::record_submission("deploy", true);
                pending
            }
            Err(e) => {
                metrics::record_submission("deploy", false);
                tracing::error!(error = %e, "Deployment transaction rejected");
                return Err(WorkflowError::Submission(e));
            }
        };
        tracing::info!(
            tx_hash = %pending.tx_hash,
            address = %pending.contract_address,
            "Deployment transaction sent"
        );
        self.reporter.report(&WorkflowEvent::Submitted {
            tx_hash: pending.tx_hash,
            contract_address: pending.contract_address,
        });

        // 2. Confirm
        let waiter = ConfirmationWaiter::new(
            self.chain.as_ref(),
            self.options.poll_interval,
            self.options.confirmation_timeout,
        );
        let confirmed = waiter
            .wait(pending.tx_hash, required, |current| {
                self.reporter
                    .report(&WorkflowEvent::Confirmation { current, required });
            })
            .await
            .map_err(WorkflowError::from_confirmation)?;
        tracing::info!(
            block_number = confirmed.block_number,
            confirmations = confirmed.confirmations,
            "Deployment confirmed"
        );
        self.reporter.report(&WorkflowEvent::Confirmed {
            block_number: confirmed.block_number,
            confirmations: confirmed.confirmations,
        });

        // 3. Verify (best-effort)
        let verification = self
            .verify(VerificationRequest {
                address: pending.contract_address,
                constructor_args: request.constructor_args.clone(),
            })
            .await;
        metrics::record_verification(verification.label());
        self.reporter
            .report(&WorkflowEvent::VerificationFinished(verification.clone()));

        // 4. Report
        let result = DeploymentResult {
            contract_address: pending.contract_address,
            tx_hash: pending.tx_hash,
            block_number: confirmed.block_number,
            confirmations: confirmed.confirmations,
            verification,
        };
        self.reporter.report(&WorkflowEvent::Completed(result.clone()));

        Ok(result)
    }

    async fn verify(&self, request: VerificationRequest) -> VerificationOutcome {
        let verifier = match &self.verification {
            VerificationStage::Enabled(verifier) => verifier,
            VerificationStage::Disabled(reason) => {
                tracing::info!(reason = %reason, "Skipping source verification");
                return VerificationOutcome::Skipped(reason.clone());
            }
        };

        self.reporter.report(&WorkflowEvent::VerificationStarted {
            address: request.address,
        });

        match verifier.verify(&request).await {
            Ok(outcome) => {
                tracing::info!(address = %request.address, outcome = %outcome, "Verification finished");
                outcome
            }
            Err(e) => {
                tracing::warn!(address = %request.address, error = %e, "Verification failed");
                VerificationOutcome::Failed(e.to_string())
            }
        }
    }
}
