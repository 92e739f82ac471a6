use std::sync::Arc;

use crate::blockchain::{ChainClient, RpcChainClient, Wallet};
use crate::config::DeployerConfig;
use crate::contract::{BuildInfo, ContractArtifact};
use crate::error::WorkflowError;
use crate::verify::{EtherscanVerifier, SourceBundle};
use crate::workflow::{
    ConsoleReporter, DeploymentRequest, DeploymentResult, DeploymentWorkflow, VerificationStage,
    WorkflowOptions,
};

/// Deploy the configured contract, wait for confirmations and verify it.
pub async fn run(config: &DeployerConfig) -> Result<DeploymentResult, WorkflowError> {
    println!(
        "Deploying {} to {}...",
        config.contract.name, config.network.name
    );

    let artifact = ContractArtifact::load(&config.contract.artifact_path)?;
    let request = DeploymentRequest::from_artifact(&artifact)?;

    let rpc_url = super::require_rpc_url(config)?;
    let wallet = Wallet::from_config(config).map_err(WorkflowError::Submission)?;
    let chain: Arc<dyn ChainClient> = Arc::new(
        RpcChainClient::connect(&config.network, &rpc_url, wallet)
            .await
            .map_err(WorkflowError::Submission)?,
    );

    let workflow = DeploymentWorkflow::new(
        chain,
        Arc::new(ConsoleReporter::new(&config.network)),
        WorkflowOptions::from_config(&config.deployment),
    )
    .with_verification(verification_stage(config, &artifact));

    workflow.run(&request).await
}

/// Build the Etherscan verifier, or explain why verification is off.
///
/// Problems here never fail the deployment.
fn verification_stage(config: &DeployerConfig, artifact: &ContractArtifact) -> VerificationStage {
    if !config.deployment.verify {
        return VerificationStage::Disabled("disabled by configuration".to_string());
    }
    let Some(api_key) = config.etherscan.api_key.clone().filter(|k| !k.is_empty()) else {
        tracing::warn!("ETHERSCAN_API_KEY not set, contract will not be verified");
        return VerificationStage::Disabled("ETHERSCAN_API_KEY not set".to_string());
    };

    let build_info_path = match &config.contract.build_info_path {
        Some(path) => path.clone(),
        None => match BuildInfo::locate(&config.contract.artifact_path) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "Build info not found, contract will not be verified");
                return VerificationStage::Disabled(format!("build info not found: {}", e));
            }
        },
    };
    let build_info = match BuildInfo::load(&build_info_path) {
        Ok(build_info) => build_info,
        Err(e) => {
            tracing::warn!(error = %e, "Build info unreadable, contract will not be verified");
            return VerificationStage::Disabled(format!("build info unreadable: {}", e));
        }
    };

    for mismatch in build_info.compiler_mismatches(&config.compiler) {
        tracing::warn!(mismatch = %mismatch, "Artifact was built with different compiler settings");
    }

    let verifier = SourceBundle::from_build(artifact, &build_info)
        .map_err(|e| e.to_string())
        .and_then(|source| {
            EtherscanVerifier::new(&config.etherscan, api_key, config.network.chain_id, source)
                .map_err(|e| e.to_string())
        });

    match verifier {
        Ok(verifier) => VerificationStage::Enabled(Arc::new(verifier)),
        Err(e) => {
            tracing::warn!(error = %e, "Etherscan client unavailable, contract will not be verified");
            VerificationStage::Disabled(e)
        }
    }
}
