//! Etherscan source verification client.
//!
//! Talks to the v2 multichain API (`chainid` query parameter). A
//! verification is three calls: `getsourcecode` to skip contracts that are
//! already verified, `verifysourcecode` to queue the job, and repeated
//! `checkverifystatus` until the job leaves the queue.

use std::time::Duration;

use alloy::primitives::{hex, Address};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;

use crate::config::{EtherscanConfig, Secret};
use crate::contract::{BuildInfo, ContractArtifact};
use crate::resilience::Backoff;
use crate::verify::{VerificationError, VerificationOutcome, VerificationRequest, VerificationService};

/// Source payload submitted for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBundle {
    /// `<source path>:<contract name>`
    pub contract_name: String,
    /// `v0.8.19+commit.7dd6d404`
    pub compiler_version: String,
    /// Serialized solc standard JSON input.
    pub standard_json: String,
}

impl SourceBundle {
    pub fn from_build(artifact: &ContractArtifact, build_info: &BuildInfo) -> Result<Self, serde_json::Error> {
        Ok(Self {
            contract_name: artifact.fully_qualified_name(),
            compiler_version: build_info.etherscan_compiler_version(),
            standard_json: serde_json::to_string(&build_info.input)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: serde_json::Value,
}

impl EtherscanResponse {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// `result` as text, falling back to `message`.
    fn detail(&self) -> String {
        match self.result.as_str() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.message.clone(),
        }
    }
}

/// State of a queued verification job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatusCheck {
    Pending,
    Verified,
    AlreadyVerified,
    Failed(String),
}

pub(crate) fn classify_status(result: &str) -> StatusCheck {
    let lower = result.to_ascii_lowercase();
    if lower.starts_with("pass") {
        StatusCheck::Verified
    } else if lower.contains("pending") {
        StatusCheck::Pending
    } else if lower.contains("already verified") {
        StatusCheck::AlreadyVerified
    } else {
        StatusCheck::Failed(result.to_string())
    }
}

enum Submission {
    Queued(String),
    AlreadyVerified,
}

/// [`VerificationService`] backed by the Etherscan HTTP API.
pub struct EtherscanVerifier {
    client: Client,
    api_url: String,
    api_key: Secret,
    chain_id: u64,
    source: SourceBundle,
    backoff: Backoff,
    max_status_checks: u32,
}

impl EtherscanVerifier {
    pub fn new(
        config: &EtherscanConfig,
        api_key: Secret,
        chain_id: u64,
        source: SourceBundle,
    ) -> Result<Self, VerificationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            chain_id,
            source,
            backoff: Backoff::new(config.status_poll_base_ms, config.status_poll_max_ms),
            max_status_checks: config.max_status_checks,
        })
    }

    /// Whether the explorer already has source for `address`.
    pub async fn is_verified(&self, address: Address) -> Result<bool, VerificationError> {
        let address = address.to_string();
        let body = self
            .get(&[
                ("module", "contract"),
                ("action", "getsourcecode"),
                ("address", address.as_str()),
            ])
            .await?;

        if !body.is_ok() {
            return Err(VerificationError::Rejected(body.detail()));
        }

        let source = body.result[0]["SourceCode"]
            .as_str()
            .ok_or_else(|| VerificationError::Malformed("getsourcecode result has no SourceCode".into()))?;
        Ok(!source.is_empty())
    }

    async fn submit(&self, request: &VerificationRequest) -> Result<Submission, VerificationError> {
        let chain_id = self.chain_id.to_string();
        let form = [
            ("apikey", self.api_key.expose().to_string()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", self.source.standard_json.clone()),
            ("codeformat", "solidity-standard-json-input".to_string()),
            ("contractname", self.source.contract_name.clone()),
            ("compilerversion", self.source.compiler_version.clone()),
            // Etherscan's spelling
            ("constructorArguements", hex::encode(&request.constructor_args)),
        ];

        let body: EtherscanResponse = self
            .client
            .post(&self.api_url)
            .query(&[("chainid", chain_id.as_str())])
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let detail = body.detail();
        if body.is_ok() {
            return Ok(Submission::Queued(detail));
        }
        if detail.to_ascii_lowercase().contains("already verified") {
            return Ok(Submission::AlreadyVerified);
        }
        Err(VerificationError::Rejected(detail))
    }

    async fn check_status(&self, guid: &str) -> Result<StatusCheck, VerificationError> {
        let body = self
            .get(&[
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .await?;
        Ok(classify_status(&body.detail()))
    }

    async fn await_status(&self, guid: &str) -> Result<VerificationOutcome, VerificationError> {
        for attempt in 1..=self.max_status_checks {
            sleep(self.backoff.delay(attempt)).await;

            match self.check_status(guid).await? {
                StatusCheck::Pending => {
                    tracing::debug!(guid, attempt, "Verification pending");
                }
                StatusCheck::Verified => return Ok(VerificationOutcome::Verified),
                StatusCheck::AlreadyVerified => return Ok(VerificationOutcome::AlreadyVerified),
                StatusCheck::Failed(message) => return Err(VerificationError::Failed(message)),
            }
        }

        Err(VerificationError::StatusTimeout {
            guid: guid.to_string(),
            attempts: self.max_status_checks,
        })
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<EtherscanResponse, VerificationError> {
        let chain_id = self.chain_id.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("chainid", chain_id.as_str()), ("apikey", self.api_key.expose())])
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl VerificationService for EtherscanVerifier {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerificationError> {
        if self.is_verified(request.address).await? {
            tracing::info!(address = %request.address, "Contract source already verified");
            return Ok(VerificationOutcome::AlreadyVerified);
        }

        let guid = match self.submit(request).await? {
            Submission::Queued(guid) => guid,
            Submission::AlreadyVerified => return Ok(VerificationOutcome::AlreadyVerified),
        };
        tracing::info!(
            address = %request.address,
            contract = %self.source.contract_name,
            guid = %guid,
            "Verification submitted"
        );

        self.await_status(&guid).await
    }
}

impl std::fmt::Debug for EtherscanVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtherscanVerifier")
            .field("api_url", &self.api_url)
            .field("chain_id", &self.chain_id)
            .field("contract", &self.source.contract_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status("Pass - Verified"), StatusCheck::Verified);
        assert_eq!(classify_status("Pending in queue"), StatusCheck::Pending);
        assert_eq!(classify_status("Already Verified"), StatusCheck::AlreadyVerified);
        assert_eq!(
            classify_status("Fail - Unable to verify"),
            StatusCheck::Failed("Fail - Unable to verify".to_string())
        );
    }

    #[test]
    fn test_response_detail() {
        let body: EtherscanResponse =
            serde_json::from_str(r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#).unwrap();
        assert!(!body.is_ok());
        assert_eq!(body.detail(), "Invalid API Key");

        let body: EtherscanResponse =
            serde_json::from_str(r#"{"status":"0","message":"No data found","result":[]}"#).unwrap();
        assert_eq!(body.detail(), "No data found");
    }

    #[test]
    fn test_source_bundle() {
        let artifact: ContractArtifact = serde_json::from_value(serde_json::json!({
            "contractName": "ProofPayNetwork",
            "sourceName": "contracts/ProofPayNetwork.sol",
            "bytecode": "0x60806040"
        }))
        .unwrap();
        let build_info = BuildInfo {
            solc_long_version: "0.8.19+commit.7dd6d404".to_string(),
            input: serde_json::json!({ "language": "Solidity" }),
        };

        let bundle = SourceBundle::from_build(&artifact, &build_info).unwrap();
        assert_eq!(bundle.contract_name, "contracts/ProofPayNetwork.sol:ProofPayNetwork");
        assert_eq!(bundle.compiler_version, "v0.8.19+commit.7dd6d404");
        assert_eq!(bundle.standard_json, r#"{"language":"Solidity"}"#);
    }
}
