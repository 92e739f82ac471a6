//! Compiled contract artifacts.
//!
//! Reads the Hardhat artifact layout:
//! `artifacts/contracts/<Source>.sol/<Name>.json` holds the ABI and creation
//! bytecode, the sibling `<Name>.dbg.json` points at the build-info file that
//! carries the solc standard JSON input used for verification.

use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::CompilerConfig;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Interfaces and abstract contracts compile to empty bytecode.
    #[error("artifact for {0} has no creation bytecode")]
    EmptyBytecode(String),
}

/// Contract artifact as written by the compiler toolchain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Load an artifact and reject empty bytecode.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: Self = read_json(path)?;
        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(artifact.contract_name));
        }
        tracing::debug!(
            contract = %artifact.contract_name,
            source = %artifact.source_name,
            bytecode_len = artifact.bytecode.len(),
            "Loaded contract artifact"
        );
        Ok(artifact)
    }

    /// `<sourceName>:<contractName>`, the form Etherscan expects.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

#[derive(Debug, Deserialize)]
struct DebugFile {
    #[serde(rename = "buildInfo")]
    build_info: PathBuf,
}

/// Compiler input and version for one compilation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// e.g. `0.8.19+commit.7dd6d404`
    pub solc_long_version: String,
    /// solc standard JSON input.
    pub input: serde_json::Value,
}

impl BuildInfo {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        read_json(path)
    }

    /// Resolve the build-info path from the artifact's `.dbg.json` sibling.
    pub fn locate(artifact_path: &Path) -> Result<PathBuf, ArtifactError> {
        let dbg_path = artifact_path.with_extension("dbg.json");
        let dbg: DebugFile = read_json(&dbg_path)?;
        let base = dbg_path.parent().unwrap_or_else(|| Path::new("."));
        Ok(base.join(dbg.build_info))
    }

    /// Compiler version in Etherscan's `v<long version>` form.
    pub fn etherscan_compiler_version(&self) -> String {
        format!("v{}", self.solc_long_version)
    }

    /// Differences between this build and the configured compiler settings.
    pub fn compiler_mismatches(&self, expected: &CompilerConfig) -> Vec<String> {
        let mut mismatches = Vec::new();

        let version = self
            .solc_long_version
            .split('+')
            .next()
            .unwrap_or_default();
        if version != expected.version {
            mismatches.push(format!(
                "compiler version {} (configured {})",
                version, expected.version
            ));
        }

        let optimizer = &self.input["settings"]["optimizer"];
        if let Some(enabled) = optimizer["enabled"].as_bool() {
            if enabled != expected.optimizer_enabled {
                mismatches.push(format!(
                    "optimizer enabled={} (configured {})",
                    enabled, expected.optimizer_enabled
                ));
            }
        }
        if let Some(runs) = optimizer["runs"].as_u64() {
            if runs != u64::from(expected.optimizer_runs) {
                mismatches.push(format!(
                    "optimizer runs={} (configured {})",
                    runs, expected.optimizer_runs
                ));
            }
        }

        mismatches
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
