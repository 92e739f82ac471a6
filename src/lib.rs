//! Deployment and interaction tooling for the ProofPayNetwork contract.

pub mod blockchain;
pub mod commands;
pub mod config;
pub mod contract;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod verify;
pub mod workflow;

pub use config::DeployerConfig;
pub use error::WorkflowError;
pub use workflow::{DeploymentRequest, DeploymentResult, DeploymentWorkflow};
