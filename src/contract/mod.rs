//! Contract artifacts and ABI bindings.

pub mod artifact;
pub mod proofpay;

pub use artifact::{ArtifactError, BuildInfo, ContractArtifact};
pub use proofpay::{ProofSubmission, IProofPayNetwork};
