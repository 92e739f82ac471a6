//! Deployment and interaction workflows.
//!
//! # Data Flow
//! ```text
//! deploy:   DeploymentRequest → ChainClient::deploy → ConfirmationWaiter (depth N)
//!               → VerificationService (best-effort) → Reporter
//! interact: submitProof (write) → wait 1 → getUserProofs (read)
//! whoami:   ChainClient::balance (read)
//! ```
//!
//! Workflows depend only on the [`ChainClient`](crate::blockchain::ChainClient)
//! and [`VerificationService`](crate::verify::VerificationService) traits.

pub mod deploy;
pub mod interact;
pub mod report;
pub mod types;
pub mod whoami;

pub use deploy::{DeploymentWorkflow, VerificationStage};
pub use interact::{Interaction, InteractionReport};
pub use report::{ConsoleReporter, RecordingReporter, Reporter};
pub use types::{DeploymentRequest, DeploymentResult, WorkflowEvent, WorkflowOptions};
pub use whoami::{whoami, AccountSummary};
