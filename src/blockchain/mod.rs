//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! DeployerConfig (private key, RPC URL, chain id, gas price)
//!     → wallet.rs (key parsing, signer)
//!     → client.rs (RPC connection with timeouts, implements chain.rs)
//!     → transaction.rs (confirmation depth polling with a deadline)
//! ```
//!
//! # Security Constraints
//! - Private keys are never logged
//! - All RPC calls have configurable timeouts
//! - Connecting to a node on the wrong chain is an error

pub mod chain;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use chain::ChainClient;
pub use client::RpcChainClient;
pub use transaction::ConfirmationWaiter;
pub use types::{
    ChainError, ChainId, ChainResult, ConfirmationStatus, ConfirmedTransaction, PendingDeployment,
};
pub use wallet::Wallet;
