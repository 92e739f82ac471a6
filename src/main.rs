//! ProofPayNetwork deployment CLI.
//!
//! ```text
//!   .env / PROOFPAY_CONFIG / --config
//!        │
//!        ▼
//!   DeployerConfig ──▶ deploy   : submit ─▶ confirm (N) ─▶ verify (best-effort) ─▶ report
//!                  ──▶ interact : submitProof ─▶ confirm (1) ─▶ getUserProofs
//!                  ──▶ whoami   : balance of the signer
//! ```
//!
//! The `deploy`, `interact` and `whoami` binaries run the same commands
//! without arguments.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use proofpay_deployer::commands;
use proofpay_deployer::lifecycle::startup;

#[derive(Parser)]
#[command(name = "proofpay")]
#[command(about = "Deploy and exercise the ProofPayNetwork contract", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to $PROOFPAY_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the contract, wait for confirmations and verify the source
    Deploy {
        /// Confirmations to wait for before verifying
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        confirmations: Option<u64>,

        /// Upper bound on the confirmation wait in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Skip Etherscan verification
        #[arg(long)]
        no_verify: bool,
    },
    /// Submit the sample proof and list the signer's proofs
    Interact {
        /// Deployed contract (overrides CONTRACT_ADDRESS)
        #[arg(long)]
        contract: Option<String>,
    },
    /// Show the signer address and balance
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match startup::bootstrap(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return startup::fail(&e),
    };

    match cli.command {
        Commands::Deploy {
            confirmations,
            timeout,
            no_verify,
        } => {
            if let Some(confirmations) = confirmations {
                config.deployment.confirmations = confirmations;
            }
            if let Some(timeout) = timeout {
                config.deployment.confirmation_timeout_secs = timeout;
            }
            if no_verify {
                config.deployment.verify = false;
            }
            startup::finish(commands::deploy::run(&config).await)
        }
        Commands::Interact { contract } => {
            if let Some(contract) = contract {
                config.contract.address = Some(contract);
            }
            startup::finish(commands::interact::run(&config).await)
        }
        Commands::Whoami => startup::finish(commands::whoami::run(&config).await),
    }
}
