//! Deploy ProofPayNetwork, wait for 6 confirmations and verify it on Etherscan.

use std::process::ExitCode;

use proofpay_deployer::commands;
use proofpay_deployer::lifecycle::startup;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match startup::bootstrap(None) {
        Ok(config) => config,
        Err(e) => return startup::fail(&e),
    };
    startup::finish(commands::deploy::run(&config).await)
}
