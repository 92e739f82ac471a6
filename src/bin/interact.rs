//! Submit the sample proof to `CONTRACT_ADDRESS` and print the signer's proofs.

use std::process::ExitCode;

use proofpay_deployer::commands;
use proofpay_deployer::lifecycle::startup;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match startup::bootstrap(None) {
        Ok(config) => config,
        Err(e) => return startup::fail(&e),
    };
    startup::finish(commands::interact::run(&config).await)
}
