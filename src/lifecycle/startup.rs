//! Process startup and exit handling for the binaries.
//!
//! Order: `.env` → configuration → logging → optional metrics exporter.
//! Any error ends the process with exit code 1 and a message on stderr.

use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;

use crate::config::{self, ConfigError, DeployerConfig};
use crate::observability::{logging, metrics};

/// Load `.env`, read configuration and start observability.
pub fn bootstrap(config_path: Option<&Path>) -> Result<DeployerConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env: {}", e);
        }
    }

    let config = config::load_from_process_env(config_path)?;
    logging::init_logging(&config.observability.log_level);

    // Validation guarantees the address parses
    let metrics_addr = config
        .observability
        .metrics_address
        .as_deref()
        .map(str::parse::<SocketAddr>);
    if let Some(Ok(addr)) = metrics_addr {
        metrics::init_metrics(addr);
    }

    tracing::debug!(
        network = %config.network.name,
        chain_id = config.network.chain_id,
        "Configuration loaded"
    );
    Ok(config)
}

/// Map a command result to the process exit code.
pub fn finish<T, E: Error>(result: Result<T, E>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

/// Print the error with its source chain and return exit code 1.
pub fn fail(err: &dyn Error) -> ExitCode {
    for line in error_report(err) {
        eprintln!("{}", line);
    }
    ExitCode::FAILURE
}

/// The error followed by each cause not already spelled out above it.
fn error_report(err: &dyn Error) -> Vec<String> {
    let mut shown = err.to_string();
    let mut lines = vec![format!("Error: {}", shown)];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !shown.contains(&text) {
            lines.push(format!("  caused by: {}", text));
            shown.push_str(&text);
        }
        source = cause.source();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::ChainError;
    use crate::error::WorkflowError;

    #[test]
    fn test_finish_exit_codes() {
        let ok = finish::<(), WorkflowError>(Ok(()));
        assert_eq!(format!("{:?}", ok), format!("{:?}", ExitCode::SUCCESS));

        let failed = finish::<(), _>(Err(WorkflowError::Query(ChainError::Timeout(5))));
        assert_eq!(format!("{:?}", failed), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_error_report_does_not_repeat_causes() {
        let err = WorkflowError::Submission(ChainError::Rejected("nonce too low".into()));
        let lines = error_report(&err);
        assert_eq!(
            lines,
            vec!["Error: submission failed: Transaction rejected: nonce too low".to_string()]
        );
    }

    #[derive(Debug)]
    struct Terse(ChainError);

    impl std::fmt::Display for Terse {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("command failed")
        }
    }

    impl Error for Terse {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_report_keeps_new_causes() {
        let lines = error_report(&Terse(ChainError::Timeout(30)));
        assert_eq!(
            lines,
            vec![
                "Error: command failed".to_string(),
                "  caused by: RPC timeout after 30 seconds".to_string(),
            ]
        );
    }
}
