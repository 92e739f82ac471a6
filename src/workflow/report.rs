//! Sinks for workflow events.

use std::sync::Mutex;

use crate::config::NetworkConfig;
use crate::workflow::types::WorkflowEvent;

/// Receives workflow events as they happen.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &WorkflowEvent);
}

/// Prints deployment progress to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    network: NetworkConfig,
}

impl ConsoleReporter {
    pub fn new(network: &NetworkConfig) -> Self {
        Self {
            network: network.clone(),
        }
    }

    fn render(&self, event: &WorkflowEvent) -> Vec<String> {
        match event {
            WorkflowEvent::Submitted {
                tx_hash,
                contract_address,
            } => vec![
                format!("Deployment transaction sent: {}", tx_hash),
                format!("Contract address: {}", contract_address),
                format!("View on explorer: {}", self.network.explorer_address_url(contract_address)),
            ],
            WorkflowEvent::Confirmation { current, required } => {
                vec![format!("Confirmations: {}/{}", current.min(required), required)]
            }
            WorkflowEvent::Confirmed {
                block_number,
                confirmations,
            } => vec![format!(
                "Confirmed in block {} ({} confirmations)",
                block_number, confirmations
            )],
            WorkflowEvent::VerificationStarted { .. } => {
                vec!["Verifying contract source on Etherscan...".to_string()]
            }
            WorkflowEvent::VerificationFinished(outcome) => {
                vec![format!("Verification {}", outcome)]
            }
            WorkflowEvent::Completed(result) => vec![
                String::new(),
                "Contract details:".to_string(),
                format!("  Address:  {}", result.contract_address),
                format!("  Tx hash:  {}", result.tx_hash),
                format!("  Network:  {}", self.network.name),
                format!(
                    "  Explorer: {}",
                    self.network.explorer_address_url(&result.contract_address)
                ),
                format!("  Source:   {}", result.verification),
                String::new(),
                "Deployment complete".to_string(),
            ],
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &WorkflowEvent) {
        for line in self.render(event) {
            println!("{}", line);
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &WorkflowEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
