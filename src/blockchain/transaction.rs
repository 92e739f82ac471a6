//! Confirmation monitoring.
//!
//! # Responsibilities
//! - Poll a transaction until it reaches a confirmation depth
//! - Report each increase in depth to the caller
//! - Bound the wait with a deadline and report how far it got

use std::time::{Duration, Instant};

use alloy::primitives::TxHash;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::chain::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult, ConfirmationStatus, ConfirmedTransaction};
use crate::observability::metrics;

/// Polls a [`ChainClient`] until a transaction is deep enough.
pub struct ConfirmationWaiter<'a> {
    chain: &'a dyn ChainClient,
    poll_interval: Duration,
    deadline: Duration,
}

impl<'a> ConfirmationWaiter<'a> {
    pub fn new(chain: &'a dyn ChainClient, poll_interval: Duration, deadline: Duration) -> Self {
        Self {
            chain,
            poll_interval,
            deadline,
        }
    }

    /// Wait until `tx_hash` has at least `required` confirmations.
    ///
    /// `on_progress` is called with the new depth every time it increases.
    /// Returns [`ChainError::ConfirmationTimeout`] once the deadline passes and
    /// [`ChainError::Reverted`] if the receipt shows a failed execution.
    pub async fn wait<F>(
        &self,
        tx_hash: TxHash,
        required: u64,
        mut on_progress: F,
    ) -> ChainResult<ConfirmedTransaction>
    where
        F: FnMut(u64),
    {
        let started = Instant::now();
        let mut observed = 0u64;

        let result = timeout(
            self.deadline,
            self.poll_until(tx_hash, required, &mut observed, &mut on_progress),
        )
        .await;

        metrics::record_confirmation_wait(started.elapsed());

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::ConfirmationTimeout {
                required,
                observed,
                waited_secs: self.deadline.as_secs(),
            }),
        }
    }

    async fn poll_until<F>(
        &self,
        tx_hash: TxHash,
        required: u64,
        observed: &mut u64,
        on_progress: &mut F,
    ) -> ChainResult<ConfirmedTransaction>
    where
        F: FnMut(u64),
    {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let (block_number, confirmations) = match self.chain.confirmation_status(tx_hash).await? {
                ConfirmationStatus::Pending => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
                ConfirmationStatus::Included {
                    block_number,
                    confirmations,
                } => (block_number, confirmations),
            };

            if confirmations > *observed {
                *observed = confirmations;
                on_progress(confirmations);
            }

            if confirmations >= required {
                return Ok(ConfirmedTransaction {
                    tx_hash,
                    block_number,
                    confirmations,
                });
            }

            tracing::debug!(
                tx_hash = %tx_hash,
                confirmations,
                required,
                "Waiting for confirmations"
            );
        }
    }
}
