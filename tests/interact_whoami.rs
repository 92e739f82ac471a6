//! Interaction and balance lookup against a scripted chain.

use std::sync::Arc;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use alloy::sol_types::SolValue;

use proofpay_deployer::blockchain::ChainError;
use proofpay_deployer::contract::proofpay::user_proofs_calldata;
use proofpay_deployer::contract::ProofSubmission;
use proofpay_deployer::workflow::{whoami, Interaction};
use proofpay_deployer::WorkflowError;

mod common;
use common::{ChainCall, StubChain, CALL_TX, SIGNER};

const CONTRACT: Address = Address::repeat_byte(0xc0);

#[tokio::test]
async fn test_submit_then_read_proofs() {
    let stored = vec![U256::from(7u64), U256::from(12345u64)];
    let chain = Arc::new(StubChain::confirming_up_to(1).with_call_result(stored.abi_encode()));
    let proof = ProofSubmission::sample();

    let report = Interaction::new(chain.clone(), CONTRACT, common::fast_options(1))
        .run(&proof)
        .await
        .unwrap();

    assert_eq!(report.tx_hash, CALL_TX);
    assert_eq!(report.user, SIGNER);
    assert_eq!(report.proofs, stored);

    // One write, then one read, with the wait in between
    assert_eq!(
        chain.actions(),
        vec![
            ChainCall::SendTransaction {
                to: CONTRACT,
                input: proof.calldata(),
            },
            ChainCall::Call {
                to: CONTRACT,
                input: user_proofs_calldata(SIGNER),
            },
        ]
    );
    let calls = chain.calls();
    let first_poll = calls.iter().position(ChainCall::is_status_poll).unwrap();
    let read = calls
        .iter()
        .position(|c| matches!(c, ChainCall::Call { .. }))
        .unwrap();
    assert!(first_poll < read);
    assert_eq!(calls[first_poll], ChainCall::ConfirmationStatus(CALL_TX));
}

#[tokio::test]
async fn test_rejected_proof_is_not_followed_by_read() {
    let chain = Arc::new(StubChain::rejecting("execution reverted: Invalid proof"));

    let err = Interaction::new(chain.clone(), CONTRACT, common::fast_options(1))
        .run(&ProofSubmission::sample())
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Submission(ChainError::Rejected(_))));
    assert!(!chain
        .calls()
        .iter()
        .any(|c| matches!(c, ChainCall::Call { .. })));
}

#[tokio::test]
async fn test_undecodable_proofs_are_a_query_error() {
    let chain = Arc::new(StubChain::confirming_up_to(1).with_call_result(vec![0xde, 0xad]));

    let err = Interaction::new(chain, CONTRACT, common::fast_options(1))
        .run(&ProofSubmission::sample())
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Query(ChainError::Decode(_))));
}

#[tokio::test]
async fn test_whoami_reads_balance_only() {
    let balance = parse_ether("0.25").unwrap();
    let chain = StubChain::confirming_up_to(1).with_balance(balance);

    let summary = whoami(&chain).await.unwrap();

    assert_eq!(summary.address, SIGNER);
    assert_eq!(summary.balance, balance);
    assert_eq!(summary.balance_ether(), "0.250000000000000000");
    assert_eq!(chain.calls(), vec![ChainCall::Balance(SIGNER)]);
}

#[tokio::test]
async fn test_whoami_zero_balance() {
    let chain = StubChain::confirming_up_to(1);

    let summary = whoami(&chain).await.unwrap();
    assert_eq!(summary.balance, U256::ZERO);
    assert_eq!(summary.balance_ether(), "0.000000000000000000");
}

#[tokio::test]
async fn test_whoami_rpc_failure() {
    let chain = StubChain::confirming_up_to(1).failing_queries();

    let err = whoami(&chain).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Query(ChainError::Rpc(_))));
    assert!(!chain
        .calls()
        .iter()
        .any(|c| matches!(c, ChainCall::Deploy { .. } | ChainCall::SendTransaction { .. })));
}
