//! ProofPayNetwork contract bindings and the sample submission.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::ChainError;

sol! {
    /// Calls used by the interaction flow.
    #[derive(Debug)]
    interface IProofPayNetwork {
        function submitProof(
            uint256[2] a,
            uint256[2][2] b,
            uint256[2] c,
            uint256 requiredAmount,
            uint256 publicHash
        ) external;

        function getUserProofs(address user) external view returns (uint256[] memory);
    }
}

/// Groth16-shaped proof arguments for `submitProof`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofSubmission {
    pub a: [U256; 2],
    pub b: [[U256; 2]; 2],
    pub c: [U256; 2],
    /// Amount in wei the proof attests to.
    pub required_amount: U256,
    pub public_hash: U256,
}

impl ProofSubmission {
    /// Fixed placeholder proof used to smoke-test a deployment.
    pub fn sample() -> Self {
        let n = |v: u64| U256::from(v);
        Self {
            a: [n(1), n(2)],
            b: [[n(3), n(4)], [n(5), n(6)]],
            c: [n(7), n(8)],
            // "1000" always parses
            required_amount: parse_ether("1000").unwrap_or_default(),
            public_hash: n(12345),
        }
    }

    /// ABI-encoded `submitProof` calldata.
    pub fn calldata(&self) -> Bytes {
        IProofPayNetwork::submitProofCall {
            a: self.a,
            b: self.b,
            c: self.c,
            requiredAmount: self.required_amount,
            publicHash: self.public_hash,
        }
        .abi_encode()
        .into()
    }
}

/// ABI-encoded `getUserProofs(user)` calldata.
pub fn user_proofs_calldata(user: Address) -> Bytes {
    IProofPayNetwork::getUserProofsCall { user }.abi_encode().into()
}

/// Decode the return data of `getUserProofs`.
pub fn decode_user_proofs(data: &[u8]) -> Result<Vec<U256>, ChainError> {
    IProofPayNetwork::getUserProofsCall::abi_decode_returns(data)
        .map_err(|e| ChainError::Decode(e.to_string()))
}
