//! Request commitments and randomness derivation.
//!
//! Variable-length fields are length-prefixed with a big-endian `u32`;
//! integers are fixed-width big-endian (`u64`, `u128` for the gas price).

use cosmwasm_std::{Addr, Uint128};
use drandcast_common::keccak256;
use sha3::{Digest, Keccak256};

/// Every parameter a request is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCommitment<'a> {
    pub chain_id: &'a str,
    pub contract: &'a Addr,
    pub request_id: u64,
    pub requester: &'a Addr,
    pub max_allowed_gas_price: Uint128,
    pub callback_gas: u64,
    pub round: u64,
    pub beacon: &'a Addr,
    pub fee_rule: &'a Addr,
}

impl RequestCommitment<'_> {
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        update_prefixed(&mut hasher, self.chain_id.as_bytes());
        update_prefixed(&mut hasher, self.contract.as_bytes());
        hasher.update(self.request_id.to_be_bytes());
        update_prefixed(&mut hasher, self.requester.as_bytes());
        hasher.update(self.max_allowed_gas_price.u128().to_be_bytes());
        hasher.update(self.callback_gas.to_be_bytes());
        hasher.update(self.round.to_be_bytes());
        update_prefixed(&mut hasher, self.beacon.as_bytes());
        update_prefixed(&mut hasher, self.fee_rule.as_bytes());
        hasher.finalize().into()
    }
}

/// Binds a verified beacon signature to one request:
/// `keccak256(keccak256(sig) || chain_id || contract || request_id || requester)`.
pub fn derive_randomness(
    signature: &[u8],
    chain_id: &str,
    contract: &Addr,
    request_id: u64,
    requester: &Addr,
) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(keccak256(signature));
    update_prefixed(&mut hasher, chain_id.as_bytes());
    update_prefixed(&mut hasher, contract.as_bytes());
    hasher.update(request_id.to_be_bytes());
    update_prefixed(&mut hasher, requester.as_bytes());
    hasher.finalize().into()
}

fn update_prefixed(hasher: &mut Keccak256, bytes: &[u8]) {
    // addresses and chain ids are far below 4 GiB
    hasher.update((bytes.len() as u32).to_be_bytes());
    hasher.update(bytes);
}
