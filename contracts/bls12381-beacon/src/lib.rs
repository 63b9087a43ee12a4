//! Verifier for drand's unchained BLS12-381 beacons (signatures on G1,
//! public key on G2).
//!
//! Experimental: the pairing sequence is pinned only by the quicknet
//! known-answer vector in the tests.

pub mod contract;
pub mod error;
pub mod field;
pub mod hash_to_curve;
pub mod msg;
pub mod precompiles;
pub mod query;
pub mod state;
pub mod verify;

pub use crate::error::ContractError;
