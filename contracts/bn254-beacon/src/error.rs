use cosmwasm_std::StdError;
use drandcast_common::XmdError;
use thiserror::Error;

use crate::precompiles::PrecompileError;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("invalid public key length: expected {expected} bytes, got {got}")]
    InvalidPublicKeyLength { expected: usize, got: usize },

    #[error("invalid public key: {reason}")]
    InvalidPublicKey { reason: String },

    #[error("invalid signature length: expected {expected} bytes, got {got}")]
    InvalidSignatureLength { expected: usize, got: usize },

    #[error("signature for round {round} is not a valid G1 point")]
    InvalidSignaturePoint { round: u64 },

    #[error("signature invalid for round {round}")]
    SignatureInvalid { round: u64 },

    #[error("period must be greater than zero")]
    InvalidPeriod,

    #[error("value {value} is not a field element")]
    InvalidFieldElement { value: String },

    #[error("no curve point found for field element {value}")]
    MapToPointFailed { value: String },

    #[error("precompile call failed: {0}")]
    Computation(#[from] PrecompileError),

    #[error("{0}")]
    Xmd(#[from] XmdError),
}
