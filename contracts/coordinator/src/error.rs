use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: String },

    #[error("callback gas {callback_gas} exceeds maximum {max_callback_gas}")]
    CallbackGasTooHigh {
        callback_gas: u64,
        max_callback_gas: u64,
    },

    #[error("deadline {deadline} is before beacon genesis {genesis}")]
    DeadlineBeforeGenesis { deadline: u64, genesis: u64 },

    #[error("deadline {deadline} is before the earliest allowed {earliest}")]
    DeadlineTooSoon { deadline: u64, earliest: u64 },

    #[error("deadline {deadline} is after the latest allowed {latest}")]
    DeadlineTooFar { deadline: u64, latest: u64 },

    #[error("request {request_id} expired at {expired_at}")]
    RequestExpired { request_id: u64, expired_at: u64 },

    #[error("gas price {gas_price} exceeds the request's maximum {max_allowed_gas_price}")]
    GasPriceTooHigh {
        gas_price: Uint128,
        max_allowed_gas_price: Uint128,
    },

    #[error("request {request_id}: parameters do not match the stored commitment")]
    RequestHashMismatch { request_id: u64 },

    #[error("beacon verification failed for request {request_id} round {round}: {reason}")]
    BeaconVerificationFailed {
        request_id: u64,
        round: u64,
        reason: String,
    },

    #[error("token allowance {available} is below the required fee {required}")]
    InsufficientAllowance { required: Uint128, available: Uint128 },

    #[error("token balance {available} is below the required fee {required}")]
    InsufficientBalance { required: Uint128, available: Uint128 },

    #[error("request {request_id} is {state}, expected pending")]
    RequestNotPending { request_id: u64, state: String },

    #[error("a fulfilment is already in flight")]
    Reentrancy,

    #[error("unexpected reply id {id}")]
    UnexpectedReply { id: u64 },
}
