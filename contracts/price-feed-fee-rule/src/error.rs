use cosmwasm_std::{ConversionOverflowError, Int128, OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("fee overflow: {0}")]
    Overflow(#[from] OverflowError),

    #[error("fee overflow: {0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("unauthorized: only the owner can {action}")]
    Unauthorized { action: String },

    #[error("price feed answer must be positive, got {answer}")]
    InvalidPrice { answer: Int128 },

    #[error("price feed is stale: updated at {updated_at}, max age {max_price_age}s, now {now}")]
    StalePrice {
        updated_at: u64,
        max_price_age: u64,
        now: u64,
    },
}
