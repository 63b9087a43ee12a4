use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("fee overflow: {0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: only the owner can {action}")]
    Unauthorized { action: String },
}
