pub mod contract;
pub mod error;
pub mod fee;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
