//! Minimal randomness consumer: asks the coordinator for randomness and
//! stores whatever it is handed back.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
