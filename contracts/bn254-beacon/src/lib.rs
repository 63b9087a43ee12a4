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
