pub mod beacon;
pub mod consumer;
pub mod fee_rule;
pub mod price_feed;
pub mod token;
pub mod types;
pub mod xmd;

pub use types::RequestState;
pub use xmd::{expand_message_xmd, keccak256, XmdError};
