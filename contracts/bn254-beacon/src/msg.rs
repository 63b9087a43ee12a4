use cosmwasm_schema::cw_serde;
use cosmwasm_std::HexBinary;

pub use drandcast_common::beacon::BeaconQueryMsg as QueryMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// G2 public key: x_im || x_re || y_im || y_re, 32 bytes each
    pub public_key: HexBinary,
    /// Unix seconds of round 0
    pub genesis_timestamp: u64,
    pub period: u64,
}
