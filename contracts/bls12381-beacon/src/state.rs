use cosmwasm_schema::cw_serde;
use cosmwasm_std::{HexBinary, Timestamp};
use cw_storage_plus::Item;

pub const CONFIG: Item<BeaconConfig> = Item::new("config");

/// Fixed at instantiation; the beacon has no execute surface.
#[cw_serde]
pub struct BeaconConfig {
    /// G2 public key, 256 bytes in EIP-2537 layout
    pub public_key: HexBinary,
    pub genesis_timestamp: Timestamp,
    /// Seconds between rounds
    pub period: u64,
}
