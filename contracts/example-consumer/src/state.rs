use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<ConsumerConfig> = Item::new("config");
pub const RANDOMNESS: Map<u64, HexBinary> = Map::new("randomness");
pub const LATEST: Item<ReceivedRandomness> = Item::new("latest");

#[cw_serde]
pub struct ConsumerConfig {
    pub owner: Addr,
    pub coordinator: Addr,
    /// Token the coordinator charges fees in
    pub token: Addr,
    /// Fail every callback, for exercising the coordinator's failure path
    pub always_revert: bool,
}

#[cw_serde]
pub struct ReceivedRandomness {
    pub request_id: u64,
    pub randomness: HexBinary,
}
