use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

pub const CONFIG: Item<PriceFeedFeeConfig> = Item::new("config");

#[cw_serde]
pub struct PriceFeedFeeConfig {
    pub owner: Addr,
    pub base_fee: Uint128,
    /// Reference gas price used by `CalculateFee`, in native units
    pub gas_price: Uint128,
    /// Feed quoting the fee token per native unit
    pub price_feed: Addr,
    /// Oldest acceptable feed update, in seconds
    pub max_price_age: u64,
}
