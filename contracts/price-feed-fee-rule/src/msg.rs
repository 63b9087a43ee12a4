use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use drandcast_common::fee_rule::FeeResponse;

use crate::state::PriceFeedFeeConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub base_fee: Uint128,
    pub gas_price: Uint128,
    pub price_feed: String,
    pub max_price_age: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Owner only. Unset fields are left unchanged.
    UpdateConfig {
        base_fee: Option<Uint128>,
        gas_price: Option<Uint128>,
        price_feed: Option<String>,
        max_price_age: Option<u64>,
    },
    TransferOwnership { new_owner: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeeResponse)]
    CalculateFee { requester: String, gas_used: u64 },

    #[returns(FeeResponse)]
    CalculateFeeWithGasPrice {
        requester: String,
        gas_used: u64,
        gas_price: Uint128,
    },

    #[returns(PriceFeedFeeConfig)]
    Config {},
}
