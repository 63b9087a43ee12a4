use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use drandcast_common::fee_rule::FeeResponse;

use crate::state::FeeConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub fixed_fee: Uint128,
    pub gas_price: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Owner only. Unset fields are left unchanged.
    UpdateConfig {
        fixed_fee: Option<Uint128>,
        gas_price: Option<Uint128>,
    },
    TransferOwnership { new_owner: String },
}

#[cw_serde]
pub struct MigrateMsg {}

/// Superset of `drandcast_common::fee_rule::FeeRuleQueryMsg`.
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

    #[returns(FeeConfig)]
    Config {},
}
