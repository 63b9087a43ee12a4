use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

/// Query surface shared by fee rules.
///
/// `gas_used == 0` asks for the base fee alone, without any gas component.
#[cw_serde]
#[derive(QueryResponses)]
pub enum FeeRuleQueryMsg {
    /// Fee at the rule's own reference gas price.
    #[returns(FeeResponse)]
    CalculateFee { requester: String, gas_used: u64 },

    #[returns(FeeResponse)]
    CalculateFeeWithGasPrice {
        requester: String,
        gas_used: u64,
        gas_price: Uint128,
    },
}

#[cw_serde]
pub struct FeeResponse {
    pub fee: Uint128,
}
