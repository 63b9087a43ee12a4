use cosmwasm_schema::cw_serde;
use cosmwasm_std::Int128;

/// Query message for an external price feed contract.
#[cw_serde]
pub enum PriceFeedQueryMsg {
    LatestRoundData {},
}

/// Latest answer of a price feed. `answer` is scaled by `10^decimals`.
#[cw_serde]
pub struct PriceDataResponse {
    pub round_id: u64,
    pub answer: Int128,
    pub decimals: u8,
    /// Unix seconds of the last update.
    pub updated_at: u64,
}
