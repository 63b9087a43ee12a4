use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{HexBinary, Uint128};

use crate::state::{ConsumerConfig, ReceivedRandomness};

#[cw_serde]
pub struct InstantiateMsg {
    pub coordinator: String,
    pub token: String,
    #[serde(default)]
    pub always_revert: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Owner only. Raises the coordinator's token allowance by
    /// `fee_allowance` first when given.
    RequestRandomness {
        deadline: u64,
        max_allowed_gas_price: Uint128,
        callback_gas: u64,
        fee_allowance: Option<Uint128>,
    },
    /// Coordinator callback.
    ReceiveRandomness {
        request_id: u64,
        randomness: HexBinary,
    },
    /// Owner only.
    SetAlwaysRevert { always_revert: bool },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConsumerConfig)]
    Config {},

    #[returns(Option<HexBinary>)]
    Randomness { request_id: u64 },

    #[returns(Option<ReceivedRandomness>)]
    LatestRandomness {},
}

/// Message sent to the coordinator to open a request.
#[cw_serde]
pub enum CoordinatorExecuteMsg {
    CreateRequest {
        deadline: u64,
        max_allowed_gas_price: Uint128,
        callback_gas: u64,
    },
}
