use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{HexBinary, Timestamp, Uint128};
use drandcast_common::RequestState;

use crate::state::{Config, Request};

#[cw_serde]
pub struct InstantiateMsg {
    pub beacon: String,
    pub fee_rule: String,
    pub fee_recipient: String,
    pub relayer: String,
    pub token: String,
    pub overhead_gas: u64,
    pub max_callback_gas: u64,
    pub request_expire_time: u64,
    pub max_deadline_delta: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Request randomness for round `ceil((deadline - genesis) / period)`,
    /// `deadline` in unix seconds. The sender receives the callback and pays
    /// the fee. Responds with `CreateRequestResponse` as data.
    CreateRequest {
        deadline: u64,
        max_allowed_gas_price: Uint128,
        callback_gas: u64,
    },
    /// Deliver the beacon signature for a pending request (relayer only).
    /// Every request parameter is re-supplied and checked against the
    /// stored commitment.
    FulfillRequest {
        request_id: u64,
        requester: String,
        max_allowed_gas_price: Uint128,
        callback_gas: u64,
        round: u64,
        beacon: String,
        fee_rule: String,
        /// Price per gas unit the relayer charges, at most `max_allowed_gas_price`
        gas_price: Uint128,
        signature: HexBinary,
    },
    /// Requester only, while pending.
    CancelRequest { request_id: u64 },
    /// Owner only. Unset fields are left unchanged.
    UpdateConfig {
        beacon: Option<String>,
        fee_rule: Option<String>,
        fee_recipient: Option<String>,
        relayer: Option<String>,
        token: Option<String>,
        overhead_gas: Option<u64>,
        max_callback_gas: Option<u64>,
        request_expire_time: Option<u64>,
        max_deadline_delta: Option<u64>,
    },
    TransferOwnership { new_owner: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},

    /// Unknown ids report `None`; pending requests past expiry report `Expired`.
    #[returns(RequestStateResponse)]
    RequestState { request_id: u64 },

    #[returns(Option<RequestDetailsResponse>)]
    RequestDetails { request_id: u64 },

    #[returns(Option<RequestTimestampResponse>)]
    RequestTimestamp { request_id: u64 },

    #[returns(u64)]
    NextRequestId {},

    #[returns(Vec<RequestDetailsResponse>)]
    RequestsByRequester {
        requester: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Commitment for the given parameters under this chain and contract.
    #[returns(HexBinary)]
    ComputeRequestHash {
        request_id: u64,
        requester: String,
        max_allowed_gas_price: Uint128,
        callback_gas: u64,
        round: u64,
        beacon: String,
        fee_rule: String,
    },
}

#[cw_serde]
pub struct CreateRequestResponse {
    pub request_id: u64,
}

#[cw_serde]
pub struct RequestStateResponse {
    pub request_id: u64,
    pub state: RequestState,
}

#[cw_serde]
pub struct RequestDetailsResponse {
    pub request: Request,
    /// State with the expiry overlay applied
    pub effective_state: RequestState,
}

#[cw_serde]
pub struct RequestTimestampResponse {
    pub created_at: Timestamp,
    pub deadline: Timestamp,
}
