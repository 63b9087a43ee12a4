use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use drandcast_common::RequestState;

pub const CONFIG: Item<Config> = Item::new("config");
pub const NEXT_REQUEST_ID: Item<u64> = Item::new("next_request_id");
pub const REQUESTS: Map<u64, Request> = Map::new("requests");
/// (requester, request id) index for per-consumer listing.
pub const REQUESTS_BY_REQUESTER: Map<(&Addr, u64), ()> = Map::new("requests_by_requester");
/// Present only between a fulfilment and the reply to its callback.
pub const IN_FLIGHT: Item<InFlightFulfillment> = Item::new("in_flight");

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Beacon verifier new requests are pinned to
    pub beacon: Addr,
    /// Fee rule new requests are pinned to
    pub fee_rule: Addr,
    pub fee_recipient: Addr,
    /// The only address allowed to fulfil requests
    pub relayer: Addr,
    /// cw20 token fees are charged in
    pub token: Addr,
    /// Gas added to the callback's usage when charging
    pub overhead_gas: u64,
    pub max_callback_gas: u64,
    /// Seconds after the deadline during which a request can still be fulfilled
    pub request_expire_time: u64,
    /// Furthest a deadline may lie in the future, in seconds
    pub max_deadline_delta: u64,
}

#[cw_serde]
pub struct Request {
    pub id: u64,
    pub requester: Addr,
    /// keccak256 commitment over the request parameters
    pub request_hash: HexBinary,
    /// Stored state; never `Expired`, which is derived on read
    pub state: RequestState,
    pub created_at: Timestamp,
    /// Slot time of the target round, `genesis + round * period`
    pub deadline: Timestamp,
}

impl Request {
    pub fn expires_at(&self, request_expire_time: u64) -> u64 {
        self.deadline.seconds().saturating_add(request_expire_time)
    }

    /// `Pending` past its expiry reads as `Expired`.
    pub fn effective_state(&self, now: Timestamp, request_expire_time: u64) -> RequestState {
        if self.state == RequestState::Pending
            && now.seconds() > self.expires_at(request_expire_time)
        {
            RequestState::Expired
        } else {
            self.state.clone()
        }
    }
}

#[cw_serde]
pub struct InFlightFulfillment {
    pub request_id: u64,
    pub requester: Addr,
    pub fee_rule: Addr,
    pub gas_price: Uint128,
}
