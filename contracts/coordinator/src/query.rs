use cosmwasm_std::{to_json_binary, Binary, Deps, Env, HexBinary, Order, StdResult, Uint128};
use cw_storage_plus::Bound;
use drandcast_common::RequestState;

use crate::commitment::RequestCommitment;
use crate::msg::{RequestDetailsResponse, RequestStateResponse, RequestTimestampResponse};
use crate::state::{CONFIG, NEXT_REQUEST_ID, REQUESTS, REQUESTS_BY_REQUESTER};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_request_state(deps: Deps, env: Env, request_id: u64) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let state = match REQUESTS.may_load(deps.storage, request_id)? {
        Some(request) => request.effective_state(env.block.time, config.request_expire_time),
        None => RequestState::None,
    };
    to_json_binary(&RequestStateResponse { request_id, state })
}

pub fn query_request_details(deps: Deps, env: Env, request_id: u64) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let details = REQUESTS
        .may_load(deps.storage, request_id)?
        .map(|request| RequestDetailsResponse {
            effective_state: request.effective_state(env.block.time, config.request_expire_time),
            request,
        });
    to_json_binary(&details)
}

pub fn query_request_timestamp(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let timestamps = REQUESTS
        .may_load(deps.storage, request_id)?
        .map(|request| RequestTimestampResponse {
            created_at: request.created_at,
            deadline: request.deadline,
        });
    to_json_binary(&timestamps)
}

pub fn query_next_request_id(deps: Deps) -> StdResult<Binary> {
    let next = NEXT_REQUEST_ID.load(deps.storage)?;
    to_json_binary(&next)
}

pub fn query_requests_by_requester(
    deps: Deps,
    env: Env,
    requester: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let requester = deps.api.addr_validate(&requester)?;
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let ids: Vec<u64> = REQUESTS_BY_REQUESTER
        .prefix(&requester)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<_>>()?;

    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        let request = REQUESTS.load(deps.storage, id)?;
        entries.push(RequestDetailsResponse {
            effective_state: request.effective_state(env.block.time, config.request_expire_time),
            request,
        });
    }
    to_json_binary(&entries)
}

#[allow(clippy::too_many_arguments)]
pub fn query_compute_request_hash(
    deps: Deps,
    env: Env,
    request_id: u64,
    requester: String,
    max_allowed_gas_price: Uint128,
    callback_gas: u64,
    round: u64,
    beacon: String,
    fee_rule: String,
) -> StdResult<Binary> {
    let requester = deps.api.addr_validate(&requester)?;
    let beacon = deps.api.addr_validate(&beacon)?;
    let fee_rule = deps.api.addr_validate(&fee_rule)?;
    let hash = RequestCommitment {
        chain_id: &env.block.chain_id,
        contract: &env.contract.address,
        request_id,
        requester: &requester,
        max_allowed_gas_price,
        callback_gas,
        round,
        beacon: &beacon,
        fee_rule: &fee_rule,
    }
    .hash();
    to_json_binary(&HexBinary::from(hash.to_vec()))
}
