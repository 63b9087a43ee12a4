use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{Config, CONFIG, NEXT_REQUEST_ID};

const CONTRACT_NAME: &str = "crates.io:drandcast-coordinator";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: info.sender.clone(),
        beacon: deps.api.addr_validate(&msg.beacon)?,
        fee_rule: deps.api.addr_validate(&msg.fee_rule)?,
        fee_recipient: deps.api.addr_validate(&msg.fee_recipient)?,
        relayer: deps.api.addr_validate(&msg.relayer)?,
        token: deps.api.addr_validate(&msg.token)?,
        overhead_gas: msg.overhead_gas,
        max_callback_gas: msg.max_callback_gas,
        request_expire_time: msg.request_expire_time,
        max_deadline_delta: msg.max_deadline_delta,
    };
    execute::validate_limits(&config)?;

    CONFIG.save(deps.storage, &config)?;
    NEXT_REQUEST_ID.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "coordinator")
        .add_attribute("owner", info.sender.to_string())
        .add_attribute("beacon", config.beacon.to_string())
        .add_attribute("fee_rule", config.fee_rule.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateRequest {
            deadline,
            max_allowed_gas_price,
            callback_gas,
        } => execute::create_request(deps, env, info, deadline, max_allowed_gas_price, callback_gas),
        ExecuteMsg::FulfillRequest {
            request_id,
            requester,
            max_allowed_gas_price,
            callback_gas,
            round,
            beacon,
            fee_rule,
            gas_price,
            signature,
        } => execute::fulfill_request(
            deps,
            env,
            info,
            request_id,
            requester,
            max_allowed_gas_price,
            callback_gas,
            round,
            beacon,
            fee_rule,
            gas_price,
            signature,
        ),
        ExecuteMsg::CancelRequest { request_id } => {
            execute::cancel_request(deps, env, info, request_id)
        }
        ExecuteMsg::UpdateConfig {
            beacon,
            fee_rule,
            fee_recipient,
            relayer,
            token,
            overhead_gas,
            max_callback_gas,
            request_expire_time,
            max_deadline_delta,
        } => execute::update_config(
            deps,
            env,
            info,
            beacon,
            fee_rule,
            fee_recipient,
            relayer,
            token,
            overhead_gas,
            max_callback_gas,
            request_expire_time,
            max_deadline_delta,
        ),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute::transfer_ownership(deps, env, info, new_owner)
        }
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    execute::handle_callback_reply(deps, env, msg)
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::RequestState { request_id } => query::query_request_state(deps, env, request_id),
        QueryMsg::RequestDetails { request_id } => {
            query::query_request_details(deps, env, request_id)
        }
        QueryMsg::RequestTimestamp { request_id } => {
            query::query_request_timestamp(deps, request_id)
        }
        QueryMsg::NextRequestId {} => query::query_next_request_id(deps),
        QueryMsg::RequestsByRequester {
            requester,
            start_after,
            limit,
        } => query::query_requests_by_requester(deps, env, requester, start_after, limit),
        QueryMsg::ComputeRequestHash {
            request_id,
            requester,
            max_allowed_gas_price,
            callback_gas,
            round,
            beacon,
            fee_rule,
        } => query::query_compute_request_hash(
            deps,
            env,
            request_id,
            requester,
            max_allowed_gas_price,
            callback_gas,
            round,
            beacon,
            fee_rule,
        ),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "cannot migrate from a different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
