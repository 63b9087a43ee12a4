use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, Event, HexBinary, MessageInfo,
    Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use drandcast_common::token::TokenExecuteMsg;

use crate::error::ContractError;
use crate::msg::{CoordinatorExecuteMsg, ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{ConsumerConfig, ReceivedRandomness, CONFIG, LATEST, RANDOMNESS};

const CONTRACT_NAME: &str = "crates.io:drandcast-example-consumer";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = ConsumerConfig {
        owner: info.sender.clone(),
        coordinator: deps.api.addr_validate(&msg.coordinator)?,
        token: deps.api.addr_validate(&msg.token)?,
        always_revert: msg.always_revert,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "example-consumer")
        .add_attribute("coordinator", config.coordinator.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RequestRandomness {
            deadline,
            max_allowed_gas_price,
            callback_gas,
            fee_allowance,
        } => execute_request_randomness(
            deps,
            info,
            deadline,
            max_allowed_gas_price,
            callback_gas,
            fee_allowance,
        ),
        ExecuteMsg::ReceiveRandomness {
            request_id,
            randomness,
        } => execute_receive_randomness(deps, env, info, request_id, randomness),
        ExecuteMsg::SetAlwaysRevert { always_revert } => {
            let mut config = CONFIG.load(deps.storage)?;
            ensure_owner(&config, &info)?;
            config.always_revert = always_revert;
            CONFIG.save(deps.storage, &config)?;
            Ok(Response::new()
                .add_attribute("action", "set_always_revert")
                .add_attribute("always_revert", always_revert.to_string()))
        }
    }
}

fn ensure_owner(config: &ConsumerConfig, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            reason: "only the owner can do this".to_string(),
        });
    }
    Ok(())
}

fn execute_request_randomness(
    deps: DepsMut,
    info: MessageInfo,
    deadline: u64,
    max_allowed_gas_price: Uint128,
    callback_gas: u64,
    fee_allowance: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    let mut response = Response::new().add_attribute("action", "request_randomness");

    if let Some(amount) = fee_allowance.filter(|amount| !amount.is_zero()) {
        response = response.add_message(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&TokenExecuteMsg::IncreaseAllowance {
                spender: config.coordinator.to_string(),
                amount,
                expires: None,
            })?,
            funds: vec![],
        });
    }

    // The allowance message runs first, so the coordinator sees it
    response = response.add_message(WasmMsg::Execute {
        contract_addr: config.coordinator.to_string(),
        msg: to_json_binary(&CoordinatorExecuteMsg::CreateRequest {
            deadline,
            max_allowed_gas_price,
            callback_gas,
        })?,
        funds: vec![],
    });

    Ok(response
        .add_attribute("deadline", deadline.to_string())
        .add_attribute("callback_gas", callback_gas.to_string()))
}

fn execute_receive_randomness(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    request_id: u64,
    randomness: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.coordinator {
        return Err(ContractError::Unauthorized {
            reason: "only the coordinator can deliver randomness".to_string(),
        });
    }
    if config.always_revert {
        return Err(ContractError::Reverted { request_id });
    }

    RANDOMNESS.save(deps.storage, request_id, &randomness)?;
    LATEST.save(
        deps.storage,
        &ReceivedRandomness {
            request_id,
            randomness: randomness.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "receive_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("drandcast_randomness_received")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("randomness", randomness.to_hex()),
        ))
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Randomness { request_id } => {
            to_json_binary(&RANDOMNESS.may_load(deps.storage, request_id)?)
        }
        QueryMsg::LatestRandomness {} => to_json_binary(&LATEST.may_load(deps.storage)?),
    }
}
