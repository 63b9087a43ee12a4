use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response,
    Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use drandcast_common::fee_rule::FeeResponse;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{FeeConfig, CONFIG};

const CONTRACT_NAME: &str = "crates.io:drandcast-fixed-fee-rule";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = FeeConfig {
        owner: info.sender.clone(),
        fixed_fee: msg.fixed_fee,
        gas_price: msg.gas_price,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "fixed-fee-rule")
        .add_attribute("owner", info.sender.to_string())
        .add_attribute("fixed_fee", msg.fixed_fee.to_string())
        .add_attribute("gas_price", msg.gas_price.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateConfig {
            fixed_fee,
            gas_price,
        } => execute_update_config(deps, info, fixed_fee, gas_price),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    fixed_fee: Option<Uint128>,
    gas_price: Option<Uint128>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            action: "update config".to_string(),
        });
    }

    let mut events = vec![];
    if let Some(fixed_fee) = fixed_fee {
        config.fixed_fee = fixed_fee;
        events.push(config_changed("fixed_fee", fixed_fee));
    }
    if let Some(gas_price) = gas_price {
        config.gas_price = gas_price;
        events.push(config_changed("gas_price", gas_price));
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_events(events))
}

fn config_changed(field: &str, value: Uint128) -> Event {
    Event::new("drandcast_config_changed")
        .add_attribute("field", field)
        .add_attribute("value", value.to_string())
}

fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            action: "transfer ownership".to_string(),
        });
    }
    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("new_owner", config.owner.to_string()))
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let binary = match msg {
        QueryMsg::CalculateFee { gas_used, .. } => to_json_binary(&FeeResponse {
            fee: config.fee(gas_used, config.gas_price)?,
        })?,
        QueryMsg::CalculateFeeWithGasPrice {
            gas_used,
            gas_price,
            ..
        } => to_json_binary(&FeeResponse {
            fee: config.fee(gas_used, gas_price)?,
        })?,
        QueryMsg::Config {} => to_json_binary(&config)?,
    };
    Ok(binary)
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            action: "migrate from a different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
