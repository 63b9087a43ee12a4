use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Response,
    Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use drandcast_common::fee_rule::FeeResponse;
use drandcast_common::price_feed::{PriceDataResponse, PriceFeedQueryMsg};

use crate::error::ContractError;
use crate::fee::{scaled_fee, validate_price};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{PriceFeedFeeConfig, CONFIG};

const CONTRACT_NAME: &str = "crates.io:drandcast-price-feed-fee-rule";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = PriceFeedFeeConfig {
        owner: info.sender.clone(),
        base_fee: msg.base_fee,
        gas_price: msg.gas_price,
        price_feed: deps.api.addr_validate(&msg.price_feed)?,
        max_price_age: msg.max_price_age,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "price-feed-fee-rule")
        .add_attribute("owner", info.sender.to_string())
        .add_attribute("price_feed", config.price_feed.to_string()))
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
            base_fee,
            gas_price,
            price_feed,
            max_price_age,
        } => execute_update_config(deps, info, base_fee, gas_price, price_feed, max_price_age),
        ExecuteMsg::TransferOwnership { new_owner } => {
            let mut config = CONFIG.load(deps.storage)?;
            ensure_owner(&config, &info, "transfer ownership")?;
            config.owner = deps.api.addr_validate(&new_owner)?;
            CONFIG.save(deps.storage, &config)?;
            Ok(Response::new()
                .add_attribute("action", "transfer_ownership")
                .add_attribute("new_owner", config.owner.to_string()))
        }
    }
}

fn ensure_owner(
    config: &PriceFeedFeeConfig,
    info: &MessageInfo,
    action: &str,
) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            action: action.to_string(),
        });
    }
    Ok(())
}

fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    base_fee: Option<Uint128>,
    gas_price: Option<Uint128>,
    price_feed: Option<String>,
    max_price_age: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info, "update config")?;

    let mut changes: Vec<(&str, String)> = vec![];
    if let Some(base_fee) = base_fee {
        config.base_fee = base_fee;
        changes.push(("base_fee", base_fee.to_string()));
    }
    if let Some(gas_price) = gas_price {
        config.gas_price = gas_price;
        changes.push(("gas_price", gas_price.to_string()));
    }
    if let Some(price_feed) = price_feed {
        config.price_feed = deps.api.addr_validate(&price_feed)?;
        changes.push(("price_feed", config.price_feed.to_string()));
    }
    if let Some(max_price_age) = max_price_age {
        config.max_price_age = max_price_age;
        changes.push(("max_price_age", max_price_age.to_string()));
    }
    CONFIG.save(deps.storage, &config)?;

    let events = changes.into_iter().map(|(field, value)| {
        Event::new("drandcast_config_changed")
            .add_attribute("field", field)
            .add_attribute("value", value)
    });
    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_events(events))
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let binary = match msg {
        QueryMsg::CalculateFee { gas_used, .. } => to_json_binary(&FeeResponse {
            fee: calculate_fee(deps, &env, &config, gas_used, config.gas_price)?,
        })?,
        QueryMsg::CalculateFeeWithGasPrice {
            gas_used,
            gas_price,
            ..
        } => to_json_binary(&FeeResponse {
            fee: calculate_fee(deps, &env, &config, gas_used, gas_price)?,
        })?,
        QueryMsg::Config {} => to_json_binary(&config)?,
    };
    Ok(binary)
}

fn calculate_fee(
    deps: Deps,
    env: &Env,
    config: &PriceFeedFeeConfig,
    gas_used: u64,
    gas_price: Uint128,
) -> Result<Uint128, ContractError> {
    if gas_used == 0 {
        return Ok(config.base_fee);
    }
    let price: PriceDataResponse = deps
        .querier
        .query_wasm_smart(&config.price_feed, &PriceFeedQueryMsg::LatestRoundData {})?;
    let answer = validate_price(&price, env.block.time.seconds(), config.max_price_age)?;
    scaled_fee(config.base_fee, gas_used, gas_price, answer, price.decimals)
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
