use cosmwasm_std::{to_json_binary, Binary, Deps, Empty, HexBinary};
use drandcast_common::keccak256;

use crate::error::ContractError;
use crate::state::CONFIG;
use crate::verify::verify_beacon_round;

pub fn query_verify_beacon_round(
    deps: Deps,
    round: u64,
    signature: HexBinary,
) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    verify_beacon_round(config.public_key.as_slice(), round, signature.as_slice())?;
    Ok(to_json_binary(&Empty {})?)
}

pub fn query_genesis_timestamp(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(to_json_binary(&config.genesis_timestamp)?)
}

pub fn query_period(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(to_json_binary(&config.period)?)
}

pub fn query_public_key(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(to_json_binary(&config.public_key)?)
}

pub fn query_public_key_hash(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let hash = HexBinary::from(keccak256(config.public_key.as_slice()).to_vec());
    Ok(to_json_binary(&hash)?)
}
