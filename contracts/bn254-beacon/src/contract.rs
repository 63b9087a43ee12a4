use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, Timestamp};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{BeaconConfig, CONFIG};
use crate::verify::validate_public_key;

const CONTRACT_NAME: &str = "crates.io:drandcast-bn254-beacon";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    validate_public_key(msg.public_key.as_slice())?;
    if msg.period == 0 {
        return Err(ContractError::InvalidPeriod);
    }

    let config = BeaconConfig {
        public_key: msg.public_key,
        genesis_timestamp: Timestamp::from_seconds(msg.genesis_timestamp),
        period: msg.period,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "bn254-beacon")
        .add_attribute("creator", info.sender.to_string())
        .add_attribute("genesis_timestamp", msg.genesis_timestamp.to_string())
        .add_attribute("period", msg.period.to_string()))
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::VerifyBeaconRound { round, signature } => {
            query::query_verify_beacon_round(deps, round, signature)
        }
        QueryMsg::GenesisTimestamp {} => query::query_genesis_timestamp(deps),
        QueryMsg::Period {} => query::query_period(deps),
        QueryMsg::PublicKey {} => query::query_public_key(deps),
        QueryMsg::PublicKeyHash {} => query::query_public_key_hash(deps),
    }
}
