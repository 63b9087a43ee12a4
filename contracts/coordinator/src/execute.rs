use cosmwasm_std::{
    to_json_binary, Addr, DepsMut, Empty, Env, Event, HexBinary, MessageInfo, Reply, Response,
    SubMsg, SubMsgResult, Timestamp, Uint128, WasmMsg,
};
use drandcast_common::beacon::BeaconQueryMsg;
use drandcast_common::consumer::ConsumerExecuteMsg;
use drandcast_common::fee_rule::{FeeResponse, FeeRuleQueryMsg};
use drandcast_common::token::{AllowanceResponse, BalanceResponse, TokenExecuteMsg, TokenQueryMsg};
use drandcast_common::RequestState;

use crate::commitment::{derive_randomness, RequestCommitment};
use crate::error::ContractError;
use crate::msg::CreateRequestResponse;
use crate::round::{derive_round, round_time};
use crate::state::{
    Config, InFlightFulfillment, Request, CONFIG, IN_FLIGHT, NEXT_REQUEST_ID, REQUESTS,
    REQUESTS_BY_REQUESTER,
};

/// Reply id of the consumer callback sub-message.
pub const CALLBACK_REPLY_ID: u64 = 1;

/// Gas granted on top of `callback_gas` for dispatching the callback.
pub const CALLBACK_GAS_BUFFER: u64 = 10_000;

/// Register a randomness request for the sender.
pub fn create_request(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    deadline: u64,
    max_allowed_gas_price: Uint128,
    callback_gas: u64,
) -> Result<Response, ContractError> {
    if IN_FLIGHT.exists(deps.storage) {
        return Err(ContractError::Reentrancy);
    }
    let config = CONFIG.load(deps.storage)?;

    if callback_gas == 0 {
        return Err(ContractError::ZeroValue {
            field: "callback_gas".to_string(),
        });
    }
    if callback_gas > config.max_callback_gas {
        return Err(ContractError::CallbackGasTooHigh {
            callback_gas,
            max_callback_gas: config.max_callback_gas,
        });
    }
    if max_allowed_gas_price.is_zero() {
        return Err(ContractError::ZeroValue {
            field: "max_allowed_gas_price".to_string(),
        });
    }

    let genesis: Timestamp = deps
        .querier
        .query_wasm_smart(&config.beacon, &BeaconQueryMsg::GenesisTimestamp {})?;
    let period: u64 = deps
        .querier
        .query_wasm_smart(&config.beacon, &BeaconQueryMsg::Period {})?;
    let now = env.block.time.seconds();
    let round = derive_round(
        deadline,
        now,
        genesis.seconds(),
        period,
        config.max_deadline_delta,
    )?;
    let slot_time = round_time(round, genesis.seconds(), period)?;

    // The requester must already be able to cover the base fee
    let fee: FeeResponse = deps.querier.query_wasm_smart(
        &config.fee_rule,
        &FeeRuleQueryMsg::CalculateFee {
            requester: info.sender.to_string(),
            gas_used: 0,
        },
    )?;
    ensure_can_pay(&deps, &env, &config.token, &info.sender, fee.fee)?;

    let request_id = NEXT_REQUEST_ID.load(deps.storage)?;
    NEXT_REQUEST_ID.save(deps.storage, &(request_id + 1))?;

    let request_hash = RequestCommitment {
        chain_id: &env.block.chain_id,
        contract: &env.contract.address,
        request_id,
        requester: &info.sender,
        max_allowed_gas_price,
        callback_gas,
        round,
        beacon: &config.beacon,
        fee_rule: &config.fee_rule,
    }
    .hash();

    let request = Request {
        id: request_id,
        requester: info.sender.clone(),
        request_hash: HexBinary::from(request_hash.to_vec()),
        state: RequestState::Pending,
        created_at: env.block.time,
        deadline: Timestamp::from_seconds(slot_time),
    };
    REQUESTS.save(deps.storage, request_id, &request)?;
    REQUESTS_BY_REQUESTER.save(deps.storage, (&info.sender, request_id), &())?;

    Ok(Response::new()
        .set_data(to_json_binary(&CreateRequestResponse { request_id })?)
        .add_attribute("action", "create_request")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("requester", info.sender.to_string())
        .add_event(
            Event::new("drandcast_request_created")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("requester", info.sender.to_string())
                .add_attribute("request_hash", request.request_hash.to_hex())
                .add_attribute("round", round.to_string())
                .add_attribute("deadline", slot_time.to_string())
                .add_attribute("max_allowed_gas_price", max_allowed_gas_price.to_string())
                .add_attribute("callback_gas", callback_gas.to_string())
                .add_attribute("beacon", config.beacon.to_string())
                .add_attribute("fee_rule", config.fee_rule.to_string())
                .add_attribute("base_fee", fee.fee.to_string()),
        ))
}

fn ensure_can_pay(
    deps: &DepsMut,
    env: &Env,
    token: &Addr,
    owner: &Addr,
    required: Uint128,
) -> Result<(), ContractError> {
    let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
        token,
        &TokenQueryMsg::Allowance {
            owner: owner.to_string(),
            spender: env.contract.address.to_string(),
        },
    )?;
    if allowance.allowance < required {
        return Err(ContractError::InsufficientAllowance {
            required,
            available: allowance.allowance,
        });
    }

    let balance: BalanceResponse = deps.querier.query_wasm_smart(
        token,
        &TokenQueryMsg::Balance {
            address: owner.to_string(),
        },
    )?;
    if balance.balance < required {
        return Err(ContractError::InsufficientBalance {
            required,
            available: balance.balance,
        });
    }
    Ok(())
}

/// Deliver a verified beacon to a pending request. Relayer only.
///
/// The callback runs as a sub-message with a fixed gas limit; `reply`
/// settles the outcome and charges the fee.
#[allow(clippy::too_many_arguments)]
pub fn fulfill_request(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    requester: String,
    max_allowed_gas_price: Uint128,
    callback_gas: u64,
    round: u64,
    beacon: String,
    fee_rule: String,
    gas_price: Uint128,
    signature: HexBinary,
) -> Result<Response, ContractError> {
    if IN_FLIGHT.exists(deps.storage) {
        return Err(ContractError::Reentrancy);
    }
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.relayer {
        return Err(ContractError::Unauthorized {
            reason: "only the relayer can fulfil requests".to_string(),
        });
    }

    let mut request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::RequestNotPending {
            request_id,
            state: RequestState::None.as_str().to_string(),
        })?;
    if request.state != RequestState::Pending {
        return Err(ContractError::RequestNotPending {
            request_id,
            state: request.state.as_str().to_string(),
        });
    }
    let expired_at = request.expires_at(config.request_expire_time);
    if env.block.time.seconds() > expired_at {
        return Err(ContractError::RequestExpired {
            request_id,
            expired_at,
        });
    }
    if gas_price > max_allowed_gas_price {
        return Err(ContractError::GasPriceTooHigh {
            gas_price,
            max_allowed_gas_price,
        });
    }

    let requester = deps.api.addr_validate(&requester)?;
    let beacon = deps.api.addr_validate(&beacon)?;
    let fee_rule = deps.api.addr_validate(&fee_rule)?;
    let supplied_hash = RequestCommitment {
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
    if supplied_hash.as_slice() != request.request_hash.as_slice() {
        return Err(ContractError::RequestHashMismatch { request_id });
    }

    let verified: Result<Empty, _> = deps.querier.query_wasm_smart(
        &beacon,
        &BeaconQueryMsg::VerifyBeaconRound {
            round,
            signature: signature.clone(),
        },
    );
    verified.map_err(|e| ContractError::BeaconVerificationFailed {
        request_id,
        round,
        reason: e.to_string(),
    })?;

    let randomness = derive_randomness(
        signature.as_slice(),
        &env.block.chain_id,
        &env.contract.address,
        request_id,
        &requester,
    );

    // Marked fulfilled up front; reply downgrades to Failed if the callback errors
    request.state = RequestState::Fulfilled;
    REQUESTS.save(deps.storage, request_id, &request)?;
    IN_FLIGHT.save(
        deps.storage,
        &InFlightFulfillment {
            request_id,
            requester: requester.clone(),
            fee_rule,
            gas_price,
        },
    )?;

    let callback = WasmMsg::Execute {
        contract_addr: requester.to_string(),
        msg: to_json_binary(&ConsumerExecuteMsg::ReceiveRandomness {
            request_id,
            randomness: HexBinary::from(randomness.to_vec()),
        })?,
        funds: vec![],
    };
    let gas_limit = callback_gas
        .checked_add(CALLBACK_GAS_BUFFER)
        .ok_or(ContractError::CallbackGasTooHigh {
            callback_gas,
            max_callback_gas: config.max_callback_gas,
        })?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_always(callback, CALLBACK_REPLY_ID).with_gas_limit(gas_limit))
        .add_attribute("action", "fulfill_request")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("round", round.to_string())
        .add_event(
            Event::new("drandcast_request_fulfilled")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("requester", requester.to_string())
                .add_attribute("round", round.to_string())
                .add_attribute("randomness", hex::encode(randomness))
                .add_attribute("relayer", info.sender.to_string())
                .add_attribute("gas_price", gas_price.to_string()),
        ))
}

/// Settles a callback: records failure if it errored, then charges the fee
/// for the gas it consumed. A failing fee transfer aborts the transaction.
pub fn handle_callback_reply(
    deps: DepsMut,
    _env: Env,
    reply: Reply,
) -> Result<Response, ContractError> {
    if reply.id != CALLBACK_REPLY_ID {
        return Err(ContractError::UnexpectedReply { id: reply.id });
    }
    let in_flight = IN_FLIGHT.load(deps.storage)?;
    IN_FLIGHT.remove(deps.storage);
    let config = CONFIG.load(deps.storage)?;
    let request_id = in_flight.request_id;

    let mut response = Response::new()
        .add_attribute("action", "settle_callback")
        .add_attribute("request_id", request_id.to_string());

    match reply.result {
        SubMsgResult::Ok(_) => {
            response = response.add_attribute("callback", "succeeded");
        }
        SubMsgResult::Err(reason) => {
            let mut request = REQUESTS.load(deps.storage, request_id)?;
            request.state = RequestState::Failed;
            REQUESTS.save(deps.storage, request_id, &request)?;
            response = response.add_attribute("callback", "failed").add_event(
                Event::new("drandcast_callback_failed")
                    .add_attribute("request_id", request_id.to_string())
                    .add_attribute("requester", in_flight.requester.to_string())
                    .add_attribute("reason", reason),
            );
        }
    }

    let gas_used = reply.gas_used.saturating_add(config.overhead_gas);
    let fee: FeeResponse = deps.querier.query_wasm_smart(
        &in_flight.fee_rule,
        &FeeRuleQueryMsg::CalculateFeeWithGasPrice {
            requester: in_flight.requester.to_string(),
            gas_used,
            gas_price: in_flight.gas_price,
        },
    )?;

    if !fee.fee.is_zero() {
        response = response.add_message(WasmMsg::Execute {
            contract_addr: config.token.to_string(),
            msg: to_json_binary(&TokenExecuteMsg::TransferFrom {
                owner: in_flight.requester.to_string(),
                recipient: config.fee_recipient.to_string(),
                amount: fee.fee,
            })?,
            funds: vec![],
        });
    }

    Ok(response.add_event(
        Event::new("drandcast_fee_charged")
            .add_attribute("request_id", request_id.to_string())
            .add_attribute("payer", in_flight.requester.to_string())
            .add_attribute("recipient", config.fee_recipient.to_string())
            .add_attribute("gas_used", gas_used.to_string())
            .add_attribute("gas_price", in_flight.gas_price.to_string())
            .add_attribute("fee", fee.fee.to_string()),
    ))
}

/// Cancel a pending request. Only its requester may do this.
pub fn cancel_request(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
) -> Result<Response, ContractError> {
    let mut request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::RequestNotPending {
            request_id,
            state: RequestState::None.as_str().to_string(),
        })?;

    if info.sender != request.requester {
        return Err(ContractError::Unauthorized {
            reason: "only the requester can cancel a request".to_string(),
        });
    }
    if request.state != RequestState::Pending {
        return Err(ContractError::RequestNotPending {
            request_id,
            state: request.state.as_str().to_string(),
        });
    }

    request.state = RequestState::Cancelled;
    REQUESTS.save(deps.storage, request_id, &request)?;

    Ok(Response::new()
        .add_attribute("action", "cancel_request")
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("drandcast_request_cancelled")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("requester", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update configuration. Owner only; emits one event per changed field.
#[allow(clippy::too_many_arguments)]
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    beacon: Option<String>,
    fee_rule: Option<String>,
    fee_recipient: Option<String>,
    relayer: Option<String>,
    token: Option<String>,
    overhead_gas: Option<u64>,
    max_callback_gas: Option<u64>,
    request_expire_time: Option<u64>,
    max_deadline_delta: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            reason: "only the owner can update config".to_string(),
        });
    }

    let mut changes: Vec<(&str, String)> = vec![];
    if let Some(beacon) = beacon {
        config.beacon = deps.api.addr_validate(&beacon)?;
        changes.push(("beacon", config.beacon.to_string()));
    }
    if let Some(fee_rule) = fee_rule {
        config.fee_rule = deps.api.addr_validate(&fee_rule)?;
        changes.push(("fee_rule", config.fee_rule.to_string()));
    }
    if let Some(fee_recipient) = fee_recipient {
        config.fee_recipient = deps.api.addr_validate(&fee_recipient)?;
        changes.push(("fee_recipient", config.fee_recipient.to_string()));
    }
    if let Some(relayer) = relayer {
        config.relayer = deps.api.addr_validate(&relayer)?;
        changes.push(("relayer", config.relayer.to_string()));
    }
    if let Some(token) = token {
        config.token = deps.api.addr_validate(&token)?;
        changes.push(("token", config.token.to_string()));
    }
    if let Some(overhead_gas) = overhead_gas {
        config.overhead_gas = overhead_gas;
        changes.push(("overhead_gas", overhead_gas.to_string()));
    }
    if let Some(max_callback_gas) = max_callback_gas {
        config.max_callback_gas = non_zero("max_callback_gas", max_callback_gas)?;
        changes.push(("max_callback_gas", max_callback_gas.to_string()));
    }
    if let Some(request_expire_time) = request_expire_time {
        config.request_expire_time = non_zero("request_expire_time", request_expire_time)?;
        changes.push(("request_expire_time", request_expire_time.to_string()));
    }
    if let Some(max_deadline_delta) = max_deadline_delta {
        config.max_deadline_delta = non_zero("max_deadline_delta", max_deadline_delta)?;
        changes.push(("max_deadline_delta", max_deadline_delta.to_string()));
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

pub fn transfer_ownership(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {
            reason: "only the owner can transfer ownership".to_string(),
        });
    }

    let previous = config.owner;
    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_event(
            Event::new("drandcast_ownership_transferred")
                .add_attribute("previous_owner", previous.to_string())
                .add_attribute("new_owner", config.owner.to_string()),
        ))
}

pub fn non_zero(field: &str, value: u64) -> Result<u64, ContractError> {
    if value == 0 {
        return Err(ContractError::ZeroValue {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Validates a full configuration at instantiation.
pub fn validate_limits(config: &Config) -> Result<(), ContractError> {
    non_zero("max_callback_gas", config.max_callback_gas)?;
    non_zero("request_expire_time", config.request_expire_time)?;
    non_zero("max_deadline_delta", config.max_deadline_delta)?;
    Ok(())
}
