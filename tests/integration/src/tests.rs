//! Integration tests for the drandcast contracts.
//!
//! The coordinator runs against real beacon and fee-rule contracts: its
//! `MockQuerier::update_wasm` handler dispatches smart queries into their
//! `query` entry points. Only the cw20 token is mocked. Callbacks are
//! delivered by hand to the example consumer, and its outcome is fed back
//! through the coordinator's `reply` entry point.
//!
//! Run:
//! ```bash
//! cargo test -p drandcast-integration-tests
//! ```

use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, ContractResult, CosmosMsg, Env, HexBinary,
    OwnedDeps, Reply, Response, SubMsg, SubMsgResponse, SubMsgResult, SystemError, SystemResult,
    Timestamp, Uint128, WasmMsg, WasmQuery,
};
use drandcast_common::token::{
    AllowanceResponse, BalanceResponse, Expiration, TokenExecuteMsg, TokenQueryMsg,
};
use drandcast_common::beacon::BeaconQueryMsg;
use drandcast_common::RequestState;
use drandcast_coordinator::commitment::derive_randomness;
use drandcast_coordinator::msg::{CreateRequestResponse, RequestStateResponse};
use drandcast_coordinator::ContractError;

type TestDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

// ─── Constants ───

const PERIOD: u64 = 3;

const FIXED_FEE: u128 = 1_000;
const OVERHEAD_GAS: u64 = 40_000;
const RELAYER_GAS_PRICE: u128 = 5;
const CALLBACK_GAS: u64 = 300_000;

/// Real drand quicknet public key
const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";
const QUICKNET_GENESIS: u64 = 1_692_803_367;

/// Real quicknet test vector: round 1000
const QUICKNET_ROUND: u64 = 1000;
const QUICKNET_SIG_HEX: &str = "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39";

// ─── Helpers ───

fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

fn contract_result<E: ToString>(res: Result<Binary, E>) -> ContractResult<Binary> {
    match res {
        Ok(binary) => ContractResult::Ok(binary),
        Err(err) => ContractResult::Err(err.to_string()),
    }
}

/// BN254 beacon fixture: public key `0xd1ce5eed * G2` in EIP-197 order and
/// its beacons for the rounds the tests target. The signatures were produced
/// by an independent implementation of the hash-to-curve suite.
const BN254_PK_HEX: &str = "\
    1ac56398a6d47e54e51b674aa27125568d76d5eea44ad77cd4962e2163e157ea\
    09e2bddd0e59d4b7bcbe45d83cd7395f7f7a2f1a9261828304041a217a9fb35b\
    011cebb00d36517d5020c16feee8bce8c476a8059cf7e4ab639a1fbc21ba1331\
    04cdc9017215494502a16475c8606417f0e1d914ac6e0af8221b2a839951f376";

const BN254_SIGNATURES: [(u64, &str); 2] = [
    (
        3344,
        "049b72550f08f75c25e2f5b09bc3f2655a85c3cbd6fcd5abfa0c42556289d50f\
         1e514c33c990a7231ca41523ce3bad201086ce46bef304c8ca5e78dac47d7311",
    ),
    (
        3345,
        "0e391d70ff864b1eba7abdfdacda4c0e7e585e2e89b0c21af9785e5d13816dc2\
         055f109422cd025b4c92058e8561d77200bc206f5f2130c3be49a35449723310",
    ),
];

/// Rounds targeted by `create(now + 30)` with genesis at `now - 10_000`.
const BN254_ROUND: u64 = 3344;

fn bn254_sign(round: u64) -> Vec<u8> {
    let (_, signature) = BN254_SIGNATURES
        .iter()
        .find(|(r, _)| *r == round)
        .unwrap_or_else(|| panic!("no fixture beacon for round {round}"));
    hex::decode(signature).unwrap()
}

// ─── Beacon helpers ───

type BeaconQuery = Box<dyn Fn(&Binary) -> ContractResult<Binary>>;

fn bn254_beacon(genesis: u64) -> BeaconQuery {
    let mut deps = mock_dependencies();
    let msg = drandcast_bn254_beacon::msg::InstantiateMsg {
        public_key: HexBinary::from(hex::decode(BN254_PK_HEX).unwrap()),
        genesis_timestamp: genesis,
        period: PERIOD,
    };
    drandcast_bn254_beacon::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&addr("deployer"), &[]),
        msg,
    )
    .unwrap();

    Box::new(move |msg| {
        let msg = from_json(msg).unwrap();
        contract_result(drandcast_bn254_beacon::contract::query(
            deps.as_ref(),
            mock_env(),
            msg,
        ))
    })
}

fn quicknet_beacon() -> BeaconQuery {
    let compressed = hex::decode(QUICKNET_PK_HEX).unwrap();
    let public_key = drandcast_bls12381_beacon::verify::decompress_public_key(&compressed).unwrap();

    let mut deps = mock_dependencies();
    let msg = drandcast_bls12381_beacon::msg::InstantiateMsg {
        public_key: HexBinary::from(public_key.to_vec()),
        genesis_timestamp: QUICKNET_GENESIS,
        period: PERIOD,
    };
    drandcast_bls12381_beacon::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&addr("deployer"), &[]),
        msg,
    )
    .unwrap();

    Box::new(move |msg| {
        let msg = from_json(msg).unwrap();
        contract_result(drandcast_bls12381_beacon::contract::query(
            deps.as_ref(),
            mock_env(),
            msg,
        ))
    })
}

fn quicknet_signature() -> Vec<u8> {
    let compressed = hex::decode(QUICKNET_SIG_HEX).unwrap();
    drandcast_bls12381_beacon::verify::decompress_signature(&compressed)
        .unwrap()
        .to_vec()
}

// ─── Harness ───

struct Harness {
    coordinator: TestDeps,
    consumer: TestDeps,
    env: Env,
}

fn token_query(msg: &Binary) -> ContractResult<Binary> {
    let res = match from_json(msg).unwrap() {
        TokenQueryMsg::Allowance { .. } => to_json_binary(&AllowanceResponse {
            allowance: Uint128::new(1_000_000_000_000),
            expires: Expiration::Never {},
        }),
        TokenQueryMsg::Balance { .. } => to_json_binary(&BalanceResponse {
            balance: Uint128::new(1_000_000_000_000),
        }),
    };
    ContractResult::Ok(res.unwrap())
}

fn route_queries(coordinator: &mut TestDeps, beacon_query: BeaconQuery) {
    let mut fee_rule_deps = mock_dependencies();
    drandcast_fixed_fee_rule::contract::instantiate(
        fee_rule_deps.as_mut(),
        mock_env(),
        message_info(&addr("deployer"), &[]),
        drandcast_fixed_fee_rule::msg::InstantiateMsg {
            fixed_fee: Uint128::new(FIXED_FEE),
            gas_price: Uint128::new(2),
        },
    )
    .unwrap();

    let beacon = addr("beacon").to_string();
    let fee_rule = addr("fee_rule").to_string();
    let token = addr("token").to_string();
    coordinator.querier.update_wasm(move |query| {
        let WasmQuery::Smart { contract_addr, msg } = query else {
            return SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "non-smart wasm query".to_string(),
            });
        };
        let result = if *contract_addr == beacon {
            beacon_query(msg)
        } else if *contract_addr == fee_rule {
            contract_result(drandcast_fixed_fee_rule::contract::query(
                fee_rule_deps.as_ref(),
                mock_env(),
                from_json(msg).unwrap(),
            ))
        } else if *contract_addr == token {
            token_query(msg)
        } else {
            return SystemResult::Err(SystemError::NoSuchContract {
                addr: contract_addr.clone(),
            });
        };
        SystemResult::Ok(result)
    });
}

fn setup(beacon_query: BeaconQuery, now: u64, always_revert: bool) -> Harness {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(now);

    let mut coordinator = mock_dependencies();
    drandcast_coordinator::contract::instantiate(
        coordinator.as_mut(),
        env.clone(),
        message_info(&addr("owner"), &[]),
        drandcast_coordinator::msg::InstantiateMsg {
            beacon: addr("beacon").to_string(),
            fee_rule: addr("fee_rule").to_string(),
            fee_recipient: addr("treasury").to_string(),
            relayer: addr("relayer").to_string(),
            token: addr("token").to_string(),
            overhead_gas: OVERHEAD_GAS,
            max_callback_gas: 1_000_000,
            request_expire_time: 600,
            max_deadline_delta: 3_600,
        },
    )
    .unwrap();
    route_queries(&mut coordinator, beacon_query);

    let mut consumer = mock_dependencies();
    drandcast_example_consumer::contract::instantiate(
        consumer.as_mut(),
        env.clone(),
        message_info(&addr("consumer_owner"), &[]),
        drandcast_example_consumer::msg::InstantiateMsg {
            coordinator: env.contract.address.to_string(),
            token: addr("token").to_string(),
            always_revert,
        },
    )
    .unwrap();

    Harness {
        coordinator,
        consumer,
        env,
    }
}

impl Harness {
    fn coordinator_addr(&self) -> Addr {
        self.env.contract.address.clone()
    }

    /// Runs the consumer's `RequestRandomness` and forwards its
    /// `CreateRequest` to the coordinator as the consumer.
    fn request(&mut self, deadline: u64, callback_gas: u64) -> Result<Response, ContractError> {
        let res = drandcast_example_consumer::contract::execute(
            self.consumer.as_mut(),
            self.env.clone(),
            message_info(&addr("consumer_owner"), &[]),
            drandcast_example_consumer::msg::ExecuteMsg::RequestRandomness {
                deadline,
                max_allowed_gas_price: Uint128::new(10),
                callback_gas,
                fee_allowance: Some(Uint128::new(1_000_000)),
            },
        )
        .unwrap();
        let create = match &res.messages.last().unwrap().msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(*contract_addr, self.coordinator_addr().to_string());
                from_json(msg).unwrap()
            }
            other => panic!("unexpected message {other:?}"),
        };
        drandcast_coordinator::contract::execute(
            self.coordinator.as_mut(),
            self.env.clone(),
            message_info(&addr("consumer"), &[]),
            create,
        )
    }

    fn create(&mut self, deadline: u64) -> (u64, u64) {
        let res = self.request(deadline, CALLBACK_GAS).unwrap();
        let data: CreateRequestResponse = from_json(res.data.unwrap()).unwrap();
        let round = res
            .events
            .iter()
            .find(|e| e.ty == "drandcast_request_created")
            .and_then(|e| e.attributes.iter().find(|a| a.key == "round"))
            .map(|a| a.value.parse::<u64>().unwrap())
            .unwrap();
        (data.request_id, round)
    }

    fn fulfill(
        &mut self,
        request_id: u64,
        round: u64,
        callback_gas: u64,
        signature: Vec<u8>,
    ) -> Result<Response, ContractError> {
        drandcast_coordinator::contract::execute(
            self.coordinator.as_mut(),
            self.env.clone(),
            message_info(&addr("relayer"), &[]),
            drandcast_coordinator::msg::ExecuteMsg::FulfillRequest {
                request_id,
                requester: addr("consumer").to_string(),
                max_allowed_gas_price: Uint128::new(10),
                callback_gas,
                round,
                beacon: addr("beacon").to_string(),
                fee_rule: addr("fee_rule").to_string(),
                gas_price: Uint128::new(RELAYER_GAS_PRICE),
                signature: HexBinary::from(signature),
            },
        )
    }

    /// Executes the callback sub-message on the consumer and settles it
    /// through the coordinator's `reply`.
    #[allow(deprecated)]
    fn deliver(&mut self, sub: &SubMsg, gas_used: u64) -> Response {
        let msg = match &sub.msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(*contract_addr, addr("consumer").to_string());
                from_json(msg).unwrap()
            }
            other => panic!("unexpected callback {other:?}"),
        };
        let coordinator = self.coordinator_addr();
        let outcome = drandcast_example_consumer::contract::execute(
            self.consumer.as_mut(),
            self.env.clone(),
            message_info(&coordinator, &[]),
            msg,
        );
        let result = match outcome {
            Ok(res) => SubMsgResult::Ok(SubMsgResponse {
                events: res.events,
                data: None,
                msg_responses: vec![],
            }),
            Err(err) => SubMsgResult::Err(err.to_string()),
        };
        drandcast_coordinator::contract::reply(
            self.coordinator.as_mut(),
            self.env.clone(),
            Reply {
                id: sub.id,
                payload: Binary::default(),
                gas_used,
                result,
            },
        )
        .unwrap()
    }

    fn state(&self, request_id: u64) -> RequestState {
        let res = drandcast_coordinator::contract::query(
            self.coordinator.as_ref(),
            self.env.clone(),
            drandcast_coordinator::msg::QueryMsg::RequestState { request_id },
        )
        .unwrap();
        let res: RequestStateResponse = from_json(res).unwrap();
        res.state
    }

    fn consumer_randomness(&self, request_id: u64) -> Option<HexBinary> {
        let res = drandcast_example_consumer::contract::query(
            self.consumer.as_ref(),
            self.env.clone(),
            drandcast_example_consumer::msg::QueryMsg::Randomness { request_id },
        )
        .unwrap();
        from_json(res).unwrap()
    }

    fn advance_to(&mut self, seconds: u64) {
        self.env.block.time = Timestamp::from_seconds(seconds);
    }
}

fn charged_fee(res: &Response) -> Uint128 {
    match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) => {
            assert_eq!(*contract_addr, addr("token").to_string());
            match from_json(msg).unwrap() {
                TokenExecuteMsg::TransferFrom {
                    owner,
                    recipient,
                    amount,
                } => {
                    assert_eq!(owner, addr("consumer").to_string());
                    assert_eq!(recipient, addr("treasury").to_string());
                    amount
                }
                other => panic!("unexpected token message {other:?}"),
            }
        }
        other => panic!("unexpected message {other:?}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bn254_request_fulfilled_end_to_end() {
    let now = mock_env().block.time.seconds();
    let mut h = setup(bn254_beacon(now - 10_000), now, false);

    let (request_id, round) = h.create(now + 30);
    assert_eq!(request_id, 1);
    assert_eq!(round, BN254_ROUND);
    assert_eq!(h.state(request_id), RequestState::Pending);

    h.advance_to(now + 31);
    let res = h.fulfill(request_id, round, CALLBACK_GAS, bn254_sign(round)).unwrap();
    assert_eq!(res.messages.len(), 1);
    assert_eq!(res.messages[0].gas_limit, Some(CALLBACK_GAS + 10_000));

    let settled = h.deliver(&res.messages[0], 120_000);
    assert_eq!(h.state(request_id), RequestState::Fulfilled);

    let expected_fee = FIXED_FEE + u128::from(120_000 + OVERHEAD_GAS) * RELAYER_GAS_PRICE;
    assert_eq!(charged_fee(&settled), Uint128::new(expected_fee));

    // The consumer received randomness bound to this request
    let expected = derive_randomness(
        &bn254_sign(round),
        &h.env.block.chain_id,
        &h.coordinator_addr(),
        request_id,
        &addr("consumer"),
    );
    assert_eq!(
        h.consumer_randomness(request_id),
        Some(HexBinary::from(expected.to_vec()))
    );
}

#[test]
fn test_bn254_fixture_verifies_through_beacon() {
    let now = mock_env().block.time.seconds();
    let beacon = bn254_beacon(now - 10_000);
    let verify = |round: u64, signature: Vec<u8>| {
        beacon(&to_json_binary(&BeaconQueryMsg::VerifyBeaconRound {
            round,
            signature: HexBinary::from(signature),
        })
        .unwrap())
    };

    for (round, _) in BN254_SIGNATURES {
        assert!(verify(round, bn254_sign(round)).is_ok(), "round {round}");
    }
    assert!(verify(BN254_ROUND, bn254_sign(BN254_ROUND + 1)).is_err());
}

#[test]
fn test_bls12381_quicknet_round_end_to_end() {
    // Deadline genesis + 2_998 maps to round ceil(2_998 / 3) = 1000. drand
    // published that round at genesis + 2_997, already before the deadline.
    let now = QUICKNET_GENESIS + 2_990;
    let mut h = setup(quicknet_beacon(), now, false);

    let (request_id, round) = h.create(now + 8);
    assert_eq!(round, QUICKNET_ROUND);

    let res = h
        .fulfill(request_id, round, CALLBACK_GAS, quicknet_signature())
        .unwrap();
    h.deliver(&res.messages[0], 50_000);
    assert_eq!(h.state(request_id), RequestState::Fulfilled);
    assert!(h.consumer_randomness(request_id).is_some());
}

#[test]
fn test_failed_callback_still_pays() {
    let now = mock_env().block.time.seconds();
    let mut h = setup(bn254_beacon(now - 10_000), now, true);

    let (request_id, round) = h.create(now + 30);
    let res = h.fulfill(request_id, round, CALLBACK_GAS, bn254_sign(round)).unwrap();
    let settled = h.deliver(&res.messages[0], 20_000);

    assert_eq!(h.state(request_id), RequestState::Failed);
    assert!(settled
        .events
        .iter()
        .any(|e| e.ty == "drandcast_callback_failed"));
    let expected_fee = FIXED_FEE + u128::from(20_000 + OVERHEAD_GAS) * RELAYER_GAS_PRICE;
    assert_eq!(charged_fee(&settled), Uint128::new(expected_fee));
    assert!(h.consumer_randomness(request_id).is_none());

    // Terminal: the same beacon cannot be delivered twice
    let err = h
        .fulfill(request_id, round, CALLBACK_GAS, bn254_sign(round))
        .unwrap_err();
    assert!(matches!(err, ContractError::RequestNotPending { .. }));
}

#[test]
fn test_tampered_parameters_rejected() {
    let now = mock_env().block.time.seconds();
    let mut h = setup(bn254_beacon(now - 10_000), now, false);
    let (request_id, round) = h.create(now + 30);

    let err = h
        .fulfill(request_id, round, CALLBACK_GAS + 1, bn254_sign(round))
        .unwrap_err();
    assert!(matches!(err, ContractError::RequestHashMismatch { .. }));

    // Valid signature for a different round fails verification
    let err = h
        .fulfill(request_id, round, CALLBACK_GAS, bn254_sign(round + 1))
        .unwrap_err();
    assert!(matches!(err, ContractError::BeaconVerificationFailed { .. }));

    assert_eq!(h.state(request_id), RequestState::Pending);
}

#[test]
fn test_deadline_bounds() {
    let now = mock_env().block.time.seconds();
    let mut h = setup(bn254_beacon(now - 10_000), now, false);

    let err = h.request(now + PERIOD - 1, CALLBACK_GAS).unwrap_err();
    assert!(matches!(err, ContractError::DeadlineTooSoon { .. }));

    let err = h.request(now + 3_601, CALLBACK_GAS).unwrap_err();
    assert!(matches!(err, ContractError::DeadlineTooFar { .. }));

    let err = h.request(now + 30, 1_000_001).unwrap_err();
    assert!(matches!(err, ContractError::CallbackGasTooHigh { .. }));

    // Both ends of the window are accepted
    h.request(now + PERIOD, CALLBACK_GAS).unwrap();
    h.request(now + 3_600, CALLBACK_GAS).unwrap();
}

#[test]
fn test_deadline_before_genesis() {
    let now = mock_env().block.time.seconds();
    let mut h = setup(bn254_beacon(now + 1_000), now, false);
    let err = h.request(now + 30, CALLBACK_GAS).unwrap_err();
    assert!(matches!(err, ContractError::DeadlineBeforeGenesis { .. }));
}

#[test]
fn test_cancelled_request_cannot_be_fulfilled() {
    let now = mock_env().block.time.seconds();
    let mut h = setup(bn254_beacon(now - 10_000), now, false);
    let (request_id, round) = h.create(now + 30);

    drandcast_coordinator::contract::execute(
        h.coordinator.as_mut(),
        h.env.clone(),
        message_info(&addr("consumer"), &[]),
        drandcast_coordinator::msg::ExecuteMsg::CancelRequest { request_id },
    )
    .unwrap();
    assert_eq!(h.state(request_id), RequestState::Cancelled);

    let err = h
        .fulfill(request_id, round, CALLBACK_GAS, bn254_sign(round))
        .unwrap_err();
    assert!(matches!(err, ContractError::RequestNotPending { .. }));
}

#[test]
fn test_expired_request() {
    let now = mock_env().block.time.seconds();
    let mut h = setup(bn254_beacon(now - 10_000), now, false);
    let (request_id, round) = h.create(now + 30);

    h.advance_to(now + 30 + PERIOD + 601);
    assert_eq!(h.state(request_id), RequestState::Expired);

    let err = h
        .fulfill(request_id, round, CALLBACK_GAS, bn254_sign(round))
        .unwrap_err();
    assert!(matches!(err, ContractError::RequestExpired { .. }));
}
