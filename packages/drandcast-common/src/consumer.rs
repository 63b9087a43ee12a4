use cosmwasm_schema::cw_serde;
use cosmwasm_std::HexBinary;

/// Callback every consumer must accept. Implementations have to check that
/// the sender is the coordinator they requested from.
#[cw_serde]
pub enum ConsumerExecuteMsg {
    ReceiveRandomness {
        request_id: u64,
        randomness: HexBinary,
    },
}
