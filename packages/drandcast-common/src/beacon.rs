use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Empty, HexBinary, Timestamp};

/// Query surface shared by every beacon verifier contract.
///
/// `VerifyBeaconRound` answers `Empty` when the signature is a valid beacon
/// for `round` and fails the query otherwise.
#[cw_serde]
#[derive(QueryResponses)]
pub enum BeaconQueryMsg {
    #[returns(Empty)]
    VerifyBeaconRound { round: u64, signature: HexBinary },

    #[returns(Timestamp)]
    GenesisTimestamp {},

    /// Seconds between rounds.
    #[returns(u64)]
    Period {},

    #[returns(HexBinary)]
    PublicKey {},

    /// keccak256 of the public key encoding.
    #[returns(HexBinary)]
    PublicKeyHash {},
}
