//! Mirrors of the cw20 messages the coordinator and consumers need. Field
//! names and shapes match the cw20 standard so any cw20 token can be plugged in.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Timestamp, Uint128};

#[cw_serde]
pub enum Expiration {
    AtHeight(u64),
    AtTime(Timestamp),
    Never {},
}

#[cw_serde]
pub enum TokenQueryMsg {
    Balance { address: String },
    Allowance { owner: String, spender: String },
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct AllowanceResponse {
    pub allowance: Uint128,
    pub expires: Expiration,
}

#[cw_serde]
pub enum TokenExecuteMsg {
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
}
