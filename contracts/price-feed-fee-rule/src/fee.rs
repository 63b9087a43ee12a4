//! Gas cost converted to the fee token through a price feed.

use cosmwasm_std::{Uint128, Uint256};
use drandcast_common::price_feed::PriceDataResponse;

use crate::error::ContractError;

/// Checks that the feed answer is positive and no older than `max_price_age`.
pub fn validate_price(
    price: &PriceDataResponse,
    now: u64,
    max_price_age: u64,
) -> Result<Uint128, ContractError> {
    if price.answer.i128() <= 0 {
        return Err(ContractError::InvalidPrice {
            answer: price.answer,
        });
    }
    // Updates stamped in the future count as fresh
    if now.saturating_sub(price.updated_at) > max_price_age {
        return Err(ContractError::StalePrice {
            updated_at: price.updated_at,
            max_price_age,
            now,
        });
    }
    Ok(Uint128::new(price.answer.i128().unsigned_abs()))
}

/// `base_fee + ceil(gas_used * gas_price * answer / 10^decimals)`.
pub fn scaled_fee(
    base_fee: Uint128,
    gas_used: u64,
    gas_price: Uint128,
    answer: Uint128,
    decimals: u8,
) -> Result<Uint128, ContractError> {
    let numerator = Uint256::from(gas_used)
        .checked_mul(Uint256::from(gas_price))?
        .checked_mul(Uint256::from(answer))?;
    let scale = Uint256::from(10u8).checked_pow(u32::from(decimals))?;

    // scale is at least 1
    let mut gas_component = numerator / scale;
    if !(numerator % scale).is_zero() {
        gas_component = gas_component.checked_add(Uint256::one())?;
    }

    Ok(base_fee.checked_add(Uint128::try_from(gas_component)?)?)
}
