use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, OverflowError, Uint128};
use cw_storage_plus::Item;

pub const CONFIG: Item<FeeConfig> = Item::new("config");

#[cw_serde]
pub struct FeeConfig {
    pub owner: Addr,
    /// Charged on every request regardless of gas
    pub fixed_fee: Uint128,
    /// Reference price used by `CalculateFee`
    pub gas_price: Uint128,
}

impl FeeConfig {
    /// `fixed_fee + gas_used * gas_price`; just `fixed_fee` for zero gas.
    pub fn fee(&self, gas_used: u64, gas_price: Uint128) -> Result<Uint128, OverflowError> {
        if gas_used == 0 {
            return Ok(self.fixed_fee);
        }
        let gas_component = Uint128::from(gas_used).checked_mul(gas_price)?;
        self.fixed_fee.checked_add(gas_component)
    }
}
