use cosmwasm_std::Uint512;

use crate::error::ContractError;

/// BLS12-381 base-field modulus in the padded 64-byte layout.
pub const P: Uint512 = Uint512::from_be_bytes([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0x1a, 0x01, 0x11, 0xea, 0x39, 0x7f, 0xe6, 0x9a, 0x4b, 0x1b, 0xa7, 0xb6, 0x43, 0x4b, 0xac, 0xd7,
    0x64, 0x77, 0x4b, 0x84, 0xf3, 0x85, 0x12, 0xbf, 0x67, 0x30, 0xd2, 0xa0, 0xf6, 0xb0, 0xf6, 0x24,
    0x1e, 0xab, 0xff, 0xfe, 0xb1, 0x53, 0xff, 0xff, 0xb9, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xaa, 0xab,
]);

/// `(P - y) mod P` on a padded 64-byte field element. Zero maps to zero.
pub fn mod_negate(y: [u8; 64]) -> Result<[u8; 64], ContractError> {
    let value = Uint512::from_be_bytes(y);
    if value >= P {
        return Err(ContractError::InvalidFieldElement {
            value: hex::encode(y),
        });
    }
    if value.is_zero() {
        return Ok(y);
    }
    Ok((P - value).to_be_bytes())
}

/// Reduces an arbitrary 64-byte big-endian integer modulo P.
pub fn reduce(bytes: &[u8; 64]) -> [u8; 64] {
    (Uint512::from_be_bytes(*bytes) % P).to_be_bytes()
}
