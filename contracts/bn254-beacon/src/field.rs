//! Arithmetic in the BN254 base field on `Uint256` words.
//!
//! Every input is expected to be reduced (`< P`). Exponentiations go through
//! the `modexp` precompile so the cost profile matches on-chain execution.

use cosmwasm_std::{Uint256, Uint512};

use crate::error::ContractError;
use crate::precompiles::{modexp, WORD_LENGTH};

/// BN254 base-field modulus.
pub const P: Uint256 = Uint256::from_be_bytes([
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
]);

/// Constant term of `y^2 = x^3 + 3`.
pub const CURVE_B: u64 = 3;

pub fn add_mod(a: Uint256, b: Uint256) -> Uint256 {
    // a, b < P < 2^254, so the sum cannot overflow
    let sum = a + b;
    if sum >= P {
        sum - P
    } else {
        sum
    }
}

pub fn sub_mod(a: Uint256, b: Uint256) -> Uint256 {
    if a >= b {
        a - b
    } else {
        P - (b - a)
    }
}

pub fn mul_mod(a: Uint256, b: Uint256) -> Uint256 {
    reduce_wide(a.full_mul(b))
}

/// `(P - y) mod P`; zero stays zero.
pub fn mod_negate(y: Uint256) -> Uint256 {
    if y.is_zero() {
        Uint256::zero()
    } else {
        P - y
    }
}

/// Reduces a 512-bit value modulo P.
pub fn reduce_wide(value: Uint512) -> Uint256 {
    let reduced = value % Uint512::from(P);
    let bytes = reduced.to_be_bytes();
    let mut low = [0u8; 32];
    low.copy_from_slice(&bytes[32..]);
    Uint256::from_be_bytes(low)
}

/// `base^exponent mod P` through the modexp precompile.
pub fn mod_exp(base: Uint256, exponent: Uint256) -> Result<Uint256, ContractError> {
    let mut input = Vec::with_capacity(6 * WORD_LENGTH);
    for _ in 0..3 {
        input.extend_from_slice(&Uint256::from(WORD_LENGTH as u64).to_be_bytes());
    }
    input.extend_from_slice(&base.to_be_bytes());
    input.extend_from_slice(&exponent.to_be_bytes());
    input.extend_from_slice(&P.to_be_bytes());

    let output = modexp(&input)?;
    let word: [u8; 32] = output
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidFieldElement {
            value: hex::encode(&output),
        })?;
    Ok(Uint256::from_be_bytes(word))
}

/// `a^(P-2)`; maps zero to zero.
pub fn mod_exp_inverse(a: Uint256) -> Result<Uint256, ContractError> {
    mod_exp(a, P - Uint256::from(2u64))
}

/// `a^((P+1)/4)`, a square root candidate since `P = 3 mod 4`. The flag tells
/// whether the candidate actually squares back to `a`.
pub fn mod_exp_sqrt(a: Uint256) -> Result<(Uint256, bool), ContractError> {
    let exponent = (P + Uint256::one()) / Uint256::from(4u64);
    let root = mod_exp(a, exponent)?;
    Ok((root, mul_mod(root, root) == a))
}

/// Euler's criterion: 1 for a non-zero square, -1 for a non-square, 0 for zero.
pub fn legendre(a: Uint256) -> Result<i8, ContractError> {
    let exponent = (P - Uint256::one()) / Uint256::from(2u64);
    let symbol = mod_exp(a, exponent)?;
    if symbol.is_zero() {
        Ok(0)
    } else if symbol == Uint256::one() {
        Ok(1)
    } else {
        Ok(-1)
    }
}

/// `g(x) = x^3 + 3`.
pub fn curve_rhs(x: Uint256) -> Uint256 {
    add_mod(mul_mod(mul_mod(x, x), x), Uint256::from(CURVE_B))
}

pub fn is_on_curve(x: Uint256, y: Uint256) -> bool {
    if x >= P || y >= P {
        return false;
    }
    mul_mod(y, y) == curve_rhs(x)
}

pub fn sgn0(a: Uint256) -> u8 {
    a.to_be_bytes()[31] & 1
}
