//! Hash-to-curve onto BN254 G1 with `expand_message_xmd` over Keccak-256 and
//! the Shallue-van de Woestijne map (RFC 9380 section 6.6.1), `Z = 1`.

use cosmwasm_std::{Uint256, Uint512};
use drandcast_common::xmd::expand_message_xmd_keccak256;

use crate::error::ContractError;
use crate::field::{
    add_mod, curve_rhs, legendre, mod_exp_inverse, mod_exp_sqrt, mod_negate, mul_mod,
    reduce_wide, sgn0, sub_mod, P,
};
use crate::precompiles::{ec_add, G1_LENGTH, WORD_LENGTH};

/// Bytes drawn per field element: `ceil((ceil(log2(P)) + 128) / 8)`.
const L: usize = 48;

// SvdW constants for `Z = 1`, `A = 0`, `B = 3`.

/// `g(Z) = 4`
const C1: Uint256 = Uint256::from_u128(4);

/// `-Z / 2`
const C2: Uint256 = Uint256::from_be_bytes([
    0x18, 0x32, 0x27, 0x39, 0x70, 0x98, 0xd0, 0x14, 0xdc, 0x28, 0x22, 0xdb, 0x40, 0xc0, 0xac, 0x2e,
    0xcb, 0xc0, 0xb5, 0x48, 0xb4, 0x38, 0xe5, 0x46, 0x9e, 0x10, 0x46, 0x0b, 0x6c, 0x3e, 0x7e, 0xa3,
]);

/// `sqrt(-g(Z) * 3Z^2)`, the root with `sgn0 = 0`
const C3: Uint256 = Uint256::from_be_bytes([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x67, 0x89, 0xaf, 0x3a, 0x83, 0x52, 0x2e, 0xb3,
    0x53, 0xc9, 0x8f, 0xc6, 0xb3, 0x6d, 0x71, 0x3d, 0x5d, 0x8d, 0x1c, 0xc5, 0xdf, 0xff, 0xff, 0xfa,
]);

/// `-4 g(Z) / (3Z^2)`
const C4: Uint256 = Uint256::from_be_bytes([
    0x10, 0x21, 0x6f, 0x7b, 0xa0, 0x65, 0xe0, 0x0d, 0xe8, 0x1a, 0xc1, 0xe7, 0x80, 0x80, 0x72, 0xc9,
    0xdd, 0x2b, 0x23, 0x85, 0xcd, 0x7b, 0x43, 0x84, 0x69, 0x60, 0x2e, 0xb2, 0x48, 0x29, 0xa9, 0xbd,
]);

/// Hashes `msg` to two field elements: 96 bytes of XMD output split into two
/// 48-byte big-endian chunks, each reduced mod P.
pub fn hash_to_field(dst: &[u8], msg: &[u8]) -> Result<[Uint256; 2], ContractError> {
    let uniform = expand_message_xmd_keccak256(msg, dst, 2 * L)?;
    Ok([reduce_chunk(&uniform[..L]), reduce_chunk(&uniform[L..])])
}

fn reduce_chunk(chunk: &[u8]) -> Uint256 {
    let mut wide = [0u8; 64];
    wide[64 - chunk.len()..].copy_from_slice(chunk);
    reduce_wide(Uint512::from_be_bytes(wide))
}

/// Maps a field element to an affine G1 point `(x, y)`.
pub fn map_to_point(u: Uint256) -> Result<[Uint256; 2], ContractError> {
    if u >= P {
        return Err(ContractError::InvalidFieldElement {
            value: u.to_string(),
        });
    }
    let one = Uint256::one();

    let tv1 = mul_mod(mul_mod(u, u), C1);
    let tv2 = add_mod(one, tv1);
    let tv1 = sub_mod(one, tv1);
    let tv3 = mod_exp_inverse(mul_mod(tv1, tv2))?;
    let tv4 = mul_mod(mul_mod(mul_mod(u, tv1), tv3), C3);

    let x1 = sub_mod(C2, tv4);
    let x2 = add_mod(C2, tv4);
    let x3 = {
        let t = mul_mod(mul_mod(tv2, tv2), tv3);
        add_mod(mul_mod(mul_mod(t, t), C4), one)
    };

    for x in [x1, x2, x3] {
        let gx = curve_rhs(x);
        if legendre(gx)? == -1 {
            continue;
        }
        let (y, has_root) = mod_exp_sqrt(gx)?;
        if !has_root {
            break;
        }
        let y = if sgn0(y) != sgn0(u) { mod_negate(y) } else { y };
        return Ok([x, y]);
    }

    Err(ContractError::MapToPointFailed {
        value: u.to_string(),
    })
}

/// `hash_to_field` followed by mapping both elements and adding them on G1.
pub fn hash_to_point(dst: &[u8], msg: &[u8]) -> Result<[Uint256; 2], ContractError> {
    let [u0, u1] = hash_to_field(dst, msg)?;
    let p0 = map_to_point(u0)?;
    let p1 = map_to_point(u1)?;

    let mut input = Vec::with_capacity(2 * G1_LENGTH);
    for coordinate in p0.iter().chain(p1.iter()) {
        input.extend_from_slice(&coordinate.to_be_bytes());
    }
    let sum = ec_add(&input)?;

    let mut x = [0u8; WORD_LENGTH];
    let mut y = [0u8; WORD_LENGTH];
    x.copy_from_slice(&sum[..WORD_LENGTH]);
    y.copy_from_slice(&sum[WORD_LENGTH..G1_LENGTH]);
    Ok([Uint256::from_be_bytes(x), Uint256::from_be_bytes(y)])
}
