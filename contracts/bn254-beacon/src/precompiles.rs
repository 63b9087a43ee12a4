//! BN254 precompiles with the byte ABI of EIP-196 (`ecAdd`), EIP-197
//! (`ecPairing`) and EIP-198 (`modexp`), backed by arkworks and num-bigint.
//!
//! Points are big-endian 32-byte words. G1 is `x || y`, G2 is
//! `x_im || x_re || y_im || y_re`; the all-zero encoding is the point at
//! infinity.

use ark_bn254::{Bn254, Fq, Fq2, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{One, PrimeField, Zero};
use num_bigint::BigUint;
use thiserror::Error;

pub const WORD_LENGTH: usize = 32;
pub const G1_LENGTH: usize = 2 * WORD_LENGTH;
pub const G2_LENGTH: usize = 4 * WORD_LENGTH;
pub const PAIRING_PAIR_LENGTH: usize = G1_LENGTH + G2_LENGTH;

/// Upper bound on each modexp operand; larger lengths are rejected outright.
pub const MAX_MODEXP_OPERAND_LENGTH: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    #[error("malformed precompile input: {reason}")]
    MalformedInput { reason: String },

    #[error("coordinate is not a canonical field element")]
    NonCanonicalFieldElement,

    #[error("point is not on the curve")]
    PointNotOnCurve,

    #[error("point is not in the prime-order subgroup")]
    PointNotInSubgroup,
}

/// EIP-198 modular exponentiation.
///
/// Input: `base_len || exp_len || mod_len` (32-byte words) followed by the
/// three operands. Missing trailing bytes read as zero. The result is
/// left-padded to `mod_len`; a zero modulus yields all zeros.
pub fn modexp(input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
    let base_len = read_length(input, 0)?;
    let exp_len = read_length(input, WORD_LENGTH)?;
    let mod_len = read_length(input, 2 * WORD_LENGTH)?;

    let base_start = 3 * WORD_LENGTH;
    let exp_start = base_start + base_len;
    let mod_start = exp_start + exp_len;

    let base = BigUint::from_bytes_be(&read_padded(input, base_start, base_len));
    let exponent = BigUint::from_bytes_be(&read_padded(input, exp_start, exp_len));
    let modulus = BigUint::from_bytes_be(&read_padded(input, mod_start, mod_len));

    if modulus.is_zero() {
        return Ok(vec![0u8; mod_len]);
    }

    let result = base.modpow(&exponent, &modulus);
    Ok(left_pad(&result.to_bytes_be(), mod_len))
}

/// EIP-196 point addition on G1. Input is read as exactly 128 bytes,
/// zero-extended when shorter.
pub fn ec_add(input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
    let input = read_padded(input, 0, 2 * G1_LENGTH);
    let p = decode_g1(&input[..G1_LENGTH])?;
    let q = decode_g1(&input[G1_LENGTH..])?;

    let sum = (p.into_group() + q.into_group()).into_affine();
    Ok(encode_g1(&sum).to_vec())
}

/// EIP-197 pairing check over `k` pairs of (G1, G2).
///
/// Returns a 32-byte word equal to 1 when the product of pairings is the
/// identity and 0 otherwise. An empty input is a trivially true check.
pub fn ec_pairing(input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
    if input.len() % PAIRING_PAIR_LENGTH != 0 {
        return Err(PrecompileError::MalformedInput {
            reason: format!(
                "pairing input length {} is not a multiple of {}",
                input.len(),
                PAIRING_PAIR_LENGTH
            ),
        });
    }

    let mut g1_points = Vec::with_capacity(input.len() / PAIRING_PAIR_LENGTH);
    let mut g2_points = Vec::with_capacity(input.len() / PAIRING_PAIR_LENGTH);
    for pair in input.chunks_exact(PAIRING_PAIR_LENGTH) {
        let g1 = decode_g1(&pair[..G1_LENGTH])?;
        let g2 = decode_g2(&pair[G1_LENGTH..])?;
        // e(O, Q) = e(P, O) = 1 contributes nothing to the product
        if g1.infinity || g2.infinity {
            continue;
        }
        g1_points.push(g1);
        g2_points.push(g2);
    }

    let success = g1_points.is_empty() || Bn254::multi_pairing(g1_points, g2_points).0.is_one();

    let mut out = vec![0u8; WORD_LENGTH];
    out[WORD_LENGTH - 1] = u8::from(success);
    Ok(out)
}

pub fn decode_g1(bytes: &[u8]) -> Result<G1Affine, PrecompileError> {
    expect_length(bytes, G1_LENGTH)?;
    let x = read_fq(&bytes[..WORD_LENGTH])?;
    let y = read_fq(&bytes[WORD_LENGTH..])?;
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::identity());
    }

    // G1 has cofactor 1, so being on the curve implies subgroup membership
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(PrecompileError::PointNotOnCurve);
    }
    Ok(point)
}

pub fn decode_g2(bytes: &[u8]) -> Result<G2Affine, PrecompileError> {
    expect_length(bytes, G2_LENGTH)?;
    let x_im = read_fq(&bytes[..WORD_LENGTH])?;
    let x_re = read_fq(&bytes[WORD_LENGTH..2 * WORD_LENGTH])?;
    let y_im = read_fq(&bytes[2 * WORD_LENGTH..3 * WORD_LENGTH])?;
    let y_re = read_fq(&bytes[3 * WORD_LENGTH..])?;

    let x = Fq2::new(x_re, x_im);
    let y = Fq2::new(y_re, y_im);
    if x.is_zero() && y.is_zero() {
        return Ok(G2Affine::identity());
    }

    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(PrecompileError::PointNotOnCurve);
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(PrecompileError::PointNotInSubgroup);
    }
    Ok(point)
}

pub fn encode_g1(point: &G1Affine) -> [u8; G1_LENGTH] {
    let mut out = [0u8; G1_LENGTH];
    if point.infinity {
        return out;
    }
    out[..WORD_LENGTH].copy_from_slice(&write_fq(&point.x));
    out[WORD_LENGTH..].copy_from_slice(&write_fq(&point.y));
    out
}

pub fn encode_g2(point: &G2Affine) -> [u8; G2_LENGTH] {
    let mut out = [0u8; G2_LENGTH];
    if point.infinity {
        return out;
    }
    out[..WORD_LENGTH].copy_from_slice(&write_fq(&point.x.c1));
    out[WORD_LENGTH..2 * WORD_LENGTH].copy_from_slice(&write_fq(&point.x.c0));
    out[2 * WORD_LENGTH..3 * WORD_LENGTH].copy_from_slice(&write_fq(&point.y.c1));
    out[3 * WORD_LENGTH..].copy_from_slice(&write_fq(&point.y.c0));
    out
}

/// `-G2`, the fixed second operand paired with the signature.
pub fn negated_g2_generator() -> [u8; G2_LENGTH] {
    encode_g2(&-G2Affine::generator())
}

fn read_fq(word: &[u8]) -> Result<Fq, PrecompileError> {
    let modulus: BigUint = Fq::MODULUS.into();
    let value = BigUint::from_bytes_be(word);
    if value >= modulus {
        return Err(PrecompileError::NonCanonicalFieldElement);
    }
    Ok(Fq::from(value))
}

fn write_fq(element: &Fq) -> [u8; WORD_LENGTH] {
    let value: BigUint = (*element).into();
    let bytes = left_pad(&value.to_bytes_be(), WORD_LENGTH);
    let mut out = [0u8; WORD_LENGTH];
    out.copy_from_slice(&bytes);
    out
}

fn read_length(input: &[u8], offset: usize) -> Result<usize, PrecompileError> {
    let word = read_padded(input, offset, WORD_LENGTH);
    let value = BigUint::from_bytes_be(&word);
    if value > BigUint::from(MAX_MODEXP_OPERAND_LENGTH) {
        return Err(PrecompileError::MalformedInput {
            reason: format!("modexp operand length {value} exceeds {MAX_MODEXP_OPERAND_LENGTH}"),
        });
    }
    // bounded by MAX_MODEXP_OPERAND_LENGTH above, so it fits in two bytes
    Ok(usize::from(u16::from_be_bytes([word[30], word[31]])))
}

/// Copies `len` bytes starting at `offset`, treating bytes past the end of
/// `input` as zero.
fn read_padded(input: &[u8], offset: usize, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    if offset < input.len() {
        let available = &input[offset..];
        let n = available.len().min(len);
        out[..n].copy_from_slice(&available[..n]);
    }
    out
}

fn left_pad(bytes: &[u8], len: usize) -> Vec<u8> {
    // BigUint encodes zero as a single 0x00 byte
    let trimmed = match bytes.iter().position(|b| *b != 0) {
        Some(first) => &bytes[first..],
        None => &[],
    };
    let mut out = vec![0u8; len];
    let n = trimmed.len().min(len);
    out[len - n..].copy_from_slice(&trimmed[trimmed.len() - n..]);
    out
}

fn expect_length(bytes: &[u8], expected: usize) -> Result<(), PrecompileError> {
    if bytes.len() != expected {
        return Err(PrecompileError::MalformedInput {
            reason: format!("expected {expected} bytes, got {}", bytes.len()),
        });
    }
    Ok(())
}
