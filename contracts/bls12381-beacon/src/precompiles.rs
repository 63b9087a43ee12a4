//! BLS12-381 operations with the EIP-2537 byte ABI.
//!
//! A field element is 64 bytes: 16 zero bytes followed by the 48-byte
//! big-endian value. G1 is `x || y` (128 bytes), G2 is
//! `x.c0 || x.c1 || y.c0 || y.c1` (256 bytes). All zeros encode infinity.

use ark_bls12_381::{g1, Bls12_381, Fq, Fq2, G1Affine, G1Projective, G2Affine};
use ark_ec::hashing::curve_maps::wb::WBMap;
use ark_ec::hashing::map_to_curve_hasher::MapToCurve;
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{One, PrimeField, Zero};
use num_bigint::BigUint;
use thiserror::Error;

pub const FP_LENGTH: usize = 64;
pub const FP_VALUE_LENGTH: usize = 48;
pub const G1_LENGTH: usize = 2 * FP_LENGTH;
pub const G2_LENGTH: usize = 4 * FP_LENGTH;
pub const PAIRING_PAIR_LENGTH: usize = G1_LENGTH + G2_LENGTH;
pub const RESULT_LENGTH: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    #[error("malformed precompile input: {reason}")]
    MalformedInput { reason: String },

    #[error("field element is not canonical")]
    NonCanonicalFieldElement,

    #[error("point is not on the curve")]
    PointNotOnCurve,

    #[error("point is not in the prime-order subgroup")]
    PointNotInSubgroup,

    #[error("map to curve failed: {reason}")]
    MapToCurveFailed { reason: String },
}

/// Maps two field elements to G1 with the simplified SWU map and the
/// 11-isogeny, adds the images and clears the cofactor. Input is exactly
/// two 64-byte field elements; output is one 128-byte G1 point.
pub fn hash_to_g1(input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
    expect_length(input, 2 * FP_LENGTH)?;
    let u0 = decode_fp(&input[..FP_LENGTH])?;
    let u1 = decode_fp(&input[FP_LENGTH..])?;

    let mapper = <WBMap<g1::Config> as MapToCurve<G1Projective>>::new().map_err(|e| {
        PrecompileError::MapToCurveFailed {
            reason: e.to_string(),
        }
    })?;
    let q0 = mapper
        .map_to_curve(u0)
        .map_err(|e| PrecompileError::MapToCurveFailed {
            reason: e.to_string(),
        })?;
    let q1 = mapper
        .map_to_curve(u1)
        .map_err(|e| PrecompileError::MapToCurveFailed {
            reason: e.to_string(),
        })?;

    let point = (q0.into_group() + q1.into_group())
        .into_affine()
        .clear_cofactor();
    Ok(encode_g1(&point).to_vec())
}

/// Pairing check over `k >= 1` pairs of (G1, G2). Returns a 32-byte word whose
/// last byte is 1 when the product of pairings is the identity.
pub fn pairing_check(input: &[u8]) -> Result<Vec<u8>, PrecompileError> {
    if input.is_empty() || input.len() % PAIRING_PAIR_LENGTH != 0 {
        return Err(PrecompileError::MalformedInput {
            reason: format!(
                "pairing input length {} is not a positive multiple of {}",
                input.len(),
                PAIRING_PAIR_LENGTH
            ),
        });
    }

    let mut g1_points = Vec::new();
    let mut g2_points = Vec::new();
    for pair in input.chunks_exact(PAIRING_PAIR_LENGTH) {
        let p = decode_g1(&pair[..G1_LENGTH])?;
        let q = decode_g2(&pair[G1_LENGTH..])?;
        if p.infinity || q.infinity {
            continue;
        }
        g1_points.push(p);
        g2_points.push(q);
    }

    let success = g1_points.is_empty() || Bls12_381::multi_pairing(g1_points, g2_points).0.is_one();

    let mut out = vec![0u8; RESULT_LENGTH];
    out[RESULT_LENGTH - 1] = u8::from(success);
    Ok(out)
}

/// Decodes a G1 point, checking the curve equation and subgroup membership.
pub fn decode_g1(bytes: &[u8]) -> Result<G1Affine, PrecompileError> {
    expect_length(bytes, G1_LENGTH)?;
    let x = decode_fp(&bytes[..FP_LENGTH])?;
    let y = decode_fp(&bytes[FP_LENGTH..])?;
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::identity());
    }

    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(PrecompileError::PointNotOnCurve);
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(PrecompileError::PointNotInSubgroup);
    }
    Ok(point)
}

pub fn decode_g2(bytes: &[u8]) -> Result<G2Affine, PrecompileError> {
    expect_length(bytes, G2_LENGTH)?;
    let x = Fq2::new(
        decode_fp(&bytes[..FP_LENGTH])?,
        decode_fp(&bytes[FP_LENGTH..2 * FP_LENGTH])?,
    );
    let y = Fq2::new(
        decode_fp(&bytes[2 * FP_LENGTH..3 * FP_LENGTH])?,
        decode_fp(&bytes[3 * FP_LENGTH..])?,
    );
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
    out[..FP_LENGTH].copy_from_slice(&encode_fp(&point.x));
    out[FP_LENGTH..].copy_from_slice(&encode_fp(&point.y));
    out
}

pub fn encode_g2(point: &G2Affine) -> [u8; G2_LENGTH] {
    let mut out = [0u8; G2_LENGTH];
    if point.infinity {
        return out;
    }
    out[..FP_LENGTH].copy_from_slice(&encode_fp(&point.x.c0));
    out[FP_LENGTH..2 * FP_LENGTH].copy_from_slice(&encode_fp(&point.x.c1));
    out[2 * FP_LENGTH..3 * FP_LENGTH].copy_from_slice(&encode_fp(&point.y.c0));
    out[3 * FP_LENGTH..].copy_from_slice(&encode_fp(&point.y.c1));
    out
}

pub fn g2_generator() -> [u8; G2_LENGTH] {
    encode_g2(&G2Affine::generator())
}

pub fn decode_fp(bytes: &[u8]) -> Result<Fq, PrecompileError> {
    expect_length(bytes, FP_LENGTH)?;
    let (padding, value) = bytes.split_at(FP_LENGTH - FP_VALUE_LENGTH);
    if padding.iter().any(|b| *b != 0) {
        return Err(PrecompileError::NonCanonicalFieldElement);
    }
    let modulus: BigUint = Fq::MODULUS.into();
    let value = BigUint::from_bytes_be(value);
    if value >= modulus {
        return Err(PrecompileError::NonCanonicalFieldElement);
    }
    Ok(Fq::from(value))
}

pub fn encode_fp(element: &Fq) -> [u8; FP_LENGTH] {
    let value: BigUint = (*element).into();
    let bytes = value.to_bytes_be();
    let mut out = [0u8; FP_LENGTH];
    // zero encodes as a single 0x00 byte, which lands in place as well
    out[FP_LENGTH - bytes.len()..].copy_from_slice(&bytes);
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
