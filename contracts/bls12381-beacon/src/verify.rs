use ark_bls12_381::{G1Affine, G2Affine};
use ark_serialize::CanonicalDeserialize;
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::field::mod_negate;
use crate::hash_to_curve::hash_to_point;
use crate::precompiles::{
    decode_g2, encode_g1, encode_g2, g2_generator, pairing_check, FP_LENGTH, G1_LENGTH,
    G2_LENGTH, PAIRING_PAIR_LENGTH,
};

/// Domain separation tag of drand's `bls-unchained-g1-rfc9380` scheme.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

pub const SIGNATURE_LENGTH: usize = G1_LENGTH;
pub const PUBLIC_KEY_LENGTH: usize = G2_LENGTH;

pub const COMPRESSED_SIGNATURE_LENGTH: usize = 48;
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 96;

/// Unchained message for `round`: sha256 of the big-endian round number.
pub fn round_message(round: u64) -> [u8; 32] {
    Sha256::digest(round.to_be_bytes()).into()
}

pub fn validate_public_key(public_key: &[u8]) -> Result<(), ContractError> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(ContractError::InvalidPublicKeyLength {
            expected: PUBLIC_KEY_LENGTH,
            got: public_key.len(),
        });
    }
    let point = decode_g2(public_key).map_err(|e| ContractError::InvalidPublicKey {
        reason: e.to_string(),
    })?;
    if point.infinity {
        return Err(ContractError::InvalidPublicKey {
            reason: "point at infinity".to_string(),
        });
    }
    Ok(())
}

/// Verifies `signature` as the beacon for `round`.
///
/// Checks `e(-H(m), pk) * e(sig, G2) == 1`.
pub fn verify_beacon_round(
    public_key: &[u8],
    round: u64,
    signature: &[u8],
) -> Result<(), ContractError> {
    validate_public_key(public_key)?;
    if signature.len() != SIGNATURE_LENGTH {
        return Err(ContractError::InvalidSignatureLength {
            expected: SIGNATURE_LENGTH,
            got: signature.len(),
        });
    }

    let hashed = hash_to_point(DST, &round_message(round))?;
    let mut y = [0u8; FP_LENGTH];
    y.copy_from_slice(&hashed[FP_LENGTH..]);
    let neg_y = mod_negate(y)?;

    let mut input = Vec::with_capacity(2 * PAIRING_PAIR_LENGTH);
    input.extend_from_slice(&hashed[..FP_LENGTH]);
    input.extend_from_slice(&neg_y);
    input.extend_from_slice(public_key);
    input.extend_from_slice(signature);
    input.extend_from_slice(&g2_generator());

    match pairing_check(&input) {
        Ok(out) if out.last() == Some(&1) => Ok(()),
        _ => Err(ContractError::SignatureInvalid { round }),
    }
}

/// Expands a drand 48-byte compressed G1 signature into the 128-byte layout.
pub fn decompress_signature(compressed: &[u8]) -> Result<[u8; G1_LENGTH], ContractError> {
    if compressed.len() != COMPRESSED_SIGNATURE_LENGTH {
        return Err(ContractError::InvalidSignatureLength {
            expected: COMPRESSED_SIGNATURE_LENGTH,
            got: compressed.len(),
        });
    }
    let point = G1Affine::deserialize_compressed(compressed).map_err(|e| {
        ContractError::Decompression {
            what: "signature".to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(encode_g1(&point))
}

/// Expands a drand 96-byte compressed G2 public key into the 256-byte layout.
pub fn decompress_public_key(compressed: &[u8]) -> Result<[u8; G2_LENGTH], ContractError> {
    if compressed.len() != COMPRESSED_PUBLIC_KEY_LENGTH {
        return Err(ContractError::InvalidPublicKeyLength {
            expected: COMPRESSED_PUBLIC_KEY_LENGTH,
            got: compressed.len(),
        });
    }
    let point = G2Affine::deserialize_compressed(compressed).map_err(|e| {
        ContractError::Decompression {
            what: "public key".to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(encode_g2(&point))
}
