use cosmwasm_std::Uint256;
use drandcast_common::keccak256;

use crate::error::ContractError;
use crate::field::{is_on_curve, P};
use crate::hash_to_curve::hash_to_point;
use crate::precompiles::{
    decode_g2, ec_pairing, negated_g2_generator, G1_LENGTH, G2_LENGTH, WORD_LENGTH,
};

/// Domain separation tag of the BN254 unchained beacon scheme.
pub const DST: &[u8] = b"BLS_SIG_BN254G1_XMD:KECCAK-256_SVDW_RO_NUL_";

pub const SIGNATURE_LENGTH: usize = G1_LENGTH;
pub const PUBLIC_KEY_LENGTH: usize = G2_LENGTH;

/// The signed message of an unchained round: keccak256 of the big-endian round.
pub fn round_message(round: u64) -> [u8; 32] {
    keccak256(&round.to_be_bytes())
}

/// Checks length, field range, curve and subgroup membership of a G2 public
/// key in EIP-197 order.
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

/// Verifies `signature` as the beacon for `round` under `public_key`.
///
/// Checks `e(sig, -G2) * e(H(m), pk) == 1` with a single pairing call.
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
    let sig_x = word(&signature[..WORD_LENGTH]);
    let sig_y = word(&signature[WORD_LENGTH..]);
    if sig_x >= P || sig_y >= P || !is_on_curve(sig_x, sig_y) {
        return Err(ContractError::InvalidSignaturePoint { round });
    }

    let [hx, hy] = hash_to_point(DST, &round_message(round))?;

    let mut input = Vec::with_capacity(2 * (G1_LENGTH + G2_LENGTH));
    input.extend_from_slice(signature);
    input.extend_from_slice(&negated_g2_generator());
    input.extend_from_slice(&hx.to_be_bytes());
    input.extend_from_slice(&hy.to_be_bytes());
    input.extend_from_slice(public_key);

    match ec_pairing(&input) {
        Ok(out) if out.iter().any(|b| *b != 0) => Ok(()),
        _ => Err(ContractError::SignatureInvalid { round }),
    }
}

fn word(bytes: &[u8]) -> Uint256 {
    let mut out = [0u8; WORD_LENGTH];
    out.copy_from_slice(bytes);
    Uint256::from_be_bytes(out)
}
