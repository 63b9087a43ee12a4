use drandcast_common::xmd::expand_message_xmd_sha256;

use crate::error::ContractError;
use crate::field::reduce;
use crate::precompiles::{hash_to_g1, FP_LENGTH, G1_LENGTH};

/// Hashes `msg` onto G1: SHA-256 XMD to 128 bytes, each 64-byte half reduced
/// mod P into a field element, then mapped and summed by `hash_to_g1`.
pub fn hash_to_point(dst: &[u8], msg: &[u8]) -> Result<[u8; G1_LENGTH], ContractError> {
    let uniform = expand_message_xmd_sha256(msg, dst, 2 * FP_LENGTH)?;

    let mut input = [0u8; 2 * FP_LENGTH];
    for (i, chunk) in uniform.chunks_exact(FP_LENGTH).enumerate() {
        let mut wide = [0u8; FP_LENGTH];
        wide.copy_from_slice(chunk);
        input[i * FP_LENGTH..(i + 1) * FP_LENGTH].copy_from_slice(&reduce(&wide));
    }

    let output = hash_to_g1(&input)?;
    output
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: output.len() })
}
