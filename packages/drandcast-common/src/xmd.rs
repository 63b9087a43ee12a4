use digest::core_api::BlockSizeUser;
use digest::Digest;
use sha2::Sha256;
use sha3::Keccak256;
use thiserror::Error;

/// Longest domain-separation tag that fits the one-byte length suffix.
pub const MAX_DST_LENGTH: usize = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmdError {
    #[error("domain separation tag is {len} bytes, at most 255 are allowed")]
    DstTooLong { len: usize },

    #[error("cannot expand to {len} bytes")]
    OutputTooLong { len: usize },

    #[error("requested output length must be non-zero")]
    ZeroLength,
}

/// `expand_message_xmd` from RFC 9380 section 5.3.1, generic over the hash.
///
/// The zero pad is one input block of `H`: 64 bytes for SHA-256 and 136 bytes
/// (the sponge rate) for Keccak-256.
///
/// ```text
/// b0 = H(Z_pad || msg || I2OSP(len, 2) || 0x00 || DST || I2OSP(len(DST), 1))
/// b1 = H(b0 || 0x01 || DST || len(DST))
/// bi = H((b0 XOR b(i-1)) || i || DST || len(DST))
/// ```
pub fn expand_message_xmd<H>(msg: &[u8], dst: &[u8], len: usize) -> Result<Vec<u8>, XmdError>
where
    H: Digest + BlockSizeUser,
{
    if dst.len() > MAX_DST_LENGTH {
        return Err(XmdError::DstTooLong { len: dst.len() });
    }
    if len == 0 {
        return Err(XmdError::ZeroLength);
    }

    let b_in_bytes = <H as Digest>::output_size();
    let ell = len.div_ceil(b_in_bytes);
    if ell > 255 || len > u16::MAX as usize {
        return Err(XmdError::OutputTooLong { len });
    }

    let dst_suffix = [dst.len() as u8];
    let z_pad = vec![0u8; H::block_size()];

    let b0 = H::new()
        .chain_update(&z_pad)
        .chain_update(msg)
        .chain_update((len as u16).to_be_bytes())
        .chain_update([0u8])
        .chain_update(dst)
        .chain_update(dst_suffix)
        .finalize();

    let mut bi = H::new()
        .chain_update(b0.as_slice())
        .chain_update([1u8])
        .chain_update(dst)
        .chain_update(dst_suffix)
        .finalize();

    let mut uniform = Vec::with_capacity(ell * b_in_bytes);
    uniform.extend_from_slice(&bi);

    for i in 2..=ell {
        let mixed: Vec<u8> = b0.iter().zip(bi.iter()).map(|(a, b)| a ^ b).collect();
        bi = H::new()
            .chain_update(&mixed)
            .chain_update([i as u8])
            .chain_update(dst)
            .chain_update(dst_suffix)
            .finalize();
        uniform.extend_from_slice(&bi);
    }

    uniform.truncate(len);
    Ok(uniform)
}

/// `XMD:SHA-256`, used by the BLS12-381 ciphersuite.
pub fn expand_message_xmd_sha256(msg: &[u8], dst: &[u8], len: usize) -> Result<Vec<u8>, XmdError> {
    expand_message_xmd::<Sha256>(msg, dst, len)
}

/// `XMD:KECCAK-256`, used by the BN254 ciphersuite.
pub fn expand_message_xmd_keccak256(
    msg: &[u8],
    dst: &[u8],
    len: usize,
) -> Result<Vec<u8>, XmdError> {
    expand_message_xmd::<Keccak256>(msg, dst, len)
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}
