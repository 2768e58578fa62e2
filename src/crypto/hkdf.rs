//! HKDF over HMAC-SHA3 (RFC 5869).

use zeroize::Zeroizing;

use super::hmac::HmacSha3;
use super::kdf::hkdf_output_len;
use super::lanes::LaneWidth;
use super::sha3::Sha3Variant;
use crate::error::CryptoError;

/// Extract: `PRK = HMAC(salt, ikm)`, with an empty salt replaced by a
/// zero key of the digest length.
pub fn extract(variant: Sha3Variant, salt: &[u8], ikm: &[u8]) -> Zeroizing<Vec<u8>> {
    extract_with(variant, LaneWidth::detect(), salt, ikm)
}

fn extract_with(
    variant: Sha3Variant,
    width: LaneWidth,
    salt: &[u8],
    ikm: &[u8],
) -> Zeroizing<Vec<u8>> {
    let zero_key;
    let key = if salt.is_empty() {
        zero_key = vec![0u8; variant.output_len()];
        &zero_key[..]
    } else {
        salt
    };
    let mut mac = HmacSha3::with_lane_width(variant, key, width);
    mac.update(ikm);
    Zeroizing::new(mac.finalize())
}

/// Expand: `T(i) = HMAC(PRK, T(i-1) || info || i)` until `out_len` bytes.
pub fn expand(
    variant: Sha3Variant,
    prk: &[u8],
    info: &[u8],
    out_len: usize,
) -> Result<Vec<u8>, CryptoError> {
    expand_with(variant, LaneWidth::detect(), prk, info, out_len)
}

fn expand_with(
    variant: Sha3Variant,
    width: LaneWidth,
    prk: &[u8],
    info: &[u8],
    out_len: usize,
) -> Result<Vec<u8>, CryptoError> {
    let out_len = hkdf_output_len(out_len, variant.output_len())?;
    let keyed = HmacSha3::with_lane_width(variant, prk, width);

    let mut output = Vec::with_capacity(out_len);
    let mut t: Vec<u8> = Vec::new();
    let mut counter: u8 = 1;

    while output.len() < out_len {
        let mut mac = keyed.clone();
        mac.update(&t);
        mac.update(info);
        mac.update(&[counter]);
        t = mac.finalize();
        output.extend_from_slice(&t);
        counter = counter.wrapping_add(1);
    }

    output.truncate(out_len);
    Ok(output)
}

/// Full extract-and-expand.
pub fn hkdf(
    variant: Sha3Variant,
    ikm: &[u8],
    out_len: usize,
    info: &[u8],
    salt: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    hkdf_with_lane_width(variant, LaneWidth::detect(), ikm, out_len, info, salt)
}

/// [`hkdf`] with the permutation pinned to one lane representation.
pub fn hkdf_with_lane_width(
    variant: Sha3Variant,
    width: LaneWidth,
    ikm: &[u8],
    out_len: usize,
    info: &[u8],
    salt: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if ikm.is_empty() {
        return Err(CryptoError::InvalidInput(
            "hkdf input key material must not be empty".into(),
        ));
    }
    // validate before spending any work
    hkdf_output_len(out_len, variant.output_len())?;

    let prk = extract_with(variant, width, salt, ikm);
    expand_with(variant, width, &prk, info, out_len)
}
