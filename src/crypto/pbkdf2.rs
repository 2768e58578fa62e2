//! PBKDF2 with HMAC-SHA3 as the pseudo-random function (RFC 8018 §5.2).

use zeroize::Zeroize;

use super::hmac::HmacSha3;
use super::kdf::{check_iterations, pbkdf2_output_len};
use super::lanes::LaneWidth;
use super::sha3::Sha3Variant;
use crate::error::CryptoError;

pub fn pbkdf2(
    variant: Sha3Variant,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_len: usize,
) -> Result<Vec<u8>, CryptoError> {
    pbkdf2_with_lane_width(variant, LaneWidth::detect(), password, salt, iterations, out_len)
}

/// [`pbkdf2`] with the permutation pinned to one lane representation.
pub fn pbkdf2_with_lane_width(
    variant: Sha3Variant,
    width: LaneWidth,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_len: usize,
) -> Result<Vec<u8>, CryptoError> {
    check_iterations(iterations)?;
    let out_len = pbkdf2_output_len(out_len, variant.output_len())?;

    let keyed = HmacSha3::with_lane_width(variant, password, width);
    let mut output = Vec::with_capacity(out_len);
    let mut block_index: u32 = 1;

    while output.len() < out_len {
        let mut mac = keyed.clone();
        mac.update(salt);
        mac.update(&block_index.to_be_bytes());
        let mut u = mac.finalize();
        let mut acc = u.clone();

        for _ in 1..iterations {
            let mut mac = keyed.clone();
            mac.update(&u);
            u = mac.finalize();
            for (a, b) in acc.iter_mut().zip(&u) {
                *a ^= b;
            }
        }

        let take = (out_len - output.len()).min(acc.len());
        output.extend_from_slice(&acc[..take]);
        u.zeroize();
        acc.zeroize();
        block_index = block_index.wrapping_add(1);
    }

    Ok(output)
}
