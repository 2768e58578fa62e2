//! HMAC over SHA-3 (RFC 2104 with the sponge rate as block size).

use zeroize::Zeroize;

use super::lanes::LaneWidth;
use super::sha3::{Sha3, Sha3Variant};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// HMAC-SHA3 keyed state.
///
/// Cloning after `new` yields an independent MAC with the key already
/// absorbed, which PBKDF2 relies on.
#[derive(Clone)]
pub struct HmacSha3 {
    inner: Sha3,
    outer_key_pad: Vec<u8>,
}

// The inner sponge holds the absorbed ipad block and wipes itself.
impl Drop for HmacSha3 {
    fn drop(&mut self) {
        self.outer_key_pad.zeroize();
    }
}

impl HmacSha3 {
    pub fn new(variant: Sha3Variant, key: &[u8]) -> Self {
        Self::with_lane_width(variant, key, LaneWidth::detect())
    }

    pub fn with_lane_width(variant: Sha3Variant, key: &[u8], width: LaneWidth) -> Self {
        let block_len = variant.rate();
        let mut key_block = vec![0u8; block_len];

        if key.len() > block_len {
            let mut h = Sha3::with_lane_width(variant, width);
            h.update(key);
            let mut hashed = h.finalize();
            key_block[..hashed.len()].copy_from_slice(&hashed);
            hashed.zeroize();
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        let mut inner_key_pad: Vec<u8> = key_block.iter().map(|b| b ^ IPAD).collect();
        let outer_key_pad = key_block.iter().map(|b| b ^ OPAD).collect();
        key_block.zeroize();

        let mut inner = Sha3::with_lane_width(variant, width);
        inner.update(&inner_key_pad);
        inner_key_pad.zeroize();

        Self {
            inner,
            outer_key_pad,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finalize(self) -> Vec<u8> {
        let variant = self.inner.variant();
        let width = self.inner.lane_width();
        let mut inner_hash = self.inner.clone().finalize();

        let mut outer = Sha3::with_lane_width(variant, width);
        outer.update(&self.outer_key_pad);
        outer.update(&inner_hash);
        inner_hash.zeroize();
        outer.finalize()
    }

    /// One-shot HMAC.
    pub fn mac(variant: Sha3Variant, key: &[u8], data: &[u8]) -> Vec<u8> {
        let mut hmac = Self::new(variant, key);
        hmac.update(data);
        hmac.finalize()
    }
}
