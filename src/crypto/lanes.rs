//! Keccak lane arithmetic.
//!
//! A lane is one 64-bit word of the 5x5 Keccak state. [`Lane64`] keeps it in
//! a native `u64`; [`Lane32`] keeps it as two 32-bit halves and never touches
//! a 64-bit integer, which is what a host without native 64-bit words does.
//! Both must agree bit for bit on every operation.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

use crate::error::CryptoError;

pub trait Lane: Copy + PartialEq + std::fmt::Debug + Zeroize {
    const ZERO: Self;

    /// Build a lane from 8 little-endian bytes.
    fn from_le_bytes(bytes: [u8; 8]) -> Self;

    fn to_le_bytes(self) -> [u8; 8];

    /// Rotate left by `n` bits; `n` is taken modulo 64.
    fn rotate_left(self, n: u32) -> Self;

    fn xor(self, other: Self) -> Self;

    fn and(self, other: Self) -> Self;

    fn not(self) -> Self;

    fn from_u64(value: u64) -> Self {
        Self::from_le_bytes(value.to_le_bytes())
    }

    fn to_u64(self) -> u64 {
        u64::from_le_bytes(self.to_le_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lane64(pub u64);

impl Lane for Lane64 {
    const ZERO: Self = Lane64(0);

    fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Lane64(u64::from_le_bytes(bytes))
    }

    fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    fn rotate_left(self, n: u32) -> Self {
        Lane64(self.0.rotate_left(n % 64))
    }

    fn xor(self, other: Self) -> Self {
        Lane64(self.0 ^ other.0)
    }

    fn and(self, other: Self) -> Self {
        Lane64(self.0 & other.0)
    }

    fn not(self) -> Self {
        Lane64(!self.0)
    }
}

impl Zeroize for Lane64 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// A lane split into high and low 32-bit halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lane32 {
    pub hi: u32,
    pub lo: u32,
}

impl Lane for Lane32 {
    const ZERO: Self = Lane32 { hi: 0, lo: 0 };

    fn from_le_bytes(bytes: [u8; 8]) -> Self {
        let [b0, b1, b2, b3, b4, b5, b6, b7] = bytes;
        Lane32 {
            lo: u32::from_le_bytes([b0, b1, b2, b3]),
            hi: u32::from_le_bytes([b4, b5, b6, b7]),
        }
    }

    fn to_le_bytes(self) -> [u8; 8] {
        let lo = self.lo.to_le_bytes();
        let hi = self.hi.to_le_bytes();
        [lo[0], lo[1], lo[2], lo[3], hi[0], hi[1], hi[2], hi[3]]
    }

    fn rotate_left(self, n: u32) -> Self {
        let n = n % 64;
        // a rotation by 32 is a swap of the halves
        let (hi, lo) = if n >= 32 {
            (self.lo, self.hi)
        } else {
            (self.hi, self.lo)
        };
        let s = n % 32;
        if s == 0 {
            return Lane32 { hi, lo };
        }
        Lane32 {
            hi: (hi << s) | (lo >> (32 - s)),
            lo: (lo << s) | (hi >> (32 - s)),
        }
    }

    fn xor(self, other: Self) -> Self {
        Lane32 {
            hi: self.hi ^ other.hi,
            lo: self.lo ^ other.lo,
        }
    }

    fn and(self, other: Self) -> Self {
        Lane32 {
            hi: self.hi & other.hi,
            lo: self.lo & other.lo,
        }
    }

    fn not(self) -> Self {
        Lane32 {
            hi: !self.hi,
            lo: !self.lo,
        }
    }
}

impl Zeroize for Lane32 {
    fn zeroize(&mut self) {
        self.hi.zeroize();
        self.lo.zeroize();
    }
}

/// Which lane representation the permutation runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneWidth {
    Native64,
    Split32,
}

impl LaneWidth {
    /// Lane representation matching the target's native word size.
    pub const fn detect() -> Self {
        if cfg!(target_pointer_width = "64") {
            LaneWidth::Native64
        } else {
            LaneWidth::Split32
        }
    }
}

impl Default for LaneWidth {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for LaneWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneWidth::Native64 => f.write_str("native64"),
            LaneWidth::Split32 => f.write_str("split32"),
        }
    }
}

impl FromStr for LaneWidth {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native64" | "64" => Ok(LaneWidth::Native64),
            "split32" | "32" => Ok(LaneWidth::Split32),
            "auto" => Ok(LaneWidth::detect()),
            other => Err(CryptoError::InvalidInput(format!("unknown lane width {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_words(n: usize) -> Vec<u64> {
        let mut buf = vec![0u8; n * 8];
        getrandom::fill(&mut buf).unwrap();
        buf.chunks_exact(8)
            .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
            .collect()
    }

    #[test]
    fn split_lane_keeps_byte_order() {
        let lane = Lane32::from_u64(0x0123_4567_89ab_cdef);
        assert_eq!(lane.hi, 0x0123_4567);
        assert_eq!(lane.lo, 0x89ab_cdef);
        assert_eq!(lane.to_u64(), 0x0123_4567_89ab_cdef);
    }

    #[test]
    fn rotations_agree_for_every_amount() {
        for w in random_words(32) {
            for n in 0..64 {
                let native = Lane64(w).rotate_left(n);
                let split = Lane32::from_u64(w).rotate_left(n);
                assert_eq!(native.to_u64(), split.to_u64(), "w={w:#x} n={n}");
            }
        }
    }

    #[test]
    fn rotation_by_32_swaps_halves() {
        let lane = Lane32 { hi: 0xdead_beef, lo: 0x0bad_f00d };
        assert_eq!(lane.rotate_left(32), Lane32 { hi: 0x0bad_f00d, lo: 0xdead_beef });
        assert_eq!(lane.rotate_left(64), lane);
    }

    #[test]
    fn bitwise_ops_agree() {
        let words = random_words(64);
        for pair in words.chunks_exact(2) {
            let (a, b) = (pair[0], pair[1]);
            let (a64, b64) = (Lane64(a), Lane64(b));
            let (a32, b32) = (Lane32::from_u64(a), Lane32::from_u64(b));

            assert_eq!(a64.xor(b64).to_u64(), a32.xor(b32).to_u64());
            assert_eq!(a64.and(b64).to_u64(), a32.and(b32).to_u64());
            assert_eq!(a64.not().to_u64(), a32.not().to_u64());
            assert_eq!(a ^ b, a32.xor(b32).to_u64());
            assert_eq!(!a & b, a32.not().and(b32).to_u64());
        }
    }

    #[test]
    fn zeroize_clears_both_representations() {
        let mut native = Lane64(u64::MAX);
        let mut split = Lane32::from_u64(u64::MAX);
        native.zeroize();
        split.zeroize();
        assert_eq!(native, Lane64::ZERO);
        assert_eq!(split, Lane32::ZERO);
    }

    #[test]
    fn lane_width_names_parse_back() {
        for width in [LaneWidth::Native64, LaneWidth::Split32] {
            assert_eq!(width.to_string().parse::<LaneWidth>().unwrap(), width);
        }
        assert_eq!("32".parse::<LaneWidth>().unwrap(), LaneWidth::Split32);
        assert_eq!("auto".parse::<LaneWidth>().unwrap(), LaneWidth::detect());
        assert!("16".parse::<LaneWidth>().is_err());
    }

    #[test]
    fn detect_matches_pointer_width() {
        #[cfg(target_pointer_width = "64")]
        assert_eq!(LaneWidth::detect(), LaneWidth::Native64);
        #[cfg(not(target_pointer_width = "64"))]
        assert_eq!(LaneWidth::detect(), LaneWidth::Split32);
    }
}
