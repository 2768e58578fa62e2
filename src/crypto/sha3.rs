//! SHA-3 (FIPS 202) sponge construction on top of Keccak-f[1600].

use std::fmt;

use zeroize::Zeroize;

use super::keccak::{LANES, keccak_f};
use super::lanes::{Lane, Lane32, Lane64, LaneWidth};
use crate::error::CryptoError;

/// Largest rate of any supported sponge (SHAKE128).
const MAX_RATE: usize = 168;

const SHA3_DOMAIN: u8 = 0x06;
const SHAKE_DOMAIN: u8 = 0x1f;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sha3Variant {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl Sha3Variant {
    pub const ALL: [Sha3Variant; 4] = [
        Sha3Variant::Sha3_224,
        Sha3Variant::Sha3_256,
        Sha3Variant::Sha3_384,
        Sha3Variant::Sha3_512,
    ];

    pub const fn bits(self) -> usize {
        match self {
            Sha3Variant::Sha3_224 => 224,
            Sha3Variant::Sha3_256 => 256,
            Sha3Variant::Sha3_384 => 384,
            Sha3Variant::Sha3_512 => 512,
        }
    }

    /// Digest length in bytes.
    pub const fn output_len(self) -> usize {
        self.bits() / 8
    }

    /// Sponge rate in bytes; also the HMAC block size.
    pub const fn rate(self) -> usize {
        200 - 2 * self.output_len()
    }
}

impl TryFrom<u16> for Sha3Variant {
    type Error = CryptoError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            224 => Ok(Sha3Variant::Sha3_224),
            256 => Ok(Sha3Variant::Sha3_256),
            384 => Ok(Sha3Variant::Sha3_384),
            512 => Ok(Sha3Variant::Sha3_512),
            other => Err(CryptoError::UnsupportedAlgorithm(format!("sha3-{other}"))),
        }
    }
}

impl fmt::Display for Sha3Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha3-{}", self.bits())
    }
}

/// Lanes and buffer are wiped on drop; HMAC leaves its ipad block absorbed here.
#[derive(Clone)]
pub(crate) struct Sponge<L: Lane> {
    state: [L; LANES],
    rate: usize,
    domain: u8,
    buffer: [u8; MAX_RATE],
    buffered: usize,
}

fn absorb_block<L: Lane>(state: &mut [L; LANES], block: &[u8]) {
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane = lane.xor(L::from_le_bytes(word));
    }
    keccak_f(state);
}

impl<L: Lane> Sponge<L> {
    pub(crate) fn new(rate: usize, domain: u8) -> Self {
        debug_assert!(rate % 8 == 0 && rate <= MAX_RATE);
        Self {
            state: [L::ZERO; LANES],
            rate,
            domain,
            buffer: [0u8; MAX_RATE],
            buffered: 0,
        }
    }

    pub(crate) fn absorb(&mut self, mut data: &[u8]) {
        let rate = self.rate;

        if self.buffered > 0 {
            let take = (rate - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < rate {
                return;
            }
            absorb_block(&mut self.state, &self.buffer[..rate]);
            self.buffered = 0;
        }

        while data.len() >= rate {
            absorb_block(&mut self.state, &data[..rate]);
            data = &data[rate..];
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    /// Pad, absorb the final block and fill `out`, permuting between
    /// rate-sized chunks.
    pub(crate) fn squeeze(mut self, out: &mut [u8]) {
        let rate = self.rate;

        let mut last = [0u8; MAX_RATE];
        last[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        last[self.buffered] ^= self.domain;
        last[rate - 1] ^= 0x80;
        absorb_block(&mut self.state, &last[..rate]);

        last.zeroize();

        let mut block = [0u8; MAX_RATE];
        for (n, chunk) in out.chunks_mut(rate).enumerate() {
            if n > 0 {
                keccak_f(&mut self.state);
            }
            for (dst, lane) in block[..rate].chunks_exact_mut(8).zip(self.state.iter()) {
                dst.copy_from_slice(&lane.to_le_bytes());
            }
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        block.zeroize();
    }

    fn wipe(&mut self) {
        self.state.iter_mut().for_each(Zeroize::zeroize);
        self.buffer.zeroize();
        self.buffered = 0;
    }
}

impl<L: Lane> Drop for Sponge<L> {
    fn drop(&mut self) {
        self.wipe();
    }
}

#[derive(Clone)]
enum Engine {
    Native64(Sponge<Lane64>),
    Split32(Sponge<Lane32>),
}

impl Engine {
    fn new(width: LaneWidth, rate: usize, domain: u8) -> Self {
        match width {
            LaneWidth::Native64 => Engine::Native64(Sponge::new(rate, domain)),
            LaneWidth::Split32 => Engine::Split32(Sponge::new(rate, domain)),
        }
    }

    fn absorb(&mut self, data: &[u8]) {
        match self {
            Engine::Native64(s) => s.absorb(data),
            Engine::Split32(s) => s.absorb(data),
        }
    }

    fn squeeze(self, out: &mut [u8]) {
        match self {
            Engine::Native64(s) => s.squeeze(out),
            Engine::Split32(s) => s.squeeze(out),
        }
    }
}

/// Streaming SHA-3 hasher.
#[derive(Clone)]
pub struct Sha3 {
    variant: Sha3Variant,
    width: LaneWidth,
    engine: Engine,
}

impl Sha3 {
    pub fn new(variant: Sha3Variant) -> Self {
        Self::with_lane_width(variant, LaneWidth::detect())
    }

    pub fn with_lane_width(variant: Sha3Variant, width: LaneWidth) -> Self {
        Self {
            variant,
            width,
            engine: Engine::new(width, variant.rate(), SHA3_DOMAIN),
        }
    }

    pub fn variant(&self) -> Sha3Variant {
        self.variant
    }

    pub fn lane_width(&self) -> LaneWidth {
        self.width
    }

    pub fn update(&mut self, data: &[u8]) {
        self.engine.absorb(data);
    }

    pub fn finalize(self) -> Vec<u8> {
        let mut out = vec![0u8; self.variant.output_len()];
        self.engine.squeeze(&mut out);
        out
    }

    /// One-shot digest.
    pub fn digest(variant: Sha3Variant, data: &[u8]) -> Vec<u8> {
        let mut hasher = Self::new(variant);
        hasher.update(data);
        hasher.finalize()
    }
}

/// SHAKE extendable-output functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shake {
    Shake128,
    Shake256,
}

impl Shake {
    pub const fn rate(self) -> usize {
        match self {
            Shake::Shake128 => 168,
            Shake::Shake256 => 136,
        }
    }
}

pub fn shake(kind: Shake, data: &[u8], out_len: usize) -> Vec<u8> {
    let mut engine = Engine::new(LaneWidth::detect(), kind.rate(), SHAKE_DOMAIN);
    engine.absorb(data);
    let mut out = vec![0u8; out_len];
    engine.squeeze(&mut out);
    out
}
