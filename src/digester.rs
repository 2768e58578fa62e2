//! The generic digest wrapper.
//!
//! A [`Digester`] binds an [`Algorithm`] to a construction (plain hash, HMAC,
//! HKDF or PBKDF2), a salt and salting mode, and an output format. Every
//! algorithm goes through the same code path; the algorithm table decides
//! which native functions run, and [`Backend::Portable`] swaps them for the
//! SHA-3 implementations in [`crate::crypto`].

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::algorithm::{Algorithm, Backend};
use crate::crypto::{self, HkdfParams, HmacSha3, LaneWidth, Pbkdf2Params, Sha3, Sha3Variant};
use crate::error::CryptoError;
use crate::format::{self, Output, OutputFormat};
use crate::salting::SaltingMode;

#[derive(Clone, PartialEq, Eq)]
enum Construction {
    Plain,
    /// HMAC under the given key.
    Keyed(Zeroizing<Vec<u8>>),
    /// Data is the input key material, the salt is the extract salt.
    Hkdf(HkdfParams),
    /// Data is the password.
    Pbkdf2(Pbkdf2Params),
}

impl Construction {
    fn name(&self) -> &'static str {
        match self {
            Construction::Plain => "plain",
            Construction::Keyed(_) => "hmac",
            Construction::Hkdf(_) => "hkdf",
            Construction::Pbkdf2(_) => "pbkdf2",
        }
    }
}

// keys stay out of logs and panics
impl fmt::Debug for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construction::Keyed(_) => f.write_str("Keyed(..)"),
            Construction::Hkdf(p) => f.debug_tuple("Hkdf").field(p).finish(),
            Construction::Pbkdf2(p) => f.debug_tuple("Pbkdf2").field(p).finish(),
            Construction::Plain => f.write_str("Plain"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Digester {
    algorithm: Algorithm,
    backend: Backend,
    lane_width: LaneWidth,
    construction: Construction,
    salt: Vec<u8>,
    salting: SaltingMode,
    format: OutputFormat,
}

impl Digester {
    /// A plain, unsalted digest rendered as lowercase hex.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            backend: Backend::default(),
            lane_width: LaneWidth::detect(),
            construction: Construction::Plain,
            salt: Vec::new(),
            salting: SaltingMode::default(),
            format: OutputFormat::default(),
        }
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Lane representation for the portable backend. Ignored by the native
    /// one.
    pub fn lane_width(mut self, width: LaneWidth) -> Self {
        self.lane_width = width;
        self
    }

    pub fn salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = salt.into();
        self
    }

    pub fn salting(mut self, salting: SaltingMode) -> Self {
        self.salting = salting;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn keyed(mut self, key: &[u8]) -> Self {
        self.construction = Construction::Keyed(Zeroizing::new(key.to_vec()));
        self
    }

    pub fn hkdf(mut self, params: HkdfParams) -> Self {
        self.construction = Construction::Hkdf(params);
        self
    }

    pub fn pbkdf2(mut self, params: Pbkdf2Params) -> Self {
        self.construction = Construction::Pbkdf2(params);
        self
    }

    /// Compute the digest of `data` and encode it.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedAlgorithm`] when the portable backend is
    ///   requested for an algorithm without a portable implementation.
    /// - [`CryptoError::InvalidInput`] for empty HKDF input key material.
    /// - [`CryptoError::InvalidRange`] for out-of-range lengths or iterations.
    pub fn digest(&self, data: &[u8]) -> Result<Output, CryptoError> {
        let bytes = self.digest_bytes(data)?;
        Ok(format::encode(bytes, self.format))
    }

    /// Recompute the digest of `data` and compare it with `expected`.
    ///
    /// `expected` must be encoded in this digester's output format.
    pub fn verify(&self, data: &[u8], expected: &Output) -> Result<bool, CryptoError> {
        let expected = format::decode(expected, self.format)?;
        let actual = self.digest_bytes(data)?;
        Ok(constant_time_eq(&actual, &expected))
    }

    fn digest_bytes(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let portable = match self.backend {
            Backend::Native => None,
            Backend::Portable => Some(self.algorithm.portable_variant()?),
        };

        let bytes = match &self.construction {
            Construction::Plain => self.plain(portable, data),
            Construction::Keyed(key) => self.keyed_mac(portable, key, data)?,
            Construction::Hkdf(params) => self.derive_hkdf(portable, params, data)?,
            Construction::Pbkdf2(params) => self.derive_pbkdf2(portable, params, data)?,
        };

        debug!(
            algorithm = %self.algorithm,
            backend = %self.backend,
            lanes = %self.lane_width,
            construction = self.construction.name(),
            len = bytes.len(),
            "digest computed"
        );
        Ok(bytes)
    }

    fn plain(&self, portable: Option<Sha3Variant>, data: &[u8]) -> Vec<u8> {
        let input = Zeroizing::new(self.salting.apply(data, &self.salt));
        match portable {
            Some(variant) => {
                let mut hasher = Sha3::with_lane_width(variant, self.lane_width);
                hasher.update(&input);
                hasher.finalize()
            }
            None => (self.algorithm.entry().native.hash)(&input),
        }
    }

    fn keyed_mac(
        &self,
        portable: Option<Sha3Variant>,
        key: &[u8],
        data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let input = Zeroizing::new(self.salting.apply(data, &self.salt));
        match portable {
            Some(variant) => {
                let mut mac = HmacSha3::with_lane_width(variant, key, self.lane_width);
                mac.update(&input);
                Ok(mac.finalize())
            }
            None => (self.algorithm.entry().native.hmac)(key, &input),
        }
    }

    fn derive_hkdf(
        &self,
        portable: Option<Sha3Variant>,
        params: &HkdfParams,
        ikm: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ikm.is_empty() {
            return Err(CryptoError::InvalidInput(
                "hkdf input key material must not be empty".into(),
            ));
        }
        let len = params.resolve(self.algorithm.output_len())?;

        match portable {
            Some(variant) => crypto::hkdf::hkdf_with_lane_width(
                variant,
                self.lane_width,
                ikm,
                len,
                params.info(),
                &self.salt,
            ),
            None => {
                let mut okm = vec![0u8; len];
                (self.algorithm.entry().native.hkdf)(ikm, &self.salt, params.info(), &mut okm)?;
                Ok(okm)
            }
        }
    }

    fn derive_pbkdf2(
        &self,
        portable: Option<Sha3Variant>,
        params: &Pbkdf2Params,
        password: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let len = params.resolve(self.algorithm.output_len())?;

        match portable {
            Some(variant) => crypto::pbkdf2::pbkdf2_with_lane_width(
                variant,
                self.lane_width,
                password,
                &self.salt,
                params.iterations(),
                len,
            ),
            None => {
                let mut dk = vec![0u8; len];
                (self.algorithm.entry().native.pbkdf2)(
                    password,
                    &self.salt,
                    params.iterations(),
                    &mut dk,
                )?;
                Ok(dk)
            }
        }
    }
}

/// Compare without stopping at the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
