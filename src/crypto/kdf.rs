use crate::error::CryptoError;

/// HKDF produces at most 255 blocks.
pub const HKDF_MAX_BLOCKS: usize = 255;
/// PBKDF2 block indices are 32-bit big-endian counters.
pub const PBKDF2_MAX_BLOCKS: u64 = u32::MAX as u64;

/// Resolve an HKDF output length, where 0 means the hash's own size.
pub fn hkdf_output_len(requested: usize, native_len: usize) -> Result<usize, CryptoError> {
    if requested == 0 {
        return Ok(native_len);
    }
    let max = HKDF_MAX_BLOCKS * native_len;
    if requested > max {
        return Err(CryptoError::InvalidRange(format!(
            "hkdf output length {requested} exceeds {max} bytes"
        )));
    }
    Ok(requested)
}

/// Resolve a PBKDF2 output length, where 0 means the hash's own size.
pub fn pbkdf2_output_len(requested: usize, native_len: usize) -> Result<usize, CryptoError> {
    if requested == 0 {
        return Ok(native_len);
    }
    let blocks = requested.div_ceil(native_len) as u64;
    if blocks > PBKDF2_MAX_BLOCKS {
        return Err(CryptoError::InvalidRange(format!(
            "pbkdf2 output length {requested} needs more than {PBKDF2_MAX_BLOCKS} blocks"
        )));
    }
    Ok(requested)
}

pub fn check_iterations(iterations: u32) -> Result<(), CryptoError> {
    if iterations < 1 {
        return Err(CryptoError::InvalidRange(
            "pbkdf2 iterations must be >= 1".into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HkdfParams {
    // 0 selects the digest length of the algorithm
    out_len: usize,
    info: Vec<u8>,
}

impl HkdfParams {
    pub fn new(out_len: usize, info: impl Into<Vec<u8>>) -> Self {
        Self {
            out_len,
            info: info.into(),
        }
    }

    pub fn info(&self) -> &[u8] {
        &self.info
    }

    /// Output length for a hash of `native_len` bytes.
    pub fn resolve(&self, native_len: usize) -> Result<usize, CryptoError> {
        hkdf_output_len(self.out_len, native_len)
    }
}

/// Only constructible through [`Pbkdf2Params::new`] or the default, so the
/// iteration count is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    iterations: u32,
    out_len: usize,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            iterations: 6000,
            // digest length of the algorithm
            out_len: 0,
        }
    }
}

impl Pbkdf2Params {
    pub fn new(iterations: u32, out_len: usize) -> Result<Self, CryptoError> {
        let params = Self {
            iterations,
            out_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn validate(&self) -> Result<(), CryptoError> {
        check_iterations(self.iterations)
    }

    pub fn resolve(&self, native_len: usize) -> Result<usize, CryptoError> {
        self.validate()?;
        pbkdf2_output_len(self.out_len, native_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_means_native_size() {
        assert_eq!(hkdf_output_len(0, 28).unwrap(), 28);
        assert_eq!(pbkdf2_output_len(0, 64).unwrap(), 64);
        assert_eq!(HkdfParams::default().resolve(32).unwrap(), 32);
    }

    #[test]
    fn hkdf_ceiling_is_255_blocks() {
        assert_eq!(hkdf_output_len(255 * 32, 32).unwrap(), 8160);
        assert!(matches!(
            hkdf_output_len(255 * 32 + 1, 32),
            Err(CryptoError::InvalidRange(_))
        ));
    }

    #[test]
    fn pbkdf2_params_reject_zero_iterations() {
        assert!(Pbkdf2Params::new(0, 32).is_err());
        let params = Pbkdf2Params::new(1, 0).unwrap();
        assert_eq!(params.resolve(48).unwrap(), 48);
    }

    #[test]
    fn pbkdf2_default_is_valid() {
        let params = Pbkdf2Params::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.iterations(), 6000);
    }
}
