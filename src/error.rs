use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A byte-string argument was unusable (empty key material, undecodable text).
    InvalidInput(String),
    /// A numeric argument was zero, negative or above the algorithm's limit.
    InvalidRange(String),
    /// The requested algorithm or variant has no implementation.
    UnsupportedAlgorithm(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidInput(m) => write!(f, "invalid input: {m}"),
            CryptoError::InvalidRange(m) => write!(f, "value out of range: {m}"),
            CryptoError::UnsupportedAlgorithm(a) => write!(f, "unsupported algorithm '{a}'"),
        }
    }
}

impl std::error::Error for CryptoError {}
