//! Supported digest algorithms and the table describing them.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::crypto::Sha3Variant;
use crate::error::CryptoError;
use crate::native::{NativeFns, native_fns};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha2_224,
    Sha2_256,
    Sha2_384,
    Sha2_512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

/// Which implementation computes a digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// The RustCrypto digest crates.
    #[default]
    Native,
    /// The self-contained implementations in [`crate::crypto`]. Only SHA-3
    /// based algorithms have one.
    Portable,
}

pub struct AlgorithmEntry {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Digest length in bytes.
    pub output_len: usize,
    /// HMAC block length in bytes.
    pub block_len: usize,
    pub native: NativeFns,
    pub portable: Option<Sha3Variant>,
}

static TABLE: [AlgorithmEntry; 10] = [
    AlgorithmEntry {
        algorithm: Algorithm::Md5,
        name: "md5",
        aliases: &[],
        output_len: 16,
        block_len: 64,
        native: native_fns!(Md5),
        portable: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha1,
        name: "sha1",
        aliases: &["sha-1"],
        output_len: 20,
        block_len: 64,
        native: native_fns!(Sha1),
        portable: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha2_224,
        name: "sha224",
        aliases: &["sha-224", "sha2-224"],
        output_len: 28,
        block_len: 64,
        native: native_fns!(Sha224),
        portable: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha2_256,
        name: "sha256",
        aliases: &["sha-256", "sha2-256"],
        output_len: 32,
        block_len: 64,
        native: native_fns!(Sha256),
        portable: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha2_384,
        name: "sha384",
        aliases: &["sha-384", "sha2-384"],
        output_len: 48,
        block_len: 128,
        native: native_fns!(Sha384),
        portable: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha2_512,
        name: "sha512",
        aliases: &["sha-512", "sha2-512"],
        output_len: 64,
        block_len: 128,
        native: native_fns!(Sha512),
        portable: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha3_224,
        name: "sha3-224",
        aliases: &["sha3_224"],
        output_len: Sha3Variant::Sha3_224.output_len(),
        block_len: Sha3Variant::Sha3_224.rate(),
        native: native_fns!(Sha3_224),
        portable: Some(Sha3Variant::Sha3_224),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha3_256,
        name: "sha3-256",
        aliases: &["sha3_256"],
        output_len: Sha3Variant::Sha3_256.output_len(),
        block_len: Sha3Variant::Sha3_256.rate(),
        native: native_fns!(Sha3_256),
        portable: Some(Sha3Variant::Sha3_256),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha3_384,
        name: "sha3-384",
        aliases: &["sha3_384"],
        output_len: Sha3Variant::Sha3_384.output_len(),
        block_len: Sha3Variant::Sha3_384.rate(),
        native: native_fns!(Sha3_384),
        portable: Some(Sha3Variant::Sha3_384),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha3_512,
        name: "sha3-512",
        aliases: &["sha3_512"],
        output_len: Sha3Variant::Sha3_512.output_len(),
        block_len: Sha3Variant::Sha3_512.rate(),
        native: native_fns!(Sha3_512),
        portable: Some(Sha3Variant::Sha3_512),
    },
];

impl Algorithm {
    pub fn all() -> impl Iterator<Item = Algorithm> {
        TABLE.iter().map(|s| s.algorithm)
    }

    pub fn entry(self) -> &'static AlgorithmEntry {
        // TABLE is declared in enum order
        &TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn output_len(self) -> usize {
        self.entry().output_len
    }

    pub fn block_len(self) -> usize {
        self.entry().block_len
    }

    pub fn has_portable(self) -> bool {
        self.entry().portable.is_some()
    }

    /// The SHA-3 variant to run when the portable backend is requested.
    pub fn portable_variant(self) -> Result<Sha3Variant, CryptoError> {
        self.entry().portable.ok_or_else(|| {
            CryptoError::UnsupportedAlgorithm(format!("{} (no portable implementation)", self))
        })
    }
}

impl From<Sha3Variant> for Algorithm {
    fn from(variant: Sha3Variant) -> Self {
        match variant {
            Sha3Variant::Sha3_224 => Algorithm::Sha3_224,
            Sha3Variant::Sha3_256 => Algorithm::Sha3_256,
            Sha3Variant::Sha3_384 => Algorithm::Sha3_384,
            Sha3Variant::Sha3_512 => Algorithm::Sha3_512,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TABLE
            .iter()
            .find(|entry| entry.name == wanted || entry.aliases.contains(&wanted.as_str()))
            .map(|entry| entry.algorithm)
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(s.to_string()))
    }
}

impl TryFrom<String> for Algorithm {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Algorithm> for String {
    fn from(a: Algorithm) -> Self {
        a.name().to_string()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Native => f.write_str("native"),
            Backend::Portable => f.write_str("portable"),
        }
    }
}

impl FromStr for Backend {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Backend::Native),
            "portable" | "pure" => Ok(Backend::Portable),
            other => Err(CryptoError::UnsupportedAlgorithm(format!("backend {other}"))),
        }
    }
}
