//! Digest output encodings.
//!
//! A digest is either handed back as raw bytes or rendered as text in one of
//! the supported encodings. Text encodings can be decoded back to raw bytes
//! for verification.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use crate::error::CryptoError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Raw,
    #[default]
    HexLower,
    HexUpper,
    Base64,
    /// URL-safe alphabet, no padding.
    Base64Url,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Raw,
        OutputFormat::HexLower,
        OutputFormat::HexUpper,
        OutputFormat::Base64,
        OutputFormat::Base64Url,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::HexLower => "hex",
            OutputFormat::HexUpper => "hex-upper",
            OutputFormat::Base64 => "base64",
            OutputFormat::Base64Url => "base64url",
        }
    }
}

/// A finished digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Raw(Vec<u8>),
    Text(String),
}

impl Output {
    /// Raw bytes when `raw` is set, lowercase hex otherwise.
    pub fn from_raw(bytes: Vec<u8>, raw: bool) -> Self {
        if raw {
            Output::Raw(bytes)
        } else {
            Output::Text(hex::encode(bytes))
        }
    }

    /// The raw bytes, or the UTF-8 bytes of the text form.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Output::Raw(b) => b,
            Output::Text(s) => s.as_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Raw(b) => f.write_str(&hex::encode(b)),
            Output::Text(s) => f.write_str(s),
        }
    }
}

/// Encode raw digest bytes in the requested format.
pub fn encode(bytes: Vec<u8>, format: OutputFormat) -> Output {
    match format {
        OutputFormat::Raw => Output::Raw(bytes),
        OutputFormat::HexLower => Output::Text(hex::encode(bytes)),
        OutputFormat::HexUpper => Output::Text(hex::encode_upper(bytes)),
        OutputFormat::Base64 => Output::Text(STANDARD.encode(bytes)),
        OutputFormat::Base64Url => Output::Text(URL_SAFE_NO_PAD.encode(bytes)),
    }
}

/// Recover raw digest bytes from an encoded output.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if the text is not valid in the
/// given format, or if a raw output is paired with a text format (and vice
/// versa).
pub fn decode(output: &Output, format: OutputFormat) -> Result<Vec<u8>, CryptoError> {
    match (output, format) {
        (Output::Raw(b), OutputFormat::Raw) => Ok(b.clone()),
        // hex decoding accepts both cases
        (Output::Text(s), OutputFormat::HexLower | OutputFormat::HexUpper) => {
            hex::decode(s.trim()).map_err(|e| malformed(format, e))
        }
        (Output::Text(s), OutputFormat::Base64) => {
            STANDARD.decode(s.trim()).map_err(|e| malformed(format, e))
        }
        (Output::Text(s), OutputFormat::Base64Url) => {
            URL_SAFE_NO_PAD.decode(s.trim()).map_err(|e| malformed(format, e))
        }
        _ => Err(CryptoError::InvalidInput(format!(
            "digest does not match the '{}' output format",
            format.name()
        ))),
    }
}

fn malformed(format: OutputFormat, e: impl fmt::Display) -> CryptoError {
    CryptoError::InvalidInput(format!("malformed {} digest: {e}", format.name()))
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "binary" => Ok(OutputFormat::Raw),
            "hex" | "hex-lower" => Ok(OutputFormat::HexLower),
            "hex-upper" | "hexupper" => Ok(OutputFormat::HexUpper),
            "base64" => Ok(OutputFormat::Base64),
            "base64url" | "base64-url" => Ok(OutputFormat::Base64Url),
            other => Err(CryptoError::InvalidInput(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}
