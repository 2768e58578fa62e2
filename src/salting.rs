//! Ways of combining a salt with the input before hashing.

use std::fmt;
use std::str::FromStr;

use crate::error::CryptoError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SaltingMode {
    None,
    /// input ‖ salt
    #[default]
    Append,
    /// salt ‖ input
    Prepend,
    /// salt ‖ input ‖ salt
    InfixInput,
    /// input ‖ salt ‖ input
    InfixSalt,
    /// input ‖ rev(salt)
    ReverseAppend,
    /// rev(salt) ‖ input
    ReversePrepend,
    /// input ‖ salt ‖ rev(salt)
    DuplicateSuffix,
    /// rev(salt) ‖ salt ‖ input
    DuplicatePrefix,
    /// salt ‖ input ‖ rev(salt)
    PalindromeMirroring,
}

impl SaltingMode {
    pub const ALL: [SaltingMode; 10] = [
        SaltingMode::None,
        SaltingMode::Append,
        SaltingMode::Prepend,
        SaltingMode::InfixInput,
        SaltingMode::InfixSalt,
        SaltingMode::ReverseAppend,
        SaltingMode::ReversePrepend,
        SaltingMode::DuplicateSuffix,
        SaltingMode::DuplicatePrefix,
        SaltingMode::PalindromeMirroring,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SaltingMode::None => "none",
            SaltingMode::Append => "append",
            SaltingMode::Prepend => "prepend",
            SaltingMode::InfixInput => "infix-input",
            SaltingMode::InfixSalt => "infix-salt",
            SaltingMode::ReverseAppend => "reverse-append",
            SaltingMode::ReversePrepend => "reverse-prepend",
            SaltingMode::DuplicateSuffix => "duplicate-suffix",
            SaltingMode::DuplicatePrefix => "duplicate-prefix",
            SaltingMode::PalindromeMirroring => "palindrome-mirroring",
        }
    }

    /// Combine `input` and `salt` according to the mode.
    pub fn apply(self, input: &[u8], salt: &[u8]) -> Vec<u8> {
        if salt.is_empty() {
            return input.to_vec();
        }

        match self {
            SaltingMode::None => input.to_vec(),
            SaltingMode::Append => [input, salt].concat(),
            SaltingMode::Prepend => [salt, input].concat(),
            SaltingMode::InfixInput => [salt, input, salt].concat(),
            SaltingMode::InfixSalt => [input, salt, input].concat(),
            SaltingMode::ReverseAppend => [input, reverse(salt).as_slice()].concat(),
            SaltingMode::ReversePrepend => [reverse(salt).as_slice(), input].concat(),
            SaltingMode::DuplicateSuffix => [input, salt, reverse(salt).as_slice()].concat(),
            SaltingMode::DuplicatePrefix => [reverse(salt).as_slice(), salt, input].concat(),
            SaltingMode::PalindromeMirroring => [salt, input, reverse(salt).as_slice()].concat(),
        }
    }
}

/// Reverse by character when the salt is UTF-8 text, by byte otherwise.
fn reverse(salt: &[u8]) -> Vec<u8> {
    match std::str::from_utf8(salt) {
        Ok(text) => text.chars().rev().collect::<String>().into_bytes(),
        Err(_) => salt.iter().rev().copied().collect(),
    }
}

impl fmt::Display for SaltingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SaltingMode {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SaltingMode::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| CryptoError::InvalidInput(format!("unknown salting mode '{s}'")))
    }
}
