//! Portable cryptographic primitives.
//!
//! Self-contained implementations of SHA-3, HMAC-SHA3, HKDF-SHA3,
//! PBKDF2-SHA3 and RC4 that do not depend on any external digest crate.

pub mod hkdf;
pub mod hmac;
pub mod kdf;
pub mod keccak;
pub mod lanes;
pub mod pbkdf2;
pub mod rc4;
pub mod sha3;

pub use hmac::HmacSha3;
pub use kdf::{HkdfParams, Pbkdf2Params};
pub use lanes::LaneWidth;
pub use rc4::Rc4;
pub use sha3::{Sha3, Sha3Variant, Shake, shake};
