//! Digest constructions backed by the RustCrypto crates.
//!
//! Every function is generic over the digest and is instantiated once per
//! algorithm in the algorithm table, so the table can hold plain function
//! pointers.

use digest::Digest;
use digest::core_api::BlockSizeUser;
use ::hkdf::SimpleHkdf;
use ::hmac::{Mac, SimpleHmac};

use crate::error::CryptoError;

pub type HashFn = fn(&[u8]) -> Vec<u8>;
/// `(key, data)`
pub type HmacFn = fn(&[u8], &[u8]) -> Result<Vec<u8>, CryptoError>;
/// `(ikm, salt, info, okm)`
pub type HkdfFn = fn(&[u8], &[u8], &[u8], &mut [u8]) -> Result<(), CryptoError>;
/// `(password, salt, iterations, dk)`
pub type Pbkdf2Fn = fn(&[u8], &[u8], u32, &mut [u8]) -> Result<(), CryptoError>;

#[derive(Clone, Copy)]
pub struct NativeFns {
    pub hash: HashFn,
    pub hmac: HmacFn,
    pub hkdf: HkdfFn,
    pub pbkdf2: Pbkdf2Fn,
}

macro_rules! native_fns {
    ($d:ty) => {
        $crate::native::NativeFns {
            hash: $crate::native::hash::<$d>,
            hmac: $crate::native::hmac::<$d>,
            hkdf: $crate::native::hkdf::<$d>,
            pbkdf2: $crate::native::pbkdf2::<$d>,
        }
    };
}
pub(crate) use native_fns;

pub fn hash<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

pub fn hmac<D: Digest + BlockSizeUser + Clone>(
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)
        .map_err(|_| CryptoError::InvalidInput("hmac key rejected".into()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn hkdf<D: Digest + BlockSizeUser + Clone>(
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
    okm: &mut [u8],
) -> Result<(), CryptoError> {
    let salt = if salt.is_empty() { None } else { Some(salt) };
    SimpleHkdf::<D>::new(salt, ikm)
        .expand(info, okm)
        .map_err(|_| CryptoError::InvalidRange(format!("hkdf output length {}", okm.len())))
}

pub fn pbkdf2<D: Digest + BlockSizeUser + Clone + Sync>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    dk: &mut [u8],
) -> Result<(), CryptoError> {
    ::pbkdf2::pbkdf2::<SimpleHmac<D>>(password, salt, iterations, dk)
        .map_err(|_| CryptoError::InvalidInput("pbkdf2 password rejected".into()))
}
