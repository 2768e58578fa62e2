use anyhow::{Result, anyhow};
use getrandom::fill;
use zeroize::Zeroizing;

/// Default salt length (16 bytes).
pub const SALT_LEN: usize = 16;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<()> {
    fill(buf).map_err(|_| anyhow!("OS random generator unavailable"))
}

/// Generate a salt of `len` bytes
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}

/// Generate secret key material of `len` bytes
pub fn generate_key(len: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut key = Zeroizing::new(vec![0u8; len]);
    secure_random(&mut key)?;
    Ok(key)
}
