//! RC4 stream cipher.
//!
//! Every call schedules a fresh key, so the same key and plaintext always
//! produce the same ciphertext. There is no nonce: callers must never reuse a
//! key for two different messages.

use zeroize::Zeroize;

use crate::error::CryptoError;

pub struct Rc4 {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Drop for Rc4 {
    fn drop(&mut self) {
        self.s.zeroize();
        self.i = 0;
        self.j = 0;
    }
}

impl Rc4 {
    /// Key-scheduling algorithm. Only the first 256 key bytes take part.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.is_empty() {
            return Err(CryptoError::InvalidInput("rc4 key must not be empty".into()));
        }

        let mut s = [0u8; 256];
        for (i, v) in s.iter_mut().enumerate() {
            *v = i as u8;
        }

        let mut j: u8 = 0;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }

        Ok(Self { s, i: 0, j: 0 })
    }

    /// Pseudo-random generation: XOR the keystream into `data` in place.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.s[self.i as usize]);
            self.s.swap(self.i as usize, self.j as usize);
            let k = self.s[self.s[self.i as usize].wrapping_add(self.s[self.j as usize]) as usize];
            *byte ^= k;
        }
    }
}

pub fn encrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut cipher = Rc4::new(key)?;
    let mut out = data.to_vec();
    cipher.apply_keystream(&mut out);
    Ok(out)
}

/// Decryption is the same keystream XOR as encryption.
pub fn decrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    encrypt(key, data)
}
