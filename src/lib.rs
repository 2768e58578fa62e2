pub mod algorithm;
pub mod crypto;
pub mod digester;
mod error;
pub mod format;
pub mod native;
pub mod payload;
pub mod random;
pub mod salting;

pub use crate::algorithm::{Algorithm, Backend};
pub use crate::crypto::{HkdfParams, LaneWidth, Pbkdf2Params, Sha3Variant};
pub use crate::digester::Digester;
pub use crate::error::CryptoError;
pub use crate::format::{Output, OutputFormat};
pub use crate::salting::SaltingMode;

use crate::crypto::{HmacSha3, Sha3, rc4};

/// SHA-3 digest of `data`, as raw bytes or lowercase hex.
pub fn sha3_digest(variant: Sha3Variant, data: &[u8], raw: bool) -> Result<Output, CryptoError> {
    Ok(Output::from_raw(Sha3::digest(variant, data), raw))
}

pub fn hmac_sha3_digest(
    variant: Sha3Variant,
    data: &[u8],
    key: &[u8],
    raw: bool,
) -> Result<Output, CryptoError> {
    Ok(Output::from_raw(HmacSha3::mac(variant, key, data), raw))
}

/// HKDF-SHA3. An `out_len` of 0 selects the digest size of `variant`.
pub fn hkdf_sha3_digest(
    variant: Sha3Variant,
    ikm: &[u8],
    out_len: usize,
    info: &[u8],
    salt: &[u8],
    raw: bool,
) -> Result<Output, CryptoError> {
    let okm = crypto::hkdf::hkdf(variant, ikm, out_len, info, salt)?;
    Ok(Output::from_raw(okm, raw))
}

/// PBKDF2-HMAC-SHA3. `out_len` is in bytes whatever the output encoding; 0
/// selects the digest size of `variant`.
pub fn pbkdf2_sha3_digest(
    variant: Sha3Variant,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_len: usize,
    raw: bool,
) -> Result<Output, CryptoError> {
    let dk = crypto::pbkdf2::pbkdf2(variant, password, salt, iterations, out_len)?;
    Ok(Output::from_raw(dk, raw))
}

pub fn rc4_encrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    rc4::encrypt(key, data)
}

pub fn rc4_decrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    rc4::decrypt(key, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::generate_key;

    fn hex_of(out: Output) -> String {
        out.to_string()
    }

    #[test]
    fn sha3_256_of_empty_string() {
        let out = sha3_digest(Sha3Variant::Sha3_256, b"", false).unwrap();
        assert_eq!(
            hex_of(out),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn hmac_sha3_224_with_empty_key_and_data() {
        let out = hmac_sha3_digest(Sha3Variant::Sha3_224, b"", b"", false).unwrap();
        assert_eq!(
            hex_of(out),
            "1b9044e0d5bb4ef944bc00f1b26c483ac3e222f4640935d089a49083"
        );
    }

    #[test]
    fn hkdf_sha3_224_known_answer() {
        let out =
            hkdf_sha3_digest(Sha3Variant::Sha3_224, b" ", 40, b"cryptomanana", b" ", false)
                .unwrap();
        let hex = hex_of(out);
        assert!(hex.starts_with("a4ef0e7f62a68f618d201350eb9ac8367ba57080"));
        assert_eq!(
            hex,
            "a4ef0e7f62a68f618d201350eb9ac8367ba570803a45f57df4db8c761460fa2ab73fcc3ffe1cba72"
        );
    }

    #[test]
    fn pbkdf2_sha3_224_known_answer() {
        let out = pbkdf2_sha3_digest(Sha3Variant::Sha3_224, b"", b"", 2, 20, false).unwrap();
        assert_eq!(hex_of(out), "42ec0e2b3f2f8e0745b2030d049802aa509f6273");

        let out = pbkdf2_sha3_digest(Sha3Variant::Sha3_224, b"", b"", 2, 40, true).unwrap();
        assert_eq!(out.len(), 40);
        assert_eq!(
            hex_of(out),
            "42ec0e2b3f2f8e0745b2030d049802aa509f6273588e1ed1bce2caae5ee7a674363e995afd88b695"
        );
    }

    #[test]
    fn raw_and_hex_carry_the_same_bytes() {
        for variant in Sha3Variant::ALL {
            let raw = sha3_digest(variant, b"abc", true).unwrap();
            let hex = sha3_digest(variant, b"abc", false).unwrap();
            assert_eq!(raw.len(), variant.output_len());
            assert_eq!(hex::encode(raw.as_bytes()), hex.to_string());
        }
    }

    #[test]
    fn derivations_are_deterministic_and_exact_length() {
        for variant in Sha3Variant::ALL {
            let native = variant.output_len();
            for len in [1, native - 1, native, native + 1, 2 * native] {
                let a = hkdf_sha3_digest(variant, b"ikm", len, b"info", b"salt", true).unwrap();
                let b = hkdf_sha3_digest(variant, b"ikm", len, b"info", b"salt", true).unwrap();
                assert_eq!(a, b);
                assert_eq!(a.len(), len);

                let a = pbkdf2_sha3_digest(variant, b"pw", b"salt", 2, len, true).unwrap();
                let b = pbkdf2_sha3_digest(variant, b"pw", b"salt", 2, len, true).unwrap();
                assert_eq!(a, b);
                assert_eq!(a.len(), len);
            }
        }
    }

    #[test]
    fn rc4_round_trip_with_random_key() {
        let key = generate_key(8).unwrap();
        let plaintext = random::generate_salt(32).unwrap();

        let ciphertext = rc4_encrypt(&key, &plaintext).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_eq!(rc4_decrypt(&key, &ciphertext).unwrap(), plaintext);
        assert_eq!(rc4_encrypt(&key, &plaintext).unwrap(), ciphertext);
    }

    #[test]
    fn errors_surface_through_entry_points() {
        assert!(matches!(
            hkdf_sha3_digest(Sha3Variant::Sha3_256, b"", 0, b"", b"", false),
            Err(CryptoError::InvalidInput(_))
        ));
        assert!(matches!(
            pbkdf2_sha3_digest(Sha3Variant::Sha3_256, b"pw", b"", 0, 0, false),
            Err(CryptoError::InvalidRange(_))
        ));
        assert!(matches!(
            rc4_encrypt(b"", b"data"),
            Err(CryptoError::InvalidInput(_))
        ));
    }
}
