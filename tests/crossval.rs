//! The portable primitives checked against the RustCrypto crates.

use ::hkdf::SimpleHkdf;
use ::hmac::{Mac, SimpleHmac};
use digest::Digest;
use digest::core_api::BlockSizeUser;
use hashnest::crypto::{HmacSha3, LaneWidth, Sha3, Sha3Variant, hkdf, pbkdf2, rc4};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    getrandom::fill(&mut buf).unwrap();
    buf
}

fn reference_hash<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

fn reference_hmac<D: Digest + BlockSizeUser + Clone>(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn reference_hkdf<D: Digest + BlockSizeUser + Clone>(
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
    len: usize,
) -> Vec<u8> {
    let salt = if salt.is_empty() { None } else { Some(salt) };
    let mut okm = vec![0u8; len];
    SimpleHkdf::<D>::new(salt, ikm).expand(info, &mut okm).unwrap();
    okm
}

fn reference_pbkdf2<D: Digest + BlockSizeUser + Clone + Sync>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    len: usize,
) -> Vec<u8> {
    let mut dk = vec![0u8; len];
    ::pbkdf2::pbkdf2::<SimpleHmac<D>>(password, salt, iterations, &mut dk).unwrap();
    dk
}

/// Runs `$body` once per SHA-3 variant with `$d` bound to the matching
/// RustCrypto hasher.
macro_rules! for_each_variant {
    ($variant:ident, $d:ident, $body:block) => {{
        {
            let $variant = Sha3Variant::Sha3_224;
            type $d = sha3::Sha3_224;
            $body
        }
        {
            let $variant = Sha3Variant::Sha3_256;
            type $d = sha3::Sha3_256;
            $body
        }
        {
            let $variant = Sha3Variant::Sha3_384;
            type $d = sha3::Sha3_384;
            $body
        }
        {
            let $variant = Sha3Variant::Sha3_512;
            type $d = sha3::Sha3_512;
            $body
        }
    }};
}

#[test]
fn sha3_matches_across_block_boundaries() {
    for_each_variant!(variant, D, {
        let rate = variant.rate();
        for len in [0, 1, rate - 1, rate, rate + 1, 2 * rate, 3 * rate + 7] {
            let data = random_bytes(len);
            let expected = reference_hash::<D>(&data);
            for width in [LaneWidth::Native64, LaneWidth::Split32] {
                let mut h = Sha3::with_lane_width(variant, width);
                h.update(&data);
                assert_eq!(h.finalize(), expected, "{variant} len {len} {width:?}");
            }
        }
    });
}

#[test]
fn hmac_matches_for_short_exact_and_long_keys() {
    for_each_variant!(variant, D, {
        let rate = variant.rate();
        let data = random_bytes(100);
        for key_len in [0, 1, 32, rate - 1, rate, rate + 1, 300] {
            let key = random_bytes(key_len);
            let expected = reference_hmac::<D>(&key, &data);
            assert_eq!(HmacSha3::mac(variant, &key, &data), expected, "{variant} key {key_len}");
            assert_eq!(
                HmacSha3::with_lane_width(variant, &key, LaneWidth::Split32).finalize(),
                reference_hmac::<D>(&key, b""),
            );
        }
    });
}

#[test]
fn hkdf_matches_with_and_without_salt() {
    for_each_variant!(variant, D, {
        let ikm = random_bytes(48);
        let info = random_bytes(17);
        let native = variant.output_len();
        for salt in [Vec::new(), random_bytes(16)] {
            for len in [1, native, native + 1, 3 * native] {
                let expected = reference_hkdf::<D>(&ikm, &salt, &info, len);
                assert_eq!(
                    hkdf::hkdf(variant, &ikm, len, &info, &salt).unwrap(),
                    expected,
                    "{variant} len {len}"
                );
                assert_eq!(
                    hkdf::hkdf_with_lane_width(
                        variant,
                        LaneWidth::Split32,
                        &ikm,
                        len,
                        &info,
                        &salt
                    )
                    .unwrap(),
                    expected,
                    "{variant} len {len} split32"
                );
            }
        }
    });
}

#[test]
fn pbkdf2_matches_for_multi_block_output() {
    for_each_variant!(variant, D, {
        let password = random_bytes(12);
        let salt = random_bytes(16);
        let native = variant.output_len();
        for (iterations, len) in [(1, native), (3, native + 5), (25, 2 * native)] {
            let expected = reference_pbkdf2::<D>(&password, &salt, iterations, len);
            assert_eq!(
                pbkdf2::pbkdf2(variant, &password, &salt, iterations, len).unwrap(),
                expected,
                "{variant} iterations {iterations}"
            );
            assert_eq!(
                pbkdf2::pbkdf2_with_lane_width(
                    variant,
                    LaneWidth::Split32,
                    &password,
                    &salt,
                    iterations,
                    len
                )
                .unwrap(),
                expected,
                "{variant} iterations {iterations} split32"
            );
        }
    });
}

#[test]
fn rc4_matches_reference_cipher() {
    use ::rc4::{KeyInit, Rc4, StreamCipher, consts::U8};

    for _ in 0..16 {
        let key = random_bytes(8);
        let plaintext = random_bytes(32);

        let mut expected = plaintext.clone();
        Rc4::<U8>::new_from_slice(&key)
            .unwrap()
            .apply_keystream(&mut expected);

        let ciphertext = rc4::encrypt(&key, &plaintext).unwrap();
        assert_eq!(ciphertext, expected);
        assert_eq!(rc4::decrypt(&key, &ciphertext).unwrap(), plaintext);
    }
}
