//! PBKDF2-HMAC-SHA512 tests.

use eckey::{
    kdf::{self, Pbkdf2Request},
    ErrorKind,
};
use hex_literal::hex;
use proptest::prelude::*;

fn derive(password: &[u8], salt: &[u8], iterations: u64, key_length: usize) -> Vec<u8> {
    let request = Pbkdf2Request::new(password, salt, iterations, key_length).unwrap();
    kdf::derive(request).unwrap().to_vec()
}

#[test]
fn known_answers() {
    assert_eq!(
        derive(b"password", b"salt", 1, 64),
        hex!(
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252"
            "c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce"
        )
    );
    assert_eq!(
        derive(b"password", b"salt", 2, 64),
        hex!(
            "e1d9c16aa681708a45f5c7c4e215ceb66e011a2e9f0040713f18aefdb866d53c"
            "f76cab2868a39b9f7840edce4fef5a82be67335c77a6068e04112754f27ccf4e"
        )
    );
    assert_eq!(
        derive(
            b"passwordPASSWORDpassword",
            b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
            4096,
            64
        ),
        hex!(
            "8c0511f4c6e597c6ac6315d8f0362e225f3c501495ba23b868c005174dc4ee71"
            "115b59f9e60cd9532fa33e0f75aefe30225c583a186cd82bd4daea9724a3d3b8"
        )
    );
}

#[test]
fn longer_output_than_one_block() {
    let long = derive(b"password", b"salt", 2, 100);
    assert_eq!(long.len(), 100);
    assert_eq!(long[..64], derive(b"password", b"salt", 2, 64)[..]);
}

#[test]
fn bip39_seeds() {
    let phrase = "abandon abandon abandon abandon abandon abandon \
                  abandon abandon abandon abandon abandon about";

    assert_eq!(
        *kdf::mnemonic_to_seed(phrase, "TREZOR").unwrap(),
        hex!(
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553"
            "1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        )
    );
    assert_eq!(
        *kdf::mnemonic_to_seed(phrase, "").unwrap(),
        hex!(
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
            "9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        )
    );
}

#[test]
fn zero_iterations_match_single_iteration() {
    assert_eq!(
        derive(b"password", b"salt", 0, 64),
        derive(b"password", b"salt", 1, 64)
    );
}

#[test]
fn iterations_above_32_bits() {
    let err = Pbkdf2Request::new("pw", "salt", 1 << 32, 64).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().starts_with("invalid parameter"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn deterministic(
        password in prop::collection::vec(any::<u8>(), 0..32),
        salt in prop::collection::vec(any::<u8>(), 0..32),
        iterations in 1u64..4,
        key_length in 1usize..80,
    ) {
        prop_assert_eq!(
            derive(&password, &salt, iterations, key_length),
            derive(&password, &salt, iterations, key_length)
        );
    }

    #[test]
    fn every_input_matters(
        password in prop::collection::vec(any::<u8>(), 1..32),
        salt in prop::collection::vec(any::<u8>(), 1..32),
        iterations in 1u64..4,
    ) {
        let base = derive(&password, &salt, iterations, 32);

        let mut other_password = password.clone();
        other_password[0] ^= 1;
        prop_assert_ne!(&base, &derive(&other_password, &salt, iterations, 32));

        let mut other_salt = salt.clone();
        other_salt[0] ^= 1;
        prop_assert_ne!(&base, &derive(&password, &other_salt, iterations, 32));

        prop_assert_ne!(&base, &derive(&password, &salt, iterations + 1, 32));
        prop_assert_ne!(&base[..], &derive(&password, &salt, iterations, 33)[..]);
    }
}
