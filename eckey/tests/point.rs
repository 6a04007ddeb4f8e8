//! Point addition and multiplication tests.

use eckey::{point, Error, ErrorKind, Key};
use hex_literal::hex;
use proptest::prelude::*;

const G: [u8; 65] = hex!(
    "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
);

const TWO_G: [u8; 65] = hex!(
    "04c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
    "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"
);

const THREE_G: [u8; 65] = hex!(
    "04f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"
    "388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"
);

fn scalar(n: u8) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[31] = n;
    bytes
}

#[test]
fn small_multiples_of_generator() {
    assert_eq!(point::add_uncompressed(&G, &G).unwrap(), TWO_G);
    assert_eq!(point::add_uncompressed(&G, &TWO_G).unwrap(), THREE_G);
    assert_eq!(point::multiply_uncompressed(&G, &scalar(2)).unwrap(), TWO_G);
    assert_eq!(point::multiply_uncompressed(&G, &scalar(3)).unwrap(), THREE_G);
}

#[test]
fn multiplier_is_reduced_modulo_order() {
    // n + 2
    let x = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364143");
    assert_eq!(point::multiply_uncompressed(&G, &x).unwrap(), TWO_G);
}

#[test]
fn zero_multiplier_is_rejected() {
    assert_eq!(
        point::multiply_uncompressed(&G, &[0u8; 32]).unwrap_err(),
        Error::InvalidPoint
    );
}

#[test]
fn compressed_input_is_rejected() {
    let compressed = hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    let err = point::add_uncompressed(&compressed, &G).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.to_string(), "argument 'point0' must have length 65 (got 33)");

    // Right length, wrong tag.
    let mut hybrid = G;
    hybrid[0] = 0x06;
    assert_eq!(
        point::add_uncompressed(&G, &hybrid).unwrap_err(),
        Error::InvalidPoint
    );
}

#[test]
fn matches_key_derivation() {
    let d = hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");
    let mut key = Key::from_private(&d).unwrap();
    key.set_compressed(false);
    assert_eq!(
        point::multiply_uncompressed(&G, &d).unwrap(),
        key.public_bytes().unwrap()
    );
}

prop_compose! {
    fn public_point()(bytes in any::<[u8; 32]>()) -> Vec<u8> {
        let mut key = Key::from_private(&bytes)
            .unwrap_or_else(|_| Key::from_private(&[1]).unwrap());
        key.set_compressed(false);
        key.public_bytes().unwrap()
    }
}

proptest! {
    #[test]
    fn addition_commutes(p0 in public_point(), p1 in public_point()) {
        // p0 == -p1 has negligible probability
        let a = point::add_uncompressed(&p0, &p1);
        let b = point::add_uncompressed(&p1, &p0);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn multiply_by_one_is_identity(p in public_point()) {
        prop_assert_eq!(point::multiply_uncompressed(&p, &scalar(1)).unwrap(), p);
    }

    #[test]
    fn doubling_matches_multiply_by_two(p in public_point()) {
        prop_assert_eq!(
            point::add_uncompressed(&p, &p).unwrap(),
            point::multiply_uncompressed(&p, &scalar(2)).unwrap()
        );
    }
}
