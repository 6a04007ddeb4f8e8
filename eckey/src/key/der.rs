//! SEC1 `ECPrivateKey` DER encoding ([RFC 5915]).
//!
//! ```text
//! ECPrivateKey ::= SEQUENCE {
//!   version        INTEGER { ecPrivkeyVer1(1) },
//!   privateKey     OCTET STRING,
//!   parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
//!   publicKey  [1] BIT STRING OPTIONAL
//! }
//! ```
//!
//! [RFC 5915]: https://datatracker.ietf.org/doc/html/rfc5915

use crate::{
    arithmetic::{self, PrivateScalar, COMPRESSED_POINT_SIZE, SCALAR_SIZE},
    Error, Result,
};
use elliptic_curve::zeroize::Zeroizing;
use k256::PublicKey;
use sec1::{
    der::{asn1::ObjectIdentifier, Decode, Encode},
    EcParameters, EcPrivateKey,
};

/// `secp256k1 OBJECT IDENTIFIER ::= { iso(1) identified-organization(3) certicom(132) curve(0) 10 }`
pub(crate) const SECP256K1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// Key material recovered from a DER document.
pub(super) struct Decoded {
    pub private: PrivateScalar,
    pub public: Option<PublicKey>,

    /// Encoding of the embedded public key, if there was one.
    pub compressed: Option<bool>,
}

pub(super) fn encode(
    private: &PrivateScalar,
    public: &PublicKey,
    compressed: bool,
) -> Result<Zeroizing<Vec<u8>>> {
    let private_key = private.to_field_bytes()?;
    let public_key = arithmetic::encode_public_key(public, compressed);

    let document = EcPrivateKey {
        private_key: private_key.as_slice(),
        parameters: Some(EcParameters::NamedCurve(SECP256K1_OID)),
        public_key: Some(public_key.as_slice()),
    };

    document
        .to_der()
        .map(Zeroizing::new)
        .map_err(|_| Error::Serialization)
}

pub(super) fn decode(bytes: &[u8]) -> Result<Decoded> {
    let document = EcPrivateKey::from_der(bytes)?;

    if let Some(parameters) = document.parameters {
        if parameters.named_curve() != Some(SECP256K1_OID) {
            return Err(Error::UnsupportedCurve);
        }
    }

    if document.private_key.is_empty() || document.private_key.len() > SCALAR_SIZE {
        return Err(Error::Decode("private key must be 1 to 32 bytes"));
    }

    let private = PrivateScalar::from_be_bytes(document.private_key);

    let (public, compressed) = match document.public_key {
        Some(point) => {
            let public = arithmetic::decode_point(point)
                .map_err(|_| Error::Decode("embedded public key is not a valid point"))?;
            (Some(public), Some(point.len() == COMPRESSED_POINT_SIZE))
        }
        None => (None, None),
    };
    tracing::trace!(embedded_public = public.is_some(), "decoded EC private key");

    Ok(Decoded {
        private,
        public,
        compressed,
    })
}
