//! Elliptic Curve Digital Signature Algorithm (ECDSA) over a [`Key`].
//!
//! Signatures are exchanged as ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`.
//! Callers hash their messages themselves: only 32-byte digests are
//! accepted.
//!
//! ## Usage
//!
//! ```
//! # fn example() -> Result<(), eckey::Error> {
//! use eckey::{Key, Verification};
//!
//! let key = Key::generate()?;
//! let digest = [0x5a; 32];
//!
//! let signature = key.sign(&digest)?;
//! assert_eq!(key.verify(&digest, &signature)?, Verification::Valid);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Nonces
//!
//! Every signature uses the RFC 6979 nonce derivation hedged with 32 bytes
//! of fresh OS randomness, so signing the same digest twice yields two
//! different signatures and a faulty RNG alone cannot leak the key.
//!
//! Signatures are always emitted in low-S form ([BIP 62]). Verification
//! accepts either form.
//!
//! [BIP 62]: https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki

use crate::{Error, Key, KeyComponent, Result};
use k256::ecdsa::{
    signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner},
    Signature, SigningKey, VerifyingKey,
};
use rand_core::{CryptoRngCore, OsRng};

#[cfg(feature = "async")]
use {crate::task::Background, std::sync::Arc};

/// Size of the message digest accepted by [`Key::sign`] and [`Key::verify`].
pub const DIGEST_SIZE: usize = 32;

/// Size of a fixed-width `r || s` signature.
pub const COMPACT_SIZE: usize = 64;

/// Outcome of a signature check which reached a verdict.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Verification {
    /// Signature matches the digest and public key.
    Valid,

    /// Well-formed signature which does not match.
    Invalid,
}

impl Verification {
    /// Is this [`Verification::Valid`]?
    pub fn is_valid(self) -> bool {
        self == Verification::Valid
    }
}

impl From<Verification> for bool {
    fn from(verification: Verification) -> bool {
        verification.is_valid()
    }
}

impl Key {
    /// Sign a 32-byte message digest, returning the DER-encoded signature.
    pub fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        self.sign_with_rng(&mut OsRng, digest)
    }

    /// Sign a 32-byte message digest, drawing the nonce's added entropy from
    /// `rng`.
    pub fn sign_with_rng(&self, rng: &mut impl CryptoRngCore, digest: &[u8]) -> Result<Vec<u8>> {
        let private = self
            .private_scalar()
            .ok_or(Error::MissingKey(KeyComponent::Private))?;
        check_digest(digest)?;

        let signing_key = SigningKey::from(private.to_nonzero_scalar()?);
        let signature: Signature = signing_key
            .sign_prehash_with_rng(rng, digest)
            .map_err(|_| Error::Signing)?;

        Ok(signature.to_der().as_bytes().to_vec())
    }

    /// Check a DER-encoded signature over a 32-byte digest against the
    /// stored public point.
    ///
    /// A signature which cannot be parsed as DER fails with
    /// [`Error::Decode`]; a well-formed signature which does not match
    /// yields [`Verification::Invalid`].
    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> Result<Verification> {
        let public = self
            .public_key()
            .ok_or(Error::MissingKey(KeyComponent::Public))?;
        check_digest(digest)?;

        verify_prehash(&VerifyingKey::from(public), digest, signature)
    }

    /// Run [`Key::verify`] on the background pool.
    ///
    /// Argument and key checks happen before anything is submitted. The
    /// returned handle keeps this key alive until the check completes.
    /// Concurrent checks against one key are independent; their handles
    /// resolve in completion order. If the check itself never reaches a
    /// verdict the handle yields [`Error::VerificationIndeterminate`].
    #[cfg(feature = "async")]
    pub fn verify_in_background(
        self: &Arc<Self>,
        digest: &[u8],
        signature: &[u8],
    ) -> Result<Background<Verification>> {
        if !self.has_public() {
            return Err(Error::MissingKey(KeyComponent::Public));
        }
        check_digest(digest)?;

        let key = Arc::clone(self);
        let digest = digest.to_vec();
        let signature = signature.to_vec();

        Background::spawn("verify", Error::VerificationIndeterminate, move || {
            key.verify(&digest, &signature)
        })
    }
}

fn check_digest(digest: &[u8]) -> Result<()> {
    if digest.len() != DIGEST_SIZE {
        return Err(Error::DigestLength { len: digest.len() });
    }

    Ok(())
}

fn parse_der(signature: &[u8]) -> Result<Signature> {
    Signature::from_der(signature).map_err(|_| Error::Decode("malformed DER signature"))
}

fn verify_prehash(
    verifying_key: &VerifyingKey,
    digest: &[u8],
    signature: &[u8],
) -> Result<Verification> {
    let signature = parse_der(signature)?;

    // High-S signatures are valid ECDSA; only their encoding is non-canonical.
    let signature = signature.normalize_s().unwrap_or(signature);

    match verifying_key.verify_prehash(digest, &signature) {
        Ok(()) => Ok(Verification::Valid),
        Err(_) => Ok(Verification::Invalid),
    }
}

/// Is this DER signature in low-S form?
pub fn is_low_s(signature: &[u8]) -> Result<bool> {
    Ok(parse_der(signature)?.normalize_s().is_none())
}

/// Re-encode a DER signature in low-S form.
pub fn normalize_der(signature: &[u8]) -> Result<Vec<u8>> {
    let signature = parse_der(signature)?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Convert a DER signature into fixed-width `r || s`.
pub fn der_to_compact(signature: &[u8]) -> Result<[u8; COMPACT_SIZE]> {
    let mut compact = [0u8; COMPACT_SIZE];
    compact.copy_from_slice(&parse_der(signature)?.to_bytes());
    Ok(compact)
}

/// Convert fixed-width `r || s` into a DER signature.
pub fn compact_to_der(signature: &[u8; COMPACT_SIZE]) -> Result<Vec<u8>> {
    let signature = Signature::from_slice(signature)
        .map_err(|_| Error::Decode("r and s must be in [1, n-1]"))?;
    Ok(signature.to_der().as_bytes().to_vec())
}
