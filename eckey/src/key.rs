//! secp256k1 key pair with independently settable halves.
//!
//! A [`Key`] may hold a private scalar, a public point, both, or neither.
//! The raw setters do not check that the two halves belong together; see
//! [`KeyState`] for how that is tracked and [`Key::check_pair`] for opting
//! into strict validation.

mod der;

use crate::{
    arithmetic::{self, PrivateScalar, SCALAR_SIZE},
    Error, KeyComponent, Result,
};
use core::fmt;
use elliptic_curve::zeroize::Zeroizing;
use k256::{FieldBytes, NonZeroScalar, PublicKey};
use rand_core::{CryptoRngCore, OsRng};

/// Which halves of a [`Key`] are present and whether they are known to
/// match.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyState {
    /// No key material.
    Empty,

    /// Private scalar only.
    PrivateOnly,

    /// Public point only.
    PublicOnly,

    /// Both halves are set but the public point was supplied independently
    /// and has not been checked against the private scalar.
    PairedUnverified,

    /// Both halves are set and the public point is `d×G`.
    PairedVerified,
}

/// secp256k1 key entity.
///
/// Mutators validate their input before committing anything, so a failed
/// call leaves the key exactly as it was. The private scalar is wiped from
/// memory when it is replaced or the key is dropped.
#[derive(Clone)]
pub struct Key {
    private: Option<PrivateScalar>,
    public: Option<PublicKey>,
    derived: bool,
    compressed: bool,
}

impl Key {
    /// Public keys are exported compressed unless told otherwise.
    pub const DEFAULT_COMPRESSED: bool = true;

    /// Create a key with no key material.
    pub fn new() -> Self {
        Self {
            private: None,
            public: None,
            derived: false,
            compressed: Self::DEFAULT_COMPRESSED,
        }
    }

    /// Generate a fresh key pair from a uniformly random scalar in `[1, n-1]`.
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate a fresh key pair using the supplied RNG.
    ///
    /// Candidates outside `[1, n-1]` are rejected and redrawn, so the
    /// result is uniform. Fails with [`Error::KeyGeneration`] if the RNG
    /// reports an error.
    pub fn generate_with_rng(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let mut candidate = Zeroizing::new([0u8; SCALAR_SIZE]);

        let scalar = loop {
            rng.try_fill_bytes(&mut candidate[..])
                .map_err(|_| Error::KeyGeneration)?;

            let repr = FieldBytes::from(*candidate);
            if let Some(scalar) = Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(repr)) {
                break scalar;
            }
        };

        tracing::debug!("generated secp256k1 key pair");
        Ok(Self::from_nonzero_scalar(&scalar))
    }

    /// Create a key pair from a 32-byte (or shorter, big endian) secret
    /// scalar which must lie in `[1, n-1]`. The public point is derived.
    pub fn from_private(bytes: &[u8]) -> Result<Self> {
        let private = PrivateScalar::from_be_bytes(bytes);
        let public = private.public_key()?;

        Ok(Self {
            private: Some(private),
            public: Some(public),
            derived: true,
            compressed: Self::DEFAULT_COMPRESSED,
        })
    }

    pub(crate) fn from_nonzero_scalar(scalar: &NonZeroScalar) -> Self {
        Self {
            private: Some(PrivateScalar::from(scalar)),
            public: Some(PublicKey::from_secret_scalar(scalar)),
            derived: true,
            compressed: Self::DEFAULT_COMPRESSED,
        }
    }

    /// Current combination of key material.
    pub fn state(&self) -> KeyState {
        match (&self.private, &self.public, self.derived) {
            (None, None, _) => KeyState::Empty,
            (Some(_), None, _) => KeyState::PrivateOnly,
            (None, Some(_), _) => KeyState::PublicOnly,
            (Some(_), Some(_), false) => KeyState::PairedUnverified,
            (Some(_), Some(_), true) => KeyState::PairedVerified,
        }
    }

    /// Is a private scalar set?
    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }

    /// Is a public point set?
    pub fn has_public(&self) -> bool {
        self.public.is_some()
    }

    /// Private scalar as exactly 32 big endian bytes, or `None` if unset.
    ///
    /// Fails with [`Error::Internal`] if the stored integer needs more than
    /// 32 bytes.
    pub fn private_bytes(&self) -> Result<Option<Zeroizing<[u8; SCALAR_SIZE]>>> {
        self.private
            .as_ref()
            .map(PrivateScalar::to_field_bytes)
            .transpose()
    }

    /// Store `bytes`, read as a big endian unsigned integer of any length,
    /// as the private scalar.
    ///
    /// No range check is made and the public point is left untouched; call
    /// [`Key::regenerate`] to bring it in line.
    pub fn set_private(&mut self, bytes: &[u8]) {
        self.private = Some(PrivateScalar::from_be_bytes(bytes));
        self.derived = false;
    }

    /// Public point encoded as SEC1, compressed or not according to
    /// [`Key::compressed`].
    ///
    /// Fails with [`Error::MissingKey`] if no public point is set.
    pub fn public_bytes(&self) -> Result<Vec<u8>> {
        let public = self
            .public
            .as_ref()
            .ok_or(Error::MissingKey(KeyComponent::Public))?;

        Ok(arithmetic::encode_public_key(public, self.compressed))
    }

    /// Replace the public point with a decoded SEC1 point (33 or 65 bytes,
    /// format given by the prefix byte).
    ///
    /// On failure the previously stored point, if any, is kept.
    pub fn set_public(&mut self, bytes: &[u8]) -> Result<()> {
        let public = arithmetic::decode_point(bytes)?;
        self.public = Some(public);
        self.derived = false;
        tracing::trace!(len = bytes.len(), "stored public key");
        Ok(())
    }

    /// Borrow the public point.
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.public.as_ref()
    }

    /// Whether [`Key::public_bytes`] emits the 33-byte compressed form.
    pub fn compressed(&self) -> bool {
        self.compressed
    }

    /// Choose between the 33-byte compressed and 65-byte uncompressed
    /// public key encodings. Key material is unaffected.
    pub fn set_compressed(&mut self, compressed: bool) {
        self.compressed = compressed;
    }

    /// Recompute the public point as `d×G`, discarding the old one.
    ///
    /// Fails with [`Error::MissingKey`] without a private scalar. The scalar
    /// is not reduced: a value of zero or at or above the group order fails
    /// with [`Error::InvalidScalar`], and the key is left unchanged.
    pub fn regenerate(&mut self) -> Result<()> {
        let private = self
            .private
            .as_ref()
            .ok_or(Error::MissingKey(KeyComponent::Private))?;

        let public = private.public_key()?;
        self.public = Some(public);
        self.derived = true;
        tracing::debug!("regenerated public key from private scalar");
        Ok(())
    }

    /// Check that the stored public point is `d×G` for the stored private
    /// scalar, and remember the result.
    pub fn check_pair(&mut self) -> Result<()> {
        let private = self
            .private
            .as_ref()
            .ok_or(Error::MissingKey(KeyComponent::Private))?;
        let public = self
            .public
            .as_ref()
            .ok_or(Error::MissingKey(KeyComponent::Public))?;

        if &private.public_key()? != public {
            return Err(Error::KeyMismatch);
        }

        self.derived = true;
        Ok(())
    }

    /// Serialize as a SEC1 `ECPrivateKey` DER document, embedding both the
    /// private scalar and the stored public point.
    ///
    /// Returns `None` unless both halves are present.
    pub fn to_der(&self) -> Result<Option<Zeroizing<Vec<u8>>>> {
        match (&self.private, &self.public) {
            (Some(private), Some(public)) => {
                der::encode(private, public, self.compressed).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Parse a SEC1 `ECPrivateKey` DER document.
    ///
    /// The curve parameter may be omitted but if present must name
    /// secp256k1. When the document carries no public key it is derived
    /// from the private scalar.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let der::Decoded {
            private,
            public,
            compressed,
        } = der::decode(bytes)?;

        let (public, derived) = match public {
            Some(public) => {
                let derived = private.public_key().ok().as_ref() == Some(&public);
                (public, derived)
            }
            None => (private.public_key()?, true),
        };

        tracing::debug!(derived, "imported EC private key");
        Ok(Self {
            private: Some(private),
            public: Some(public),
            derived,
            compressed: compressed.unwrap_or(Self::DEFAULT_COMPRESSED),
        })
    }

    pub(crate) fn private_scalar(&self) -> Option<&PrivateScalar> {
        self.private.as_ref()
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("state", &self.state())
            .field("public", &self.public)
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}
