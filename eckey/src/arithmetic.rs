//! Big number and curve point helpers restricted to the secp256k1 group.
//!
//! Everything here is a thin layer over [`k256`]. No state is shared between
//! calls: each helper builds whatever points or scalars it needs on the stack.

use crate::{Error, Result};
use elliptic_curve::{
    group::Group,
    ops::Reduce,
    sec1::{FromEncodedPoint, ToEncodedPoint},
    zeroize::{Zeroize, Zeroizing},
};
use k256::{
    AffinePoint, EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, U256,
};

/// Size of a serialized scalar or field element.
pub const SCALAR_SIZE: usize = 32;

/// Size of a SEC1 compressed point.
pub const COMPRESSED_POINT_SIZE: usize = 33;

/// Size of a SEC1 uncompressed point.
pub const UNCOMPRESSED_POINT_SIZE: usize = 65;

/// SEC1 tag byte for uncompressed points.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Decode a compressed or uncompressed SEC1 point.
///
/// Only `0x02`/`0x03` followed by `x` (33 bytes) and `0x04` followed by
/// `x || y` (65 bytes) are accepted. Compact, hybrid and identity encodings
/// are rejected, as are off-curve coordinates.
pub fn decode_point(bytes: &[u8]) -> Result<PublicKey> {
    match (bytes.len(), bytes.first().copied()) {
        (COMPRESSED_POINT_SIZE, Some(0x02 | 0x03)) => (),
        (UNCOMPRESSED_POINT_SIZE, Some(UNCOMPRESSED_TAG)) => (),
        _ => return Err(Error::InvalidPoint),
    }

    PublicKey::from_sec1_bytes(bytes).map_err(|_| Error::InvalidPoint)
}

/// Decode a 65-byte uncompressed SEC1 point into projective form.
pub fn decode_uncompressed(arg: &'static str, bytes: &[u8]) -> Result<ProjectivePoint> {
    if bytes.len() != UNCOMPRESSED_POINT_SIZE {
        return Err(Error::InvalidLength {
            arg,
            expected: UNCOMPRESSED_POINT_SIZE,
            actual: bytes.len(),
        });
    }

    if bytes[0] != UNCOMPRESSED_TAG {
        return Err(Error::InvalidPoint);
    }

    let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| Error::InvalidPoint)?;
    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .map(ProjectivePoint::from)
        .ok_or(Error::InvalidPoint)
}

/// Serialize a point as SEC1.
///
/// The identity has no fixed-width encoding and is rejected.
pub fn encode_point(point: &ProjectivePoint, compress: bool) -> Result<Vec<u8>> {
    if bool::from(point.is_identity()) {
        return Err(Error::InvalidPoint);
    }

    Ok(point.to_affine().to_encoded_point(compress).as_bytes().to_vec())
}

/// Serialize a public key as SEC1.
pub fn encode_public_key(public_key: &PublicKey, compress: bool) -> Vec<u8> {
    public_key.to_encoded_point(compress).as_bytes().to_vec()
}

/// Interpret 32 big endian bytes as an integer reduced modulo the group
/// order.
pub fn reduce_scalar(bytes: &[u8; SCALAR_SIZE]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*bytes))
}

/// Secret scalar exactly as it was supplied: a big endian unsigned integer
/// with leading zero bytes stripped.
///
/// The value is not range checked on construction. Conversions into curve
/// types perform the checks and fail without touching the stored bytes.
#[derive(Clone)]
pub struct PrivateScalar {
    magnitude: Zeroizing<Vec<u8>>,
}

impl PrivateScalar {
    /// Parse a big endian integer of any length.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self {
            magnitude: Zeroizing::new(bytes[start..].to_vec()),
        }
    }

    /// Number of significant bytes.
    #[cfg(test)]
    pub fn byte_len(&self) -> usize {
        self.magnitude.len()
    }

    /// Serialize as exactly 32 big endian bytes, left padded with zeros.
    pub fn to_field_bytes(&self) -> Result<Zeroizing<[u8; SCALAR_SIZE]>> {
        let len = self.magnitude.len();
        if len > SCALAR_SIZE {
            return Err(Error::Internal(
                "secret too large (incorrect curve parameters?)",
            ));
        }

        let mut out = Zeroizing::new([0u8; SCALAR_SIZE]);
        out[SCALAR_SIZE - len..].copy_from_slice(&self.magnitude);
        Ok(out)
    }

    /// Convert to a scalar in `[1, n-1]`.
    pub fn to_nonzero_scalar(&self) -> Result<NonZeroScalar> {
        let bytes = self.to_field_bytes().map_err(|_| Error::InvalidScalar)?;
        Option::from(NonZeroScalar::from_repr(FieldBytes::from(*bytes))).ok_or(Error::InvalidScalar)
    }

    /// Public point for this scalar: `d×G`.
    pub fn public_key(&self) -> Result<PublicKey> {
        Ok(PublicKey::from_secret_scalar(&self.to_nonzero_scalar()?))
    }
}

impl From<&NonZeroScalar> for PrivateScalar {
    fn from(scalar: &NonZeroScalar) -> Self {
        let mut repr = FieldBytes::from(*scalar);
        let scalar = Self::from_be_bytes(&repr);
        repr.zeroize();
        scalar
    }
}

impl PartialEq for PrivateScalar {
    fn eq(&self, other: &Self) -> bool {
        use elliptic_curve::subtle::ConstantTimeEq;

        self.magnitude.len() == other.magnitude.len()
            && bool::from(self.magnitude.as_slice().ct_eq(other.magnitude.as_slice()))
    }
}

impl Eq for PrivateScalar {}
