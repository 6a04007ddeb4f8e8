//! Raw group operations on 65-byte uncompressed SEC1 points.
//!
//! These are used by public key derivation schemes (e.g. BIP 32 public
//! child keys) which need to combine points without any key entity.

use crate::{
    arithmetic::{self, SCALAR_SIZE},
    Error, Result,
};

/// Compute `p0 + p1`.
///
/// Both inputs must be 65-byte uncompressed points on the curve. An input of
/// any other length fails with [`Error::InvalidLength`] naming `point0` or
/// `point1`. A bad tag, an off-curve point, or a sum equal to the point at
/// infinity is reported as [`Error::InvalidPoint`].
pub fn add_uncompressed(p0: &[u8], p1: &[u8]) -> Result<Vec<u8>> {
    let a = arithmetic::decode_uncompressed("point0", p0)?;
    let b = arithmetic::decode_uncompressed("point1", p1)?;

    arithmetic::encode_point(&(a + b), false)
}

/// Compute `x × p0`.
///
/// `p0` must be a 65-byte uncompressed point and `x` exactly 32 big endian
/// bytes; length mismatches fail with [`Error::InvalidLength`] naming `point0`
/// or `x`. `x` is reduced modulo the group order, so values at or above it
/// wrap around. A product at infinity is reported as [`Error::InvalidPoint`].
pub fn multiply_uncompressed(p0: &[u8], x: &[u8]) -> Result<Vec<u8>> {
    let point = arithmetic::decode_uncompressed("point0", p0)?;

    let x: &[u8; SCALAR_SIZE] = x.try_into().map_err(|_| Error::InvalidLength {
        arg: "x",
        expected: SCALAR_SIZE,
        actual: x.len(),
    })?;

    arithmetic::encode_point(&(point * arithmetic::reduce_scalar(x)), false)
}
