//! Error types.

use core::fmt;

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Component of a [`Key`][`crate::Key`]'s key material.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyComponent {
    /// Secret scalar.
    Private,

    /// Public curve point.
    Public,
}

impl fmt::Display for KeyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyComponent::Private => f.write_str("private key"),
            KeyComponent::Public => f.write_str("public key"),
        }
    }
}

/// Coarse classification of an [`Error`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Wrong buffer length or out-of-range parameter.
    InvalidArgument,

    /// The operation needs a private or public key which is not set.
    MissingKeyMaterial,

    /// Malformed DER or SEC1 encoding.
    Decode,

    /// Off-curve or otherwise unusable point.
    InvalidPoint,

    /// Scalar outside `[1, n-1]`.
    InvalidScalar,

    /// An underlying curve, RNG, HMAC or executor primitive failed.
    CryptoPrimitiveFailure,

    /// Verification produced neither "valid" nor "invalid".
    VerificationIndeterminate,
}

/// Error type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Message digest was not exactly 32 bytes.
    DigestLength {
        /// Length of the rejected digest.
        len: usize,
    },

    /// Buffer had the wrong length.
    InvalidLength {
        /// Name of the offending argument.
        arg: &'static str,

        /// Required length in bytes.
        expected: usize,

        /// Length actually supplied.
        actual: usize,
    },

    /// Key derivation parameter out of range.
    InvalidParameter(&'static str),

    /// Required key material is absent.
    MissingKey(KeyComponent),

    /// Malformed DER structure.
    Decode(&'static str),

    /// DER structure names a curve other than secp256k1.
    UnsupportedCurve,

    /// Bad SEC1 prefix, wrong length, point not on the curve, or the
    /// point at infinity.
    InvalidPoint,

    /// Scalar is zero or not below the group order.
    InvalidScalar,

    /// Stored public point is not `d×G` for the stored private scalar.
    KeyMismatch,

    /// Random scalar sampling failed.
    KeyGeneration,

    /// Internal invariant violated.
    Internal(&'static str),

    /// DER encoder failed.
    Serialization,

    /// ECDSA signing primitive failed.
    Signing,

    /// PBKDF2 primitive failed.
    Derivation,

    /// Verification did not reach a verdict.
    VerificationIndeterminate,

    /// Background task could not be submitted or did not complete.
    Executor(&'static str),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DigestLength { .. } | Error::InvalidLength { .. } | Error::InvalidParameter(_) => {
                ErrorKind::InvalidArgument
            }
            Error::MissingKey(_) => ErrorKind::MissingKeyMaterial,
            Error::Decode(_) | Error::UnsupportedCurve => ErrorKind::Decode,
            Error::InvalidPoint | Error::KeyMismatch => ErrorKind::InvalidPoint,
            Error::InvalidScalar => ErrorKind::InvalidScalar,
            Error::KeyGeneration
            | Error::Internal(_)
            | Error::Serialization
            | Error::Signing
            | Error::Derivation
            | Error::Executor(_) => ErrorKind::CryptoPrimitiveFailure,
            Error::VerificationIndeterminate => ErrorKind::VerificationIndeterminate,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DigestLength { len } => {
                write!(f, "digest must be 32 bytes (got {len})")
            }
            Error::InvalidLength {
                arg,
                expected,
                actual,
            } => write!(f, "argument '{arg}' must have length {expected} (got {actual})"),
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Error::MissingKey(component) => write!(f, "key does not have a {component} set"),
            Error::Decode(msg) => write!(f, "decode error: {msg}"),
            Error::UnsupportedCurve => f.write_str("encoded curve is not secp256k1"),
            Error::InvalidPoint => f.write_str("invalid curve point"),
            Error::InvalidScalar => f.write_str("scalar is not in [1, n-1]"),
            Error::KeyMismatch => f.write_str("public key does not match private key"),
            Error::KeyGeneration => f.write_str("key generation failed"),
            Error::Internal(msg) => write!(f, "internal error: {msg}"),
            Error::Serialization => f.write_str("DER serialization failed"),
            Error::Signing => f.write_str("ECDSA signing failed"),
            Error::Derivation => f.write_str("PBKDF2 derivation failed"),
            Error::VerificationIndeterminate => {
                f.write_str("ECDSA verification gave an undefined result")
            }
            Error::Executor(msg) => write!(f, "background task failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<sec1::der::Error> for Error {
    fn from(_: sec1::der::Error) -> Error {
        Error::Decode("malformed EC private key DER")
    }
}
