//! PBKDF2 ([RFC 8018]) with HMAC-SHA-512 as the pseudorandom function.
//!
//! Password and salt are moved into a [`Pbkdf2Request`], which wipes them
//! when it is dropped. Both [`derive`] and [`derive_in_background`] consume
//! the request, so the inputs are gone by the time the output is returned,
//! whether or not derivation succeeded.
//!
//! [RFC 8018]: https://datatracker.ietf.org/doc/html/rfc8018

use crate::{Error, Result};
use core::fmt;
use elliptic_curve::zeroize::Zeroizing;
use hmac::Hmac;
use sha2::Sha512;

#[cfg(feature = "async")]
use crate::task::Background;

/// Output size of the underlying hash function.
const PRF_OUTPUT_SIZE: u64 = 64;

/// Longest output PBKDF2 can produce with HMAC-SHA-512: `(2^32 - 1)` blocks.
pub const MAX_KEY_LENGTH: u64 = 0xffff_ffff * PRF_OUTPUT_SIZE;

/// Iteration count fixed by [BIP 39] for seed derivation.
///
/// [BIP 39]: https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki
pub const MNEMONIC_ROUNDS: u32 = 2048;

/// Length of a BIP 39 seed.
pub const SEED_SIZE: usize = 64;

/// Validated PBKDF2 inputs.
pub struct Pbkdf2Request {
    password: Zeroizing<Vec<u8>>,
    salt: Zeroizing<Vec<u8>>,
    rounds: u32,
    key_length: usize,
}

impl Pbkdf2Request {
    /// Take ownership of `password` and `salt` and check the parameters.
    ///
    /// `iterations` must fit in 32 bits; zero is accepted and behaves like
    /// a single iteration. `key_length` may be zero and must not exceed
    /// [`MAX_KEY_LENGTH`]. On failure the buffers are wiped before the
    /// error is returned.
    pub fn new(
        password: impl Into<Vec<u8>>,
        salt: impl Into<Vec<u8>>,
        iterations: u64,
        key_length: usize,
    ) -> Result<Self> {
        let password = Zeroizing::new(password.into());
        let salt = Zeroizing::new(salt.into());

        let rounds = u32::try_from(iterations)
            .map_err(|_| Error::InvalidParameter("iterations must be below 2^32"))?;

        if u64::try_from(key_length).map_or(true, |len| len > MAX_KEY_LENGTH) {
            return Err(Error::InvalidParameter("key length exceeds (2^32 - 1) * 64 bytes"));
        }

        Ok(Self {
            password,
            salt,
            rounds,
            key_length,
        })
    }

    /// Iteration count.
    pub fn iterations(&self) -> u32 {
        self.rounds
    }

    /// Requested output length in bytes.
    pub fn key_length(&self) -> usize {
        self.key_length
    }
}

impl fmt::Debug for Pbkdf2Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pbkdf2Request")
            .field("iterations", &self.rounds)
            .field("key_length", &self.key_length)
            .finish_non_exhaustive()
    }
}

/// Run PBKDF2-HMAC-SHA-512 on the calling thread.
pub fn derive(request: Pbkdf2Request) -> Result<Zeroizing<Vec<u8>>> {
    let mut output = Zeroizing::new(vec![0u8; request.key_length]);

    // The first PRF block of every output block is always computed.
    pbkdf2::pbkdf2::<Hmac<Sha512>>(
        &request.password,
        &request.salt,
        request.rounds.max(1),
        &mut output,
    )
    .map_err(|_| Error::Derivation)?;

    tracing::debug!(
        iterations = request.rounds,
        key_length = request.key_length,
        "derived PBKDF2-HMAC-SHA512 key"
    );
    Ok(output)
}

/// Run [`derive`] on the background pool.
///
/// The request is consumed and wiped on the worker before the handle
/// resolves. If the worker never finishes the handle yields
/// [`Error::Derivation`].
#[cfg(feature = "async")]
pub fn derive_in_background(request: Pbkdf2Request) -> Result<Background<Zeroizing<Vec<u8>>>> {
    Background::spawn("pbkdf2", Error::Derivation, move || derive(request))
}

/// Stretch a BIP 39 mnemonic sentence into a 64-byte seed.
///
/// The salt is `"mnemonic"` followed by `passphrase`. Both strings are used
/// as given; callers are responsible for NFKD normalization.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<Zeroizing<[u8; SEED_SIZE]>> {
    let mut salt = Zeroizing::new(Vec::with_capacity(8 + passphrase.len()));
    salt.extend_from_slice(b"mnemonic");
    salt.extend_from_slice(passphrase.as_bytes());

    let request = Pbkdf2Request::new(
        phrase.as_bytes(),
        salt.as_slice(),
        MNEMONIC_ROUNDS.into(),
        SEED_SIZE,
    )?;
    let output = derive(request)?;

    let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
    seed.copy_from_slice(&output);
    Ok(seed)
}
