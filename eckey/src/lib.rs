#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod ecdsa;
pub mod kdf;
pub mod point;

mod arithmetic;
mod error;
mod key;

#[cfg(feature = "async")]
mod task;

pub use crate::{
    arithmetic::{COMPRESSED_POINT_SIZE, SCALAR_SIZE, UNCOMPRESSED_POINT_SIZE},
    ecdsa::Verification,
    error::{Error, ErrorKind, KeyComponent, Result},
    key::{Key, KeyState},
};
pub use elliptic_curve::{self, zeroize::Zeroizing};
pub use k256;

#[cfg(feature = "async")]
pub use crate::task::Background;
