//! # Byteseq Encoding
//!
//! Conversions between bytestrings and their textual representations:
//!
//! - [`numeral`]: every byte as a fixed-width run of binary, octal, decimal, or hexadecimal digits.
//! - [`base64`]: Base64 with a configurable alphabet and padding policy, including the lenient
//!   [forgiving-base64 decode](https://infra.spec.whatwg.org/#forgiving-base64-decode).
//! - [`percent`]: `%XX` escapes for the encode sets of the [URL Standard](https://url.spec.whatwg.org/).
//!
//! All conversions are pure functions over immutable option values. Options are validated when they
//! are constructed, so encoding never fails; decoding validates its whole input before producing any
//! output.
//!
//! Every error type exposes a [`kind`](OptionsError::kind) that classifies it as one of the
//! [`ErrorKind`]s shared with the `byteseq-reader` crate.
//!
//! ## Features
//!
//! - `dev`: implements [`Arbitrary`](https://docs.rs/arbitrary) for all option types, for fuzz testing.

pub mod base64;
mod error;
pub mod numeral;
pub mod percent;

pub use error::*;
