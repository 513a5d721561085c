//! This module defines the errors that
//! may occur when parsing a big integer from a string.

use thiserror::Error;

/// Errors that may occur when parsing a [`BigInt`](crate::BigInt) from a string.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBigIntError {
    /// Error that occurs when the input string is empty.
    #[error("cannot parse an integer from an empty string")]
    Empty,
    /// Error that occurs when the requested radix is outside `2..=62`.
    #[error("radix {radix} is outside the supported range 2..=62")]
    UnsupportedRadix {
        /// The requested radix.
        radix: u32,
    },
    /// Error that occurs when a character is not a digit of the radix.
    #[error("invalid digit {ch:?} for radix {radix}")]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// The radix the string was parsed with.
        radix: u32,
    },
}
