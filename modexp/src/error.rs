//! This module defines the errors that
//! may occur during modular exponentiation.

use thiserror::Error;

/// Errors that may occur in the modular exponentiation entry points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModExpError {
    /// Error that occurs when the modulus is zero, including the
    /// empty-bytes encoding of zero. Reduction modulo zero is undefined.
    #[error("modulus must be non-zero")]
    InvalidModulus,
}
