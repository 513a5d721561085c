#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Arbitrary-precision non-negative integers, sized for modular exponentiation.
//!
//! The [`BigInt`] type stores a magnitude as little-endian `u64` limbs and
//! supports construction from radix-2..=62 strings and big-endian bytes,
//! export back to bytes, and the multiply/remainder/bit-iteration operations
//! that a modular exponentiation engine needs. All setters mutate in place
//! and reuse the existing limb allocation where possible, so instances can be
//! recycled across many operations.

mod arith;
mod error;
mod int;
mod primitive;

pub use error::ParseBigIntError;
pub use int::BigInt;

pub(crate) use primitive::Widening;
