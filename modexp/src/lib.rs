#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

//! Modular exponentiation over big-endian byte operands.
//!
//! The entry points compute `base ^ exponent mod modulus` where all three
//! operands are big-endian unsigned magnitudes: the value `0` is the empty
//! byte string, and non-zero values carry no leading zero byte.
//!
//! [`mod_exp_bytes`] allocates fresh [`BigInt`] instances per call. For
//! high-throughput callers, [`BigIntPool`] recycles instances across calls
//! via [`BigIntPool::compute_pooled`], so repeated operations of similar
//! size settle into zero per-call limb allocation.
//!
//! Execution is not constant-time: the exponent's bits steer branching and
//! operand magnitudes steer running time. Do not rely on this crate for
//! timing-side-channel resistance.

mod engine;
mod error;
mod pool;

pub use bigint::BigInt;
pub use engine::{mod_exp, mod_exp_bytes, mod_exp_into};
pub use error::ModExpError;
pub use pool::{mod_exp_bytes_pooled, BigIntPool};
