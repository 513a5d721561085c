//! A thread-safe pool of reusable [`BigInt`] instances.

use std::sync::{Arc, Mutex};

use bigint::BigInt;

use crate::engine::mod_exp_into;
use crate::error::ModExpError;

/// A thread-safe pool of reusable [`BigInt`] instances.
///
/// Repeated modular exponentiation allocates four big integers per call
/// (base, exponent, modulus, result); a shared pool recycles them so that
/// a steady-state caller allocates only the returned result bytes. Cloning
/// the pool is cheap and yields a handle to the same free list.
///
/// An acquired instance is moved out of the pool and exclusively owned by
/// the caller until released; the pool serializes only hand-out and return,
/// never use. Every released instance is scrubbed to zero first, so pooled
/// memory does not retain prior operands (which may be key material)
/// between borrows.
pub struct BigIntPool(Arc<Mutex<Vec<BigInt>>>);

impl Default for BigIntPool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BigIntPool {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl BigIntPool {
    /// Creates a new, empty pool.
    #[inline]
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    /// Takes an instance from the free list, or creates a fresh zero-valued
    /// one if the free list is empty. Never fails.
    #[inline]
    pub fn acquire(&self) -> BigInt {
        let mut free = self.0.lock().unwrap();
        free.pop().unwrap_or_default()
    }

    /// Scrubs `x` to zero and returns it to the free list.
    ///
    /// The scrub zero-fills the retained limb buffer, so the freed instance
    /// keeps its capacity but none of its previous value.
    #[inline]
    pub fn release(&self, mut x: BigInt) {
        x.set_u64(0);
        let mut free = self.0.lock().unwrap();
        free.push(x);
    }

    /// Returns the number of instances currently on the free list.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    /// Returns `true` if the free list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }

    /// Drops all pooled instances.
    #[inline]
    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    /// Computes `base ^ exponent mod modulus` over big-endian byte operands
    /// using pooled instances.
    ///
    /// Four instances are acquired (base, exponent, modulus, result) and
    /// released — scrubbed — before this returns, on success and on error
    /// alike. The returned bytes are a fresh allocation owned by the
    /// caller; only the big integers are recycled.
    ///
    /// # Errors
    ///
    /// [`ModExpError::InvalidModulus`] when `modulus` is empty or all-zero.
    pub fn compute_pooled(
        &self,
        base: &[u8],
        exponent: &[u8],
        modulus: &[u8],
    ) -> Result<Vec<u8>, ModExpError> {
        let mut base_int = self.acquire();
        let mut exp_int = self.acquire();
        let mut mod_int = self.acquire();
        let mut result_int = self.acquire();

        base_int.set_bytes_be(base);
        exp_int.set_bytes_be(exponent);
        mod_int.set_bytes_be(modulus);

        let outcome = mod_exp_into(&mut result_int, &base_int, &exp_int, &mod_int)
            .map(|()| result_int.to_bytes_be());

        self.release(base_int);
        self.release(exp_int);
        self.release(mod_int);
        self.release(result_int);

        outcome
    }
}

/// Computes `base ^ exponent mod modulus` through a private single-use pool.
///
/// This is a convenience for callers that cannot amortize: it behaves like
/// [`BigIntPool::compute_pooled`] but builds and discards the pool around
/// one call, so it is strictly worse than sharing a long-lived pool across
/// many calls (and no better than [`mod_exp_bytes`](crate::mod_exp_bytes)).
///
/// # Errors
///
/// [`ModExpError::InvalidModulus`] when `modulus` is empty or all-zero.
pub fn mod_exp_bytes_pooled(
    base: &[u8],
    exponent: &[u8],
    modulus: &[u8],
) -> Result<Vec<u8>, ModExpError> {
    BigIntPool::new().compute_pooled(base, exponent, modulus)
}
