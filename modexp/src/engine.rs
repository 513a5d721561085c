//! The windowed square-and-multiply exponentiation core.

use bigint::BigInt;

use crate::error::ModExpError;

/// Window width in bits for the fixed-window ladder.
const WINDOW: usize = 4;

/// Exponents at most this many bits run the plain square-and-multiply
/// ladder; the precomputed table does not pay for itself below that.
const PLAIN_THRESHOLD: usize = 64;

/// Computes `base ^ exponent mod modulus` into a fresh [`BigInt`].
///
/// The result is the unique representative in `[0, modulus)`. By the usual
/// convention `x^0 = 1` for every `x` including zero, so a zero exponent
/// yields `1 mod modulus`.
///
/// # Errors
///
/// [`ModExpError::InvalidModulus`] when `modulus` is zero.
#[inline]
pub fn mod_exp(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt, ModExpError> {
    let mut result = BigInt::new();
    mod_exp_into(&mut result, base, exponent, modulus)?;
    Ok(result)
}

/// Computes `base ^ exponent mod modulus` into a caller-provided result.
///
/// Semantics match [`mod_exp`]; the difference is that the caller controls
/// the result's allocation lifecycle, which is what lets a pooled instance
/// be reused across calls.
///
/// # Errors
///
/// [`ModExpError::InvalidModulus`] when `modulus` is zero. The result is
/// left unchanged on error.
pub fn mod_exp_into(
    result: &mut BigInt,
    base: &BigInt,
    exponent: &BigInt,
    modulus: &BigInt,
) -> Result<(), ModExpError> {
    if modulus.is_zero() {
        return Err(ModExpError::InvalidModulus);
    }
    if modulus.as_u64() == Some(1) {
        // Everything is 0 mod 1, including x^0.
        result.set_u64(0);
        return Ok(());
    }
    if exponent.is_zero() {
        result.set_u64(1);
        return Ok(());
    }

    let mut reduced_base = BigInt::new();
    reduced_base.set_rem(base, modulus);
    if reduced_base.is_zero() {
        // 0^e = 0 for e > 0; also covers base being a multiple of modulus.
        result.set_u64(0);
        return Ok(());
    }

    result.set_u64(1);
    let mut scratch = BigInt::new();
    if exponent.bit_len() <= PLAIN_THRESHOLD {
        plain_ladder(result, &mut scratch, &reduced_base, exponent, modulus);
    } else {
        windowed_ladder(result, &mut scratch, &reduced_base, exponent, modulus);
    }
    Ok(())
}

/// Computes `base ^ exponent mod modulus` over big-endian byte operands.
///
/// An empty operand is the value `0`. The returned bytes are the minimal
/// big-endian encoding: empty for a zero result, no leading zero byte
/// otherwise.
///
/// # Errors
///
/// [`ModExpError::InvalidModulus`] when `modulus` is empty or all-zero.
pub fn mod_exp_bytes(
    base: &[u8],
    exponent: &[u8],
    modulus: &[u8],
) -> Result<Vec<u8>, ModExpError> {
    let base = BigInt::from_bytes_be(base);
    let exponent = BigInt::from_bytes_be(exponent);
    let modulus = BigInt::from_bytes_be(modulus);
    let mut result = BigInt::new();
    mod_exp_into(&mut result, &base, &exponent, &modulus)?;
    Ok(result.to_bytes_be())
}

/// One modular multiplication step: `acc = acc * rhs mod modulus`.
///
/// `scratch` holds the unreduced product; every product is reduced
/// immediately so intermediates never exceed `modulus` squared.
#[inline]
fn mul_reduce(acc: &mut BigInt, scratch: &mut BigInt, rhs: &BigInt, modulus: &BigInt) {
    scratch.set_mul(acc, rhs);
    acc.set_rem(scratch, modulus);
}

/// One modular squaring step: `acc = acc * acc mod modulus`.
#[inline]
fn square_reduce(acc: &mut BigInt, scratch: &mut BigInt, modulus: &BigInt) {
    scratch.set_mul(acc, acc);
    acc.set_rem(scratch, modulus);
}

/// Left-to-right binary square-and-multiply for short exponents.
fn plain_ladder(
    result: &mut BigInt,
    scratch: &mut BigInt,
    base: &BigInt,
    exponent: &BigInt,
    modulus: &BigInt,
) {
    for i in (0..exponent.bit_len()).rev() {
        square_reduce(result, scratch, modulus);
        if exponent.bit(i) {
            mul_reduce(result, scratch, base, modulus);
        }
    }
}

/// Fixed 4-bit-window ladder with a table of `base^k mod modulus` for
/// `k in 1..16`, trading 14 precomputed multiplications for one reduction
/// per four exponent bits instead of per set bit.
fn windowed_ladder(
    result: &mut BigInt,
    scratch: &mut BigInt,
    base: &BigInt,
    exponent: &BigInt,
    modulus: &BigInt,
) {
    // table[k] = base^(k + 1) mod modulus
    let mut table: Vec<BigInt> = Vec::with_capacity((1 << WINDOW) - 1);
    table.push(base.clone());
    for k in 1..(1 << WINDOW) - 1 {
        let mut next = BigInt::new();
        scratch.set_mul(&table[k - 1], base);
        next.set_rem(scratch, modulus);
        table.push(next);
    }

    let windows = exponent.bit_len().div_ceil(WINDOW);
    for w in (0..windows).rev() {
        for _ in 0..WINDOW {
            square_reduce(result, scratch, modulus);
        }
        let mut window = 0usize;
        for b in (0..WINDOW).rev() {
            window = (window << 1) | exponent.bit(w * WINDOW + b) as usize;
        }
        if window != 0 {
            mul_reduce(result, scratch, &table[window - 1], modulus);
        }
    }
}
