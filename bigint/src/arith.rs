//! Multi-precision arithmetic on limb vectors.
//!
//! Only the operations that modular exponentiation needs are provided:
//! schoolbook multiplication into a destination, division with remainder
//! (single-limb fast path plus Knuth's Algorithm D for longer divisors),
//! and the small multiply-accumulate used by string parsing.

use std::cmp::Ordering;

use crate::int::BigInt;
use crate::Widening;

impl BigInt {
    /// Sets `self = lhs * rhs`, reusing the receiver's limb buffer.
    ///
    /// The receiver is the destination only; its previous value is
    /// discarded. `lhs` and `rhs` may be the same instance (squaring).
    pub fn set_mul(&mut self, lhs: &Self, rhs: &Self) -> &mut Self {
        self.limbs.clear();
        if lhs.is_zero() || rhs.is_zero() {
            return self;
        }
        self.limbs.resize(lhs.limbs.len() + rhs.limbs.len(), 0);
        for (i, &a) in lhs.limbs.iter().enumerate() {
            let mut carry = 0u64;
            for (j, &b) in rhs.limbs.iter().enumerate() {
                let (low, high) = a.carry_mul(b, carry);
                let (sum, overflow) = self.limbs[i + j].overflowing_add(low);
                self.limbs[i + j] = sum;
                // `high <= u64::MAX - 1`, so folding the overflow in is exact.
                carry = high + overflow as u64;
            }
            self.limbs[i + rhs.limbs.len()] = carry;
        }
        self.trim();
        self
    }

    /// Sets `self = value mod modulus`, reusing the receiver's limb buffer.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    pub fn set_rem(&mut self, value: &Self, modulus: &Self) -> &mut Self {
        assert!(!modulus.is_zero(), "remainder by zero");
        match value.cmp(modulus) {
            Ordering::Less => {
                self.limbs.clear();
                self.limbs.extend_from_slice(&value.limbs);
            }
            Ordering::Equal => {
                self.limbs.clear();
            }
            Ordering::Greater => {
                if let [divisor] = modulus.limbs[..] {
                    let mut quotient = value.limbs.clone();
                    let rem = div_rem_limb_in_place(&mut quotient, divisor);
                    self.set_u64(rem);
                } else {
                    let (_, rem) = div_rem_core(&value.limbs, &modulus.limbs);
                    self.limbs.clear();
                    self.limbs.extend_from_slice(&rem);
                }
            }
        }
        self
    }

    /// Returns the quotient and remainder of `self / divisor`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by zero");
        match self.cmp(divisor) {
            Ordering::Less => (Self::new(), self.clone()),
            Ordering::Equal => (Self::from_u64(1), Self::new()),
            Ordering::Greater => {
                if let [d] = divisor.limbs[..] {
                    let mut quotient = self.limbs.clone();
                    let rem = div_rem_limb_in_place(&mut quotient, d);
                    (Self { limbs: quotient }, Self::from_u64(rem))
                } else {
                    let (quotient, rem) = div_rem_core(&self.limbs, &divisor.limbs);
                    (Self { limbs: quotient }, Self { limbs: rem })
                }
            }
        }
    }
}

/// Computes `limbs = limbs * mul + add` in place.
pub(crate) fn mul_add_limb(limbs: &mut Vec<u64>, mul: u64, add: u64) {
    let mut carry = add;
    for limb in limbs.iter_mut() {
        let (low, high) = limb.carry_mul(mul, carry);
        *limb = low;
        carry = high;
    }
    if carry != 0 {
        limbs.push(carry);
    }
}

/// Divides `limbs` by a single limb in place, leaving the quotient in
/// `limbs` (trimmed) and returning the remainder.
pub(crate) fn div_rem_limb_in_place(limbs: &mut Vec<u64>, divisor: u64) -> u64 {
    debug_assert_ne!(divisor, 0);
    let mut rem = 0u64;
    for limb in limbs.iter_mut().rev() {
        let acc = (u128::from(rem) << 64) | u128::from(*limb);
        *limb = (acc / u128::from(divisor)) as u64;
        rem = (acc % u128::from(divisor)) as u64;
    }
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
    rem
}

/// Left-shifts `src` by `shift < 64` bits into a fresh vector. With
/// `extra_limb` the result is one limb longer and receives the carry-out;
/// without it the caller guarantees the shift cannot overflow the top limb.
fn shl_vec(src: &[u64], shift: u32, extra_limb: bool) -> Vec<u64> {
    let mut out = Vec::with_capacity(src.len() + extra_limb as usize);
    if shift == 0 {
        out.extend_from_slice(src);
        if extra_limb {
            out.push(0);
        }
        return out;
    }
    let mut carry = 0u64;
    for &limb in src {
        out.push((limb << shift) | carry);
        carry = limb >> (64 - shift);
    }
    if extra_limb {
        out.push(carry);
    } else {
        debug_assert_eq!(carry, 0);
    }
    out
}

/// Right-shifts `limbs` by `shift < 64` bits in place and trims.
fn shr_vec_in_place(limbs: &mut Vec<u64>, shift: u32) {
    if shift > 0 {
        let mut high = 0u64;
        for limb in limbs.iter_mut().rev() {
            let shifted = (*limb >> shift) | (high << (64 - shift));
            high = *limb;
            *limb = shifted;
        }
    }
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

/// Knuth Algorithm D: divides `u` by `v`, returning trimmed quotient and
/// remainder limb vectors.
///
/// Preconditions: both inputs canonical (no high zero limb), `v.len() >= 2`,
/// and `u > v`.
fn div_rem_core(u: &[u64], v: &[u64]) -> (Vec<u64>, Vec<u64>) {
    let n = v.len();
    debug_assert!(n >= 2);
    debug_assert!(u.len() >= n);

    // D1: normalize so the divisor's top bit is set.
    let shift = v[n - 1].leading_zeros();
    let vn = shl_vec(v, shift, false);
    let mut un = shl_vec(u, shift, true);
    let m = u.len() - n;
    let mut quotient = vec![0u64; m + 1];
    let v_top = vn[n - 1];
    let v_next = vn[n - 2];

    for j in (0..=m).rev() {
        // D3: estimate the quotient limb from the top three dividend limbs
        // against the top two divisor limbs.
        let head = (u128::from(un[j + n]) << 64) | u128::from(un[j + n - 1]);
        let mut q_hat = head / u128::from(v_top);
        let mut r_hat = head % u128::from(v_top);
        if q_hat > u128::from(u64::MAX) {
            q_hat = u128::from(u64::MAX);
            r_hat = head - q_hat * u128::from(v_top);
        }
        while r_hat <= u128::from(u64::MAX)
            && q_hat * u128::from(v_next) > ((r_hat << 64) | u128::from(un[j + n - 2]))
        {
            q_hat -= 1;
            r_hat += u128::from(v_top);
        }
        let mut q_hat = q_hat as u64;

        // D4: multiply and subtract, `un[j..=j+n] -= q_hat * vn`.
        let mut carry = 0u64;
        let mut borrow = false;
        for i in 0..n {
            let (low, high) = vn[i].carry_mul(q_hat, carry);
            carry = high;
            let (diff, b) = un[j + i].borrow_sub(low, borrow);
            un[j + i] = diff;
            borrow = b;
        }
        let (diff, underflow) = un[j + n].borrow_sub(carry, borrow);
        un[j + n] = diff;

        // D6: the estimate was one too large, add one divisor back.
        if underflow {
            q_hat -= 1;
            let mut carry = false;
            for i in 0..n {
                let (sum, c) = un[j + i].carry_add(vn[i], carry);
                un[j + i] = sum;
                carry = c;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u64);
        }
        quotient[j] = q_hat;
    }

    // D8: denormalize the remainder.
    un.truncate(n);
    shr_vec_in_place(&mut un, shift);
    while quotient.last() == Some(&0) {
        quotient.pop();
    }
    (quotient, un)
}
