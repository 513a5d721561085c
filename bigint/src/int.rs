use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::arith;
use crate::error::ParseBigIntError;

/// An arbitrary-precision non-negative integer.
///
/// The magnitude is stored as little-endian `u64` limbs with no
/// most-significant zero limb; zero is the empty limb sequence. There is no
/// sign: operands of cryptographic modular exponentiation are always
/// non-negative magnitudes.
///
/// All `set_*` operations mutate the receiver in place and keep the limb
/// buffer's allocation where possible, which is what makes recycling an
/// instance across many operations cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BigInt {
    pub(crate) limbs: Vec<u64>,
}

impl BigInt {
    /// Creates a new [`BigInt`] with value `0`. Allocates nothing.
    #[inline]
    pub const fn new() -> Self {
        Self { limbs: Vec::new() }
    }

    /// Creates a [`BigInt`] from a small unsigned integer.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        let mut x = Self::new();
        x.set_u64(value);
        x
    }

    /// Creates a [`BigInt`] from a big-endian unsigned magnitude.
    ///
    /// An empty slice is the value `0`.
    #[inline]
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut x = Self::new();
        x.set_bytes_be(bytes);
        x
    }

    /// Creates a [`BigInt`] by parsing `s` as a non-negative integer
    /// in the given radix. See [`set_str_radix`](Self::set_str_radix).
    #[inline]
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, ParseBigIntError> {
        let mut x = Self::new();
        x.set_str_radix(s, radix)?;
        Ok(x)
    }

    /// Sets the value to a small unsigned integer.
    ///
    /// The retained limb buffer is zero-filled before truncation, so this
    /// doubles as the scrub step when an instance returns to a pool: no
    /// residue of the previous magnitude stays readable in the buffer.
    pub fn set_u64(&mut self, value: u64) -> &mut Self {
        self.limbs.fill(0);
        self.limbs.clear();
        if value != 0 {
            self.limbs.push(value);
        }
        self
    }

    /// Sets the value from a big-endian unsigned magnitude.
    ///
    /// An empty slice sets the value to `0`; this is valid input, not an
    /// error, matching the byte encoding produced by
    /// [`to_bytes_be`](Self::to_bytes_be). Leading zero bytes are accepted
    /// and ignored.
    pub fn set_bytes_be(&mut self, bytes: &[u8]) -> &mut Self {
        self.limbs.clear();
        let mut i = bytes.len();
        while i > 0 {
            let start = i.saturating_sub(8);
            let mut limb = 0u64;
            for &byte in &bytes[start..i] {
                limb = (limb << 8) | u64::from(byte);
            }
            self.limbs.push(limb);
            i = start;
        }
        self.trim();
        self
    }

    /// Sets the value by parsing `s` as a non-negative integer in the given
    /// radix.
    ///
    /// Radix `2..=62` is supported with the conventional digit alphabet:
    /// up to radix 36 the letters are case-insensitive with values
    /// `10..=35`; for radix `37..=62` upper-case letters keep the values
    /// `10..=35` and lower-case letters continue with `36..=61`.
    ///
    /// # Errors
    ///
    /// [`ParseBigIntError::UnsupportedRadix`] when `radix` is outside
    /// `2..=62`, [`ParseBigIntError::Empty`] for an empty string, and
    /// [`ParseBigIntError::InvalidDigit`] when a character is not a digit
    /// of the radix. On error the receiver is left unchanged.
    pub fn set_str_radix(&mut self, s: &str, radix: u32) -> Result<&mut Self, ParseBigIntError> {
        if !(2..=62).contains(&radix) {
            return Err(ParseBigIntError::UnsupportedRadix { radix });
        }
        if s.is_empty() {
            return Err(ParseBigIntError::Empty);
        }
        let mut digits = Vec::with_capacity(s.len());
        for ch in s.chars() {
            match digit_value(ch, radix) {
                Some(d) => digits.push(d),
                None => return Err(ParseBigIntError::InvalidDigit { ch, radix }),
            }
        }
        self.set_u64(0);
        for d in digits {
            arith::mul_add_limb(&mut self.limbs, u64::from(radix), u64::from(d));
        }
        Ok(self)
    }

    /// Returns the minimal big-endian byte encoding of the magnitude.
    ///
    /// Zero encodes to the empty vector, never to `[0]`, and a non-zero
    /// value carries no leading zero byte. This is the wire convention of
    /// big-endian unsigned magnitudes: `from_bytes_be(x.to_bytes_be())`
    /// reproduces `x` exactly.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let Some(&high) = self.limbs.last() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.limbs.len() * 8);
        let high_bytes = high.to_be_bytes();
        let skip = (high.leading_zeros() / 8) as usize;
        out.extend_from_slice(&high_bytes[skip..]);
        for limb in self.limbs.iter().rev().skip(1) {
            out.extend_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Returns `true` if the value is `0`.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Returns the value as a `u64` if it fits, `None` otherwise.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self.limbs.len() {
            0 => Some(0),
            1 => Some(self.limbs[0]),
            _ => None,
        }
    }

    /// Returns the number of significant bits, `0` for zero.
    #[inline]
    pub fn bit_len(&self) -> usize {
        match self.limbs.last() {
            Some(high) => self.limbs.len() * 64 - high.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Returns bit `i` of the magnitude, counting from the least
    /// significant bit. Bits beyond [`bit_len`](Self::bit_len) are `0`.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        match self.limbs.get(i / 64) {
            Some(limb) => (limb >> (i % 64)) & 1 == 1,
            None => false,
        }
    }

    /// Drop most-significant zero limbs to restore the canonical form.
    #[inline]
    pub(crate) fn trim(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }
}

/// Digit value of `ch` under `radix`, following the mpz_set_str alphabet.
fn digit_value(ch: char, radix: u32) -> Option<u32> {
    let value = match ch {
        '0'..='9' => ch as u32 - '0' as u32,
        'A'..='Z' => 10 + ch as u32 - 'A' as u32,
        'a'..='z' if radix <= 36 => 10 + ch as u32 - 'a' as u32,
        'a'..='z' => 36 + ch as u32 - 'a' as u32,
        _ => return None,
    };
    (value < radix).then_some(value)
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.limbs.len().cmp(&other.limbs.len()) {
            Ordering::Equal => self.limbs.iter().rev().cmp(other.limbs.iter().rev()),
            ordering => ordering,
        }
    }
}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for BigInt {
    /// Formats the canonical decimal representation, `"0"` for zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        // Peel off 19 decimal digits per division step.
        const CHUNK: u64 = 10_000_000_000_000_000_000;
        let mut rest = self.limbs.clone();
        let mut chunks = Vec::new();
        while !rest.is_empty() {
            chunks.push(arith::div_rem_limb_in_place(&mut rest, CHUNK));
        }
        let mut chunks = chunks.into_iter().rev();
        // The leading chunk prints without zero padding.
        write!(f, "{}", chunks.next().unwrap())?;
        for chunk in chunks {
            write!(f, "{chunk:019}")?;
        }
        Ok(())
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    /// Parses a decimal string, equivalent to
    /// [`from_str_radix`](Self::from_str_radix) with radix `10`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rand::{prelude::*, thread_rng};

    use super::*;

    fn random_bytes(rng: &mut impl Rng, max_len: usize) -> Vec<u8> {
        let len = rng.gen_range(0..=max_len);
        let mut bytes = vec![0u8; len];
        rng.fill(bytes.as_mut_slice());
        bytes
    }

    #[test]
    fn test_zero_representation() {
        let zero = BigInt::new();
        assert!(zero.is_zero());
        assert_eq!(zero.to_bytes_be(), Vec::<u8>::new());
        assert_eq!(zero.bit_len(), 0);
        assert_eq!(zero.as_u64(), Some(0));
        assert_eq!(zero.to_string(), "0");
        assert_eq!(BigInt::from_u64(0), zero);
        assert_eq!(BigInt::from_bytes_be(&[]), zero);
        assert_eq!(BigInt::from_bytes_be(&[0, 0, 0]), zero);
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut rng = thread_rng();
        for _ in 0..200 {
            let mut bytes = random_bytes(&mut rng, 40);
            // Strip leading zeros so the minimal encoding matches exactly.
            while bytes.first() == Some(&0) {
                bytes.remove(0);
            }
            let x = BigInt::from_bytes_be(&bytes);
            assert_eq!(x.to_bytes_be(), bytes);
        }
    }

    #[test]
    fn test_set_bytes_reuses_instance() {
        let mut x = BigInt::from_bytes_be(&[0xff; 32]);
        x.set_bytes_be(&[0x01, 0x02]);
        assert_eq!(x.to_bytes_be(), vec![0x01, 0x02]);
        x.set_u64(0);
        assert!(x.is_zero());
        assert_eq!(x.to_bytes_be(), Vec::<u8>::new());
    }

    #[test]
    fn test_bit_iteration() {
        // 2^100 + 5
        let mut bytes = vec![0u8; 13];
        bytes[0] = 0x10;
        bytes[12] = 0x05;
        let x = BigInt::from_bytes_be(&bytes);
        assert_eq!(x.bit_len(), 101);
        assert!(x.bit(0));
        assert!(!x.bit(1));
        assert!(x.bit(2));
        assert!(x.bit(100));
        assert!(!x.bit(101));
        assert!(!x.bit(100_000));
    }

    #[test]
    fn test_ordering() {
        let a = BigInt::from_u64(7);
        let b = BigInt::from_bytes_be(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
        assert!(BigInt::new() < a);
    }

    #[test]
    fn test_decimal_display() {
        assert_eq!(BigInt::from_u64(12345).to_string(), "12345");
        assert_eq!(
            BigInt::from_u64(u64::MAX).to_string(),
            "18446744073709551615"
        );

        let mut rng = thread_rng();
        for _ in 0..50 {
            let bytes = random_bytes(&mut rng, 48);
            let x = BigInt::from_bytes_be(&bytes);
            assert_eq!(x.to_string(), BigUint::from_bytes_be(&bytes).to_string());
        }
    }

    #[test]
    fn test_parse_decimal() {
        let x: BigInt = "340282366920938463463374607431768211456".parse().unwrap();
        // 2^128
        let mut expected = vec![0u8; 17];
        expected[0] = 1;
        assert_eq!(x.to_bytes_be(), expected);
        assert_eq!(BigInt::from_str("0").unwrap(), BigInt::new());
        assert_eq!(BigInt::from_str("00000").unwrap(), BigInt::new());
    }

    #[test]
    fn test_parse_display_round_trip() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let bytes = random_bytes(&mut rng, 32);
            let x = BigInt::from_bytes_be(&bytes);
            assert_eq!(x.to_string().parse::<BigInt>().unwrap(), x);
        }
    }

    #[test]
    fn test_parse_radix() {
        assert_eq!(
            BigInt::from_str_radix("deadBEEF", 16).unwrap(),
            BigInt::from_u64(0xdead_beef)
        );
        assert_eq!(
            BigInt::from_str_radix("101010", 2).unwrap(),
            BigInt::from_u64(42)
        );
        // Radix 62 is case-sensitive: 'Z' is 35, 'z' is 61.
        assert_eq!(
            BigInt::from_str_radix("Z", 62).unwrap(),
            BigInt::from_u64(35)
        );
        assert_eq!(
            BigInt::from_str_radix("z", 62).unwrap(),
            BigInt::from_u64(61)
        );
        assert_eq!(
            BigInt::from_str_radix("10", 62).unwrap(),
            BigInt::from_u64(62)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            BigInt::from_str_radix("", 10),
            Err(ParseBigIntError::Empty)
        );
        assert_eq!(
            BigInt::from_str_radix("12", 1),
            Err(ParseBigIntError::UnsupportedRadix { radix: 1 })
        );
        assert_eq!(
            BigInt::from_str_radix("12", 63),
            Err(ParseBigIntError::UnsupportedRadix { radix: 63 })
        );
        assert_eq!(
            BigInt::from_str_radix("12a", 10),
            Err(ParseBigIntError::InvalidDigit { ch: 'a', radix: 10 })
        );
        assert_eq!(
            BigInt::from_str_radix("-5", 10),
            Err(ParseBigIntError::InvalidDigit { ch: '-', radix: 10 })
        );
        assert_eq!(
            BigInt::from_str_radix("7", 7),
            Err(ParseBigIntError::InvalidDigit { ch: '7', radix: 7 })
        );
    }

    #[test]
    fn test_parse_error_leaves_value_unchanged() {
        let mut x = BigInt::from_u64(99);
        assert!(x.set_str_radix("1x", 10).is_err());
        assert_eq!(x, BigInt::from_u64(99));
    }
}
