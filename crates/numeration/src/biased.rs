//! Biased (excess-K) integers.
//!
//! A value `n` is stored as the natural number `n + K` written with a fixed
//! number of digits. Every digit pattern is a valid encoding, so the
//! packing efficiency is always exactly 1.
//!
//! Arithmetic never fails on overflow: the result wraps modulo `B^length`
//! and [`ArithmeticOutcome::overflow`] is set.
//!
//! # Example
//!
//! ```
//! use num_bigint::BigInt;
//! use numeration::biased::ExcessK;
//!
//! let code = ExcessK::new(10, 2, 47).unwrap();
//! assert_eq!(code.represent(&BigInt::from(0)).unwrap(), "47");
//! assert_eq!(code.represent(&BigInt::from(-47)).unwrap(), "00");
//! assert_eq!(code.to_integer("99").unwrap(), BigInt::from(52));
//!
//! let sum = code.add("99", "48").unwrap();
//! assert!(sum.overflow);
//! assert_eq!(sum.exact, BigInt::from(53));
//! ```

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};

use crate::error::{Error, Result};
use crate::positional::{base_to_decimal, check_base, decimal_to_base};
use crate::rational::pow_u;

/// Largest table [`ExcessK::table`] will build.
pub const TABLE_LIMIT: u64 = 4096;

/// An excess-K code: `length` digits in `base`, bias `K`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ExcessKFields"))]
pub struct ExcessK {
    base: u32,
    length: u32,
    #[cfg_attr(feature = "serde", serde(serialize_with = "bias_serde::serialize"))]
    bias: BigInt,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ExcessKFields {
    base: u32,
    length: u32,
    #[serde(deserialize_with = "bias_serde::deserialize")]
    bias: BigInt,
}

/// `K` as a plain integer, or a decimal string once it outgrows `i64`.
#[cfg(feature = "serde")]
mod bias_serde {
    use core::fmt;

    use num_bigint::BigInt;
    use num_traits::ToPrimitive;
    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bias: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        match bias.to_i64() {
            Some(k) => serializer.serialize_i64(k),
            None => serializer.collect_str(bias),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        deserializer.deserialize_any(BiasVisitor)
    }

    struct BiasVisitor;

    impl<'de> Visitor<'de> for BiasVisitor {
        type Value = BigInt;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a decimal integer string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigInt, E> {
            Ok(v.into())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigInt, E> {
            Ok(v.into())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<BigInt, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<ExcessKFields> for ExcessK {
    type Error = Error;

    fn try_from(f: ExcessKFields) -> Result<Self> {
        Self::new(f.base, f.length, f.bias)
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of an excess-K operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArithmeticOutcome {
    /// Encoded result, wrapped when it overflowed.
    pub digits: String,
    /// Value represented by `digits`.
    pub value: BigInt,
    /// The mathematically exact result.
    pub exact: BigInt,
    /// Whether `exact` fell outside the representable range.
    pub overflow: bool,
}

/// Range summary of an excess-K code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExcessKAnalysis {
    /// Smallest value, `−K`.
    pub min: BigInt,
    /// Largest value, `B^length − 1 − K`.
    pub max: BigInt,
    /// Number of patterns, `B^length`.
    pub capacity: BigUint,
}

impl ExcessKAnalysis {
    /// Always 1: every pattern encodes a distinct value.
    #[must_use]
    pub fn packing_efficiency(&self) -> BigRational {
        BigRational::one()
    }
}

// ============================================================================
// Codec and arithmetic
// ============================================================================

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
}

impl ExcessK {
    /// Builds a code.
    ///
    /// Any integer bias is accepted. The range is always the `B^length`
    /// consecutive values `−K ..= B^length − 1 − K`, so a bias at or above
    /// `B^length` gives an all-negative range and a negative bias an
    /// all-positive one.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBase`] or [`Error::InvalidFormat`] for a zero length.
    pub fn new(base: u32, length: u32, bias: impl Into<BigInt>) -> Result<Self> {
        check_base(base)?;
        if length == 0 {
            return Err(Error::InvalidFormat("excess-K code needs at least one digit".into()));
        }
        Ok(Self {
            base,
            length,
            bias: bias.into(),
        })
    }

    /// The IEEE-style code with `K = B^(length−1) − 1`.
    ///
    /// # Errors
    ///
    /// See [`ExcessK::new`].
    pub fn standard(base: u32, length: u32) -> Result<Self> {
        check_base(base)?;
        let bias = BigInt::from(pow_u(base, length.saturating_sub(1))) - 1;
        Self::new(base, length, bias)
    }

    /// Base `B`.
    #[inline]
    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Digit count.
    #[inline]
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Bias `K`.
    #[inline]
    #[must_use]
    pub fn bias(&self) -> &BigInt {
        &self.bias
    }

    /// `B^length`.
    #[must_use]
    pub fn capacity(&self) -> BigUint {
        pow_u(self.base, self.length)
    }

    /// `−K`.
    #[must_use]
    pub fn min_value(&self) -> BigInt {
        -self.bias.clone()
    }

    /// `B^length − 1 − K`.
    #[must_use]
    pub fn max_value(&self) -> BigInt {
        BigInt::from(self.capacity()) - 1 - &self.bias
    }

    /// Range summary.
    #[must_use]
    pub fn analyze(&self) -> ExcessKAnalysis {
        ExcessKAnalysis {
            min: self.min_value(),
            max: self.max_value(),
            capacity: self.capacity(),
        }
    }

    fn render(&self, encoded: &BigInt) -> Result<String> {
        let natural = encoded.to_biguint().ok_or_else(|| {
            Error::out_of_range(encoded - &self.bias, self.min_value(), self.max_value())
        })?;
        decimal_to_base(&natural, self.base, Some(self.length as usize))
    }

    /// Encodes `n` as the digits of `n + K`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `n + K` is outside `[0, B^length)`.
    pub fn represent(&self, n: &BigInt) -> Result<String> {
        if n < &self.min_value() || n > &self.max_value() {
            return Err(Error::out_of_range(n, self.min_value(), self.max_value()));
        }
        self.render(&(n + &self.bias))
    }

    /// Decodes digits: natural value minus `K`.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] for a wrong digit count and the digit errors
    /// of [`base_to_decimal`].
    pub fn to_integer(&self, digits: &str) -> Result<BigInt> {
        let found = digits.chars().count();
        if found != self.length as usize {
            return Err(Error::LengthMismatch {
                expected: self.length as usize,
                found,
            });
        }
        Ok(BigInt::from(base_to_decimal(digits, self.base)?) - &self.bias)
    }

    fn apply(&self, op: Op, a: &str, b: &str) -> Result<ArithmeticOutcome> {
        let x = self.to_integer(a)?;
        let y = self.to_integer(b)?;
        let exact = match op {
            Op::Add => &x + &y,
            Op::Sub => &x - &y,
            Op::Mul => &x * &y,
        };
        let encoded = &exact + &self.bias;
        let capacity = BigInt::from(self.capacity());
        let wrapped = encoded.mod_floor(&capacity);
        let overflow = wrapped != encoded;
        if overflow {
            tracing::debug!(
                code = %self,
                exact = %exact,
                "excess-K result wrapped"
            );
        }
        Ok(ArithmeticOutcome {
            digits: self.render(&wrapped)?,
            value: wrapped - &self.bias,
            exact,
            overflow,
        })
    }

    /// `a + b`, wrapping on overflow.
    ///
    /// # Errors
    ///
    /// Operand errors of [`ExcessK::to_integer`].
    pub fn add(&self, a: &str, b: &str) -> Result<ArithmeticOutcome> {
        self.apply(Op::Add, a, b)
    }

    /// `a − b`, wrapping on overflow.
    ///
    /// # Errors
    ///
    /// Operand errors of [`ExcessK::to_integer`].
    pub fn sub(&self, a: &str, b: &str) -> Result<ArithmeticOutcome> {
        self.apply(Op::Sub, a, b)
    }

    /// `a · b`, wrapping on overflow.
    ///
    /// # Errors
    ///
    /// Operand errors of [`ExcessK::to_integer`].
    pub fn mul(&self, a: &str, b: &str) -> Result<ArithmeticOutcome> {
        self.apply(Op::Mul, a, b)
    }

    /// Every `(value, digits)` pair in encoded order.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] above [`TABLE_LIMIT`] patterns.
    pub fn table(&self) -> Result<Vec<(BigInt, String)>> {
        let capacity = self.capacity();
        let count = capacity
            .to_u64()
            .filter(|&c| c <= TABLE_LIMIT)
            .ok_or_else(|| Error::TooLarge {
                what: "excess-K table",
                count: capacity.to_string(),
                limit: TABLE_LIMIT,
            })?;
        (0..count)
            .map(|encoded| {
                let encoded = BigInt::from(encoded);
                let digits = self.render(&encoded)?;
                Ok((encoded - &self.bias, digits))
            })
            .collect()
    }
}

impl fmt::Display for ExcessK {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "excess-{} ({} digits, base {})", self.bias, self.length, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn represents_across_the_range() {
        let code = ExcessK::new(10, 2, 47).unwrap();
        assert_eq!(code.represent(&int(0)).unwrap(), "47");
        assert_eq!(code.represent(&int(-47)).unwrap(), "00");
        assert_eq!(code.represent(&int(52)).unwrap(), "99");
        assert!(matches!(
            code.represent(&int(53)),
            Err(Error::OutOfRange { .. })
        ));
        assert!(code.represent(&int(-48)).is_err());
    }

    #[test]
    fn decodes_and_checks_length() {
        let code = ExcessK::new(2, 4, 8).unwrap();
        assert_eq!(code.to_integer("0000").unwrap(), int(-8));
        assert_eq!(code.to_integer("1111").unwrap(), int(7));
        assert_eq!(
            code.to_integer("111"),
            Err(Error::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
        assert!(matches!(
            code.to_integer("1121"),
            Err(Error::InvalidDigit { .. })
        ));
    }

    #[test]
    fn standard_bias() {
        let code = ExcessK::standard(2, 8).unwrap();
        assert_eq!(code.bias(), &int(127));
        assert_eq!(code.represent(&int(0)).unwrap(), "01111111");
        assert_eq!(ExcessK::standard(10, 3).unwrap().bias(), &int(99));
    }

    #[test]
    fn arithmetic_without_overflow() {
        let code = ExcessK::new(10, 2, 47).unwrap();
        let r = code.add("50", "45").unwrap();
        assert_eq!(r.exact, int(1));
        assert_eq!(r.value, int(1));
        assert_eq!(r.digits, "48");
        assert!(!r.overflow);

        let r = code.mul("49", "44").unwrap();
        assert_eq!(r.exact, int(-6));
        assert_eq!(r.digits, "41");
    }

    #[test]
    fn overflow_wraps_and_flags() {
        let code = ExcessK::new(10, 2, 47).unwrap();
        let r = code.add("99", "48").unwrap();
        assert!(r.overflow);
        assert_eq!(r.exact, int(53));
        // 53 + 47 = 100 -> 00
        assert_eq!(r.digits, "00");
        assert_eq!(r.value, int(-47));

        let r = code.sub("00", "48").unwrap();
        assert!(r.overflow);
        assert_eq!(r.exact, int(-48));
        assert_eq!(r.digits, "99");
    }

    #[test]
    fn analysis() {
        let a = ExcessK::new(10, 2, 47).unwrap().analyze();
        assert_eq!(a.min, int(-47));
        assert_eq!(a.max, int(52));
        assert_eq!(a.capacity, BigUint::from(100u32));
        assert_eq!(a.packing_efficiency(), BigRational::one());
    }

    #[test]
    fn bias_past_capacity_shifts_the_range() {
        let code = ExcessK::new(10, 2, 200).unwrap();
        let a = code.analyze();
        assert_eq!((a.min.clone(), a.max.clone()), (int(-200), int(-101)));
        assert_eq!(BigInt::from(a.capacity), &a.max - &a.min + 1);
        assert_eq!(code.represent(&int(-101)).unwrap(), "99");
        assert_eq!(code.to_integer("00").unwrap(), int(-200));

        let code = ExcessK::new(10, 2, -5).unwrap();
        assert_eq!((code.min_value(), code.max_value()), (int(5), int(104)));
        assert!(code.represent(&int(4)).is_err());
    }

    #[test]
    fn table_lists_encoded_order() {
        let t = ExcessK::new(2, 2, 1).unwrap().table().unwrap();
        let expect: Vec<(BigInt, String)> = vec![
            (int(-1), "00".into()),
            (int(0), "01".into()),
            (int(1), "10".into()),
            (int(2), "11".into()),
        ];
        assert_eq!(t, expect);
        assert!(matches!(
            ExcessK::new(2, 13, 0).unwrap().table(),
            Err(Error::TooLarge { .. })
        ));
    }
}
