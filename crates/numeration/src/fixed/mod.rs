//! Fixed-point values `Q(E,F)_B`.
//!
//! A value is stored twice: as its raw encoding (the digits a student writes
//! down) and as its signed scaled integer `m = value · B^F`. Arithmetic and
//! ordering use `m`; rendering uses the raw encoding.
//!
//! # Encodings
//!
//! | Representation | raw for `m ≥ 0` | raw for `m < 0` |
//! |----------------|-----------------|-----------------|
//! | unsigned | `m` | n/a |
//! | sign-magnitude | `m` | `B^(E+F) + |m|` |
//! | complement | `m` | `B^(E+F+1) + m` |
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use numeration::fixed::{FixedPointValue, NumberFormat};
//!
//! let q = NumberFormat::unsigned(4, 4, 2).unwrap();
//! let v = FixedPointValue::parse(q, "5.25").unwrap();
//! assert_eq!(v.encode(), &BigUint::from(84u32));
//! assert_eq!(v.digits(), "01010100");
//! assert_eq!(v.radix_string(), "0101.0100");
//!
//! let back = FixedPointValue::from_raw(q, BigUint::from(84u32)).unwrap();
//! assert_eq!(back.to_decimal_string(), "5.25");
//! ```

mod arith;
mod format;
pub mod migration;

pub use format::{NumberFormat, Representation};
pub use migration::{
    convert, convert_related, migrate, minimal_fraction_digits, satisfies_precision_rule,
    Migration, MigrationReport,
};

use core::hash::{Hash, Hasher};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::{Error, Result};
use crate::positional::decimal_to_base;
use crate::rational::{self, round_half_away};

// ============================================================================
// Value
// ============================================================================

/// A value in a fixed-point format.
///
/// Equality and hashing follow the numeric value, so the two sign-magnitude
/// zeros compare equal while still rendering differently.
#[derive(Debug, Clone)]
pub struct FixedPointValue {
    format: NumberFormat,
    raw: BigUint,
    scaled: BigInt,
}

impl FixedPointValue {
    /// Quantizes `value` to the nearest multiple of `ε = B^−F`.
    ///
    /// Ties round away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when the quantized value falls outside
    /// the format (including any negative value in an unsigned format).
    pub fn new(format: NumberFormat, value: &BigRational) -> Result<Self> {
        let scaled = round_half_away(&format.scaled_of(value));
        if scaled < format.min_scaled() || scaled > format.max_scaled() || (!format.is_signed() && value.is_negative()) {
            return Err(Error::out_of_range(
                rational::display(value),
                rational::display(&format.min_value()),
                rational::display(&format.max_value()),
            ));
        }
        Ok(Self::encode_scaled(format, scaled))
    }

    /// Parses a decimal literal and quantizes it.
    ///
    /// # Errors
    ///
    /// Fails like [`rational::parse_decimal`] and [`FixedPointValue::new`].
    pub fn parse(format: NumberFormat, literal: &str) -> Result<Self> {
        Self::new(format, &rational::parse_decimal(literal)?)
    }

    /// Builds a value from its scaled integer `m = value · B^F`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when `m` is outside the format.
    pub fn from_scaled(format: NumberFormat, scaled: BigInt) -> Result<Self> {
        if scaled < format.min_scaled() || scaled > format.max_scaled() {
            return Err(Error::out_of_range(
                rational::display(&format.value_of(&scaled)),
                rational::display(&format.min_value()),
                rational::display(&format.max_value()),
            ));
        }
        Ok(Self::encode_scaled(format, scaled))
    }

    /// Decodes a raw encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when `raw ≥ B^width`, or when a
    /// complement encoding has a sign digit other than `0` and `B − 1`.
    pub fn from_raw(format: NumberFormat, raw: BigUint) -> Result<Self> {
        let capacity = format.capacity();
        if raw >= capacity {
            return Err(Error::out_of_range(&raw, 0, capacity - 1u32));
        }
        let raw_int = BigInt::from(raw.clone());
        let weight = format.sign_weight();
        let scaled = match format.representation() {
            Representation::Unsigned => raw_int,
            Representation::SignMagnitude => {
                let (sign, magnitude) = raw_int.div_rem(&weight);
                if sign.is_zero() {
                    magnitude
                } else {
                    -magnitude
                }
            }
            Representation::Complement => {
                let sign = &raw_int / &weight;
                if sign.is_zero() {
                    raw_int
                } else if sign == BigInt::from(format.base() - 1) {
                    raw_int - BigInt::from(capacity)
                } else {
                    return Err(Error::out_of_range(
                        format!("raw {raw} (sign digit {sign})"),
                        0,
                        format!("{} with sign digit 0 or {}", capacity - 1u32, format.base() - 1),
                    ));
                }
            }
        };
        Ok(Self {
            format,
            raw,
            scaled,
        })
    }

    fn encode_scaled(format: NumberFormat, scaled: BigInt) -> Self {
        let raw = match (format.representation(), scaled.sign()) {
            (_, Sign::NoSign | Sign::Plus) => scaled.magnitude().clone(),
            (Representation::SignMagnitude, Sign::Minus) => {
                format.sign_weight().magnitude() + scaled.magnitude()
            }
            (_, Sign::Minus) => {
                let wrapped = scaled.mod_floor(&BigInt::from(format.capacity()));
                wrapped.magnitude().clone()
            }
        };
        Self {
            format,
            raw,
            scaled,
        }
    }

    /// The format this value belongs to.
    #[inline]
    #[must_use]
    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    /// The raw integer encoding `M`.
    #[inline]
    #[must_use]
    pub fn encode(&self) -> &BigUint {
        &self.raw
    }

    /// The signed scaled integer `m = value · B^F`.
    #[inline]
    #[must_use]
    pub fn scaled(&self) -> &BigInt {
        &self.scaled
    }

    /// The exact decoded value.
    #[must_use]
    pub fn value(&self) -> BigRational {
        self.format.value_of(&self.scaled)
    }

    /// The exact value as a decimal string (always terminates for bases
    /// whose prime factors are 2 and 5; otherwise `n/d`).
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        rational::display(&self.value())
    }

    /// Whether the value is below zero.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.scaled.is_negative()
    }

    /// Whether the value is zero (either sign-magnitude zero included).
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.scaled.is_zero()
    }

    /// The raw encoding zero-padded to the full width.
    #[must_use]
    pub fn digits(&self) -> String {
        decimal_to_base(&self.raw, self.format.base(), Some(self.format.width() as usize))
            .unwrap_or_default()
    }

    /// The raw digits with a radix point before the fraction digits.
    #[must_use]
    pub fn radix_string(&self) -> String {
        let mut digits = self.digits();
        let f = self.format.fraction_digits() as usize;
        if f > 0 {
            digits.insert(digits.len() - f, '.');
        }
        digits
    }

    /// The additive inverse.
    ///
    /// Sign-magnitude flips the sign digit, so `+0` and `−0` swap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for non-zero unsigned values and for
    /// the complement minimum `−B^E`, which has no positive counterpart.
    pub fn negate(&self) -> Result<Self> {
        match self.format.representation() {
            Representation::Unsigned if self.is_zero() => Ok(self.clone()),
            Representation::SignMagnitude => {
                let weight = self.format.sign_weight();
                let raw_int = BigInt::from(self.raw.clone());
                let raw = if raw_int >= weight {
                    raw_int.mod_floor(&weight)
                } else {
                    raw_int + weight
                };
                Ok(Self {
                    format: self.format,
                    raw: raw.magnitude().clone(),
                    scaled: -self.scaled.clone(),
                })
            }
            _ => Self::from_scaled(self.format, -self.scaled.clone()),
        }
    }

    /// The absolute value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for the complement minimum.
    pub fn abs(&self) -> Result<Self> {
        if self.is_negative() {
            self.negate()
        } else {
            Ok(self.clone())
        }
    }

    /// `|v − value|`, the representation error for `v`.
    #[must_use]
    pub fn absolute_error(&self, v: &BigRational) -> BigRational {
        (v - self.value()).abs()
    }

    /// `|v − value| / |v|`, or `None` when `v` is zero.
    #[must_use]
    pub fn relative_error(&self, v: &BigRational) -> Option<BigRational> {
        (!v.is_zero()).then(|| self.absolute_error(v) / v.abs())
    }
}

// ============================================================================
// Equality and display
// ============================================================================

impl PartialEq for FixedPointValue {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format && self.scaled == other.scaled
    }
}

impl Eq for FixedPointValue {}

impl Hash for FixedPointValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.format.hash(state);
        self.scaled.hash(state);
    }
}

impl core::fmt::Display for FixedPointValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.radix_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::{from_int, parse_decimal};

    fn q(literal: &str, format: NumberFormat) -> FixedPointValue {
        FixedPointValue::parse(format, literal).unwrap()
    }

    #[test]
    fn unsigned_encoding() {
        let f = NumberFormat::unsigned(4, 4, 2).unwrap();
        let v = q("5.25", f);
        assert_eq!(v.encode(), &BigUint::from(84u32));
        assert_eq!(v.scaled(), &BigInt::from(84));
        assert_eq!(v.value(), parse_decimal("5.25").unwrap());
    }

    #[test]
    fn quantizes_half_up() {
        let f = NumberFormat::unsigned(2, 1, 10).unwrap();
        assert_eq!(q("1.25", f).to_decimal_string(), "1.3");
        assert_eq!(q("1.24", f).to_decimal_string(), "1.2");

        let f = NumberFormat::sign_magnitude(2, 1, 10).unwrap();
        assert_eq!(q("-1.25", f).to_decimal_string(), "-1.3");
    }

    #[test]
    fn out_of_range_values() {
        let f = NumberFormat::unsigned(4, 4, 2).unwrap();
        assert!(matches!(
            FixedPointValue::parse(f, "16"),
            Err(Error::OutOfRange { .. })
        ));
        // 15.97 rounds to 16.0 which is above B^E − ε
        assert!(FixedPointValue::parse(f, "15.97").is_err());
        assert!(FixedPointValue::parse(f, "15.9375").is_ok());
        assert!(FixedPointValue::parse(f, "-0.25").is_err());
    }

    #[test]
    fn sign_magnitude_encoding() {
        let f = NumberFormat::sign_magnitude(2, 1, 10).unwrap();
        let v = q("-3.5", f);
        assert_eq!(v.digits(), "1035");
        assert_eq!(v.radix_string(), "103.5");

        let decoded = FixedPointValue::from_raw(f, BigUint::from(7035u32)).unwrap();
        assert_eq!(decoded.to_decimal_string(), "-3.5");
        assert_eq!(decoded, v);
    }

    #[test]
    fn sign_magnitude_has_two_zeros() {
        let f = NumberFormat::sign_magnitude(1, 0, 2).unwrap();
        let plus = FixedPointValue::from_raw(f, BigUint::from(0u32)).unwrap();
        let minus = FixedPointValue::from_raw(f, BigUint::from(2u32)).unwrap();
        assert_eq!(plus, minus);
        assert_ne!(plus.digits(), minus.digits());
        assert_eq!(plus.negate().unwrap().digits(), "10");
    }

    #[test]
    fn complement_encoding() {
        let f = NumberFormat::complement(4, 4, 2).unwrap();
        let v = q("-5.25", f);
        // 2^9 − 84
        assert_eq!(v.encode(), &BigUint::from(428u32));
        assert_eq!(v.digits(), "110101100");

        let f = NumberFormat::complement(2, 0, 10).unwrap();
        let v = q("-1", f);
        assert_eq!(v.digits(), "999");
        assert_eq!(q("-100", f).digits(), "900");
    }

    #[test]
    fn complement_rejects_foreign_sign_digits() {
        let f = NumberFormat::complement(2, 0, 10).unwrap();
        assert!(FixedPointValue::from_raw(f, BigUint::from(99u32)).is_ok());
        assert!(FixedPointValue::from_raw(f, BigUint::from(950u32)).is_ok());
        assert!(matches!(
            FixedPointValue::from_raw(f, BigUint::from(500u32)),
            Err(Error::OutOfRange { .. })
        ));
        assert!(FixedPointValue::from_raw(f, BigUint::from(1000u32)).is_err());
    }

    #[test]
    fn negate_and_abs() {
        let f = NumberFormat::complement(2, 0, 10).unwrap();
        let v = q("42", f);
        assert_eq!(v.negate().unwrap().to_decimal_string(), "-42");
        assert_eq!(v.negate().unwrap().abs().unwrap(), v);
        assert!(q("-100", f).negate().is_err());

        let u = NumberFormat::unsigned(2, 0, 10).unwrap();
        assert!(q("3", u).negate().is_err());
        assert!(q("0", u).negate().is_ok());
    }

    #[test]
    fn representation_errors() {
        let f = NumberFormat::unsigned(1, 2, 10).unwrap();
        let exact = BigRational::new(1.into(), 3.into());
        let v = FixedPointValue::new(f, &exact).unwrap();
        assert_eq!(v.to_decimal_string(), "0.33");
        assert_eq!(v.absolute_error(&exact), BigRational::new(1.into(), 300.into()));
        assert_eq!(v.relative_error(&exact), Some(BigRational::new(1.into(), 100.into())));
        assert_eq!(v.relative_error(&from_int(0)), None);
    }

    #[test]
    fn fraction_only_unsigned() {
        let f = NumberFormat::unsigned(0, 3, 2).unwrap();
        let v = q("0.625", f);
        assert_eq!(v.radix_string(), ".101");
    }
}
