//! Float format descriptors.

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;

use crate::biased::ExcessK;
use crate::error::{Error, Result};
use crate::positional::check_base;
use crate::rational::{from_int, pow_ratio, pow_recip, pow_u, MAX_EXPONENT};

/// An IEEE754-style format: base `B`, `Ee` exponent digits, `Fm` mantissa
/// digits.
///
/// | field | range |
/// |-------|-------|
/// | bias | `B^(Ee−1) − 1` |
/// | exponent field, normalized | `1 ..= B^Ee − 2` |
/// | exponent field `0` | zero, denormalized |
/// | exponent field `B^Ee − 1` | infinity, NaN |
/// | mantissa field | `0 .. (B−1)·B^Fm` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "FloatFields"))]
pub struct FloatFormat {
    base: u32,
    exponent_digits: u32,
    mantissa_digits: u32,
    /// `B^Ee`, cached at construction.
    #[cfg_attr(feature = "serde", serde(skip))]
    exponent_patterns: u64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FloatFields {
    base: u32,
    exponent_digits: u32,
    mantissa_digits: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<FloatFields> for FloatFormat {
    type Error = Error;

    fn try_from(f: FloatFields) -> Result<Self> {
        Self::new(f.base, f.exponent_digits, f.mantissa_digits)
    }
}

impl FloatFormat {
    /// Builds a validated format.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBase`] outside `2..=36`.
    /// - [`Error::InvalidFormat`] for zero widths, for an exponent field too
    ///   narrow to hold a normalized exponent, or when `B^Ee` exceeds
    ///   [`MAX_EXPONENT`].
    pub fn new(base: u32, exponent_digits: u32, mantissa_digits: u32) -> Result<Self> {
        check_base(base)?;
        if exponent_digits == 0 || mantissa_digits == 0 {
            return Err(Error::InvalidFormat(
                "exponent and mantissa need at least one digit".into(),
            ));
        }
        let patterns = u64::from(base)
            .checked_pow(exponent_digits)
            .filter(|&p| p <= u64::from(MAX_EXPONENT))
            .ok_or_else(|| {
                Error::InvalidFormat(format!(
                    "{base}^{exponent_digits} exponent patterns exceed {MAX_EXPONENT}"
                ))
            })?;
        if patterns < 3 {
            return Err(Error::InvalidFormat(
                "exponent field has no room for normalized values".into(),
            ));
        }
        Ok(Self {
            base,
            exponent_digits,
            mantissa_digits,
            exponent_patterns: patterns,
        })
    }

    /// IEEE 754 binary16.
    #[must_use]
    pub const fn binary16() -> Self {
        Self::preset(5, 10)
    }

    /// IEEE 754 binary32.
    #[must_use]
    pub const fn binary32() -> Self {
        Self::preset(8, 23)
    }

    /// IEEE 754 binary64.
    #[must_use]
    pub const fn binary64() -> Self {
        Self::preset(11, 52)
    }

    const fn preset(exponent_digits: u32, mantissa_digits: u32) -> Self {
        Self {
            base: 2,
            exponent_digits,
            mantissa_digits,
            exponent_patterns: 1 << exponent_digits,
        }
    }

    /// Base `B`.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Exponent digits `Ee`.
    #[inline]
    #[must_use]
    pub const fn exponent_digits(&self) -> u32 {
        self.exponent_digits
    }

    /// Mantissa digits `Fm`.
    #[inline]
    #[must_use]
    pub const fn mantissa_digits(&self) -> u32 {
        self.mantissa_digits
    }

    /// `B^(Ee−1) − 1`.
    #[inline]
    #[must_use]
    pub const fn bias(&self) -> i32 {
        // B^Ee ≤ MAX_EXPONENT, so every exponent quantity fits an i32
        (self.exponent_patterns / self.base as u64) as i32 - 1
    }

    /// Exponent field reserved for infinity and NaN, `B^Ee − 1`.
    #[inline]
    #[must_use]
    pub const fn all_ones(&self) -> u64 {
        self.exponent_patterns - 1
    }

    /// Number of exponent field patterns, `B^Ee`.
    #[inline]
    #[must_use]
    pub const fn exponent_patterns(&self) -> u64 {
        self.exponent_patterns
    }

    /// Smallest normalized exponent, `1 − bias`.
    #[inline]
    #[must_use]
    pub const fn emin(&self) -> i32 {
        1 - self.bias()
    }

    /// Largest normalized exponent, `B^Ee − 2 − bias`.
    #[inline]
    #[must_use]
    pub const fn emax(&self) -> i32 {
        self.all_ones() as i32 - 1 - self.bias()
    }

    /// Mantissa step, `ε = B^−Fm`.
    #[must_use]
    pub fn epsilon(&self) -> BigRational {
        pow_recip(self.base, self.mantissa_digits)
    }

    /// `B^Fm`, the denominator of a mantissa field.
    #[must_use]
    pub fn mantissa_scale(&self) -> BigUint {
        pow_u(self.base, self.mantissa_digits)
    }

    /// Number of mantissa field patterns, `(B−1)·B^Fm`.
    #[must_use]
    pub fn mantissa_capacity(&self) -> BigUint {
        self.mantissa_scale() * (self.base - 1)
    }

    /// The mantissa field's most significant digit weight, `B^(Fm−1)`.
    #[must_use]
    pub fn mantissa_msb(&self) -> BigUint {
        pow_u(self.base, self.mantissa_digits - 1)
    }

    /// Digits needed to write a mantissa field: `Fm`, or `Fm + 1` when the
    /// leading digit ranges past 1.
    #[must_use]
    pub const fn mantissa_field_width(&self) -> u32 {
        if self.base == 2 {
            self.mantissa_digits
        } else {
            self.mantissa_digits + 1
        }
    }

    /// `B^Emin`, the smallest normalized magnitude.
    #[must_use]
    pub fn min_normalized(&self) -> BigRational {
        pow_ratio(self.base, self.emin())
    }

    /// `(B − ε)·B^Emax`, the largest normalized magnitude.
    #[must_use]
    pub fn max_normalized(&self) -> BigRational {
        (from_int(self.base) - self.epsilon()) * pow_ratio(self.base, self.emax())
    }

    /// `[B^Emin, (B−ε)·B^Emax]`.
    #[must_use]
    pub fn normalized_range(&self) -> (BigRational, BigRational) {
        (self.min_normalized(), self.max_normalized())
    }

    /// `[ε·B^Emin, (1−ε)·B^Emin]`, the non-zero denormalized magnitudes.
    #[must_use]
    pub fn denormalized_range(&self) -> (BigRational, BigRational) {
        let unit = self.min_normalized();
        let eps = self.epsilon();
        (&eps * &unit, (from_int(1) - eps) * unit)
    }

    /// Number of distinct words, `2·B^Ee·(B−1)·B^Fm`.
    #[must_use]
    pub fn word_capacity(&self) -> BigUint {
        BigUint::from(2u32) * self.exponent_patterns * self.mantissa_capacity()
    }

    /// The exponent field as an excess-K code.
    ///
    /// # Errors
    ///
    /// Cannot fail for a validated format; the signature follows
    /// [`ExcessK::standard`].
    pub fn exponent_code(&self) -> Result<ExcessK> {
        ExcessK::standard(self.base, self.exponent_digits)
    }

    pub(crate) fn unbiased(&self, exponent_field: u64) -> BigInt {
        BigInt::from(exponent_field) - self.bias()
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "float(B={}, Ee={}, Fm={})",
            self.base, self.exponent_digits, self.mantissa_digits
        )
    }
}
