//! Positional number systems.
//!
//! Conversion primitives between base 10 and any base `B` in `2..=36`, and
//! between two arbitrary bases. Digits above 9 use the letters `A`..`Z`;
//! parsing accepts either case. [`mixed_radix`] covers systems with a radix
//! per field such as `HH:MM:SS`, and [`roman`] the non-positional Roman
//! numerals.
//!
//! Two evaluation strategies turn a digit string into an integer. They are
//! algorithmically different but always agree:
//!
//! ```text
//! weighted sum:  Σ dᵢ · Bⁱ         (i counted from the right)
//! Horner:        acc = acc · B + d  (left to right)
//! ```
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use numeration::positional::{self, Evaluation};
//!
//! let digits = positional::decimal_to_base(&BigUint::from(1994u32), 5, None).unwrap();
//! assert_eq!(digits, "30434");
//!
//! let back = positional::base_to_decimal("30434", 5).unwrap();
//! assert_eq!(back, BigUint::from(1994u32));
//!
//! let weighted = positional::base_to_decimal_with("30434", 5, Evaluation::WeightedSum).unwrap();
//! assert_eq!(weighted, back);
//! ```

pub mod mixed_radix;
mod related;
pub mod roman;

pub use related::{
    primitive_base, related_base_convert, related_fraction_convert, RelatedBases,
};

use num_bigint::BigUint;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::rational::from_int;

// ============================================================================
// Digits and bases
// ============================================================================

/// Digit alphabet shared by every base.
pub const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest supported base.
pub const MAX_BASE: u32 = 36;

/// Strategy used to evaluate a digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Evaluation {
    /// Explicit positional weights: `Σ dᵢ · Bⁱ`.
    WeightedSum,
    /// Horner's rule: `acc = acc · B + d`, left to right.
    #[default]
    Horner,
}

/// One step of the repeated-division algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DivisionStep {
    /// Value divided in this step.
    pub dividend: BigUint,
    /// `dividend / base`, the next step's dividend.
    pub quotient: BigUint,
    /// `dividend mod base`, the digit produced.
    pub remainder: u32,
}

/// Result of converting a fraction by successive multiplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FractionExpansion {
    /// Digit values, most significant first.
    pub digits: Vec<u32>,
    /// `true` when the remainder reached zero within the digit budget.
    pub exact: bool,
}

impl FractionExpansion {
    /// Renders the digits with the shared alphabet.
    #[must_use]
    pub fn to_digit_string(&self) -> String {
        render_digits(&self.digits)
    }
}

/// Rejects bases outside `2..=36`.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] when `base` is unsupported.
#[inline]
pub fn check_base(base: u32) -> Result<()> {
    if (2..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(Error::InvalidBase(base))
    }
}

/// Character for a digit value (`0..36`).
#[inline]
pub(crate) fn digit_char(value: u32) -> char {
    DIGITS[value as usize] as char
}

/// Value of one character in `base`.
///
/// # Errors
///
/// Returns [`Error::InvalidDigit`] when the character is not a digit of
/// `base`.
pub fn digit_value(character: char, position: usize, base: u32) -> Result<u32> {
    let value = character
        .to_digit(MAX_BASE)
        .filter(|&v| v < base)
        .ok_or(Error::InvalidDigit {
            character,
            position,
            base,
        })?;
    Ok(value)
}

/// Parses a digit string into digit values, most significant first.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`], [`Error::EmptyDigits`] or
/// [`Error::InvalidDigit`].
pub fn parse_digits(digits: &str, base: u32) -> Result<Vec<u32>> {
    check_base(base)?;
    if digits.is_empty() {
        return Err(Error::EmptyDigits);
    }
    digits
        .chars()
        .enumerate()
        .map(|(position, c)| digit_value(c, position, base))
        .collect()
}

/// Renders digit values with the shared alphabet.
pub(crate) fn render_digits(values: &[u32]) -> String {
    values.iter().map(|&d| digit_char(d)).collect()
}

// ============================================================================
// Integer conversion
// ============================================================================

/// Converts a non-negative integer to `base` by repeated division.
///
/// Remainders are collected least significant first and reversed. The
/// result is left-padded with zeros to `min_digits`; zero renders as `"0"`.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] for an unsupported base.
pub fn decimal_to_base(value: &BigUint, base: u32, min_digits: Option<usize>) -> Result<String> {
    check_base(base)?;
    let remainders: Vec<u32> = division_steps(value, base)?
        .into_iter()
        .map(|step| step.remainder)
        .collect();
    let mut out: String = remainders.iter().rev().map(|&d| digit_char(d)).collect();
    if let Some(width) = min_digits {
        if out.len() < width {
            out = format!("{}{}", "0".repeat(width - out.len()), out);
        }
    }
    Ok(out)
}

/// The repeated-division trace of `value` in `base`.
///
/// Zero yields a single step `0 / B = 0 rem 0`.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] for an unsupported base.
pub fn division_steps(value: &BigUint, base: u32) -> Result<Vec<DivisionStep>> {
    check_base(base)?;
    let divisor = BigUint::from(base);
    let mut steps = Vec::new();
    let mut dividend = value.clone();
    loop {
        let (quotient, remainder) = dividend.div_rem(&divisor);
        let remainder = remainder.to_u32().unwrap_or_default();
        let done = quotient.is_zero();
        steps.push(DivisionStep {
            dividend,
            quotient: quotient.clone(),
            remainder,
        });
        if done {
            break;
        }
        dividend = quotient;
    }
    Ok(steps)
}

/// Evaluates a digit string in `base` with Horner's rule.
///
/// # Errors
///
/// Returns [`Error::InvalidDigit`] if a character's value is not below
/// `base`, [`Error::EmptyDigits`] or [`Error::InvalidBase`].
#[inline]
pub fn base_to_decimal(digits: &str, base: u32) -> Result<BigUint> {
    base_to_decimal_with(digits, base, Evaluation::Horner)
}

/// Evaluates a digit string in `base` with the chosen strategy.
///
/// # Errors
///
/// Same as [`base_to_decimal`].
pub fn base_to_decimal_with(digits: &str, base: u32, evaluation: Evaluation) -> Result<BigUint> {
    let values = parse_digits(digits, base)?;
    Ok(match evaluation {
        Evaluation::WeightedSum => weighted_sum(&values, base),
        Evaluation::Horner => horner(&values, base),
    })
}

/// `Σ dᵢ · Bⁱ` with explicit weights.
pub(crate) fn weighted_sum(values: &[u32], base: u32) -> BigUint {
    let b = BigUint::from(base);
    let mut weight = BigUint::from(1u32);
    let mut total = BigUint::zero();
    for &d in values.iter().rev() {
        total += &weight * d;
        weight *= &b;
    }
    total
}

/// `acc = acc · B + d`, left to right.
pub(crate) fn horner(values: &[u32], base: u32) -> BigUint {
    values
        .iter()
        .fold(BigUint::zero(), |acc, &d| acc * base + d)
}

/// Converts a digit string between two bases through its integer value.
///
/// # Errors
///
/// Fails like [`base_to_decimal`] on the input or with
/// [`Error::InvalidBase`] for the target.
pub fn base_to_base(digits: &str, base_from: u32, base_to: u32) -> Result<String> {
    check_base(base_to)?;
    let value = base_to_decimal(digits, base_from)?;
    decimal_to_base(&value, base_to, None)
}

// ============================================================================
// Fractions
// ============================================================================

/// Expands a fraction in `[0, 1)` by successive multiplication.
///
/// Each step multiplies the remainder by `base`; the integer part is the
/// next digit. Stops when the remainder is zero or after `max_digits`.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] or [`Error::OutOfRange`] when the
/// fraction is outside `[0, 1)`.
pub fn fraction_to_base(
    fraction: &BigRational,
    base: u32,
    max_digits: usize,
) -> Result<FractionExpansion> {
    check_base(base)?;
    let zero = BigRational::zero();
    let one = from_int(1);
    if fraction < &zero || fraction >= &one {
        return Err(Error::out_of_range(fraction, 0, "1 (exclusive)"));
    }
    let b = from_int(base);
    let mut digits = Vec::with_capacity(max_digits);
    let mut rest = fraction.clone();
    while !rest.is_zero() && digits.len() < max_digits {
        let product = &rest * &b;
        let digit = product.trunc();
        digits.push(digit.to_integer().to_u32().unwrap_or_default());
        rest = product - digit;
    }
    Ok(FractionExpansion {
        digits,
        exact: rest.is_zero(),
    })
}

/// Evaluates fraction digits `0.d₁d₂…` in `base` exactly.
///
/// # Errors
///
/// Fails like [`parse_digits`].
pub fn fraction_from_base(digits: &str, base: u32) -> Result<BigRational> {
    let values = parse_digits(digits, base)?;
    let numerator = horner(&values, base);
    let denominator = crate::rational::pow_u(base, values.len() as u32);
    Ok(BigRational::new(numerator.into(), denominator.into()))
}

/// Strips leading zeros, keeping at least one digit.
pub(crate) fn strip_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn decimal_to_base_known_values() {
        assert_eq!(decimal_to_base(&big(1994), 5, None).unwrap(), "30434");
        assert_eq!(decimal_to_base(&big(255), 16, None).unwrap(), "FF");
        assert_eq!(decimal_to_base(&big(42), 2, Some(8)).unwrap(), "00101010");
        assert_eq!(decimal_to_base(&big(0), 7, None).unwrap(), "0");
        assert_eq!(decimal_to_base(&big(0), 2, Some(4)).unwrap(), "0000");
        assert_eq!(decimal_to_base(&big(35), 36, None).unwrap(), "Z");
    }

    #[test]
    fn padding_never_truncates() {
        assert_eq!(decimal_to_base(&big(255), 2, Some(4)).unwrap(), "11111111");
    }

    #[test]
    fn division_trace_matches_digits() {
        let steps = division_steps(&big(13), 2).unwrap();
        let rems: Vec<u32> = steps.iter().map(|s| s.remainder).collect();
        assert_eq!(rems, vec![1, 0, 1, 1]);
        assert_eq!(steps[0].dividend, big(13));
        assert_eq!(steps[0].quotient, big(6));
        assert!(steps.last().unwrap().quotient.is_zero());
    }

    #[test]
    fn evaluation_strategies_agree() {
        for (digits, base) in [("30434", 5), ("FF", 16), ("ff", 16), ("0", 2), ("ZZ", 36)] {
            let a = base_to_decimal_with(digits, base, Evaluation::WeightedSum).unwrap();
            let b = base_to_decimal_with(digits, base, Evaluation::Horner).unwrap();
            assert_eq!(a, b, "{digits} in base {base}");
        }
    }

    #[test]
    fn invalid_digit_reports_position() {
        assert_eq!(
            base_to_decimal("1021", 2),
            Err(Error::InvalidDigit {
                character: '2',
                position: 2,
                base: 2
            })
        );
        assert_eq!(base_to_decimal("", 10), Err(Error::EmptyDigits));
        assert_eq!(base_to_decimal("1", 1), Err(Error::InvalidBase(1)));
        assert_eq!(base_to_decimal("1", 37), Err(Error::InvalidBase(37)));
    }

    #[test]
    fn base_to_base_composes() {
        assert_eq!(base_to_base("30434", 5, 10).unwrap(), "1994");
        assert_eq!(base_to_base("777", 8, 2).unwrap(), "111111111");
        assert_eq!(base_to_base("000", 8, 2).unwrap(), "0");
    }

    #[test]
    fn fraction_expansion_terminates_for_binary_fractions() {
        let f = BigRational::new(BigInt::from(5), BigInt::from(8));
        let exp = fraction_to_base(&f, 2, 8).unwrap();
        assert_eq!(exp.digits, vec![1, 0, 1]);
        assert!(exp.exact);
        assert_eq!(exp.to_digit_string(), "101");
    }

    #[test]
    fn fraction_expansion_truncates_repeating() {
        let tenth = BigRational::new(BigInt::from(1), BigInt::from(10));
        let exp = fraction_to_base(&tenth, 2, 6).unwrap();
        assert_eq!(exp.to_digit_string(), "000110");
        assert!(!exp.exact);
    }

    #[test]
    fn fraction_out_of_range() {
        assert!(fraction_to_base(&from_int(1), 2, 4).is_err());
        assert!(fraction_to_base(&from_int(-1), 2, 4).is_err());
    }

    #[test]
    fn fraction_from_base_is_exact() {
        let v = fraction_from_base("101", 2).unwrap();
        assert_eq!(v, BigRational::new(BigInt::from(5), BigInt::from(8)));
    }
}
