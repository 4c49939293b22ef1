//! Exact decimal values.
//!
//! Every decoded value in the crate is a [`BigRational`], never a binary
//! float, so a renderer can display it without double rounding. This module
//! holds the small helpers the components share: exact parsing of decimal
//! literals, terminating-decimal rendering, integer powers and round-half
//! away from zero.
//!
//! # Example
//!
//! ```
//! use numeration::rational::{parse_decimal, to_decimal_string};
//!
//! let v = parse_decimal("-5.25").unwrap();
//! assert_eq!(to_decimal_string(&v).as_deref(), Some("-5.25"));
//!
//! // 1/3 has no terminating decimal expansion
//! let third = parse_decimal("1").unwrap() / parse_decimal("3").unwrap();
//! assert_eq!(to_decimal_string(&third), None);
//! ```

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// `base^exp` as an unsigned big integer.
#[inline]
#[must_use]
pub fn pow_u(base: u32, exp: u32) -> BigUint {
    BigUint::from(base).pow(exp)
}

/// `base^exp` as a signed big integer.
#[inline]
#[must_use]
pub fn pow_i(base: u32, exp: u32) -> BigInt {
    BigInt::from(pow_u(base, exp))
}

/// Largest exponent magnitude accepted from a decimal literal or a float
/// format. `36^MAX_EXPONENT` is still a few megabytes.
pub const MAX_EXPONENT: u32 = 1 << 24;

/// `base^exp` for any integer exponent, as an exact rational.
#[must_use]
pub fn pow_ratio(base: u32, exp: i32) -> BigRational {
    let magnitude = pow_i(base, exp.unsigned_abs());
    if exp >= 0 {
        BigRational::from_integer(magnitude)
    } else {
        BigRational::new(BigInt::one(), magnitude)
    }
}

/// `base^−exp`, the weight of the `exp`-th fraction digit.
#[inline]
#[must_use]
pub fn pow_recip(base: u32, exp: u32) -> BigRational {
    BigRational::new(BigInt::one(), pow_i(base, exp))
}

/// Rounds to the nearest integer, ties away from zero.
///
/// For non-negative inputs this is round-half-up.
#[inline]
#[must_use]
pub fn round_half_away(value: &BigRational) -> BigInt {
    value.round().to_integer()
}

/// Lifts an integer into the rationals.
#[inline]
#[must_use]
pub fn from_int(value: impl Into<BigInt>) -> BigRational {
    BigRational::from_integer(value.into())
}

/// Parses a decimal literal exactly.
///
/// Accepts an optional sign, digits with at most one `.`, and an optional
/// `e`/`E` exponent: `"12"`, `"-5.25"`, `".5"`, `"1e-3"`.
///
/// # Errors
///
/// - [`Error::EmptyDigits`] for an empty literal.
/// - [`Error::InvalidDigit`] for any other malformed character.
/// - [`Error::ExponentOutOfRange`] when the effective power of ten, the
///   written exponent less the fraction digits, exceeds [`MAX_EXPONENT`]
///   in magnitude.
pub fn parse_decimal(literal: &str) -> Result<BigRational> {
    let text = literal.trim();
    if text.is_empty() {
        return Err(Error::EmptyDigits);
    }
    let invalid = |position: usize, character: char| Error::InvalidDigit {
        character,
        position,
        base: 10,
    };

    let mut chars = text.char_indices().peekable();
    let mut negative = false;
    if let Some(&(_, c)) = chars.peek() {
        if c == '+' || c == '-' {
            negative = c == '-';
            chars.next();
        }
    }

    let mut mantissa = BigInt::zero();
    let mut scale: i64 = 0;
    let mut seen_digit = false;
    let mut seen_point = false;
    let mut exponent: Option<(usize, i64)> = None;

    while let Some((pos, c)) = chars.next() {
        match c {
            '0'..='9' => {
                mantissa = mantissa * 10u32 + BigInt::from(c as u32 - '0' as u32);
                seen_digit = true;
                if seen_point {
                    scale -= 1;
                }
            }
            '.' if !seen_point => seen_point = true,
            'e' | 'E' if seen_digit => {
                let rest: String = chars.by_ref().map(|(_, c)| c).collect();
                let parsed = rest
                    .parse::<i64>()
                    .map_err(|_| invalid(pos, c))?;
                exponent = Some((pos, parsed));
                break;
            }
            _ => return Err(invalid(pos, c)),
        }
    }

    if !seen_digit {
        let (pos, c) = text.char_indices().last().unwrap_or((0, ' '));
        return Err(invalid(pos, c));
    }
    let written = exponent.map_or(0, |(_, e)| e);
    let too_large = || Error::ExponentOutOfRange {
        exponent: written.to_string(),
        limit: MAX_EXPONENT,
    };
    let scale = scale.checked_add(written).ok_or_else(too_large)?;
    let scale = i32::try_from(scale)
        .ok()
        .filter(|s| s.unsigned_abs() <= MAX_EXPONENT)
        .ok_or_else(too_large)?;

    let mut value = BigRational::from_integer(mantissa) * pow_ratio(10, scale);
    if negative {
        value = -value;
    }
    Ok(value)
}

/// Renders an exact value as a terminating decimal.
///
/// Returns `None` when the reduced denominator has a prime factor other than
/// 2 or 5, i.e. when the decimal expansion never terminates.
#[must_use]
pub fn to_decimal_string(value: &BigRational) -> Option<String> {
    let mut denom = value.denom().magnitude().clone();
    let two = BigUint::from(2u32);
    let five = BigUint::from(5u32);
    let mut twos = 0u32;
    let mut fives = 0u32;
    while denom.is_even() && !denom.is_zero() {
        denom /= &two;
        twos += 1;
    }
    while (&denom % &five).is_zero() && !denom.is_zero() {
        denom /= &five;
        fives += 1;
    }
    if !denom.is_one() {
        return None;
    }

    let places = twos.max(fives);
    let scaled = (value.abs() * from_int(pow_i(10, places))).to_integer();
    let mut digits = scaled.to_string();
    if places > 0 {
        let places = places as usize;
        if digits.len() <= places {
            digits = format!("{}{}", "0".repeat(places + 1 - digits.len()), digits);
        }
        digits.insert(digits.len() - places, '.');
    }
    if value.is_negative() {
        digits.insert(0, '-');
    }
    Some(digits)
}

/// Renders a value for diagnostics: decimal when it terminates, `n/d`
/// otherwise.
#[must_use]
pub fn display(value: &BigRational) -> String {
    to_decimal_string(value).unwrap_or_else(|| value.to_string())
}
