//! Moving fixed-point values between bases.
//!
//! A conversion `Q(E,F)_B -> Q(E',F')_B'` must not lose precision: the
//! destination step may not be coarser than the source step,
//!
//! ```text
//! B'^F' ≥ B^F
//! ```
//!
//! When `F'` is not given the smallest one satisfying the rule is used. The
//! pivot is the exact rational value, so the only rounding is the
//! destination quantization.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;

use super::{FixedPointValue, NumberFormat};
use crate::error::{Error, Result};
use crate::positional::{
    base_to_decimal, check_base, decimal_to_base, primitive_base, related_base_convert,
    related_fraction_convert,
};
use crate::rational::pow_u;

/// What a migration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Source format.
    pub source: NumberFormat,
    /// Destination format.
    pub target: NumberFormat,
    /// Destination fraction digits `F'`.
    pub fraction_digits: u32,
    /// `true` when `F'` was derived rather than supplied.
    pub derived: bool,
    /// `|destination value − source value|`.
    pub quantization_error: BigRational,
}

/// A migrated value with its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// The value in the destination format.
    pub value: FixedPointValue,
    /// How it was obtained.
    pub report: MigrationReport,
}

/// Whether `B'^F' ≥ B^F`.
#[must_use]
pub fn satisfies_precision_rule(
    source_base: u32,
    source_fraction: u32,
    target_base: u32,
    target_fraction: u32,
) -> bool {
    pow_u(target_base, target_fraction) >= pow_u(source_base, source_fraction)
}

/// Smallest `F'` with `B'^F' ≥ B^F`.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] for unsupported bases.
///
/// # Example
///
/// ```
/// use numeration::fixed::minimal_fraction_digits;
///
/// // 10^2 = 100 needs 2^7 = 128
/// assert_eq!(minimal_fraction_digits(10, 2, 2).unwrap(), 7);
/// assert_eq!(minimal_fraction_digits(2, 8, 16).unwrap(), 2);
/// ```
pub fn minimal_fraction_digits(source_base: u32, source_fraction: u32, target_base: u32) -> Result<u32> {
    check_base(source_base)?;
    check_base(target_base)?;
    let needed = pow_u(source_base, source_fraction);
    let step = BigUint::from(target_base);
    let mut reach = BigUint::from(1u32);
    let mut digits = 0;
    while reach < needed {
        reach *= &step;
        digits += 1;
    }
    Ok(digits)
}

fn resolve_fraction(
    source: &NumberFormat,
    target_base: u32,
    target_fraction: Option<u32>,
) -> Result<(u32, bool)> {
    match target_fraction {
        None => Ok((
            minimal_fraction_digits(source.base(), source.fraction_digits(), target_base)?,
            true,
        )),
        Some(f) if satisfies_precision_rule(source.base(), source.fraction_digits(), target_base, f) => {
            Ok((f, false))
        }
        Some(f) => Err(Error::PrecisionRuleViolated {
            source_base: source.base(),
            source_fraction: source.fraction_digits(),
            target_base,
            target_fraction: f,
        }),
    }
}

/// Converts `value` to `Q(E',F')_B'`, keeping its representation.
///
/// # Errors
///
/// - [`Error::PrecisionRuleViolated`] when a supplied `F'` is too small.
/// - [`Error::OutOfRange`] when the destination cannot hold the value.
/// - [`Error::InvalidBase`] / [`Error::InvalidFormat`] for a bad target.
pub fn migrate(
    value: &FixedPointValue,
    target_base: u32,
    target_integer: u32,
    target_fraction: Option<u32>,
) -> Result<Migration> {
    let source = *value.format();
    let (fraction_digits, derived) = resolve_fraction(&source, target_base, target_fraction)?;
    let target = NumberFormat::new(
        target_integer,
        fraction_digits,
        target_base,
        source.representation(),
    )?;
    let exact = value.value();
    let converted = FixedPointValue::new(target, &exact)?;
    let report = MigrationReport {
        source,
        target,
        fraction_digits,
        derived,
        quantization_error: converted.absolute_error(&exact),
    };
    tracing::debug!(
        source = %source,
        target = %target,
        fraction_digits,
        derived,
        "migrated fixed-point value"
    );
    Ok(Migration {
        value: converted,
        report,
    })
}

/// [`migrate`] without the report.
///
/// # Errors
///
/// See [`migrate`].
///
/// # Example
///
/// ```
/// use numeration::fixed::{convert, FixedPointValue, NumberFormat};
///
/// let q = NumberFormat::unsigned(3, 2, 10).unwrap();
/// let v = FixedPointValue::parse(q, "5.25").unwrap();
/// let b = convert(&v, 2, 4, None).unwrap();
/// assert_eq!(b.format().fraction_digits(), 7);
/// assert_eq!(b.radix_string(), "0101.0100000");
/// ```
pub fn convert(
    value: &FixedPointValue,
    target_base: u32,
    target_integer: u32,
    target_fraction: Option<u32>,
) -> Result<FixedPointValue> {
    migrate(value, target_base, target_integer, target_fraction).map(|m| m.value)
}

/// Converts between bases with a common primitive base by digit regrouping.
///
/// `F' = ceil(F·l/k)` where `B = Pˡ`, `B' = Pᵏ`. The result is exact and
/// equal to [`convert`] with the same `F'`.
///
/// # Errors
///
/// - [`Error::UnrelatedBases`] when no primitive base is shared.
/// - [`Error::OutOfRange`] when `E'` is too small for the value.
pub fn convert_related(
    value: &FixedPointValue,
    target_base: u32,
    target_integer: u32,
) -> Result<FixedPointValue> {
    let source = *value.format();
    if primitive_base(source.base(), target_base)?.is_none() {
        return Err(Error::UnrelatedBases(source.base(), target_base));
    }

    let (int_part, frac_part) = value
        .scaled()
        .magnitude()
        .div_rem(&pow_u(source.base(), source.fraction_digits()));
    let int_digits = related_base_convert(
        &decimal_to_base(&int_part, source.base(), None)?,
        source.base(),
        target_base,
    )?;

    let (frac_digits, fraction_digits) = if source.fraction_digits() == 0 {
        (String::new(), 0)
    } else {
        let digits = related_fraction_convert(
            &decimal_to_base(&frac_part, source.base(), Some(source.fraction_digits() as usize))?,
            source.base(),
            target_base,
        )?;
        let len = digits.len() as u32;
        (digits, len)
    };

    let target = NumberFormat::new(
        target_integer,
        fraction_digits,
        target_base,
        source.representation(),
    )?;
    let magnitude = BigInt::from(base_to_decimal(&format!("{int_digits}{frac_digits}"), target_base)?);
    let scaled = if value.is_negative() { -magnitude } else { magnitude };
    let converted = FixedPointValue::from_scaled(target, scaled)?;
    tracing::debug!(
        source = %source,
        target = %target,
        "migrated fixed-point value by regrouping"
    );
    Ok(converted)
}
