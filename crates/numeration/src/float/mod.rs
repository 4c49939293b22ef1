//! Generic IEEE754-style floating point.
//!
//! A [`FloatFormat`] fixes the base and the field widths; the codec methods
//! on it turn an [`ExtendedReal`] into sign/exponent/mantissa fields and
//! back. Values are exact rationals on both sides, so decoding never rounds.
//!
//! ```text
//! exponent field    meaning
//! ──────────────    ───────────────────────────────────────────
//! 0                 ±0 (mantissa 0), denormalized m/B^Fm · B^Emin
//! 1 ..= B^Ee − 2    normalized (1 + m/B^Fm) · B^(e − bias)
//! B^Ee − 1          ±∞ (mantissa 0), NaN (quiet if m ≥ B^(Fm−1))
//! ```
//!
//! # Example
//!
//! ```
//! use numeration::float::{Category, ExtendedReal, FloatFormat};
//! use numeration::rational::parse_decimal;
//!
//! let f = FloatFormat::binary32();
//! let v = ExtendedReal::Finite(parse_decimal("1.5").unwrap());
//! let bits = f.encode(&v).unwrap();
//! assert_eq!(bits.exponent, 127);
//! assert_eq!(f.category(&bits), Category::Normalized);
//! assert_eq!(f.decode(&bits).unwrap(), v);
//! assert_eq!(bits.to_word(&f).to_string(), "1069547520"); // 0x3FC00000
//! ```

mod format;

pub use format::FloatFormat;

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::positional::decimal_to_base;
use crate::rational::{self, from_int, pow_ratio};

// ============================================================================
// Value domain
// ============================================================================

/// Sign of a float or an infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Sign {
    /// Sign digit 0.
    #[default]
    Positive,
    /// Sign digit 1.
    Negative,
}

impl Sign {
    /// The sign field digit.
    #[inline]
    #[must_use]
    pub const fn digit(self) -> u32 {
        match self {
            Self::Positive => 0,
            Self::Negative => 1,
        }
    }

    /// Reads a sign field digit.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless the digit is 0 or 1.
    pub fn from_digit(digit: u32) -> Result<Self> {
        match digit {
            0 => Ok(Self::Positive),
            1 => Ok(Self::Negative),
            other => Err(Error::out_of_range(other, 0, 1)),
        }
    }
}

/// Kind of NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NanKind {
    /// Mantissa MSB set.
    Quiet,
    /// Mantissa non-zero with MSB clear.
    Signaling,
}

/// Category of a value or an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// ±0.
    Zero,
    /// Implicit leading digit, exponent field in `1 ..= B^Ee − 2`.
    Normalized,
    /// Exponent field 0, non-zero mantissa.
    Denormalized,
    /// ±∞.
    Infinity,
    /// Not a number.
    NaN(NanKind),
}

/// The value domain of the codec: a real number or one of the IEEE
/// specials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtendedReal {
    /// An exact finite value.
    Finite(BigRational),
    /// Signed infinity.
    Infinity(Sign),
    /// Not a number.
    NaN(NanKind),
}

impl ExtendedReal {
    /// Converts a binary64 value exactly. Any NaN becomes a quiet NaN.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::NaN(NanKind::Quiet);
        }
        if value.is_infinite() {
            let sign = if value.is_sign_negative() {
                Sign::Negative
            } else {
                Sign::Positive
            };
            return Self::Infinity(sign);
        }
        BigRational::from_float(value).map_or(Self::NaN(NanKind::Quiet), Self::Finite)
    }

    /// The nearest `f64`, for display only.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Finite(v) => v.to_f64().unwrap_or(f64::NAN),
            Self::Infinity(Sign::Positive) => f64::INFINITY,
            Self::Infinity(Sign::Negative) => f64::NEG_INFINITY,
            Self::NaN(_) => f64::NAN,
        }
    }

    /// Whether this is a NaN.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NaN(_))
    }
}

impl From<BigRational> for ExtendedReal {
    fn from(value: BigRational) -> Self {
        Self::Finite(value)
    }
}

impl fmt::Display for ExtendedReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => f.write_str(&rational::display(v)),
            Self::Infinity(Sign::Positive) => f.write_str("+Infinity"),
            Self::Infinity(Sign::Negative) => f.write_str("-Infinity"),
            Self::NaN(NanKind::Quiet) => f.write_str("qNaN"),
            Self::NaN(NanKind::Signaling) => f.write_str("sNaN"),
        }
    }
}

// ============================================================================
// Encoded fields
// ============================================================================

/// The three fields of an encoded float.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloatValue {
    /// Sign field.
    pub sign: Sign,
    /// Biased exponent field.
    pub exponent: u64,
    /// Mantissa field (fraction digits after the implicit leading digit).
    pub mantissa: BigUint,
}

impl FloatValue {
    /// Packs the fields into one integer:
    /// `(sign·B^Ee + exponent)·(B−1)·B^Fm + mantissa`.
    #[must_use]
    pub fn to_word(&self, format: &FloatFormat) -> BigUint {
        let high = BigUint::from(self.sign.digit()) * format.exponent_patterns() + self.exponent;
        high * format.mantissa_capacity() + &self.mantissa
    }

    /// Renders the fields as `"s eee mmm"` digit groups.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when a field does not fit `format`.
    pub fn fields_string(&self, format: &FloatFormat) -> Result<String> {
        format.check_fields(self.sign.digit(), self.exponent, &self.mantissa)?;
        let exponent = format
            .exponent_code()?
            .represent(&format.unbiased(self.exponent))?;
        let mantissa = decimal_to_base(
            &self.mantissa,
            format.base(),
            Some(format.mantissa_field_width() as usize),
        )?;
        Ok(format!("{} {exponent} {mantissa}", self.sign.digit()))
    }
}

// ============================================================================
// Codec
// ============================================================================

/// `floor(log_B a)` and `B^that`, for `a > 0`.
fn floor_log(a: &BigRational, base: u32) -> (i64, BigRational) {
    let b = from_int(base);
    let mut e = 0i64;
    let mut power = BigRational::one();
    if a >= &power {
        loop {
            let next = &power * &b;
            if &next > a {
                break;
            }
            power = next;
            e += 1;
        }
    } else {
        while a < &power {
            power /= &b;
            e -= 1;
        }
    }
    (e, power)
}

/// Round half up of a non-negative rational.
fn round_up_half(value: &BigRational) -> BigUint {
    rational::round_half_away(value)
        .to_biguint()
        .unwrap_or_default()
}

fn sign_of(value: &BigRational) -> Sign {
    if value.is_negative() {
        Sign::Negative
    } else {
        Sign::Positive
    }
}

impl FloatFormat {
    fn check_fields(&self, sign: u32, exponent: u64, mantissa: &BigUint) -> Result<()> {
        Sign::from_digit(sign)?;
        if exponent > self.all_ones() {
            return Err(Error::out_of_range(exponent, 0, self.all_ones()));
        }
        let capacity = self.mantissa_capacity();
        if mantissa >= &capacity {
            return Err(Error::out_of_range(mantissa, 0, capacity - 1u32));
        }
        Ok(())
    }

    /// Category of an input value.
    ///
    /// Magnitudes at or above `B^Emin` are [`Category::Normalized`], even
    /// when too large to encode.
    #[must_use]
    pub fn classify(&self, value: &ExtendedReal) -> Category {
        match value {
            ExtendedReal::NaN(kind) => Category::NaN(*kind),
            ExtendedReal::Infinity(_) => Category::Infinity,
            ExtendedReal::Finite(v) if v.is_zero() => Category::Zero,
            ExtendedReal::Finite(v) if v.abs() >= self.min_normalized() => Category::Normalized,
            ExtendedReal::Finite(_) => Category::Denormalized,
        }
    }

    /// Category of an encoding.
    #[must_use]
    pub fn category(&self, bits: &FloatValue) -> Category {
        match (bits.exponent, bits.mantissa.is_zero()) {
            (0, true) => Category::Zero,
            (0, false) => Category::Denormalized,
            (e, true) if e == self.all_ones() => Category::Infinity,
            (e, false) if e == self.all_ones() => Category::NaN(self.nan_kind(&bits.mantissa)),
            _ => Category::Normalized,
        }
    }

    fn nan_kind(&self, mantissa: &BigUint) -> NanKind {
        if mantissa >= &self.mantissa_msb() {
            NanKind::Quiet
        } else {
            NanKind::Signaling
        }
    }

    /// Encodes a normalized value.
    ///
    /// `E = floor(log_B |v|)`, exponent field `E + bias`, mantissa field
    /// `round((|v|/B^E − 1)·B^Fm)`. A mantissa that rounds up to its
    /// capacity carries into the exponent.
    ///
    /// # Errors
    ///
    /// [`Error::NotNormalizable`] for zero or when the exponent field falls
    /// outside `1 ..= B^Ee − 2`. Magnitudes outside
    /// `[B^(Emin−1), B^(Emax+1))` fail before any digit is computed.
    pub fn encode_normalized(&self, value: &BigRational) -> Result<FloatValue> {
        let magnitude = value.abs();
        if value.is_zero()
            || magnitude < pow_ratio(self.base(), self.emin() - 1)
            || magnitude >= pow_ratio(self.base(), self.emax() + 1)
        {
            return Err(Error::NotNormalizable(rational::display(value)));
        }
        let (mut e, power) = floor_log(&magnitude, self.base());
        let scale = from_int(self.mantissa_scale());
        let mut mantissa = round_up_half(&((magnitude / power - BigRational::one()) * scale));
        if mantissa >= self.mantissa_capacity() {
            mantissa = BigUint::zero();
            e += 1;
        }
        let field = e + i64::from(self.bias());
        if field < 1 || field > self.all_ones() as i64 - 1 {
            return Err(Error::NotNormalizable(rational::display(value)));
        }
        Ok(FloatValue {
            sign: sign_of(value),
            exponent: field as u64,
            mantissa,
        })
    }

    /// Encodes a denormalized value: exponent field 0, mantissa
    /// `round(|v|/B^Emin · B^Fm)`.
    ///
    /// A mantissa rounding up to `B^Fm` yields the smallest normalized
    /// encoding. Magnitudes that round to 0 encode as zero.
    ///
    /// # Errors
    ///
    /// [`Error::NotDenormalizable`] when `|v| ≥ B^Emin`.
    pub fn encode_denormalized(&self, value: &BigRational) -> Result<FloatValue> {
        let magnitude = value.abs();
        let unit = self.min_normalized();
        if magnitude >= unit {
            return Err(Error::NotDenormalizable(rational::display(value)));
        }
        let scale = self.mantissa_scale();
        let mantissa = round_up_half(&(magnitude / unit * from_int(scale.clone())));
        let (exponent, mantissa) = if mantissa >= scale {
            (1, BigUint::zero())
        } else {
            (0, mantissa)
        };
        Ok(FloatValue {
            sign: sign_of(value),
            exponent,
            mantissa,
        })
    }

    /// `±∞`: exponent all ones, mantissa 0.
    #[must_use]
    pub fn encode_infinity(&self, sign: Sign) -> FloatValue {
        FloatValue {
            sign,
            exponent: self.all_ones(),
            mantissa: BigUint::zero(),
        }
    }

    /// NaN: quiet sets the mantissa MSB `B^(Fm−1)`, signaling sets
    /// mantissa 1.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`] for a signaling NaN when `Fm = 1`, where the
    /// MSB is the only mantissa digit.
    pub fn encode_nan(&self, kind: NanKind) -> Result<FloatValue> {
        let mantissa = match kind {
            NanKind::Quiet => self.mantissa_msb(),
            NanKind::Signaling if self.mantissa_digits() > 1 => BigUint::one(),
            NanKind::Signaling => {
                return Err(Error::InvalidFormat(
                    "a signaling NaN needs at least two mantissa digits".into(),
                ))
            }
        };
        Ok(FloatValue {
            sign: Sign::Positive,
            exponent: self.all_ones(),
            mantissa,
        })
    }

    /// Encodes any value by its category.
    ///
    /// NaN inputs become quiet NaNs. Zero encodes with a positive sign.
    ///
    /// # Errors
    ///
    /// [`Error::NotNormalizable`] for magnitudes above the normalized range.
    pub fn encode(&self, value: &ExtendedReal) -> Result<FloatValue> {
        let category = self.classify(value);
        tracing::trace!(format = %self, ?category, "encoding float");
        match (category, value) {
            (Category::NaN(_), _) => self.encode_nan(NanKind::Quiet),
            (Category::Infinity, ExtendedReal::Infinity(sign)) => Ok(self.encode_infinity(*sign)),
            (Category::Zero, _) => Ok(FloatValue {
                sign: Sign::Positive,
                exponent: 0,
                mantissa: BigUint::zero(),
            }),
            (Category::Normalized, ExtendedReal::Finite(v)) => self.encode_normalized(v),
            (_, ExtendedReal::Finite(v)) => self.encode_denormalized(v),
            (_, other) => Err(Error::NotNormalizable(other.to_string())),
        }
    }

    /// Decodes raw fields.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for a sign other than 0/1, an exponent above
    /// `B^Ee − 1` or a mantissa at or above its capacity.
    pub fn decode_fields(&self, sign: u32, exponent: u64, mantissa: &BigUint) -> Result<ExtendedReal> {
        self.check_fields(sign, exponent, mantissa)?;
        let sign = Sign::from_digit(sign)?;
        if exponent == self.all_ones() {
            return Ok(if mantissa.is_zero() {
                ExtendedReal::Infinity(sign)
            } else {
                ExtendedReal::NaN(self.nan_kind(mantissa))
            });
        }
        let fraction = BigRational::new(
            BigInt::from(mantissa.clone()),
            BigInt::from(self.mantissa_scale()),
        );
        let magnitude = if exponent == 0 {
            fraction * self.min_normalized()
        } else {
            // exponent < B^Ee, which fits an i32
            let e = exponent as i32 - self.bias();
            (BigRational::one() + fraction) * pow_ratio(self.base(), e)
        };
        Ok(ExtendedReal::Finite(match sign {
            Sign::Positive => magnitude,
            Sign::Negative => -magnitude,
        }))
    }

    /// Decodes an encoding.
    ///
    /// # Errors
    ///
    /// See [`FloatFormat::decode_fields`].
    pub fn decode(&self, bits: &FloatValue) -> Result<ExtendedReal> {
        self.decode_fields(bits.sign.digit(), bits.exponent, &bits.mantissa)
    }

    /// Unpacks a word produced by [`FloatValue::to_word`].
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when the word exceeds the format's capacity.
    pub fn from_word(&self, word: &BigUint) -> Result<FloatValue> {
        let capacity = self.word_capacity();
        if word >= &capacity {
            return Err(Error::out_of_range(word, 0, capacity - 1u32));
        }
        let (high, mantissa) = word.div_rem(&self.mantissa_capacity());
        let (sign, exponent) = high.div_rem(&BigUint::from(self.exponent_patterns()));
        Ok(FloatValue {
            sign: Sign::from_digit(sign.to_u32().unwrap_or(u32::MAX))?,
            exponent: exponent.to_u64().unwrap_or(u64::MAX),
            mantissa,
        })
    }
}
