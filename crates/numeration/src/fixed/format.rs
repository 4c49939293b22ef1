//! Fixed-point format descriptors.

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::One;

use crate::error::{Error, Result};
use crate::positional::check_base;
use crate::rational::{from_int, pow_i, pow_recip, pow_u};

/// How negative values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Representation {
    /// No sign digit; only non-negative values.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "none"))]
    Unsigned,
    /// Top digit is the sign (0 positive, non-zero negative), the rest the
    /// magnitude.
    SignMagnitude,
    /// Base complement over the full width.
    Complement,
}

impl Representation {
    /// Whether the format carries a sign digit.
    #[inline]
    #[must_use]
    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::Unsigned)
    }

    /// Lower-case name used in format labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::SignMagnitude => "sign-magnitude",
            Self::Complement => "complement",
        }
    }
}

/// A fixed-point format `Q(E,F)_B`.
///
/// `E` integer digits and `F` fraction digits in base `B`. Signed
/// representations add one sign digit on top, so the raw width is
/// `E + F + 1`.
///
/// # Example
///
/// ```
/// use numeration::fixed::{NumberFormat, Representation};
///
/// let q = NumberFormat::new(4, 4, 2, Representation::Complement).unwrap();
/// assert_eq!(q.width(), 9);
/// assert_eq!(q.to_string(), "Q(4,4)_2 complement");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "FormatFields"))]
pub struct NumberFormat {
    integer_digits: u32,
    fraction_digits: u32,
    base: u32,
    representation: Representation,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FormatFields {
    integer_digits: u32,
    fraction_digits: u32,
    base: u32,
    #[serde(default)]
    representation: Representation,
}

#[cfg(feature = "serde")]
impl TryFrom<FormatFields> for NumberFormat {
    type Error = Error;

    fn try_from(f: FormatFields) -> Result<Self> {
        Self::new(f.integer_digits, f.fraction_digits, f.base, f.representation)
    }
}

impl NumberFormat {
    /// Builds a validated format.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBase`] for a base outside `2..=36`.
    /// - [`Error::InvalidFormat`] when a signed format has `E = 0` or the
    ///   format has no digits at all.
    pub fn new(
        integer_digits: u32,
        fraction_digits: u32,
        base: u32,
        representation: Representation,
    ) -> Result<Self> {
        check_base(base)?;
        if representation.is_signed() && integer_digits == 0 {
            return Err(Error::InvalidFormat(format!(
                "{} formats need at least one integer digit",
                representation.name()
            )));
        }
        if integer_digits == 0 && fraction_digits == 0 {
            return Err(Error::InvalidFormat("format has no digits".into()));
        }
        Ok(Self {
            integer_digits,
            fraction_digits,
            base,
            representation,
        })
    }

    /// Unsigned `Q(E,F)_B`.
    ///
    /// # Errors
    ///
    /// See [`NumberFormat::new`].
    pub fn unsigned(integer_digits: u32, fraction_digits: u32, base: u32) -> Result<Self> {
        Self::new(integer_digits, fraction_digits, base, Representation::Unsigned)
    }

    /// Sign-magnitude `Q(E,F)_B`.
    ///
    /// # Errors
    ///
    /// See [`NumberFormat::new`].
    pub fn sign_magnitude(integer_digits: u32, fraction_digits: u32, base: u32) -> Result<Self> {
        Self::new(integer_digits, fraction_digits, base, Representation::SignMagnitude)
    }

    /// Complement `Q(E,F)_B`.
    ///
    /// # Errors
    ///
    /// See [`NumberFormat::new`].
    pub fn complement(integer_digits: u32, fraction_digits: u32, base: u32) -> Result<Self> {
        Self::new(integer_digits, fraction_digits, base, Representation::Complement)
    }

    /// Integer digits `E`.
    #[inline]
    #[must_use]
    pub const fn integer_digits(&self) -> u32 {
        self.integer_digits
    }

    /// Fraction digits `F`.
    #[inline]
    #[must_use]
    pub const fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    /// Base `B`.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Encoding of negative values.
    #[inline]
    #[must_use]
    pub const fn representation(&self) -> Representation {
        self.representation
    }

    /// Whether the format has a sign digit.
    #[inline]
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.representation.is_signed()
    }

    /// Magnitude digits `E + F`.
    #[inline]
    #[must_use]
    pub const fn magnitude_width(&self) -> u32 {
        self.integer_digits + self.fraction_digits
    }

    /// Raw digits: `E + F`, plus one for the sign when signed.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.magnitude_width() + self.is_signed() as u32
    }

    /// Number of raw patterns, `B^width`.
    #[must_use]
    pub fn capacity(&self) -> BigUint {
        pow_u(self.base, self.width())
    }

    /// `B^F`, the factor between a value and its scaled integer.
    #[must_use]
    pub fn scale(&self) -> BigInt {
        pow_i(self.base, self.fraction_digits)
    }

    /// `B^(E+F)`, the weight of the sign digit.
    pub(crate) fn sign_weight(&self) -> BigInt {
        pow_i(self.base, self.magnitude_width())
    }

    /// Smallest positive step, `ε = B^−F`.
    #[must_use]
    pub fn epsilon(&self) -> BigRational {
        pow_recip(self.base, self.fraction_digits)
    }

    /// Largest scaled integer, `B^(E+F) − 1`.
    #[must_use]
    pub fn max_scaled(&self) -> BigInt {
        self.sign_weight() - BigInt::one()
    }

    /// Smallest scaled integer.
    #[must_use]
    pub fn min_scaled(&self) -> BigInt {
        match self.representation {
            Representation::Unsigned => BigInt::from(0),
            Representation::SignMagnitude => -self.max_scaled(),
            Representation::Complement => -self.sign_weight(),
        }
    }

    /// Largest value, `B^E − ε`.
    #[must_use]
    pub fn max_value(&self) -> BigRational {
        BigRational::new(self.max_scaled(), self.scale())
    }

    /// Smallest value: `0`, `−(B^E − ε)` or `−B^E`.
    #[must_use]
    pub fn min_value(&self) -> BigRational {
        BigRational::new(self.min_scaled(), self.scale())
    }

    /// Raw patterns that decode to a value.
    ///
    /// Complement formats in a base above 2 only accept sign digits `0` and
    /// `B − 1`.
    #[must_use]
    pub fn valid_encodings(&self) -> BigUint {
        match self.representation {
            Representation::Complement => BigUint::from(2u32) * pow_u(self.base, self.magnitude_width()),
            _ => self.capacity(),
        }
    }

    /// Distinct values the format can hold.
    #[must_use]
    pub fn distinct_values(&self) -> BigUint {
        let n = pow_u(self.base, self.magnitude_width());
        match self.representation {
            Representation::Unsigned => n,
            Representation::SignMagnitude => BigUint::from(2u32) * n - 1u32,
            Representation::Complement => BigUint::from(2u32) * n,
        }
    }

    /// Distinct values over raw patterns.
    ///
    /// Exactly 1 for unsigned formats and for complement in base 2.
    #[must_use]
    pub fn packing_efficiency(&self) -> BigRational {
        BigRational::new(self.distinct_values().into(), self.capacity().into())
    }

    /// Whether `value` lies inside `[min_value, max_value]`.
    #[must_use]
    pub fn contains(&self, value: &BigRational) -> bool {
        value >= &self.min_value() && value <= &self.max_value()
    }

    /// The same shape with another representation.
    ///
    /// # Errors
    ///
    /// See [`NumberFormat::new`].
    pub fn with_representation(&self, representation: Representation) -> Result<Self> {
        Self::new(self.integer_digits, self.fraction_digits, self.base, representation)
    }

    pub(crate) fn value_of(&self, scaled: &BigInt) -> BigRational {
        BigRational::new(scaled.clone(), self.scale())
    }

    pub(crate) fn scaled_of(&self, value: &BigRational) -> BigRational {
        value * from_int(self.scale())
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q({},{})_{}",
            self.integer_digits, self.fraction_digits, self.base
        )?;
        if self.is_signed() {
            write!(f, " {}", self.representation.name())?;
        }
        Ok(())
    }
}
