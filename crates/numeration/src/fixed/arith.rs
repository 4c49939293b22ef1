//! Arithmetic on scaled integers.
//!
//! `a ∘ b` works on `m_a`, `m_b` (value · B^F):
//!
//! ```text
//! add  m_a + m_b
//! sub  m_a − m_b
//! mul  (m_a · m_b) / B^F       truncated toward zero
//! div  (m_a · B^F) / m_b       truncated toward zero
//! ```

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::Zero;

use super::FixedPointValue;
use crate::error::{Error, Result};
use crate::rational;

impl FixedPointValue {
    fn same_format(&self, other: &Self) -> Result<()> {
        if self.format == other.format {
            Ok(())
        } else {
            Err(Error::FormatMismatch {
                left: self.format.to_string(),
                right: other.format.to_string(),
            })
        }
    }

    /// Rebuilds a result, turning a range failure into overflow or underflow.
    fn checked(&self, scaled: BigInt) -> Result<Self> {
        let format = self.format;
        if scaled > format.max_scaled() {
            return Err(Error::Overflow(rational::display(&format.value_of(&scaled))));
        }
        if scaled < format.min_scaled() {
            return Err(Error::Underflow(rational::display(&format.value_of(&scaled))));
        }
        Self::from_scaled(format, scaled)
    }

    /// `self + other`.
    ///
    /// # Errors
    ///
    /// [`Error::FormatMismatch`], [`Error::Overflow`] or [`Error::Underflow`].
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.same_format(other)?;
        self.checked(&self.scaled + &other.scaled)
    }

    /// `self − other`.
    ///
    /// # Errors
    ///
    /// [`Error::FormatMismatch`], [`Error::Overflow`] or [`Error::Underflow`].
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.same_format(other)?;
        self.checked(&self.scaled - &other.scaled)
    }

    /// `self · other`, rescaled by `B^F` and truncated toward zero.
    ///
    /// # Errors
    ///
    /// [`Error::FormatMismatch`], [`Error::Overflow`] or [`Error::Underflow`].
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.same_format(other)?;
        let product = &self.scaled * &other.scaled;
        self.checked(product / self.format.scale())
    }

    /// `self / other`, numerator prescaled by `B^F`, truncated toward zero.
    ///
    /// # Errors
    ///
    /// [`Error::DivideByZero`] when `other` is zero, plus the errors of
    /// [`FixedPointValue::mul`].
    pub fn div(&self, other: &Self) -> Result<Self> {
        self.same_format(other)?;
        if other.scaled.is_zero() {
            return Err(Error::DivideByZero);
        }
        let numerator = &self.scaled * self.format.scale();
        self.checked(numerator / &other.scaled)
    }

    /// Orders two values of the same format.
    ///
    /// # Errors
    ///
    /// [`Error::FormatMismatch`] across formats.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        self.same_format(other)?;
        Ok(self.scaled.cmp(&other.scaled))
    }
}

impl PartialOrd for FixedPointValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}
