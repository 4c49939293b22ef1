//! Mixed-radix positional systems.
//!
//! Every field has its own radix, so the place values are running products
//! rather than powers of one base. The 24-hour clock is the everyday case:
//!
//! | field | radix | place value |
//! |-------|-------|-------------|
//! | hours | 24 | 3600 |
//! | minutes | 60 | 60 |
//! | seconds | 60 | 1 |
//!
//! ```
//! use numeration::positional::mixed_radix::MixedRadix;
//!
//! let clock = MixedRadix::clock();
//! assert_eq!(clock.format(3661).unwrap(), "01:01:01");
//! assert_eq!(clock.parse("01:01:01").unwrap(), 3661);
//! assert!(clock.parse("24:00:00").is_err());
//! ```

use core::fmt;

use crate::error::{Error, Result};

/// Field separator used by [`MixedRadix::format`] and [`MixedRadix::parse`].
pub const SEPARATOR: &str = ":";

/// A mixed-radix system, radices most significant first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MixedRadix {
    radices: Vec<u32>,
    capacity: u64,
}

impl MixedRadix {
    /// Builds a system from its radices, most significant first.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`] for no fields, a radix below 2, or when the
    /// product of the radices does not fit a `u64`.
    pub fn new(radices: impl Into<Vec<u32>>) -> Result<Self> {
        let radices = radices.into();
        if radices.is_empty() {
            return Err(Error::InvalidFormat("mixed radix needs at least one field".into()));
        }
        if let Some(&r) = radices.iter().find(|&&r| r < 2) {
            return Err(Error::InvalidFormat(format!("radix {r} is below 2")));
        }
        let capacity = radices
            .iter()
            .try_fold(1u64, |acc, &r| acc.checked_mul(u64::from(r)))
            .ok_or_else(|| Error::InvalidFormat("product of the radices does not fit u64".into()))?;
        Ok(Self { radices, capacity })
    }

    /// `HH:MM:SS` over one day: radices 24, 60, 60.
    #[must_use]
    pub fn clock() -> Self {
        Self {
            radices: vec![24, 60, 60],
            capacity: 86_400,
        }
    }

    /// Radices, most significant first.
    #[inline]
    #[must_use]
    pub fn radices(&self) -> &[u32] {
        &self.radices
    }

    /// Number of representable totals, the product of the radices.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Place value of each field, most significant first.
    #[must_use]
    pub fn weights(&self) -> Vec<u64> {
        let mut weights = vec![1u64; self.radices.len()];
        for i in (0..self.radices.len().saturating_sub(1)).rev() {
            weights[i] = weights[i + 1] * u64::from(self.radices[i + 1]);
        }
        weights
    }

    /// Splits a total into fields by successive division, least significant
    /// field first, and returns them most significant first.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `total` is at or above the capacity.
    pub fn to_fields(&self, total: u64) -> Result<Vec<u32>> {
        if total >= self.capacity {
            return Err(Error::out_of_range(total, 0, self.capacity - 1));
        }
        let mut rest = total;
        let mut fields = vec![0u32; self.radices.len()];
        for (field, &radix) in fields.iter_mut().zip(&self.radices).rev() {
            let radix = u64::from(radix);
            // the remainder is below a u32 radix
            *field = (rest % radix) as u32;
            rest /= radix;
        }
        Ok(fields)
    }

    /// Combines fields, most significant first, into a total.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] for the wrong number of fields.
    /// - [`Error::OutOfRange`] for a field at or above its radix.
    pub fn from_fields(&self, fields: &[u32]) -> Result<u64> {
        if fields.len() != self.radices.len() {
            return Err(Error::LengthMismatch {
                expected: self.radices.len(),
                found: fields.len(),
            });
        }
        let mut total = 0u64;
        for (&field, &radix) in fields.iter().zip(&self.radices) {
            if field >= radix {
                return Err(Error::out_of_range(field, 0, radix - 1));
            }
            // bounded by the capacity checked in `new`
            total = total * u64::from(radix) + u64::from(field);
        }
        Ok(total)
    }

    /// Renders a total as separator-joined decimal fields, each padded to
    /// the width of its largest value.
    ///
    /// # Errors
    ///
    /// See [`MixedRadix::to_fields`].
    pub fn format(&self, total: u64) -> Result<String> {
        let fields = self.to_fields(total)?;
        let parts: Vec<String> = fields
            .iter()
            .zip(&self.radices)
            .map(|(field, radix)| {
                let width = (radix - 1).to_string().len();
                format!("{field:0width$}")
            })
            .collect();
        Ok(parts.join(SEPARATOR))
    }

    /// Parses separator-joined decimal fields.
    ///
    /// # Errors
    ///
    /// - [`Error::LengthMismatch`] for the wrong number of fields.
    /// - [`Error::EmptyDigits`] for an empty field.
    /// - [`Error::InvalidDigit`] for a non-decimal character, with its
    ///   position in `text`.
    /// - [`Error::OutOfRange`] for a field at or above its radix.
    pub fn parse(&self, text: &str) -> Result<u64> {
        let parts: Vec<&str> = text.split(SEPARATOR).collect();
        if parts.len() != self.radices.len() {
            return Err(Error::LengthMismatch {
                expected: self.radices.len(),
                found: parts.len(),
            });
        }
        let mut fields = Vec::with_capacity(parts.len());
        let mut offset = 0;
        for part in parts {
            if part.is_empty() {
                return Err(Error::EmptyDigits);
            }
            let mut field = 0u64;
            for (i, character) in part.chars().enumerate() {
                let digit = character.to_digit(10).ok_or(Error::InvalidDigit {
                    character,
                    position: offset + i,
                    base: 10,
                })?;
                // saturate; anything past u32 is out of range anyway
                field = (field * 10 + u64::from(digit)).min(u64::from(u32::MAX));
            }
            fields.push(u32::try_from(field).unwrap_or(u32::MAX));
            offset += part.chars().count() + SEPARATOR.len();
        }
        self.from_fields(&fields)
    }
}

impl fmt::Display for MixedRadix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let radices: Vec<String> = self.radices.iter().map(u32::to_string).collect();
        write!(f, "mixed radix ({})", radices.join(", "))
    }
}
