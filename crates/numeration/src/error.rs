//! Error taxonomy shared by every component.
//!
//! Every operation in the crate returns [`Result`]. Errors are plain values:
//! the same inputs always produce the same error, so callers never retry.
//! The one overflow that is *not* an error is excess-K arithmetic, which
//! wraps and reports a flag instead (see [`crate::biased`]).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure of a numeric representation operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A character is not a digit of the requested base.
    #[error("invalid digit {character:?} at position {position} for base {base}")]
    InvalidDigit {
        /// The offending character.
        character: char,
        /// Zero-based character position in the input.
        position: usize,
        /// The base the input was read in.
        base: u32,
    },

    /// An empty digit string where at least one digit is required.
    #[error("empty digit string")]
    EmptyDigits,

    /// A base outside the supported `2..=36` range.
    #[error("base {0} is outside the supported range 2..=36")]
    InvalidBase(u32),

    /// A power of the base too large to evaluate exactly.
    #[error("exponent {exponent} is outside the supported range ±{limit}")]
    ExponentOutOfRange {
        /// The exponent as written.
        exponent: String,
        /// The enforced limit on its magnitude.
        limit: u32,
    },

    /// A format whose parameters break its invariants.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A value (or raw encoding) does not fit the target format.
    #[error("{value} is outside the representable range [{min}, {max}]")]
    OutOfRange {
        /// The rejected value, rendered for diagnostics.
        value: String,
        /// Lower bound of the format.
        min: String,
        /// Upper bound of the format.
        max: String,
    },

    /// Arithmetic result above the format maximum.
    #[error("overflow: result {0} exceeds the format maximum")]
    Overflow(String),

    /// Arithmetic result below the format minimum.
    #[error("underflow: result {0} is below the format minimum")]
    Underflow(String),

    /// Division by a value whose raw encoding is zero.
    #[error("division by zero")]
    DivideByZero,

    /// Operands belong to different formats.
    #[error("format mismatch: {left} vs {right}")]
    FormatMismatch {
        /// Format of the left operand.
        left: String,
        /// Format of the right operand.
        right: String,
    },

    /// Destination precision is coarser than the source: `B'^F' < B^F`.
    #[error("precision rule violated: {target_base}^{target_fraction} < {source_base}^{source_fraction}")]
    PrecisionRuleViolated {
        /// Source base B.
        source_base: u32,
        /// Source fraction digits F.
        source_fraction: u32,
        /// Destination base B'.
        target_base: u32,
        /// Destination fraction digits F'.
        target_fraction: u32,
    },

    /// The two bases are not powers of a common primitive base.
    #[error("bases {0} and {1} are not powers of a common base")]
    UnrelatedBases(u32, u32),

    /// The value cannot be encoded as a normalized float in this format.
    #[error("{0} is not normalizable in this format")]
    NotNormalizable(String),

    /// The value cannot be encoded as a denormalized float in this format.
    #[error("{0} is not denormalizable in this format")]
    NotDenormalizable(String),

    /// A Roman numeral that is not the canonical spelling of any value.
    #[error("{0:?} is not a canonical Roman numeral")]
    InvalidNumeral(String),

    /// A codeword fails its language's validity check.
    #[error("invalid code word {0:?}")]
    InvalidCode(String),

    /// Two words (or a word and a format) disagree in length.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// The required length.
        expected: usize,
        /// The length that was supplied.
        found: usize,
    },

    /// An enumeration would exceed the crate's size guard.
    #[error("{what} has {count} candidates, above the limit of {limit}")]
    TooLarge {
        /// What was being enumerated.
        what: &'static str,
        /// Number of candidates requested, rendered.
        count: String,
        /// The enforced limit.
        limit: u64,
    },
}

impl Error {
    /// Builds an [`Error::OutOfRange`] from any displayable bounds.
    pub(crate) fn out_of_range(
        value: impl core::fmt::Display,
        min: impl core::fmt::Display,
        max: impl core::fmt::Display,
    ) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = Error::InvalidDigit {
            character: '7',
            position: 2,
            base: 5,
        };
        assert_eq!(e.to_string(), "invalid digit '7' at position 2 for base 5");

        let e = Error::LengthMismatch {
            expected: 4,
            found: 5,
        };
        assert_eq!(e.to_string(), "length mismatch: expected 4, found 5");
    }

    #[test]
    fn out_of_range_renders_bounds() {
        let e = Error::out_of_range(300, 0, 255);
        assert_eq!(e.to_string(), "300 is outside the representable range [0, 255]");
    }
}
