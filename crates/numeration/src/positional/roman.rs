//! Roman numerals, the non-positional counterpart to [`crate::positional`].
//!
//! A symbol's value does not depend on where it stands. Only the modern
//! canonical spelling is accepted: `IIII`, `VX` or `IC` are rejected even
//! though a naive left-to-right sum would give them a value.
//!
//! ```
//! use numeration::positional::roman;
//!
//! assert_eq!(roman::to_roman(1994).unwrap(), "MCMXCIV");
//! assert_eq!(roman::from_roman("mcmxciv").unwrap(), 1994);
//! assert!(roman::from_roman("MCMXCIIII").is_err());
//! ```

use crate::error::{Error, Result};

/// Largest value with a canonical numeral.
pub const MAX_ROMAN: u32 = 3999;

/// Additive and subtractive terms, largest first.
pub const TERMS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// One term of a numeral: `symbol` written `count` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RomanTerm {
    /// Value of one `symbol`.
    pub value: u32,
    /// The symbol or subtractive pair.
    pub symbol: &'static str,
    /// Repetitions, `1..=3`.
    pub count: u32,
}

impl RomanTerm {
    /// `value · count`.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.value * self.count
    }
}

fn check_range(value: u32) -> Result<()> {
    if (1..=MAX_ROMAN).contains(&value) {
        Ok(())
    } else {
        Err(Error::out_of_range(value, 1, MAX_ROMAN))
    }
}

/// Greedy decomposition of `value` into terms, largest first.
///
/// # Errors
///
/// [`Error::OutOfRange`] outside `1..=3999`.
pub fn breakdown(value: u32) -> Result<Vec<RomanTerm>> {
    check_range(value)?;
    let mut rest = value;
    let mut terms = Vec::new();
    for &(term, symbol) in &TERMS {
        let count = rest / term;
        if count > 0 {
            terms.push(RomanTerm {
                value: term,
                symbol,
                count,
            });
            rest -= term * count;
        }
    }
    Ok(terms)
}

/// Canonical numeral of `value`.
///
/// # Errors
///
/// [`Error::OutOfRange`] outside `1..=3999`.
pub fn to_roman(value: u32) -> Result<String> {
    Ok(breakdown(value)?
        .iter()
        .map(|t| t.symbol.repeat(t.count as usize))
        .collect())
}

fn symbol_value(symbol: char) -> Option<u32> {
    match symbol.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Reads a canonical numeral, in either case.
///
/// # Errors
///
/// - [`Error::EmptyDigits`] for an empty string.
/// - [`Error::InvalidDigit`] for a character that is not a Roman symbol.
/// - [`Error::InvalidNumeral`] when the symbols are not the canonical
///   spelling of any value in `1..=3999`.
pub fn from_roman(numeral: &str) -> Result<u32> {
    if numeral.is_empty() {
        return Err(Error::EmptyDigits);
    }
    let values = numeral
        .chars()
        .enumerate()
        .map(|(position, character)| {
            symbol_value(character).ok_or(Error::InvalidDigit {
                character,
                position,
                base: 10,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total: i64 = 0;
    for (i, &v) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if next > v => total -= i64::from(v),
            _ => total += i64::from(v),
        }
    }

    let invalid = || Error::InvalidNumeral(numeral.to_owned());
    let value = u32::try_from(total).map_err(|_| invalid())?;
    match to_roman(value) {
        Ok(canonical) if canonical.eq_ignore_ascii_case(numeral) => Ok(value),
        _ => Err(invalid()),
    }
}
