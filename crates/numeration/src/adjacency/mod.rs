//! Adjacency and error-detecting codes.
//!
//! Every code is a [`Language`]: an alphabet, a word length, a validity rule
//! and an ordered table of codewords. [`analyze_adjacency`] measures the
//! Hamming distance between consecutive table entries and the share of the
//! word space the code uses.
//!
//! | code | length | valid words | adjacent | cyclic |
//! |------|--------|-------------|----------|--------|
//! | [`biquinary5`] | 5 | 10 of 32 | no | no |
//! | [`biquinary7`] | 7 | 21 of 128 | no | no |
//! | [`johnson5`] | 5 | 10 of 32 | yes | yes |
//! | [`gray4`] | 4 | 16 of 16 | yes | yes |
//! | [`bcd`] | 4 | 10 of 16 | no | no |
//!
//! # Example
//!
//! ```
//! use numeration::adjacency::{analyze_adjacency, gray4, hamming_distance};
//!
//! assert_eq!(hamming_distance("0100", "1100").unwrap(), 1);
//!
//! let report = analyze_adjacency(gray4()).unwrap();
//! assert!(report.is_adjacent && report.is_cyclic);
//! assert_eq!(report.packing_efficiency_f64(), 1.0);
//! ```

pub mod biquinary;
pub mod gray;
pub mod johnson;
mod language;

pub use biquinary::{biquinary5, biquinary6, biquinary7, Variant};
pub use gray::gray4;
pub use johnson::johnson5;
pub use language::{Language, Validity, ENUMERATION_LIMIT};

use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::error::{Error, Result};

/// Number of positions where two words differ.
///
/// # Errors
///
/// [`Error::LengthMismatch`] when the lengths differ.
pub fn hamming_distance(a: &str, b: &str) -> Result<usize> {
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la != lb {
        return Err(Error::LengthMismatch {
            expected: la,
            found: lb,
        });
    }
    Ok(a.chars().zip(b.chars()).filter(|(x, y)| x != y).count())
}

/// Adjacency properties of a code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyReport {
    /// Consecutive table entries differ in exactly one position.
    pub is_adjacent: bool,
    /// Adjacent, and the last entry is adjacent to the first.
    pub is_cyclic: bool,
    /// Words the validity rule accepts.
    pub valid_words: u64,
    /// `|alphabet|^length`.
    pub total_words: u64,
    /// Entries in the code table.
    pub table_len: usize,
    /// Smallest distance between consecutive entries, if there are two.
    pub min_distance: Option<usize>,
    /// Largest distance between consecutive entries, if there are two.
    pub max_distance: Option<usize>,
    /// `valid_words / total_words`.
    pub packing_efficiency: BigRational,
}

impl AdjacencyReport {
    /// Packing efficiency as a float.
    #[must_use]
    pub fn packing_efficiency_f64(&self) -> f64 {
        self.packing_efficiency.to_f64().unwrap_or(f64::NAN)
    }
}

fn count_valid(language: &Language, total: u64) -> Result<u64> {
    Ok(match language.validity() {
        Validity::Any => total,
        Validity::Table => language.table().len() as u64,
        Validity::Weight(_) | Validity::Predicate(_) => language.valid_words()?.len() as u64,
    })
}

/// Analyzes a language's table.
///
/// # Errors
///
/// [`Error::TooLarge`] when counting valid words needs an enumeration above
/// [`ENUMERATION_LIMIT`] or the word space does not fit a `u64`.
pub fn analyze_adjacency(language: &Language) -> Result<AdjacencyReport> {
    let total_big = language.total_words();
    let total = total_big.to_u64().ok_or_else(|| Error::TooLarge {
        what: "word space",
        count: total_big.to_string(),
        limit: u64::MAX,
    })?;
    let valid = count_valid(language, total)?;

    let table = language.table();
    let steps = table
        .windows(2)
        .map(|pair| hamming_distance(&pair[0], &pair[1]))
        .collect::<Result<Vec<_>>>()?;
    let is_adjacent = steps.iter().all(|&d| d == 1);
    let wraps = match (table.first(), table.last()) {
        (Some(first), Some(last)) if table.len() > 1 => hamming_distance(last, first)? == 1,
        _ => false,
    };

    Ok(AdjacencyReport {
        is_adjacent,
        is_cyclic: is_adjacent && wraps,
        valid_words: valid,
        total_words: total,
        table_len: table.len(),
        min_distance: steps.iter().copied().min(),
        max_distance: steps.iter().copied().max(),
        packing_efficiency: BigRational::new(BigInt::from(valid), BigInt::from(total)),
    })
}

/// Natural 8421 BCD: `0000` to `1001`.
pub fn bcd() -> &'static Language {
    static LANGUAGE: OnceLock<Language> = OnceLock::new();
    LANGUAGE.get_or_init(|| {
        let table = (0..10u32).map(|d| format!("{d:04b}")).collect();
        Language::builtin("bcd 8421", 4, Validity::Table, table)
    })
}

/// Saturated `width`-bit binary, every word valid.
///
/// # Errors
///
/// [`Error::TooLarge`] above 16 bits, [`Error::InvalidFormat`] for width 0.
pub fn binary(width: u32) -> Result<Language> {
    if width == 0 {
        return Err(Error::InvalidFormat("binary code needs a bit".into()));
    }
    if width > gray::MAX_TABLE_WIDTH {
        return Err(Error::TooLarge {
            what: "binary code table",
            count: format!("2^{width}"),
            limit: 1 << gray::MAX_TABLE_WIDTH,
        });
    }
    let table = (0..1u64 << width)
        .map(|n| format!("{n:0w$b}", w = width as usize))
        .collect();
    Ok(Language::builtin(
        &format!("binary {width}-bit"),
        width as usize,
        Validity::Any,
        table,
    ))
}
