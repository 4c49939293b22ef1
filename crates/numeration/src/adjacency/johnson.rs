//! Johnson (twisted ring) codes.
//!
//! An `n`-stage counter has `2n` states. State `i ≤ n` is `i` ones followed
//! by zeros; later states shift zeros in from the left:
//!
//! ```text
//! 0 00000   5 11111
//! 1 10000   6 01111
//! 2 11000   7 00111
//! 3 11100   8 00011
//! 4 11110   9 00001
//! ```

use std::sync::OnceLock;

use super::language::{Language, Validity};
use crate::error::{Error, Result};

/// Stages of the default decimal counter.
pub const DEFAULT_STAGES: usize = 5;

fn codeword(n: usize, stages: usize) -> String {
    if n <= stages {
        format!("{}{}", "1".repeat(n), "0".repeat(stages - n))
    } else {
        let zeros = n - stages;
        format!("{}{}", "0".repeat(zeros), "1".repeat(stages - zeros))
    }
}

/// Codeword of state `n` in an `stages`-stage counter.
///
/// # Errors
///
/// [`Error::InvalidFormat`] for zero stages, [`Error::OutOfRange`] for
/// `n ≥ 2·stages`.
pub fn encode(n: usize, stages: usize) -> Result<String> {
    if stages == 0 {
        return Err(Error::InvalidFormat("johnson counter needs a stage".into()));
    }
    if n >= 2 * stages {
        return Err(Error::out_of_range(n, 0, 2 * stages - 1));
    }
    Ok(codeword(n, stages))
}

/// State of a codeword; the counter length is the word length.
///
/// # Errors
///
/// [`Error::EmptyDigits`], [`Error::InvalidDigit`] for symbols other than
/// `0`/`1`, [`Error::InvalidCode`] for patterns the counter never reaches.
pub fn decode(word: &str) -> Result<usize> {
    if word.is_empty() {
        return Err(Error::EmptyDigits);
    }
    if let Some((position, character)) = word.chars().enumerate().find(|(_, c)| !matches!(c, '0' | '1')) {
        return Err(Error::InvalidDigit {
            character,
            position,
            base: 2,
        });
    }
    let stages = word.len();
    let ones = word.matches('1').count();
    let leading_ones = word.chars().take_while(|&c| c == '1').count();
    let trailing_ones = word.chars().rev().take_while(|&c| c == '1').count();
    if leading_ones == ones {
        Ok(ones)
    } else if trailing_ones == ones {
        Ok(2 * stages - ones)
    } else {
        Err(Error::InvalidCode(word.to_owned()))
    }
}

/// The `stages`-stage counter as a language.
///
/// # Errors
///
/// [`Error::InvalidFormat`] for zero stages.
pub fn language(stages: usize) -> Result<Language> {
    if stages == 0 {
        return Err(Error::InvalidFormat("johnson counter needs a stage".into()));
    }
    Ok(build(stages))
}

fn build(stages: usize) -> Language {
    let table = (0..2 * stages).map(|n| codeword(n, stages)).collect();
    Language::builtin(
        &format!("johnson {stages}-stage"),
        stages,
        Validity::Table,
        table,
    )
}

/// The 5-stage, 10-state decimal counter.
pub fn johnson5() -> &'static Language {
    static LANGUAGE: OnceLock<Language> = OnceLock::new();
    LANGUAGE.get_or_init(|| build(DEFAULT_STAGES))
}
