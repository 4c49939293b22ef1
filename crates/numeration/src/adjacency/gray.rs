//! Reflected binary Gray code.
//!
//! `g = n ⊕ (n >> 1)`; decoding folds the shifted word back in until
//! nothing is left. Consecutive values, including the wrap from
//! `2^w − 1` to `0`, differ in one bit.

use std::sync::OnceLock;

use super::language::{Language, Validity};
use crate::error::{Error, Result};

/// Widest code [`language`] will tabulate.
pub const MAX_TABLE_WIDTH: u32 = 16;

fn check_width(width: u32) -> Result<()> {
    if (1..=64).contains(&width) {
        Ok(())
    } else {
        Err(Error::InvalidFormat(format!(
            "gray code width {width} is outside 1..=64"
        )))
    }
}

/// `n ⊕ (n >> 1)`.
#[inline]
#[must_use]
pub const fn to_gray(n: u64) -> u64 {
    n ^ (n >> 1)
}

/// Inverse of [`to_gray`].
#[inline]
#[must_use]
pub const fn from_gray(g: u64) -> u64 {
    let mut n = g;
    let mut shifted = g >> 1;
    while shifted != 0 {
        n ^= shifted;
        shifted >>= 1;
    }
    n
}

/// The `width`-bit Gray codeword of `n`.
///
/// # Errors
///
/// [`Error::InvalidFormat`] for a width outside `1..=64`,
/// [`Error::OutOfRange`] for `n ≥ 2^width`.
///
/// # Example
///
/// ```
/// use numeration::adjacency::gray;
///
/// assert_eq!(gray::encode(7, 4).unwrap(), "0100");
/// assert_eq!(gray::decode("0100").unwrap(), 7);
/// ```
pub fn encode(n: u64, width: u32) -> Result<String> {
    check_width(width)?;
    if width < 64 && n >> width != 0 {
        return Err(Error::out_of_range(n, 0, (1u64 << width) - 1));
    }
    Ok(format!("{:0w$b}", to_gray(n), w = width as usize))
}

/// The value of a Gray codeword.
///
/// # Errors
///
/// [`Error::EmptyDigits`], [`Error::InvalidDigit`] for symbols other than
/// `0`/`1`, [`Error::InvalidFormat`] for words longer than 64 bits.
pub fn decode(word: &str) -> Result<u64> {
    if word.is_empty() {
        return Err(Error::EmptyDigits);
    }
    check_width(word.chars().count() as u32)?;
    let mut g = 0u64;
    for (position, character) in word.chars().enumerate() {
        let bit = match character {
            '0' => 0,
            '1' => 1,
            _ => {
                return Err(Error::InvalidDigit {
                    character,
                    position,
                    base: 2,
                })
            }
        };
        g = g << 1 | bit;
    }
    Ok(from_gray(g))
}

/// The `width`-bit code as a language, all words valid.
///
/// # Errors
///
/// [`Error::TooLarge`] above [`MAX_TABLE_WIDTH`] bits,
/// [`Error::InvalidFormat`] for width 0.
pub fn language(width: u32) -> Result<Language> {
    check_width(width)?;
    if width > MAX_TABLE_WIDTH {
        return Err(Error::TooLarge {
            what: "gray code table",
            count: format!("2^{width}"),
            limit: 1 << MAX_TABLE_WIDTH,
        });
    }
    Ok(build(width))
}

fn build(width: u32) -> Language {
    let table = (0..1u64 << width)
        .map(|n| format!("{:0w$b}", to_gray(n), w = width as usize))
        .collect();
    Language::builtin(
        &format!("gray {width}-bit"),
        width as usize,
        Validity::Any,
        table,
    )
}

/// The 4-bit code.
pub fn gray4() -> &'static Language {
    static LANGUAGE: OnceLock<Language> = OnceLock::new();
    LANGUAGE.get_or_init(|| build(4))
}
