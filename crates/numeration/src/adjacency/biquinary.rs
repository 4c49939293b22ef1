//! Biquinary decimal codes.
//!
//! Each decimal digit is a "bi" part (0 or 5) plus a "quinary" part
//! (0..4). The 2-of-5 and 7-bit variants set exactly two bits per digit, so
//! any single-bit error is detected.
//!
//! | digit | 2-of-5 | 6-bit `5 43210` | 7-bit `50 43210` |
//! |-------|--------|-----------------|------------------|
//! | 0 | 00110 | 0 00001 | 01 00001 |
//! | 1 | 01010 | 0 00010 | 01 00010 |
//! | 4 | 10100 | 0 10000 | 01 10000 |
//! | 5 | 11000 | 1 00001 | 10 00001 |
//! | 9 | 00011 | 1 10000 | 10 10000 |

use std::sync::OnceLock;

use super::language::{Language, Validity};
use crate::error::Result;

/// 2-of-5 codewords for digits 0..=9.
pub const FIVE_BIT: [&str; 10] = [
    "00110", "01010", "01100", "10010", "10100", "11000", "10001", "01001", "00101", "00011",
];

/// `5 43210` codewords for digits 0..=9.
pub const SIX_BIT: [&str; 10] = [
    "000001", "000010", "000100", "001000", "010000", "100001", "100010", "100100", "101000",
    "110000",
];

/// `50 43210` codewords for digits 0..=9.
pub const SEVEN_BIT: [&str; 10] = [
    "0100001", "0100010", "0100100", "0101000", "0110000", "1000001", "1000010", "1000100",
    "1001000", "1010000",
];

/// A biquinary variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 2-of-5, validity "exactly two bits set".
    FiveBit,
    /// One bi bit plus a one-hot quinary part, validity by table lookup.
    SixBit,
    /// IBM 650 style, validity "exactly two bits set".
    SevenBit,
}

fn build(name: &str, table: &[&str], validity: Validity) -> Language {
    let words = table.iter().map(|w| (*w).to_owned()).collect();
    Language::builtin(name, table[0].len(), validity, words)
}

/// The 2-of-5 code.
pub fn biquinary5() -> &'static Language {
    static LANGUAGE: OnceLock<Language> = OnceLock::new();
    LANGUAGE.get_or_init(|| build("biquinary 2-of-5", &FIVE_BIT, Validity::Weight(2)))
}

/// The 6-bit code.
pub fn biquinary6() -> &'static Language {
    static LANGUAGE: OnceLock<Language> = OnceLock::new();
    LANGUAGE.get_or_init(|| build("biquinary 6-bit", &SIX_BIT, Validity::Table))
}

/// The 7-bit code.
pub fn biquinary7() -> &'static Language {
    static LANGUAGE: OnceLock<Language> = OnceLock::new();
    LANGUAGE.get_or_init(|| build("biquinary 7-bit", &SEVEN_BIT, Validity::Weight(2)))
}

impl Variant {
    /// The variant's language.
    #[must_use]
    pub fn language(self) -> &'static Language {
        match self {
            Self::FiveBit => biquinary5(),
            Self::SixBit => biquinary6(),
            Self::SevenBit => biquinary7(),
        }
    }

    /// Codeword of a decimal digit.
    ///
    /// # Errors
    ///
    /// [`crate::Error::OutOfRange`] for digits above 9.
    pub fn encode(self, digit: u8) -> Result<&'static str> {
        self.language().codeword(usize::from(digit))
    }

    /// Digit of a codeword.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidCode`] when the word fails the validity rule
    /// or is well formed but unassigned; [`crate::Error::LengthMismatch`]
    /// and [`crate::Error::InvalidDigit`] for malformed words.
    pub fn decode(self, word: &str) -> Result<u8> {
        let digit = self.language().decode(word)?;
        Ok(digit as u8)
    }

    /// Encodes every decimal digit of a number, most significant first.
    ///
    /// # Errors
    ///
    /// Never fails for a `u64`; the signature follows [`Variant::encode`].
    pub fn encode_number(self, value: u64) -> Result<Vec<&'static str>> {
        value
            .to_string()
            .bytes()
            .map(|b| self.encode(b - b'0'))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const ALL: [Variant; 3] = [Variant::FiveBit, Variant::SixBit, Variant::SevenBit];

    #[test]
    fn tables_are_consistent() {
        for variant in ALL {
            let language = variant.language();
            for digit in 0..10u8 {
                let word = variant.encode(digit).unwrap();
                assert_eq!(word.len(), language.word_length());
                assert_eq!(variant.decode(word).unwrap(), digit, "{variant:?} {digit}");
                assert!(language.is_valid(word).unwrap());
            }
        }
    }

    #[test]
    fn two_of_five_sets_exactly_two_bits() {
        for variant in [Variant::FiveBit, Variant::SevenBit] {
            for digit in 0..10u8 {
                let word = variant.encode(digit).unwrap();
                assert_eq!(word.matches('1').count(), 2);
            }
        }
    }

    #[test]
    fn six_bit_weights() {
        for digit in 0..10u8 {
            let ones = Variant::SixBit.encode(digit).unwrap().matches('1').count();
            assert_eq!(ones, if digit < 5 { 1 } else { 2 });
        }
    }

    #[test]
    fn single_bit_errors_are_detected() {
        for digit in 0..10u8 {
            let word = Variant::FiveBit.encode(digit).unwrap();
            for i in 0..word.len() {
                let mut flipped: Vec<char> = word.chars().collect();
                flipped[i] = if flipped[i] == '0' { '1' } else { '0' };
                let flipped: String = flipped.into_iter().collect();
                assert!(matches!(
                    Variant::FiveBit.decode(&flipped),
                    Err(Error::InvalidCode(_))
                ));
            }
        }
    }

    #[test]
    fn malformed_words() {
        assert!(matches!(
            Variant::SevenBit.decode("1100000"),
            Err(Error::InvalidCode(_))
        ));
        assert!(matches!(
            Variant::FiveBit.decode("0011"),
            Err(Error::LengthMismatch { expected: 5, found: 4 })
        ));
        assert!(matches!(
            Variant::FiveBit.decode("0021a"),
            Err(Error::InvalidDigit { character: '2', position: 2, .. })
        ));
        assert!(matches!(
            Variant::SixBit.decode("000011"),
            Err(Error::InvalidCode(_))
        ));
        assert!(Variant::FiveBit.encode(10).is_err());
    }

    #[test]
    fn encodes_numbers() {
        assert_eq!(
            Variant::SevenBit.encode_number(50).unwrap(),
            vec!["1000001", "0100001"]
        );
    }
}
