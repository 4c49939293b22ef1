//! Fixed-length code languages.

use core::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::error::{Error, Result};

/// Largest candidate set [`Language::valid_words`] will enumerate.
pub const ENUMERATION_LIMIT: u64 = 1 << 16;

/// Which words of the right length belong to a language.
#[derive(Clone, Copy)]
pub enum Validity {
    /// Every word over the alphabet.
    Any,
    /// Exactly the words of the code table.
    Table,
    /// Words with exactly this many symbols other than the first alphabet
    /// symbol (`"two bits set"` for 2-of-5).
    Weight(usize),
    /// An arbitrary predicate.
    Predicate(fn(&str) -> bool),
}

impl fmt::Debug for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Table => f.write_str("Table"),
            Self::Weight(n) => f.debug_tuple("Weight").field(n).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A code: an alphabet, a word length, a validity rule and an ordered
/// digit → codeword table.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    alphabet: Vec<char>,
    word_length: usize,
    validity: Validity,
    table: Vec<String>,
}

impl Language {
    /// Builds a language, checking every table word against the rules.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] for an alphabet of fewer than two symbols,
    ///   a zero word length or an empty table.
    /// - [`Error::LengthMismatch`], [`Error::InvalidDigit`] or
    ///   [`Error::InvalidCode`] for a table word that breaks them.
    pub fn new(
        name: impl Into<String>,
        alphabet: &str,
        word_length: usize,
        validity: Validity,
        table: Vec<String>,
    ) -> Result<Self> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.len() < 2 {
            return Err(Error::InvalidFormat("alphabet needs two symbols".into()));
        }
        if word_length == 0 || table.is_empty() {
            return Err(Error::InvalidFormat(
                "language needs a word length and a code table".into(),
            ));
        }
        let language = Self {
            name: name.into(),
            alphabet,
            word_length,
            validity,
            table,
        };
        for word in &language.table {
            language.check_symbols(word)?;
            if !language.accepts(word) {
                return Err(Error::InvalidCode(word.clone()));
            }
        }
        Ok(language)
    }

    /// A trusted constructor for the built-in codes.
    pub(crate) fn builtin(
        name: &str,
        word_length: usize,
        validity: Validity,
        table: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            alphabet: vec!['0', '1'],
            word_length,
            validity,
            table,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Symbols, the first one being "unset".
    #[must_use]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Fixed word length.
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// The validity rule.
    #[must_use]
    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Codewords in digit order.
    #[must_use]
    pub fn table(&self) -> &[String] {
        &self.table
    }

    /// `|alphabet|^length`.
    #[must_use]
    pub fn total_words(&self) -> BigUint {
        BigUint::from(self.alphabet.len()).pow(self.word_length as u32)
    }

    fn check_length(&self, word: &str) -> Result<()> {
        let found = word.chars().count();
        if found == self.word_length {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                expected: self.word_length,
                found,
            })
        }
    }

    fn check_symbols(&self, word: &str) -> Result<()> {
        self.check_length(word)?;
        match word
            .chars()
            .enumerate()
            .find(|(_, c)| !self.alphabet.contains(c))
        {
            Some((position, character)) => Err(Error::InvalidDigit {
                character,
                position,
                base: self.alphabet.len() as u32,
            }),
            None => Ok(()),
        }
    }

    /// The rule alone, for a word already known to be well formed.
    fn accepts(&self, word: &str) -> bool {
        match self.validity {
            Validity::Any => true,
            Validity::Table => self.table.iter().any(|w| w == word),
            Validity::Weight(n) => word.chars().filter(|&c| c != self.alphabet[0]).count() == n,
            Validity::Predicate(p) => p(word),
        }
    }

    /// Whether `word` belongs to the language.
    ///
    /// Foreign symbols make a word invalid rather than an error.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] for a word of the wrong length.
    pub fn is_valid(&self, word: &str) -> Result<bool> {
        self.check_length(word)?;
        Ok(word.chars().all(|c| self.alphabet.contains(&c)) && self.accepts(word))
    }

    /// Codeword of digit `index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] past the end of the table.
    pub fn codeword(&self, index: usize) -> Result<&str> {
        self.table
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::out_of_range(index, 0, self.table.len() - 1))
    }

    /// Table position of `word`, if present.
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.table.iter().position(|w| w == word)
    }

    /// Decodes a word to its digit.
    ///
    /// The validity rule is checked before the table, so a word failing the
    /// rule and a well-formed word with no digit both raise
    /// [`Error::InvalidCode`].
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`], [`Error::InvalidDigit`] for a foreign
    /// symbol, or [`Error::InvalidCode`].
    pub fn decode(&self, word: &str) -> Result<usize> {
        self.check_symbols(word)?;
        if !self.accepts(word) {
            return Err(Error::InvalidCode(word.to_owned()));
        }
        self.index_of(word)
            .ok_or_else(|| Error::InvalidCode(word.to_owned()))
    }

    /// Successor of `word` in table order, wrapping after the last entry.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCode`] when `word` is not in the table.
    pub fn next(&self, word: &str) -> Result<&str> {
        let index = self
            .index_of(word)
            .ok_or_else(|| Error::InvalidCode(word.to_owned()))?;
        Ok(self.table[(index + 1) % self.table.len()].as_str())
    }

    /// Hamming distance between two valid words.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] or [`Error::InvalidCode`].
    pub fn distance(&self, a: &str, b: &str) -> Result<usize> {
        for word in [a, b] {
            if !self.is_valid(word)? {
                return Err(Error::InvalidCode(word.to_owned()));
            }
        }
        super::hamming_distance(a, b)
    }

    /// Whether two valid words differ in exactly one position.
    ///
    /// # Errors
    ///
    /// See [`Language::distance`].
    pub fn are_adjacent(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.distance(a, b)? == 1)
    }

    /// Every accepted word in lexicographic alphabet order.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] when `|alphabet|^length` exceeds
    /// [`ENUMERATION_LIMIT`].
    pub fn valid_words(&self) -> Result<Vec<String>> {
        let total = self.total_words();
        let count = total
            .to_u64()
            .filter(|&n| n <= ENUMERATION_LIMIT)
            .ok_or_else(|| Error::TooLarge {
                what: "word enumeration",
                count: total.to_string(),
                limit: ENUMERATION_LIMIT,
            })?;
        let radix = self.alphabet.len() as u64;
        let mut words = Vec::new();
        let mut word = vec![self.alphabet[0]; self.word_length];
        for mut n in 0..count {
            for slot in word.iter_mut().rev() {
                *slot = self.alphabet[(n % radix) as usize];
                n /= radix;
            }
            let candidate: String = word.iter().collect();
            if self.accepts(&candidate) {
                words.push(candidate);
            }
        }
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| (*w).to_owned()).collect()
    }

    fn ternary() -> Language {
        Language::new(
            "ternary-gray",
            "012",
            2,
            Validity::Any,
            words(&["00", "01", "02", "12", "11", "10", "20", "21", "22"]),
        )
        .unwrap()
    }

    #[test]
    fn new_checks_table_words() {
        assert!(matches!(
            Language::new("x", "01", 3, Validity::Any, words(&["01"])),
            Err(Error::LengthMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(
            Language::new("x", "01", 2, Validity::Any, words(&["0a"])),
            Err(Error::InvalidDigit { character: 'a', position: 1, .. })
        ));
        assert!(matches!(
            Language::new("x", "01", 2, Validity::Weight(1), words(&["11"])),
            Err(Error::InvalidCode(_))
        ));
        assert!(Language::new("x", "0", 2, Validity::Any, words(&["00"])).is_err());
    }

    #[test]
    fn validity_rules() {
        let l = ternary();
        assert!(l.is_valid("21").unwrap());
        assert!(!l.is_valid("2x").unwrap());
        assert!(l.is_valid("211").is_err());

        let even = Language::new(
            "even",
            "01",
            3,
            Validity::Predicate(|w| w.chars().filter(|&c| c == '1').count() % 2 == 0),
            words(&["000", "011"]),
        )
        .unwrap();
        assert!(even.is_valid("101").unwrap());
        assert!(!even.is_valid("100").unwrap());
        assert_eq!(even.valid_words().unwrap(), words(&["000", "011", "101", "110"]));
    }

    #[test]
    fn lookups() {
        let l = ternary();
        assert_eq!(l.codeword(3).unwrap(), "12");
        assert!(l.codeword(9).is_err());
        assert_eq!(l.index_of("20"), Some(6));
        assert_eq!(l.decode("22").unwrap(), 8);
        assert_eq!(l.next("22").unwrap(), "00");
        assert!(matches!(l.next("33"), Err(Error::InvalidCode(_))));
    }

    #[test]
    fn distances() {
        let l = ternary();
        assert_eq!(l.distance("00", "22").unwrap(), 2);
        assert!(l.are_adjacent("12", "11").unwrap());
        assert!(matches!(l.distance("00", "0x"), Err(Error::InvalidCode(_))));
    }

    #[test]
    fn enumeration_is_bounded() {
        let big = Language::new("wide", "01", 17, Validity::Any, words(&["00000000000000000"])).unwrap();
        assert!(matches!(big.valid_words(), Err(Error::TooLarge { .. })));
        assert_eq!(ternary().valid_words().unwrap().len(), 9);
    }
}
