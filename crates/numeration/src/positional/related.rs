//! Conversion between bases that share a primitive base.
//!
//! Two bases `B₁ = Pˡ` and `B₂ = Pᵏ` are related when they are powers of the
//! same primitive base `P`. Digits then convert by regrouping alone, without
//! ever forming the integer value:
//!
//! ```text
//! g = gcd(l, k)            intermediate base Q = P^g
//! each source digit   ->   l/g digits of Q
//! concatenate, pad    ->   multiple of k/g
//! each chunk of k/g   ->   one destination digit
//! ```
//!
//! The primitive base is computed from the bases themselves, so any related
//! pair is recognized (2/8/16/32, 3/9/27, 6/36, ...).

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;

use super::{check_base, decimal_to_base, horner, parse_digits, render_digits, strip_leading_zeros};
use crate::error::{Error, Result};

/// Two bases expressed as powers of a common primitive base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelatedBases {
    /// The primitive base `P`.
    pub primitive: u32,
    /// Exponent of the source base: `B₁ = Pˡ`.
    pub l: u32,
    /// Exponent of the destination base: `B₂ = Pᵏ`.
    pub k: u32,
}

impl RelatedBases {
    /// `gcd(l, k)`.
    #[inline]
    #[must_use]
    pub fn gcd(&self) -> u32 {
        self.l.gcd(&self.k)
    }

    /// Base of the regrouping digits, `P^gcd(l, k)`.
    #[inline]
    #[must_use]
    pub fn intermediate_base(&self) -> u32 {
        self.primitive.pow(self.gcd())
    }

    /// Intermediate digits produced per source digit.
    #[inline]
    #[must_use]
    pub fn expand_width(&self) -> usize {
        (self.l / self.gcd()) as usize
    }

    /// Intermediate digits consumed per destination digit.
    #[inline]
    #[must_use]
    pub fn group_width(&self) -> usize {
        (self.k / self.gcd()) as usize
    }
}

/// Smallest `p` with `base = p^e`, and that `e`.
fn perfect_power_root(base: u32) -> (u32, u32) {
    for p in 2..base {
        let mut acc = p;
        let mut e = 1;
        while acc < base {
            acc *= p;
            e += 1;
        }
        if acc == base {
            return (p, e);
        }
    }
    (base, 1)
}

/// Finds the common primitive base of two bases, if any.
///
/// # Errors
///
/// Returns [`Error::InvalidBase`] for unsupported bases.
///
/// # Example
///
/// ```
/// use numeration::positional::primitive_base;
///
/// let r = primitive_base(8, 16).unwrap().unwrap();
/// assert_eq!((r.primitive, r.l, r.k), (2, 3, 4));
/// assert!(primitive_base(2, 10).unwrap().is_none());
/// ```
pub fn primitive_base(base_from: u32, base_to: u32) -> Result<Option<RelatedBases>> {
    check_base(base_from)?;
    check_base(base_to)?;
    let (p1, l) = perfect_power_root(base_from);
    let (p2, k) = perfect_power_root(base_to);
    Ok((p1 == p2).then_some(RelatedBases { primitive: p1, l, k }))
}

fn related(base_from: u32, base_to: u32) -> Result<RelatedBases> {
    primitive_base(base_from, base_to)?.ok_or(Error::UnrelatedBases(base_from, base_to))
}

/// Expands every source digit into `expand_width` intermediate digits.
fn expand(values: &[u32], bases: &RelatedBases) -> Result<Vec<u32>> {
    let q = bases.intermediate_base();
    let width = bases.expand_width();
    let mut out = Vec::with_capacity(values.len() * width);
    for &d in values {
        let chunk = decimal_to_base(&BigUint::from(d), q, Some(width))?;
        out.extend(parse_digits(&chunk, q)?);
    }
    Ok(out)
}

/// Recombines each group of intermediate digits into one digit.
fn regroup(intermediate: &[u32], bases: &RelatedBases) -> Vec<u32> {
    let q = bases.intermediate_base();
    intermediate
        .chunks(bases.group_width())
        .map(|chunk| horner(chunk, q).to_u32().unwrap_or_default())
        .collect()
}

/// Converts integer digits between related bases by regrouping.
///
/// The output has no leading zeros, so it is identical to
/// [`base_to_base`](super::base_to_base) for every valid input.
///
/// # Errors
///
/// Returns [`Error::UnrelatedBases`] when the bases share no primitive base,
/// and the digit parsing errors of [`parse_digits`].
///
/// # Example
///
/// ```
/// use numeration::positional::related_base_convert;
///
/// assert_eq!(related_base_convert("11111111", 2, 16).unwrap(), "FF");
/// assert_eq!(related_base_convert("777", 8, 16).unwrap(), "1FF");
/// ```
pub fn related_base_convert(digits: &str, base_from: u32, base_to: u32) -> Result<String> {
    let bases = related(base_from, base_to)?;
    let values = parse_digits(digits, base_from)?;
    let expanded = expand(&values, &bases)?;

    let group = bases.group_width();
    let pad = (group - expanded.len() % group) % group;
    let mut intermediate = vec![0; pad];
    intermediate.extend(expanded);

    let out = render_digits(&regroup(&intermediate, &bases));
    Ok(strip_leading_zeros(&out).to_owned())
}

/// Converts fraction digits (right of the radix point) between related bases.
///
/// The last group is right-padded with zeros and trailing zeros are kept, so
/// the output has exactly `ceil(len · l / k)` digits.
///
/// # Errors
///
/// Same as [`related_base_convert`].
///
/// # Example
///
/// ```
/// use numeration::positional::related_fraction_convert;
///
/// // 0.101₂ = 0.A₁₆
/// assert_eq!(related_fraction_convert("101", 2, 16).unwrap(), "A");
/// ```
pub fn related_fraction_convert(digits: &str, base_from: u32, base_to: u32) -> Result<String> {
    let bases = related(base_from, base_to)?;
    let values = parse_digits(digits, base_from)?;
    let mut intermediate = expand(&values, &bases)?;

    let group = bases.group_width();
    let pad = (group - intermediate.len() % group) % group;
    intermediate.extend(std::iter::repeat(0).take(pad));

    Ok(render_digits(&regroup(&intermediate, &bases)))
}
