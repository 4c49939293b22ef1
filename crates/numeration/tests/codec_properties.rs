//! Property-based tests for the value codecs.
//!
//! Fixed-point quantization, the float codec, excess-K and the adjacency
//! codes are checked against their defining identities.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::Signed;
use proptest::prelude::*;

use numeration::adjacency::{gray, hamming_distance, johnson, Variant};
use numeration::biased::ExcessK;
use numeration::fixed::{FixedPointValue, NumberFormat, Representation};
use numeration::float::{ExtendedReal, FloatFormat};
use numeration::Error;

fn representation() -> impl Strategy<Value = Representation> {
    prop_oneof![
        Just(Representation::Unsigned),
        Just(Representation::SignMagnitude),
        Just(Representation::Complement),
    ]
}

/// A small fixed-point format.
fn number_format() -> impl Strategy<Value = NumberFormat> {
    (1u32..=6, 0u32..=6, 2u32..=16, representation())
        .prop_map(|(e, f, b, r)| NumberFormat::new(e, f, b, r).unwrap())
}

// =============================================================================
// Fixed point
// =============================================================================

proptest! {
    /// Quantizing an in-range value moves it by at most ε/2
    #[test]
    fn prop_quantization_error_bounded(format in number_format(), k in 0i64..=997) {
        let span = format.max_value() - format.min_value();
        let v = format.min_value() + span * BigRational::new(k.into(), 997.into());
        let q = FixedPointValue::new(format, &v).unwrap();
        let half = format.epsilon() / BigRational::from_integer(2.into());
        prop_assert!(q.absolute_error(&v) <= half);
    }

    /// from_raw and encode are inverse over every valid scaled value
    #[test]
    fn prop_scaled_raw_inverse(format in number_format(), pick in any::<u64>()) {
        let lo = format.min_scaled();
        let span = format.max_scaled() - &lo + 1;
        let scaled: BigInt = lo + BigInt::from(pick) % span;
        let v = FixedPointValue::from_scaled(format, scaled.clone()).unwrap();
        let back = FixedPointValue::from_raw(format, v.encode().clone()).unwrap();
        prop_assert_eq!(back.scaled(), &scaled);
        prop_assert_eq!(back, v);
    }

    /// Negating twice is the identity for signed formats
    #[test]
    fn prop_double_negation(
        (e, f, b) in (1u32..=6, 0u32..=6, 2u32..=16),
        complement in any::<bool>(),
        pick in any::<u64>(),
    ) {
        let format = if complement {
            NumberFormat::complement(e, f, b).unwrap()
        } else {
            NumberFormat::sign_magnitude(e, f, b).unwrap()
        };
        // complement's most negative value has no positive counterpart
        let lo = format.min_scaled() + 1;
        let span = format.max_scaled() - &lo + 1;
        let v = FixedPointValue::from_scaled(format, lo + BigInt::from(pick) % span).unwrap();
        prop_assert_eq!(v.negate().unwrap().negate().unwrap(), v);
    }
}

// =============================================================================
// Float
// =============================================================================

proptest! {
    /// Values on the binary16 normalized grid round-trip exactly
    #[test]
    fn prop_binary16_grid_round_trip(
        negative in any::<bool>(),
        exponent in -14i32..=15,
        mantissa in 0u32..1024,
    ) {
        let f = FloatFormat::binary16();
        let significand = BigRational::new(BigInt::from(1024 + mantissa), BigInt::from(1024));
        let power = if exponent >= 0 {
            BigRational::from_integer(BigInt::from(2).pow(exponent as u32))
        } else {
            BigRational::new(1.into(), BigInt::from(2).pow((-exponent) as u32))
        };
        let mut value = significand * power;
        if negative {
            value = -value;
        }
        let v = ExtendedReal::Finite(value);
        let bits = f.encode(&v).unwrap();
        prop_assert_eq!(&bits.mantissa, &BigUint::from(mantissa));
        prop_assert_eq!(f.decode(&bits).unwrap(), v);
    }

    /// binary32 words agree with the hardware encoding of f32
    #[test]
    fn prop_binary32_matches_hardware(x in any::<f32>()) {
        // the codec has a single zero
        prop_assume!(x.is_finite() && x != 0.0);
        let f = FloatFormat::binary32();
        let bits = f.encode(&ExtendedReal::from_f64(f64::from(x))).unwrap();
        prop_assert_eq!(bits.to_word(&f), BigUint::from(x.to_bits()));
    }

    /// Decoding any word and encoding the result reproduces the word
    #[test]
    fn prop_word_decode_encode(word in any::<u16>()) {
        prop_assume!(word & 0x7FFF != 0);
        let f = FloatFormat::binary16();
        let bits = f.from_word(&BigUint::from(word)).unwrap();
        let value = f.decode(&bits).unwrap();
        prop_assume!(!value.is_nan());
        prop_assert_eq!(f.encode(&value).unwrap().to_word(&f), BigUint::from(word));
    }
}

// =============================================================================
// Excess-K
// =============================================================================

proptest! {
    /// represent and to_integer are inverse across the whole range
    #[test]
    fn prop_excess_k_inverse(base in 2u32..=16, length in 1u32..=5, pick in any::<u64>()) {
        let code = ExcessK::standard(base, length).unwrap();
        let span = code.max_value() - code.min_value() + 1;
        let n = code.min_value() + BigInt::from(pick) % span;
        let digits = code.represent(&n).unwrap();
        prop_assert_eq!(digits.len(), length as usize);
        prop_assert_eq!(code.to_integer(&digits).unwrap(), n);
    }

    /// Wrapped sums stay inside the range
    #[test]
    fn prop_excess_k_wraps_in_range(a in -47i64..=52, b in -47i64..=52) {
        let code = ExcessK::new(10, 2, 47).unwrap();
        let out = code
            .add(&code.represent(&a.into()).unwrap(), &code.represent(&b.into()).unwrap())
            .unwrap();
        prop_assert!(out.value >= code.min_value() && out.value <= code.max_value());
        prop_assert_eq!(out.overflow, !(-47..=52).contains(&(a + b)));
    }
}

// =============================================================================
// Adjacency codes
// =============================================================================

/// Every five-bit word of weight 2 is a digit; every other word is rejected.
#[test]
fn biquinary5_weight_is_exhaustive() {
    for bits in 0u8..32 {
        let word = format!("{bits:05b}");
        let decoded = Variant::FiveBit.decode(&word);
        if bits.count_ones() == 2 {
            let digit = decoded.unwrap();
            assert_eq!(Variant::FiveBit.encode(digit).unwrap(), word);
        } else {
            assert!(matches!(decoded, Err(Error::InvalidCode(_))), "{word}");
        }
    }
}

/// Seven-bit words need weight 2 with one bi bit and one quinary bit.
#[test]
fn biquinary7_weight_is_exhaustive() {
    let mut digits = 0;
    for bits in 0u8..128 {
        let word = format!("{bits:07b}");
        let decoded = Variant::SevenBit.decode(&word);
        let bi = (bits >> 5).count_ones();
        if bits.count_ones() == 2 && bi == 1 {
            let digit = decoded.unwrap();
            assert_eq!(Variant::SevenBit.encode(digit).unwrap(), word);
            digits += 1;
        } else {
            assert!(matches!(decoded, Err(Error::InvalidCode(_))), "{word}");
        }
    }
    assert_eq!(digits, 10);
}

proptest! {
    /// Johnson states one step apart differ in one bit
    #[test]
    fn prop_johnson_adjacent(stages in 2usize..=12, pick in any::<usize>()) {
        let n = pick % (2 * stages);
        let here = johnson::encode(n, stages).unwrap();
        let next = johnson::encode((n + 1) % (2 * stages), stages).unwrap();
        prop_assert_eq!(hamming_distance(&here, &next).unwrap(), 1);
        prop_assert_eq!(johnson::decode(&here).unwrap(), n);
    }

    /// Gray codes of consecutive values differ in one bit
    #[test]
    fn prop_gray_adjacent(width in 1u32..=63, pick in any::<u64>()) {
        let n = pick % (1u64 << width);
        let next = (n + 1) % (1u64 << width);
        let a = gray::encode(n, width).unwrap();
        let b = gray::encode(next, width).unwrap();
        prop_assert_eq!(hamming_distance(&a, &b).unwrap(), 1);
        prop_assert_eq!(gray::decode(&a).unwrap(), n);
    }
}

#[test]
fn signed_zero_scaled_is_not_negative() {
    let f = NumberFormat::sign_magnitude(2, 2, 10).unwrap();
    let z = FixedPointValue::from_raw(f, BigUint::from(10_000u32)).unwrap();
    assert!(z.is_zero());
    assert!(!z.scaled().is_negative());
}
