//! Format descriptors loaded from JSON go through the validating constructors.

#![cfg(feature = "serde")]

use num_bigint::BigInt;

use numeration::biased::ExcessK;
use numeration::fixed::{NumberFormat, Representation};
use numeration::float::FloatFormat;

#[test]
fn number_format_from_json() {
    let q: NumberFormat = serde_json::from_str(
        r#"{"integer_digits": 4, "fraction_digits": 4, "base": 2, "representation": "complement"}"#,
    )
    .unwrap();
    assert_eq!(q, NumberFormat::complement(4, 4, 2).unwrap());

    // representation defaults to unsigned
    let q: NumberFormat =
        serde_json::from_str(r#"{"integer_digits": 3, "fraction_digits": 2, "base": 10}"#).unwrap();
    assert_eq!(q.representation(), Representation::Unsigned);

    let q: NumberFormat = serde_json::from_str(
        r#"{"integer_digits": 3, "fraction_digits": 2, "base": 10, "representation": "sign-magnitude"}"#,
    )
    .unwrap();
    assert!(q.is_signed());
}

#[test]
fn number_format_rejects_invalid() {
    assert!(serde_json::from_str::<NumberFormat>(
        r#"{"integer_digits": 4, "fraction_digits": 4, "base": 37}"#
    )
    .is_err());
    assert!(serde_json::from_str::<NumberFormat>(
        r#"{"integer_digits": 0, "fraction_digits": 4, "base": 2, "representation": "complement"}"#
    )
    .is_err());
}

#[test]
fn float_format_from_json() {
    let f: FloatFormat =
        serde_json::from_str(r#"{"base": 2, "exponent_digits": 8, "mantissa_digits": 23}"#).unwrap();
    assert_eq!(f, FloatFormat::binary32());
    assert_eq!(f.bias(), 127);

    assert!(serde_json::from_str::<FloatFormat>(
        r#"{"base": 2, "exponent_digits": 0, "mantissa_digits": 23}"#
    )
    .is_err());
}

#[test]
fn excess_k_from_json() {
    let code: ExcessK = serde_json::from_str(r#"{"base": 10, "length": 2, "bias": 47}"#).unwrap();
    assert_eq!(code, ExcessK::new(10, 2, 47).unwrap());
    assert_eq!(
        serde_json::to_string(&code).unwrap(),
        r#"{"base":10,"length":2,"bias":47}"#
    );

    let code: ExcessK = serde_json::from_str(r#"{"base": 2, "length": 8, "bias": -3}"#).unwrap();
    assert_eq!(code.bias(), &BigInt::from(-3));

    // biases past i64 travel as decimal strings
    let big: BigInt = "123456789012345678901234567890".parse().unwrap();
    let code = ExcessK::new(2, 128, big.clone()).unwrap();
    let json = serde_json::to_string(&code).unwrap();
    assert!(json.contains(r#""bias":"123456789012345678901234567890""#));
    assert_eq!(serde_json::from_str::<ExcessK>(&json).unwrap().bias(), &big);

    assert!(serde_json::from_str::<ExcessK>(r#"{"base": 10, "length": 0, "bias": 47}"#).is_err());
    assert!(serde_json::from_str::<ExcessK>(r#"{"base": 10, "length": 2, "bias": "4x7"}"#).is_err());
}

#[test]
fn formats_survive_a_round_trip() {
    let q = NumberFormat::sign_magnitude(2, 3, 10).unwrap();
    let json = serde_json::to_string(&q).unwrap();
    assert_eq!(serde_json::from_str::<NumberFormat>(&json).unwrap(), q);

    let f = FloatFormat::new(10, 2, 3).unwrap();
    let json = serde_json::to_string(&f).unwrap();
    assert_eq!(serde_json::from_str::<FloatFormat>(&json).unwrap(), f);

    let code = ExcessK::new(10, 2, 47).unwrap();
    let json = serde_json::to_string(&code).unwrap();
    assert_eq!(serde_json::from_str::<ExcessK>(&json).unwrap(), code);
}
