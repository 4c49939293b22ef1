//! Numeration - number representation and conversion engine.
//!
//! Encodes, decodes and converts values across the representations taught
//! in a digital-electronics course. Every value is exact: integers are
//! [`num_bigint`] integers and decoded values are [`num_rational::BigRational`],
//! so rendering never double-rounds.
//!
//! # Components
//!
//! | Module | Covers |
//! |--------|--------|
//! | [`positional`] | base `B` ↔ decimal, base ↔ base, related-base regrouping, mixed radix, Roman numerals |
//! | [`fixed`] | `Q(E,F)_B` unsigned / sign-magnitude / complement, migration |
//! | [`biased`] | excess-K integers with wrapping arithmetic |
//! | [`float`] | IEEE754-style codec for any base and field widths |
//! | [`adjacency`] | biquinary, Johnson, Gray, BCD and Hamming analysis |
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use numeration::{positional, fixed::{FixedPointValue, NumberFormat}};
//! use numeration::adjacency::gray;
//!
//! assert_eq!(positional::decimal_to_base(&BigUint::from(1994u32), 5, None).unwrap(), "30434");
//!
//! let q44 = NumberFormat::unsigned(4, 4, 2).unwrap();
//! assert_eq!(FixedPointValue::parse(q44, "5.25").unwrap().digits(), "01010100");
//!
//! assert_eq!(gray::encode(7, 4).unwrap(), "0100");
//! ```
//!
//! # Errors
//!
//! Every fallible operation returns [`Result`] with the shared [`Error`]
//! enum. The only overflow that does not fail is excess-K arithmetic,
//! which wraps and sets a flag.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (migrations and excess-K wraps at
//! `debug`, float category dispatch at `trace`) and never installs a
//! subscriber.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

// Error taxonomy
pub mod error;

// Exact decimal helpers over BigRational
pub mod rational;

// Positional number systems
pub mod positional;

// Fixed-point values and base migration
pub mod fixed;

// Excess-K integers
pub mod biased;

// IEEE754-style float codec
pub mod float;

// Adjacency and error-detecting codes
pub mod adjacency;

pub use error::{Error, Result};

pub use adjacency::{analyze_adjacency, hamming_distance, AdjacencyReport, Language, Validity};
pub use biased::{ArithmeticOutcome, ExcessK};
pub use fixed::{FixedPointValue, NumberFormat, Representation};
pub use float::{Category, ExtendedReal, FloatFormat, FloatValue, NanKind, Sign};
pub use positional::{base_to_base, base_to_decimal, decimal_to_base, related_base_convert};
