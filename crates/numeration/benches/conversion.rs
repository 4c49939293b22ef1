//! Positional conversion benchmarks.
//!
//! Compares the two evaluation strategies and the direct regrouping of
//! related bases against conversion through the value.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::BigUint;

use numeration::positional::{
    base_to_base, base_to_decimal_with, decimal_to_base, related_base_convert, Evaluation,
};

fn hex_digits(len: usize) -> String {
    "0123456789ABCDEF".chars().cycle().take(len).collect()
}

// =============================================================================
// Evaluation strategies
// =============================================================================

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    for len in [16usize, 128, 1024] {
        let digits = hex_digits(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("horner", len), &digits, |b, d| {
            b.iter(|| black_box(base_to_decimal_with(d, 16, Evaluation::Horner)))
        });
        group.bench_with_input(BenchmarkId::new("weighted_sum", len), &digits, |b, d| {
            b.iter(|| black_box(base_to_decimal_with(d, 16, Evaluation::WeightedSum)))
        });
    }
    group.finish();
}

// =============================================================================
// Successive division
// =============================================================================

fn bench_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_to_base");
    let value = BigUint::from(u128::MAX);
    for base in [2u32, 7, 16, 36] {
        group.bench_with_input(BenchmarkId::from_parameter(base), &base, |b, &base| {
            b.iter(|| black_box(decimal_to_base(&value, base, None)))
        });
    }
    group.finish();
}

// =============================================================================
// Related bases
// =============================================================================

fn bench_related(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex_to_octal");
    for len in [16usize, 256] {
        let digits = hex_digits(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("regroup", len), &digits, |b, d| {
            b.iter(|| black_box(related_base_convert(d, 16, 8)))
        });
        group.bench_with_input(BenchmarkId::new("via_value", len), &digits, |b, d| {
            b.iter(|| black_box(base_to_base(d, 16, 8)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluation, bench_division, bench_related);
criterion_main!(benches);
