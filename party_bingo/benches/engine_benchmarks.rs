use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use party_bingo::game::cards::{CardPool, generate_set};
use party_bingo::game::lines;
use party_bingo::CallSequence;

/// Benchmark generating one set of three cards
fn bench_set_generation(c: &mut Criterion) {
    c.bench_function("generate_set", |b| b.iter(generate_set));
}

/// Benchmark building the full startup pool
fn bench_pool_generation(c: &mut Criterion) {
    c.bench_function("card_pool_standard", |b| b.iter(CardPool::standard));
}

/// Benchmark building a call sequence with the default pass count
fn bench_call_sequence(c: &mut Criterion) {
    c.bench_function("call_sequence_generate", |b| {
        b.iter(|| CallSequence::generate(black_box(10)))
    });
}

/// Benchmark the line check on a near-miss and a saturated grid
fn bench_line_check(c: &mut Criterion) {
    // Four diagonal marks: forces a scan of every line without a hit.
    let mut marks = [[false; 5]; 5];
    for i in 0..4 {
        marks[i][i] = true;
    }
    c.bench_function("has_any_line_near_miss", |b| {
        b.iter(|| lines::has_any_line(black_box(&marks)))
    });

    let full = [[true; 5]; 5];
    c.bench_function("has_any_line_full", |b| {
        b.iter(|| lines::has_any_line(black_box(&full)))
    });
}

criterion_group!(
    benches,
    bench_set_generation,
    bench_pool_generation,
    bench_call_sequence,
    bench_line_check
);
criterion_main!(benches);
