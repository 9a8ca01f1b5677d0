//! Hot-path benchmarks (SPEC_FULL.md §10 "Test tooling").
//!
//! Grounded on the teacher crate's own `benches/benchmark.rs` convention:
//! `criterion`, `harness = false`, one bench function per hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use signalgraph::prelude::*;

fn phase_accumulation_bench(ticks: u64) {
    let mut graph = Graph::new();
    let tone = FrequencyGenerator::new(44100.0, 440.0, 1.0, 0.0, OutputKind::Real);
    let tone_id = graph.insert(Box::new(tone));
    for _ in 0..ticks {
        graph.update(tone_id);
        black_box(graph.output(tone_id, 0));
    }
}

fn scalar_fir_bench(ticks: u64) {
    let mut graph = Graph::new();
    let input = VectorInput::new(44100.0, (0..4096).map(|i| (i as Real).sin()).collect(), OutputKind::Real);
    let input_id = graph.insert(Box::new(input));
    let fir = ScalarFir::new_real(44100.0, vec![0.1; 63]);
    let fir_id = graph.insert(Box::new(fir));
    graph.bind_input(fir_id, 0, input_id, 0);
    for _ in 0..ticks {
        graph.update(input_id);
        graph.update(fir_id);
        black_box(graph.output(fir_id, 0));
    }
}

fn simd_fir_bench(ticks: u64) {
    let mut graph = Graph::new();
    let input = VectorInput::new(44100.0, (0..4096).map(|i| (i as Real).sin()).collect(), OutputKind::Real);
    let input_id = graph.insert(Box::new(input));
    let fir = SimdFir::new_real(44100.0, vec![0.1; 63]);
    let fir_id = graph.insert(Box::new(fir));
    graph.bind_input(fir_id, 0, input_id, 0);
    for _ in 0..ticks {
        graph.update(input_id);
        graph.update(fir_id);
        black_box(graph.output(fir_id, 0));
    }
}

fn frequency_shift_bench(ticks: u64) {
    let mut graph = Graph::new();
    let tone = FrequencyGenerator::new(44100.0, 440.0, 1.0, 0.0, OutputKind::Real);
    let tone_id = graph.insert(Box::new(tone));
    let shift = FrequencyShift::new(44100.0, 1000.0, OutputKind::Real);
    let shift_id = graph.insert(Box::new(shift));
    graph.bind_input(shift_id, 0, tone_id, 0);
    for _ in 0..ticks {
        graph.update(tone_id);
        graph.update(shift_id);
        black_box(graph.output(shift_id, 0));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("phase_accumulation", |b| {
        b.iter(|| phase_accumulation_bench(black_box(1000)))
    });
    c.bench_function("scalar_fir", |b| b.iter(|| scalar_fir_bench(black_box(1000))));
    c.bench_function("simd_fir", |b| b.iter(|| simd_fir_bench(black_box(1000))));
    c.bench_function("frequency_shift", |b| {
        b.iter(|| frequency_shift_bench(black_box(1000)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
