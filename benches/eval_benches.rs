use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use roam::prelude::*;

const POSITIONS: &[(&str, &str)] = &[
    (
        "start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("endgame", "8/2p5/3p4/1P5r/1R3p1k/8/4P1P1/6K1 w - - 0 1"),
];

/// Raw pseudo-legal counter; the per-node hot path of the evaluator
fn bench_fast_mobility(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_mobility");
    for (name, fen) in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        group.bench_function(*name, |b| {
            b.iter(|| {
                black_box(fast_mobility(black_box(&board), board.stm));
                black_box(fast_mobility(black_box(&board), board.stm.flip()));
            })
        });
    }
    group.finish();
}

/// Full evaluation through the cache: after the first iteration every call
/// is a cache hit, which is the steady state inside a search
fn bench_cached_evaluate(c: &mut Criterion) {
    let board = Board::from_fen(POSITIONS[1].1).unwrap();
    let mut evaluator = MobilityEvaluator::new();

    c.bench_function("evaluate_cached", |b| {
        b.iter(|| black_box(evaluator.evaluate(black_box(&board))))
    });
}

fn bench_cache_probe_store(c: &mut Criterion) {
    let mut cache = MobilityCache::new();
    let info = MobilityInfo::new(31, 27);
    for key in 0u64..4096 {
        cache.store(key.wrapping_mul(0x9E3779B97F4A7C15), info);
    }

    c.bench_function("cache_probe", |b| {
        let mut key = 0u64;
        b.iter(|| {
            key = key.wrapping_add(0x9E3779B97F4A7C15);
            black_box(cache.probe(black_box(key)))
        })
    });

    c.bench_function("cache_store", |b| {
        let mut key = 0u64;
        b.iter(|| {
            key = key.wrapping_add(0x9E3779B97F4A7C15);
            cache.store(black_box(key), black_box(info));
        })
    });
}

fn bench_history_update(c: &mut Criterion) {
    let mut history = MobilityHistory::new();
    let moves: Vec<Move> = (0u8..64)
        .map(|to| Move::new(12, to, Move::QUIET))
        .collect();

    c.bench_function("history_update", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let mv = moves[i & 63];
            i += 1;
            history.update(Side::White, black_box(mv), black_box(96));
        })
    });
}

criterion_group!(
    benches,
    bench_fast_mobility,
    bench_cached_evaluate,
    bench_cache_probe_store,
    bench_history_update
);
criterion_main!(benches);
