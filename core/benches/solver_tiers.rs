use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::new_unchecked((9, 9), 10)),
    ("intermediate", GameConfig::new_unchecked((16, 16), 40)),
    ("expert", GameConfig::new_unchecked((16, 30), 99)),
];

/// Reveals the start cell and plays until the first move that is not proven, so the board is left mid-game.
fn mid_game(config: GameConfig, seed: u64) -> Snapshot {
    let start = (config.size.0 / 2, config.size.1 / 2);
    let layout = RandomLayoutGenerator::new(seed, start, StartTile::AlwaysZero).generate(config);
    let mut engine = PlayEngine::new(layout);
    let mut solver = Solver::default();
    let _ = engine.reveal(start);

    while !engine.is_finished() {
        let snapshot = Snapshot::from_engine(&engine);
        match solver.decide(&snapshot) {
            Ok(Some(decision)) if decision.strategy.is_proven() => {
                let _ = engine.reveal(decision.coords);
            }
            _ => return snapshot,
        }
    }
    Snapshot::from_engine(&engine)
}

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");
    for (name, config) in TIERS {
        let snapshots: Vec<_> = (0..8).map(|seed| mid_game(config, seed)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(name), &snapshots, |b, snapshots| {
            b.iter(|| {
                for snapshot in snapshots {
                    let mut solver = Solver::default();
                    black_box(solver.decide(black_box(snapshot)).ok());
                }
            })
        });
    }
    group.finish();
}

fn bench_autoplay(c: &mut Criterion) {
    let mut group = c.benchmark_group("autoplay");
    group.sample_size(20);
    for (name, config) in TIERS {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let start = (config.size.0 / 2, config.size.1 / 2);
                let layout = RandomLayoutGenerator::new(seed, start, StartTile::AlwaysZero).generate(config);
                let mut engine = PlayEngine::new(layout);
                black_box(autoplay(&mut engine, &mut Solver::default(), |_, _| {}).ok())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decide, bench_autoplay);
criterion_main!(benches);
