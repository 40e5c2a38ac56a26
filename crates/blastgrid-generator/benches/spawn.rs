//! Benchmarks for tray refills.
//!
//! Each refill scans the board for every catalog shape before drawing, so
//! the cost depends on how crowded the board is.
//!
//! # Test Data
//!
//! - **`empty`**: an empty 8x8 board.
//! - **`crowded`**: an 8x8 board with a few scattered holes, where most
//!   shapes have to be tried at every origin.
//!
//! Three fixed seeds keep the draws reproducible.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench spawn
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use blastgrid_core::{Grid, Palette, ShapeCatalog};
use blastgrid_generator::{SpawnPolicy, SpawnSeed};
use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn boards() -> [(&'static str, Grid); 2] {
    let crowded = "
        ##.#####
        ########
        #####..#
        ########
        .#######
        ####.###
        ########
        ######.#
    ";
    [
        ("empty", Grid::new(8, 8)),
        ("crowded", crowded.parse().unwrap()),
    ]
}

fn bench_refill(c: &mut Criterion) {
    for (name, grid) in boards() {
        for (i, seed) in SEEDS.into_iter().enumerate() {
            let seed = SpawnSeed::from_str(seed).unwrap();
            c.bench_with_input(
                BenchmarkId::new(format!("refill_{name}"), format!("seed_{i}")),
                &seed,
                |b, seed| {
                    b.iter_batched(
                        || {
                            SpawnPolicy::with_seed(
                                ShapeCatalog::standard(),
                                Palette::default(),
                                3,
                                hint::black_box(*seed),
                            )
                        },
                        |mut policy| policy.refill(&grid),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(8));
    targets = bench_refill
);
criterion_main!(benches);
