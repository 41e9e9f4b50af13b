//! Criterion micro-benchmarks comparing the five execution strategies on
//! an integer diffusion sweep.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use oblique_bench::{diffusion_kernel, seeded_grid_2d};
use oblique_engine::{stencil_with, Strategy};

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("diffusion_2d");
    for (rows, cols, steps) in [(64, 64, 16), (128, 128, 32)] {
        let cells = (rows * cols) as u64 * steps as u64;
        group.throughput(Throughput::Elements(cells));
        for strategy in Strategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), format!("{rows}x{cols}x{steps}")),
                &(rows, cols, steps),
                |b, &(rows, cols, steps)| {
                    b.iter(|| {
                        let mut grid = seeded_grid_2d(rows, cols);
                        stencil_with(strategy, &mut grid, steps, diffusion_kernel);
                        grid
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
