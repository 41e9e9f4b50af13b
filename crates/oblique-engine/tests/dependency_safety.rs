//! Scheduling-order safety tests.
//!
//! Wavefront detectors: starting from an all-zero grid, the update writes
//! `1 + min(neighbourhood)` (or `max`). After `T` steps every cell must be
//! exactly `T`. A scheduler that lets a task read a cell before its
//! predecessor wrote step `t` feeds a stale (smaller) value into `min`; a
//! task reading a cell already advanced to `t+1` feeds a too-new value
//! into `max`. Either defect leaves a cell different from `T`, so these
//! runs detect ordering violations by value alone, without instrumenting
//! the scheduler. Repeated runs vary thread interleavings.

use oblique_core::{Coord, DenseGrid, GridStore, PlaneView, Time};
use oblique_engine::{stencil_with, Strategy};

const REPETITIONS: usize = 20;

fn wave_min_1d(_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
    let lo = v
        .get_wrapped([p[0] - 1])
        .min(v.get(p))
        .min(v.get_wrapped([p[0] + 1]));
    lo + 1
}

fn wave_max_1d(_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
    let hi = v
        .get_wrapped([p[0] - 1])
        .max(v.get(p))
        .max(v.get_wrapped([p[0] + 1]));
    hi + 1
}

fn wave_min_2d(_t: Time, p: Coord<2>, v: PlaneView<'_, i64, 2>) -> i64 {
    let lo = v
        .get(p)
        .min(v.get_wrapped([p[0] - 1, p[1]]))
        .min(v.get_wrapped([p[0] + 1, p[1]]))
        .min(v.get_wrapped([p[0], p[1] - 1]))
        .min(v.get_wrapped([p[0], p[1] + 1]));
    lo + 1
}

fn assert_wavefront_1d(strategy: Strategy, update: fn(Time, Coord<1>, PlaneView<'_, i64, 1>) -> i64) {
    const STEPS: Time = 24;
    for _ in 0..REPETITIONS {
        let mut grid = DenseGrid::<i64, 1>::new([48]).unwrap();
        stencil_with(strategy, &mut grid, STEPS, update);
        assert!(
            grid.cells().iter().all(|&c| c == STEPS as i64),
            "{strategy:?} violated read-after-write ordering: {:?}",
            grid.cells()
        );
    }
}

// ── Parallel recursive ──────────────────────────────────────────

#[test]
fn parallel_recursive_never_reads_stale_cells() {
    assert_wavefront_1d(Strategy::ParallelRecursive, wave_min_1d);
}

#[test]
fn parallel_recursive_never_reads_ahead() {
    assert_wavefront_1d(Strategy::ParallelRecursive, wave_max_1d);
}

#[test]
fn parallel_recursive_is_safe_in_2d() {
    for _ in 0..REPETITIONS {
        let mut grid = DenseGrid::<i64, 2>::new([12, 12]).unwrap();
        stencil_with(Strategy::ParallelRecursive, &mut grid, 6, wave_min_2d);
        assert!(grid.cells().iter().all(|&c| c == 6));
    }
}

// ── Fine-grained iterative ──────────────────────────────────────

#[test]
fn fine_iterative_never_reads_stale_cells() {
    assert_wavefront_1d(Strategy::FineIterative, wave_min_1d);
}

#[test]
fn fine_iterative_never_reads_ahead() {
    assert_wavefront_1d(Strategy::FineIterative, wave_max_1d);
}

#[test]
fn fine_iterative_is_safe_in_2d() {
    for _ in 0..REPETITIONS {
        let mut grid = DenseGrid::<i64, 2>::new([12, 12]).unwrap();
        stencil_with(Strategy::FineIterative, &mut grid, 6, wave_min_2d);
        assert!(grid.cells().iter().all(|&c| c == 6));
    }
}

// ── Coarse iterative ────────────────────────────────────────────

#[test]
fn coarse_iterative_barrier_is_sound() {
    assert_wavefront_1d(Strategy::CoarseIterative, wave_min_1d);
    assert_wavefront_1d(Strategy::CoarseIterative, wave_max_1d);
}
