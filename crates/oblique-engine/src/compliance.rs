//! Strategy compliance test helpers.
//!
//! These functions verify that an execution strategy satisfies the
//! engine's semantic contract: bit-identical results to a plain
//! double-buffered reference sweep, identity on zero steps, and closure
//! under composition. Reused across the strategy test modules and the
//! integration suite.

use oblique_core::{cell_count, coord_at, Coord, DenseGrid, GridStore, PlaneView, Time};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::stencil::{stencil_with, Strategy};

/// Update function shape used by the compliance checks.
pub type Update<const N: usize> = fn(Time, Coord<N>, PlaneView<'_, i64, N>) -> i64;

/// Advance a grid with a plain double-buffered scan.
///
/// Deliberately written against the container API only, independent of
/// every scheduler, so it can serve as the oracle for all of them.
pub fn reference_sweep<const N: usize>(
    grid: &mut DenseGrid<i64, N>,
    steps: Time,
    update: Update<N>,
) {
    let limits = grid.extents();
    let count = cell_count(&limits);
    for t in 0..steps {
        let view = PlaneView::of(&*grid);
        let next: Vec<i64> = (0..count)
            .map(|rank| update(t, coord_at(&limits, rank), view))
            .collect();
        grid.cells_mut().copy_from_slice(&next);
    }
}

fn random_grid<const N: usize>(extents: [i64; N], seed: u64) -> DenseGrid<i64, N> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    DenseGrid::from_fn(extents, |_| rng.gen_range(-100..100)).expect("valid extents")
}

fn mix_1d(t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
    (v.get_wrapped([p[0] - 1]) + v.get_wrapped([p[0] + 1])) / 2 - v.get(p) + t as i64
}

fn mix_2d(t: Time, p: Coord<2>, v: PlaneView<'_, i64, 2>) -> i64 {
    let sum = v.get_wrapped([p[0] - 1, p[1]])
        + v.get_wrapped([p[0] + 1, p[1]])
        + v.get_wrapped([p[0], p[1] - 1])
        + v.get_wrapped([p[0], p[1] + 1]);
    (sum / 4) ^ (t as i64 & 1)
}

fn mix_3d(_t: Time, p: Coord<3>, v: PlaneView<'_, i64, 3>) -> i64 {
    v.get_wrapped([p[0] - 1, p[1], p[2]])
        .wrapping_add(v.get_wrapped([p[0], p[1] + 1, p[2]]))
        .wrapping_sub(v.get_wrapped([p[0], p[1], p[2] - 1]))
}

fn assert_matches_oracle<const N: usize>(
    strategy: Strategy,
    extents: [i64; N],
    steps: Time,
    update: Update<N>,
    seed: u64,
) {
    let mut expected = random_grid(extents, seed);
    let mut actual = expected.clone();
    reference_sweep(&mut expected, steps, update);
    stencil_with(strategy, &mut actual, steps, update);
    assert_eq!(
        expected.cells(),
        actual.cells(),
        "{strategy:?} diverges from the reference on {extents:?} after {steps} steps"
    );
}

/// Assert that zero steps leave the grid untouched.
pub fn assert_zero_steps_identity(strategy: Strategy) {
    let init = random_grid([17], 11);
    let mut grid = init.clone();
    stencil_with(strategy, &mut grid, 0, mix_1d as Update<1>);
    assert_eq!(grid.cells(), init.cells(), "{strategy:?} mutated on 0 steps");
}

/// Assert that the identity update is a fixed point for any step count.
pub fn assert_identity_fixed_point(strategy: Strategy) {
    let init = random_grid([13], 23);
    let mut grid = init.clone();
    stencil_with(strategy, &mut grid, 9, |_t, p, v| v.get(p));
    assert_eq!(grid.cells(), init.cells(), "{strategy:?} broke identity");
}

/// Assert that shifting a ring of extent `L` by `L` steps is a round trip.
pub fn assert_shift_full_cycle(strategy: Strategy) {
    let init = random_grid([32], 37);
    let mut grid = init.clone();
    stencil_with(strategy, &mut grid, 32, |_t, p, v| v.get_wrapped([p[0] - 1]));
    assert_eq!(grid.cells(), init.cells(), "{strategy:?} broke the cycle");
}

/// Assert equivalence with the reference sweep on random 1-D grids.
pub fn assert_matches_oracle_1d(strategy: Strategy) {
    for (extent, steps) in [(8, 3), (10, 10), (33, 17), (64, 40)] {
        assert_matches_oracle(strategy, [extent], steps, mix_1d as Update<1>, 42);
    }
}

/// Assert equivalence with the reference sweep on random 2-D grids.
pub fn assert_matches_oracle_2d(strategy: Strategy) {
    for (extents, steps) in [([8, 8], 6), ([12, 7], 9), ([16, 16], 20)] {
        assert_matches_oracle(strategy, extents, steps, mix_2d as Update<2>, 7);
    }
}

/// Assert equivalence with the reference sweep on a random 3-D grid.
pub fn assert_matches_oracle_3d(strategy: Strategy) {
    assert_matches_oracle(strategy, [6, 5, 7], 8, mix_3d as Update<3>, 99);
}

/// Assert `T1 + T2` steps equal `T1` steps followed by `T2` time-shifted
/// steps.
pub fn assert_composition(strategy: Strategy) {
    const T1: Time = 5;
    let mut whole = random_grid([21], 5);
    let mut split = whole.clone();

    stencil_with(strategy, &mut whole, T1 + 4, mix_1d as Update<1>);

    stencil_with(strategy, &mut split, T1, mix_1d as Update<1>);
    stencil_with(strategy, &mut split, 4, |t, p, v| mix_1d(t + T1, p, v));

    assert_eq!(
        whole.cells(),
        split.cells(),
        "{strategy:?} is not closed under composition"
    );
}

/// Run all compliance checks on one strategy.
pub fn run_full_compliance(strategy: Strategy) {
    assert_zero_steps_identity(strategy);
    assert_identity_fixed_point(strategy);
    assert_shift_full_cycle(strategy);
    assert_matches_oracle_1d(strategy);
    assert_matches_oracle_2d(strategy);
    assert_matches_oracle_3d(strategy);
    assert_composition(strategy);
}
