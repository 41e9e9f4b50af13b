//! The three iterative double-buffer strategies.
//!
//! All three sweep the full index space once per time step and swap
//! buffers. They differ only in scheduling: sequential scan, parallel
//! scan with a barrier between steps, or parallel slabs whose step
//! boundary is relaxed to a neighbourhood-synchronised dependency.

use oblique_core::{cell_count, coord_at, Coord, GridStore, Index, PlaneView, Time};
use oblique_runtime::{TaskGraph, TaskId};
use oblique_zoid::{scan, AxisRange, Base};
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::buffer::PingPong;

/// Minimum cells per `rayon` work item in the coarse sweep.
const COARSE_MIN_CHUNK: usize = 1024;

/// One thread, one full sweep per step.
pub(crate) fn run_sequential<C, F, const N: usize>(grid: &mut C, steps: Time, update: &F)
where
    C: GridStore<N>,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell,
{
    let limits = grid.extents();
    let count = cell_count(&limits);
    if steps == 0 || count == 0 {
        return;
    }

    let mut bufs = PingPong::new(grid);
    for t in 0..steps {
        let (src, dst) = bufs.split(t);
        let view = PlaneView::of(src);
        let cells = dst.cells_mut();
        for rank in 0..count {
            cells[rank] = update(t, coord_at(&limits, rank), view);
        }
    }
    bufs.resolve(steps);
}

/// Parallel sweep with a full barrier between steps.
///
/// Within a step the writes are disjoint slices of the destination
/// buffer, so this strategy needs no raw planes at all; the barrier is
/// the return of the parallel iterator.
pub(crate) fn run_coarse<C, F, const N: usize>(grid: &mut C, steps: Time, update: &F)
where
    C: GridStore<N>,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell + Sync,
{
    let limits = grid.extents();
    if steps == 0 || cell_count(&limits) == 0 {
        return;
    }

    let mut bufs = PingPong::new(grid);
    for t in 0..steps {
        let (src, dst) = bufs.split(t);
        let view = PlaneView::of(src);
        dst.cells_mut()
            .par_iter_mut()
            .with_min_len(COARSE_MIN_CHUNK)
            .enumerate()
            .for_each(|(rank, cell)| {
                *cell = update(t, coord_at(&limits, rank), view);
            });
    }
    bufs.resolve(steps);
}

/// Parallel slabs with neighbourhood synchronisation across steps.
///
/// The outermost axis is partitioned into slabs; the task for slab `k` at
/// step `t` is gated only on slabs `k−1..=k+1` (toroidal) of step `t−1`,
/// never on the whole previous step. With the unit-slope neighbourhood a
/// slab's reads are confined to exactly those predecessors.
pub(crate) fn run_fine<C, F, const N: usize>(
    grid: &mut C,
    steps: Time,
    update: &F,
    slab_count: Option<usize>,
) where
    C: GridStore<N>,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell + Sync,
{
    let limits = grid.extents();
    if steps == 0 || cell_count(&limits) == 0 {
        return;
    }

    let slabs = partition(
        limits[0],
        slab_count.unwrap_or(4 * oblique_runtime::available_parallelism()),
    );
    let slab_total = slabs.len();

    let mut bufs = PingPong::new(grid);
    let (primary, shadow) = bufs.planes();

    let mut graph = TaskGraph::new();
    let mut prev: Vec<TaskId> = Vec::new();
    for t in 0..steps {
        let mut curr = Vec::with_capacity(slab_total);
        for (k, &slab) in slabs.iter().enumerate() {
            let mut deps: SmallVec<[TaskId; 3]> = SmallVec::new();
            if t > 0 {
                deps.push(prev[k]);
                if slab_total > 1 {
                    deps.push(prev[(k + slab_total - 1) % slab_total]);
                }
                if slab_total > 2 {
                    deps.push(prev[(k + 1) % slab_total]);
                }
            }
            let body = move || {
                let (src, dst) = if t % 2 == 0 {
                    (primary, shadow)
                } else {
                    (shadow, primary)
                };
                let mut region = Base::full(limits);
                region[0] = slab;
                scan(&region, limits, t, &|pos, step| {
                    let value = update(step, pos, src.view());
                    // SAFETY: slab regions are disjoint within a step, and
                    // the slab's read neighbourhood is covered by its
                    // completed predecessors.
                    unsafe { dst.write(pos, value) };
                });
            };
            curr.push(graph.add_task(&deps, body));
        }
        prev = curr;
    }
    graph.run();

    bufs.resolve(steps);
}

/// Balanced partition of `[0, extent)` into at most `want` slabs.
fn partition(extent: Index, want: usize) -> Vec<AxisRange> {
    let count = want.clamp(1, extent.max(1) as usize);
    (0..count)
        .map(|k| AxisRange {
            begin: extent * k as Index / count as Index,
            end: extent * (k as Index + 1) / count as Index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblique_core::DenseGrid;

    fn shift_right(_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
        v.get_wrapped([p[0] - 1])
    }

    // ── partition ───────────────────────────────────────────────

    #[test]
    fn partition_is_contiguous_and_balanced() {
        let slabs = partition(10, 3);
        assert_eq!(slabs.len(), 3);
        assert_eq!(slabs[0].begin, 0);
        assert_eq!(slabs.last().unwrap().end, 10);
        for pair in slabs.windows(2) {
            assert_eq!(pair[0].end, pair[1].begin);
            assert!(pair[0].width() >= 3);
        }
    }

    #[test]
    fn partition_never_exceeds_extent() {
        assert_eq!(partition(2, 8).len(), 2);
        assert_eq!(partition(0, 8).len(), 1);
    }

    // ── Strategies agree on a known scenario ────────────────────

    #[test]
    fn sequential_shift_moves_the_pulse() {
        let mut grid = DenseGrid::from_cells([10], vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 0]).unwrap();
        run_sequential(&mut grid, 5, &shift_right);
        let mut expected = vec![0i64; 10];
        expected[3] = 1;
        assert_eq!(grid.cells(), expected.as_slice());
    }

    #[test]
    fn coarse_matches_sequential() {
        let init: Vec<i64> = (0..40).map(|i| i * 3 % 17).collect();
        let mut a = DenseGrid::from_cells([40], init.clone()).unwrap();
        let mut b = DenseGrid::from_cells([40], init).unwrap();
        let avg = |_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>| {
            (v.get_wrapped([p[0] - 1]) + v.get_wrapped([p[0] + 1])) / 2
        };
        run_sequential(&mut a, 7, &avg);
        run_coarse(&mut b, 7, &avg);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn fine_matches_sequential_across_slab_counts() {
        let init: Vec<i64> = (0..40).map(|i| i * i % 23).collect();
        let avg = |t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>| {
            (v.get_wrapped([p[0] - 1]) + v.get_wrapped([p[0] + 1])) / 2 + t as i64
        };
        let mut want = DenseGrid::from_cells([40], init.clone()).unwrap();
        run_sequential(&mut want, 6, &avg);
        for slabs in [1, 2, 3, 7, 40] {
            let mut got = DenseGrid::from_cells([40], init.clone()).unwrap();
            run_fine(&mut got, 6, &avg, Some(slabs));
            assert_eq!(want.cells(), got.cells(), "slabs={slabs}");
        }
    }

    #[test]
    fn fine_handles_2d_grids() {
        let init: Vec<i64> = (0..64).collect();
        let four_point = |_t: Time, p: Coord<2>, v: PlaneView<'_, i64, 2>| {
            (v.get_wrapped([p[0] - 1, p[1]])
                + v.get_wrapped([p[0] + 1, p[1]])
                + v.get_wrapped([p[0], p[1] - 1])
                + v.get_wrapped([p[0], p[1] + 1]))
                / 4
        };
        let mut want = DenseGrid::from_cells([8, 8], init.clone()).unwrap();
        run_sequential(&mut want, 4, &four_point);
        let mut got = DenseGrid::from_cells([8, 8], init).unwrap();
        run_fine(&mut got, 4, &four_point, Some(3));
        assert_eq!(want.cells(), got.cells());
    }

    #[test]
    fn zero_steps_is_identity_for_all() {
        let init = vec![5i64, 6, 7];
        for runner in [0, 1, 2] {
            let mut grid = DenseGrid::from_cells([3], init.clone()).unwrap();
            match runner {
                0 => run_sequential(&mut grid, 0, &shift_right),
                1 => run_coarse(&mut grid, 0, &shift_right),
                _ => run_fine(&mut grid, 0, &shift_right, None),
            }
            assert_eq!(grid.cells(), init.as_slice());
        }
    }
}
