//! The execution plan: per-layer hyper-cubes of root zoids.
//!
//! Time is cut into layers of height `⌊min_extent / 2⌋`. Each layer holds
//! `2^N` root zoids indexed by an N-bit mask: bit `i` clear means the zoid
//! covers the left part of axis `i` and closes (slope +1); bit `i` set
//! means it covers the right part and opens (slope −1). A closing zoid's
//! reads stay inside cells it wrote itself; an opening zoid grows into
//! cells vacated by the closing zoids below it, which is what the subset
//! lattice of masks encodes as dependencies.

use oblique_core::{Coord, Index, Size, Time};
use oblique_runtime::{TaskGraph, TaskId};
use oblique_zoid::{AxisRange, Base, Slopes, Zoid};
use smallvec::SmallVec;

use crate::lattice;
use crate::recursive::execute_zoid;

/// An ordered sequence of time layers, each a hyper-cube of `2^N` root
/// zoids covering every `(t, cell)` of the sweep exactly once.
///
/// A plan is built once by [`create`](ExecutionPlan::create) and consumed
/// by one driver call.
#[derive(Clone, Debug)]
pub struct ExecutionPlan<const N: usize> {
    layers: Vec<Vec<Zoid<N>>>,
}

impl<const N: usize> ExecutionPlan<N> {
    /// Build the plan for sweeping `base` over `steps` time steps.
    ///
    /// Layer height is half the smallest extent (at least 1, so degenerate
    /// grids still advance); the final layer is clipped to `steps`. Axis
    /// `i` splits at `mid_i = extent_i − (extent_i − min_width) / 2`, so
    /// the closing left zoid keeps at least the minimum width on every
    /// axis.
    pub fn create(base: &Base<N>, steps: Time) -> Self {
        let size = base.extents();
        let width = base.min_width();
        let height = ((width / 2).max(1)) as Time;

        let splits: [(AxisRange, AxisRange); N] = std::array::from_fn(|i| {
            let extent = size[i];
            let mid = extent - (extent - width) / 2;
            (
                AxisRange { begin: 0, end: mid },
                AxisRange {
                    begin: mid,
                    end: extent,
                },
            )
        });

        let mut layers = Vec::new();
        let mut t0: Time = 0;
        while t0 < steps {
            let t1 = (t0 + height).min(steps);
            let mut zoids = Vec::with_capacity(1 << N);
            for mask in 0..(1usize << N) {
                let mut cur = *base;
                let dir: [Index; N] = std::array::from_fn(|i| {
                    if mask & (1 << i) != 0 {
                        -1
                    } else {
                        1
                    }
                });
                for (i, split) in splits.iter().enumerate() {
                    cur[i] = if mask & (1 << i) != 0 {
                        split.1
                    } else {
                        split.0
                    };
                }
                zoids.push(Zoid::new(cur, Slopes::new(dir), t0, t1));
            }
            layers.push(zoids);
            t0 = t1;
        }

        Self { layers }
    }

    /// Number of time layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The layers in processing order, each a `2^N`-element slice indexed
    /// by mask.
    pub fn layers(&self) -> impl Iterator<Item = &[Zoid<N>]> {
        self.layers.iter().map(Vec::as_slice)
    }

    /// Execute the plan on the calling thread.
    ///
    /// Within each layer the zoids run in popcount-ascending mask order,
    /// which linearises the subset lattice.
    pub fn run_sequential<E, O>(&self, even: &E, odd: &O, limits: Size<N>)
    where
        E: Fn(Coord<N>, Time),
        O: Fn(Coord<N>, Time),
    {
        let order = lattice::popcount_ascending(N as u32);
        for layer in &self.layers {
            for &mask in &order {
                layer[mask].for_each(even, odd, limits);
            }
        }
    }

    /// Execute the plan as a dependency-gated task graph.
    ///
    /// Each zoid becomes one task, recursively decomposed while it runs.
    /// Task `m` of a layer is gated on the layer's immediate-subset tasks
    /// of `m`; task 0 is additionally gated on the previous layer's sink
    /// (the all-bits task). Returns when the final sink has finished.
    pub fn run_parallel<E, O>(&self, even: &E, odd: &O, limits: Size<N>)
    where
        E: Fn(Coord<N>, Time) + Sync,
        O: Fn(Coord<N>, Time) + Sync,
    {
        let order = lattice::popcount_ascending(N as u32);
        let sink = lattice::sink_mask(N as u32);
        let mut graph = TaskGraph::new();
        let mut last: Option<TaskId> = None;

        for layer in &self.layers {
            let mut ids: Vec<Option<TaskId>> = vec![None; layer.len()];
            for &mask in &order {
                let mut deps: SmallVec<[TaskId; 8]> = SmallVec::new();
                if mask == 0 {
                    deps.extend(last);
                } else {
                    for sub in lattice::immediate_subsets(mask) {
                        debug_assert!(ids[sub].is_some());
                        deps.extend(ids[sub]);
                    }
                }
                let zoid = layer[mask];
                ids[mask] = Some(graph.add_task(&deps, move || {
                    execute_zoid(zoid, even, odd, limits);
                }));
            }
            last = ids[sink];
        }

        graph.run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use oblique_core::{cell_count, linear_rank};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn coverage_counts<const N: usize>(size: Size<N>, steps: Time) -> Vec<usize> {
        let base = Base::full(size);
        let plan = ExecutionPlan::create(&base, steps);
        let cells = cell_count(&size);
        let counts: Vec<AtomicUsize> = (0..cells * steps).map(|_| AtomicUsize::new(0)).collect();
        let record = |pos: Coord<N>, t: Time| {
            counts[t * cells + linear_rank(&size, &pos)].fetch_add(1, Ordering::Relaxed);
        };
        plan.run_sequential(&record, &record, size);
        counts.into_iter().map(AtomicUsize::into_inner).collect()
    }

    // ── Layer structure ─────────────────────────────────────────

    #[test]
    fn layer_height_is_half_min_extent() {
        let plan = ExecutionPlan::<1>::create(&Base::full([16]), 20);
        // height 8: layers [0,8), [8,16), [16,20)
        assert_eq!(plan.layer_count(), 3);
        let last = plan.layers().last().unwrap();
        assert_eq!(last[0].t_begin(), 16);
        assert_eq!(last[0].t_end(), 20);
    }

    #[test]
    fn each_layer_holds_a_hypercube() {
        let plan = ExecutionPlan::<3>::create(&Base::full([8, 8, 8]), 4);
        for layer in plan.layers() {
            assert_eq!(layer.len(), 8);
        }
    }

    #[test]
    fn mask_bits_choose_side_and_slope() {
        let plan = ExecutionPlan::<2>::create(&Base::full([8, 8]), 4);
        let layer: Vec<_> = plan.layers().next().unwrap().to_vec();
        // mask 0: left ranges, closing both axes
        assert_eq!(layer[0].base()[0], AxisRange { begin: 0, end: 8 });
        assert!(!layer[0].slopes().is_opening(0));
        // mask 0b10: axis 1 right range, opening
        assert_eq!(layer[2].base()[1], AxisRange { begin: 8, end: 8 });
        assert!(layer[2].slopes().is_opening(1));
        assert!(!layer[2].slopes().is_opening(0));
    }

    #[test]
    fn rectangular_grid_splits_off_axis_midpoints() {
        let plan = ExecutionPlan::<2>::create(&Base::full([12, 8]), 4);
        let layer: Vec<_> = plan.layers().next().unwrap().to_vec();
        // min width 8: axis 0 splits at 12 - (12-8)/2 = 10
        assert_eq!(layer[0].base()[0], AxisRange { begin: 0, end: 10 });
        assert_eq!(layer[1].base()[0], AxisRange { begin: 10, end: 12 });
    }

    #[test]
    fn zero_steps_has_no_layers() {
        let plan = ExecutionPlan::<1>::create(&Base::full([16]), 0);
        assert_eq!(plan.layer_count(), 0);
    }

    #[test]
    fn tiny_extent_reduces_height_to_one() {
        let plan = ExecutionPlan::<1>::create(&Base::full([2]), 3);
        assert_eq!(plan.layer_count(), 3);
    }

    // ── Coverage ────────────────────────────────────────────────

    #[test]
    fn plan_covers_every_space_time_cell_once_1d() {
        for steps in [1, 3, 8, 13] {
            let counts = coverage_counts([10], steps);
            assert!(counts.iter().all(|&c| c == 1), "steps={steps}: {counts:?}");
        }
    }

    #[test]
    fn plan_covers_every_space_time_cell_once_2d() {
        let counts = coverage_counts([8, 6], 7);
        assert!(counts.iter().all(|&c| c == 1));
    }

    #[test]
    fn plan_covers_every_space_time_cell_once_3d() {
        let counts = coverage_counts([4, 5, 6], 5);
        assert!(counts.iter().all(|&c| c == 1));
    }

    #[test]
    fn coverage_holds_for_odd_extents() {
        let counts = coverage_counts([7], 9);
        assert!(counts.iter().all(|&c| c == 1));
    }

    // ── Parallel driver ─────────────────────────────────────────

    #[test]
    fn parallel_driver_visits_the_same_cells() {
        let size: Size<2> = [8, 8];
        let steps = 6;
        let base = Base::full(size);
        let plan = ExecutionPlan::create(&base, steps);
        let cells = cell_count(&size);
        let counts: Vec<AtomicUsize> = (0..cells * steps).map(|_| AtomicUsize::new(0)).collect();
        let record = |pos: Coord<2>, t: Time| {
            counts[t * cells + linear_rank(&size, &pos)].fetch_add(1, Ordering::Relaxed);
        };
        plan.run_parallel(&record, &record, size);
        assert!(counts.iter().all(|c| c.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn sequential_driver_enumerates_without_duplicates() {
        let size: Size<1> = [24];
        let base = Base::full(size);
        let plan = ExecutionPlan::create(&base, 12);
        let mut seq: IndexSet<(Time, Coord<1>)> = IndexSet::new();
        {
            let seen = std::sync::Mutex::new(&mut seq);
            let record = |pos: Coord<1>, t: Time| {
                assert!(seen.lock().unwrap().insert((t, pos)), "duplicate ({t}, {pos:?})");
            };
            plan.run_sequential(&record, &record, size);
        }
        assert_eq!(seq.len(), 24 * 12);
    }
}
