//! The entry dispatcher: strategy selection, configuration, and the
//! spawned-run handle.

use std::thread;

use oblique_core::{Coord, GridStore, PlaneView, Time};

use crate::{iterative, recursive};

/// The five execution strategies.
///
/// All strategies produce bit-identical results for a pure update
/// function; they differ only in scheduling. The default is
/// [`FineIterative`](Strategy::FineIterative).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One thread, a full sweep per time step.
    SequentialIterative,
    /// Parallel sweep with a full barrier between time steps.
    CoarseIterative,
    /// Parallel sweep with neighbourhood-synchronised slab dependencies.
    #[default]
    FineIterative,
    /// Recursive space-time decomposition on the calling thread.
    SequentialRecursive,
    /// Recursive space-time decomposition on the task graph.
    ParallelRecursive,
}

impl Strategy {
    /// All strategies, for exhaustive comparison loops.
    pub const ALL: [Strategy; 5] = [
        Strategy::SequentialIterative,
        Strategy::CoarseIterative,
        Strategy::FineIterative,
        Strategy::SequentialRecursive,
        Strategy::ParallelRecursive,
    ];
}

/// Engine configuration.
///
/// # Examples
///
/// ```
/// use oblique_engine::{EngineConfig, Strategy};
///
/// let config = EngineConfig {
///     strategy: Strategy::ParallelRecursive,
///     ..EngineConfig::default()
/// };
/// assert_eq!(config.fine_slab_count, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Which strategy executes the sweep.
    pub strategy: Strategy,
    /// Slab count for [`Strategy::FineIterative`]; `None` sizes the
    /// partition from the pool's parallelism. Ignored by the other
    /// strategies.
    pub fine_slab_count: Option<usize>,
}

/// Advance `grid` by `steps` sweeps of `update` under the default
/// strategy.
///
/// `update(t, p, view)` must be pure and may read the view only within
/// one cell of `p` per axis (toroidal). On return the grid holds the
/// state at time `steps`; a panicking update propagates to the caller.
///
/// # Examples
///
/// ```
/// use oblique_core::{DenseGrid, GridStore};
/// use oblique_engine::stencil;
///
/// let mut grid = DenseGrid::from_cells([5], vec![0i64, 0, 1, 0, 0]).unwrap();
/// // each step the pulse moves one cell to the right (toroidally)
/// stencil(&mut grid, 4, |_t, p, v| v.get_wrapped([p[0] - 1]));
/// assert_eq!(grid.cells(), &[0, 1, 0, 0, 0]);
/// ```
pub fn stencil<C, F, const N: usize>(grid: &mut C, steps: Time, update: F)
where
    C: GridStore<N>,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell + Sync,
{
    stencil_with_config(&EngineConfig::default(), grid, steps, update);
}

/// [`stencil`] under an explicit strategy.
pub fn stencil_with<C, F, const N: usize>(
    strategy: Strategy,
    grid: &mut C,
    steps: Time,
    update: F,
) where
    C: GridStore<N>,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell + Sync,
{
    stencil_with_config(
        &EngineConfig {
            strategy,
            ..EngineConfig::default()
        },
        grid,
        steps,
        update,
    );
}

/// [`stencil`] under an explicit configuration.
pub fn stencil_with_config<C, F, const N: usize>(
    config: &EngineConfig,
    grid: &mut C,
    steps: Time,
    update: F,
) where
    C: GridStore<N>,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell + Sync,
{
    match config.strategy {
        Strategy::SequentialIterative => iterative::run_sequential(grid, steps, &update),
        Strategy::CoarseIterative => iterative::run_coarse(grid, steps, &update),
        Strategy::FineIterative => {
            iterative::run_fine(grid, steps, &update, config.fine_slab_count)
        }
        Strategy::SequentialRecursive => recursive::run(grid, steps, &update, false),
        Strategy::ParallelRecursive => recursive::run(grid, steps, &update, true),
    }
}

/// Handle to a sweep running on a background thread.
///
/// Produced by [`launch`]; await the final grid with
/// [`join`](StencilHandle::join).
pub struct StencilHandle<C> {
    thread: thread::JoinHandle<C>,
}

impl<C> StencilHandle<C> {
    /// True once the sweep has finished (without blocking).
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for completion and take back the grid.
    ///
    /// A panic from the update function resumes on the calling thread.
    pub fn join(self) -> C {
        match self.thread.join() {
            Ok(grid) => grid,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Run a sweep on a background thread, taking ownership of the grid.
///
/// The blocking entry points borrow the grid for the duration of the
/// call; this is the asynchronous alternative for owned grids.
///
/// # Examples
///
/// ```
/// use oblique_core::{DenseGrid, GridStore};
/// use oblique_engine::{launch, EngineConfig};
///
/// let grid = DenseGrid::from_cells([4], vec![1i64, 2, 3, 4]).unwrap();
/// let handle = launch(EngineConfig::default(), grid, 8, |_t, p, v| {
///     v.get_wrapped([p[0] + 1])
/// });
/// let grid = handle.join();
/// assert_eq!(grid.cells(), &[1, 2, 3, 4]);
/// ```
pub fn launch<C, F, const N: usize>(
    config: EngineConfig,
    mut grid: C,
    steps: Time,
    update: F,
) -> StencilHandle<C>
where
    C: GridStore<N> + Send + 'static,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell + Send + Sync + 'static,
{
    StencilHandle {
        thread: thread::spawn(move || {
            stencil_with_config(&config, &mut grid, steps, update);
            grid
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblique_core::DenseGrid;

    #[test]
    fn default_strategy_is_fine_iterative() {
        assert_eq!(Strategy::default(), Strategy::FineIterative);
        assert_eq!(EngineConfig::default().strategy, Strategy::FineIterative);
    }

    #[test]
    fn dispatcher_reaches_every_strategy() {
        for strategy in Strategy::ALL {
            let mut grid = DenseGrid::from_cells([8], (0..8).collect()).unwrap();
            stencil_with(strategy, &mut grid, 3, |_t, p, v| v.get_wrapped([p[0] - 1]));
            let expected: Vec<i64> = (0..8).map(|p| (p + 8 - 3) % 8).collect();
            assert_eq!(grid.cells(), expected.as_slice(), "{strategy:?}");
        }
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn update_panic_reaches_the_caller() {
        let mut grid = DenseGrid::from_cells([4], vec![1i64, 2, 3, 4]).unwrap();
        stencil_with(Strategy::SequentialIterative, &mut grid, 1, |_t, _p, _v| {
            panic!("boom")
        });
    }

    #[test]
    fn launch_returns_the_final_grid() {
        let grid = DenseGrid::from_cells([6], vec![1i64, 0, 0, 0, 0, 0]).unwrap();
        let handle = launch(EngineConfig::default(), grid, 2, |_t, p, v| {
            v.get_wrapped([p[0] - 1])
        });
        let grid = handle.join();
        assert_eq!(grid.cells(), &[0, 0, 1, 0, 0, 0]);
    }
}
