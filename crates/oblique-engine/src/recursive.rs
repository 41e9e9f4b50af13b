//! The recursive space-time strategies.
//!
//! A root zoid task decomposes itself while it runs: preferring a space
//! split along the widest projected axis (three fragments, the wings
//! independent of each other), falling back to a time split (bottom
//! strictly before top), and finally to an inline sequential scan once the
//! zoid is terminal or no split makes progress. The fragment orderings are
//! what guarantee that every cell a fragment reads was written by an
//! already-completed fragment; see [`ExecutionPlan::run_parallel`] for the
//! inter-zoid dependencies.
//!
//! [`ExecutionPlan::run_parallel`]: crate::plan::ExecutionPlan::run_parallel

use oblique_core::{cell_count, Coord, GridStore, PlaneView, Size, Time};
use oblique_zoid::{Base, Zoid};

use crate::buffer::PingPong;
use crate::plan::ExecutionPlan;

/// Recursively execute one zoid, splitting until terminal.
///
/// Wing pairs run under the runtime's fork-join combinator; all other
/// composition is program order. A zoid that can be split neither in
/// space nor in time (height below 2) is scanned inline — `for_each`
/// handles any zoid, it just gives up cache obliviousness below that
/// size.
pub(crate) fn execute_zoid<E, O, const N: usize>(
    zoid: Zoid<N>,
    even: &E,
    odd: &O,
    limits: Size<N>,
) where
    E: Fn(Coord<N>, Time) + Sync,
    O: Fn(Coord<N>, Time) + Sync,
{
    if zoid.is_terminal() {
        zoid.for_each(even, odd, limits);
        return;
    }

    if !zoid.is_space_splittable() {
        if !zoid.can_split_time() {
            zoid.for_each(even, odd, limits);
            return;
        }
        let parts = zoid.split_time();
        execute_zoid(parts.bottom, even, odd, limits);
        execute_zoid(parts.top, even, odd, limits);
        return;
    }

    let parts = zoid.split_space();
    if parts.opening {
        // the centre cone feeds both wings
        execute_zoid(parts.center, even, odd, limits);
        oblique_runtime::join(
            || execute_zoid(parts.left, even, odd, limits),
            || execute_zoid(parts.right, even, odd, limits),
        );
    } else {
        // the wings feed the centre cone
        oblique_runtime::join(
            || execute_zoid(parts.left, even, odd, limits),
            || execute_zoid(parts.right, even, odd, limits),
        );
        execute_zoid(parts.center, even, odd, limits);
    }
}

/// Run a full sweep under the recursive decomposition.
///
/// Builds the execution plan once and drives it either on the calling
/// thread (popcount order) or as a dependency-gated task graph.
pub(crate) fn run<C, F, const N: usize>(grid: &mut C, steps: Time, update: &F, parallel: bool)
where
    C: GridStore<N>,
    F: Fn(Time, Coord<N>, PlaneView<'_, C::Cell, N>) -> C::Cell + Sync,
{
    if steps == 0 || cell_count(&grid.extents()) == 0 {
        return;
    }

    let limits = grid.extents();
    let plan = ExecutionPlan::create(&Base::full(limits), steps);

    let mut bufs = PingPong::new(grid);
    let (primary, shadow) = bufs.planes();

    let even = |pos: Coord<N>, t: Time| {
        let value = update(t, pos, primary.view());
        // SAFETY: the schedule writes each (t, pos) exactly once, and no
        // task reading this cell runs concurrently (subset-lattice and
        // split orderings).
        unsafe { shadow.write(pos, value) };
    };
    let odd = |pos: Coord<N>, t: Time| {
        let value = update(t, pos, shadow.view());
        // SAFETY: as above, with the buffer roles reversed.
        unsafe { primary.write(pos, value) };
    };

    if parallel {
        plan.run_parallel(&even, &odd, limits);
    } else {
        plan.run_sequential(&even, &odd, limits);
    }

    bufs.resolve(steps);
}
