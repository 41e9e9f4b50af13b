//! Oblique: a parallel stencil execution engine.
//!
//! Given an N-dimensional grid, a step count, and a pure per-cell update
//! function, oblique computes the grid state after the requested number of
//! sweeps. Five execution strategies produce bit-identical results under
//! different scheduling disciplines; the centrepiece is a cache-oblivious
//! recursive decomposition of the space-time volume into trapezoids whose
//! dependency structure admits deep parallelism without locks.
//!
//! This is the top-level facade crate re-exporting the public API of the
//! oblique sub-crates. For most users, adding `oblique` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use oblique::prelude::*;
//!
//! // A 16-cell ring initialised with a ramp.
//! let mut grid = DenseGrid::<i64, 1>::from_fn([16], |p| p[0]).unwrap();
//!
//! // Four sweeps of a truncating neighbour average, toroidal addressing.
//! stencil(&mut grid, 4, |_t, p, v| {
//!     (v.get_wrapped([p[0] - 1]) + v.get_wrapped([p[0] + 1])) / 2
//! });
//!
//! // The same sweep under the recursive scheduler gives the same cells.
//! let mut again = DenseGrid::<i64, 1>::from_fn([16], |p| p[0]).unwrap();
//! stencil_with(Strategy::ParallelRecursive, &mut again, 4, |_t, p, v| {
//!     (v.get_wrapped([p[0] - 1]) + v.get_wrapped([p[0] + 1])) / 2
//! });
//! assert_eq!(grid.cells(), again.cells());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `oblique-core` | coordinates, grid storage, plane views, errors |
//! | [`zoid`] | `oblique-zoid` | space-time trapezoid geometry and scanning |
//! | [`runtime`] | `oblique-runtime` | task graph and fork-join primitives |
//! | [`engine`] | `oblique-engine` | execution plans, strategies, dispatcher |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinates, grid storage, plane views, and errors (`oblique-core`).
pub use oblique_core as types;

/// Space-time trapezoid geometry and wrap-around scanning (`oblique-zoid`).
///
/// Provides [`zoid::Base`], [`zoid::Slopes`], and [`zoid::Zoid`] with its
/// split operations — the geometric substrate of the recursive scheduler.
pub use oblique_zoid as zoid;

/// Task-runtime primitives (`oblique-runtime`).
///
/// The dependency-gated [`runtime::TaskGraph`] and the fork-join
/// [`runtime::join`] combinator consumed by the parallel strategies.
pub use oblique_runtime as runtime;

/// Execution plans, strategies, and the entry dispatcher
/// (`oblique-engine`).
///
/// [`engine::stencil`] is the main entry point; see
/// [`engine::Strategy`] for the five scheduling disciplines and
/// [`engine::ExecutionPlan`] for the layered trapezoid schedule.
pub use oblique_engine as engine;

/// Common imports for typical oblique usage.
///
/// ```rust
/// use oblique::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use oblique_core::{Coord, DenseGrid, GridError, GridStore, Index, PlaneView, Size, Time};

    // Engine entry points
    pub use oblique_engine::{
        launch, stencil, stencil_with, stencil_with_config, EngineConfig, StencilHandle, Strategy,
    };
}
