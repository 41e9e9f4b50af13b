//! Execution strategies for the oblique stencil engine.
//!
//! Five strategies compute the identical result — the grid state after `T`
//! sweeps of a per-cell update function — under different scheduling
//! disciplines:
//!
//! | Strategy | Discipline |
//! |----------|-----------|
//! | [`Strategy::SequentialIterative`] | one thread, full sweep per step |
//! | [`Strategy::CoarseIterative`] | parallel sweep, barrier between steps |
//! | [`Strategy::FineIterative`] | parallel sweep, neighbourhood-synchronised slabs |
//! | [`Strategy::SequentialRecursive`] | space-time trapezoid decomposition, one thread |
//! | [`Strategy::ParallelRecursive`] | space-time trapezoid decomposition on the task graph |
//!
//! The recursive strategies build an [`ExecutionPlan`] — per time layer, a
//! hyper-cube of `2^N` trapezoids whose subset lattice encodes the data
//! dependencies — and execute it either in popcount order (sequential) or
//! as a dependency-gated task graph (parallel). The update function must
//! read only within one cell per axis of its position (the unit slope
//! bound); neighbourhood addressing is toroidal.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compliance;
pub mod lattice;
pub mod plan;
pub mod stencil;

mod buffer;
mod iterative;
mod recursive;

pub use plan::ExecutionPlan;
pub use stencil::{launch, stencil, stencil_with, stencil_with_config};
pub use stencil::{EngineConfig, StencilHandle, Strategy};
