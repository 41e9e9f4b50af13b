//! Core types for the oblique stencil engine.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! index and coordinate primitives, the [`GridStore`] capability trait that
//! containers implement to be swept by the engine, the [`DenseGrid`]
//! reference container, and the read/write plane views through which update
//! functions and schedulers touch cell data.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod coord;
pub mod error;
pub mod grid;
pub mod view;

// Re-export core types at crate root for convenience.
pub use coord::{cell_count, coord_at, linear_rank, wrap_coord, Coord, Index, Size, Time};
pub use error::GridError;
pub use grid::{DenseGrid, GridStore};
pub use view::{PlaneView, RawPlane};
