//! Shared fixtures for the oblique benchmarks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use oblique_core::{Coord, DenseGrid, PlaneView, Time};

/// A 2-D grid with a deterministic non-uniform fill.
pub fn seeded_grid_2d(rows: i64, cols: i64) -> DenseGrid<i64, 2> {
    DenseGrid::from_fn([rows, cols], |p| (p[0] * 31 + p[1] * 17) % 101)
        .expect("valid benchmark extents")
}

/// Integer diffusion kernel: truncating five-point average.
pub fn diffusion_kernel(_t: Time, p: Coord<2>, v: PlaneView<'_, i64, 2>) -> i64 {
    (v.get(p)
        + v.get_wrapped([p[0] - 1, p[1]])
        + v.get_wrapped([p[0] + 1, p[1]])
        + v.get_wrapped([p[0], p[1] - 1])
        + v.get_wrapped([p[0], p[1] + 1]))
        / 5
}
