//! Plane scanning with per-axis toroidal wrap-around.
//!
//! A zoid's base at a given time step may extend past a grid extent; the
//! scanner interprets each axis range modulo the extent, visiting the
//! in-bounds prefix first and the wrapped remainder second. Ranges never
//! span more than one full period: layer heights are bounded by half the
//! smallest extent, so an opening boundary overhangs by at most half a
//! grid.

use oblique_core::{Coord, Size, Time};

use crate::base::Base;

/// Visit every cell of `base` at time `t`, wrapping each axis against
/// `limits`.
///
/// Axes are scanned outermost first, matching row-major storage order.
/// Empty or inverted ranges yield no visits. Each covered cell is visited
/// exactly once.
pub fn scan<L, const N: usize>(base: &Base<N>, limits: Size<N>, t: Time, lambda: &L)
where
    L: Fn(Coord<N>, Time),
{
    let mut pos = [0; N];
    scan_axis(base, limits, t, &mut pos, 0, lambda);
}

fn scan_axis<L, const N: usize>(
    base: &Base<N>,
    limits: Size<N>,
    t: Time,
    pos: &mut Coord<N>,
    axis: usize,
    lambda: &L,
) where
    L: Fn(Coord<N>, Time),
{
    if axis == N {
        lambda(*pos, t);
        return;
    }

    let mut from = base[axis].begin;
    let mut to = base[axis].end;
    let length = limits[axis];

    // shift the range back into the extent window
    if from > length {
        from -= length;
        to -= length;
    }
    debug_assert!(from >= 0, "axis {axis} range starts below zero");

    // the part of the range inside the extent
    let limit = to.min(length);
    for p in from..limit {
        pos[axis] = p;
        scan_axis(base, limits, t, pos, axis + 1, lambda);
    }

    // and the remainder beyond the seam, after wrap-around
    if to <= length {
        return;
    }
    for p in 0..(to - length) {
        pos[axis] = p;
        scan_axis(base, limits, t, pos, axis + 1, lambda);
    }
}
