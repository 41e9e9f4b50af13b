//! Standard update functions for stencil tests.
//!
//! All fixtures address neighbours toroidally via
//! [`PlaneView::get_wrapped`], so they are extent-agnostic.

use oblique_core::{Coord, PlaneView, Time};

/// Every cell keeps its value.
pub fn identity<const N: usize>(_t: Time, p: Coord<N>, v: PlaneView<'_, i64, N>) -> i64 {
    v.get(p)
}

/// The grid contents rotate one cell towards higher indices per step.
pub fn shift_right(_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
    v.get_wrapped([p[0] - 1])
}

/// The grid contents rotate one cell towards lower indices per step.
pub fn shift_left(_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
    v.get_wrapped([p[0] + 1])
}

/// Rule-90 style XOR of the two neighbours.
pub fn xor_rule(_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
    v.get_wrapped([p[0] - 1]) ^ v.get_wrapped([p[0] + 1])
}

/// Truncating average of the two neighbours.
pub fn avg_rule(_t: Time, p: Coord<1>, v: PlaneView<'_, i64, 1>) -> i64 {
    (v.get_wrapped([p[0] - 1]) + v.get_wrapped([p[0] + 1])) / 2
}

/// Truncating average of the four axis neighbours on a 2-D grid.
pub fn four_point_avg(_t: Time, p: Coord<2>, v: PlaneView<'_, i64, 2>) -> i64 {
    (v.get_wrapped([p[0] - 1, p[1]])
        + v.get_wrapped([p[0] + 1, p[1]])
        + v.get_wrapped([p[0], p[1] - 1])
        + v.get_wrapped([p[0], p[1] + 1]))
        / 4
}
