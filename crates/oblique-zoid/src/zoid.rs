//! The space-time trapezoid and its split operations.

use std::fmt;

use oblique_core::{Coord, Index, Size, Time};

use crate::base::{AxisRange, Base};
use crate::scanner::scan;
use crate::slopes::Slopes;

/// A space-time trapezoid: a spatial [`Base`] swept through the time
/// interval `[t_begin, t_end)` with boundaries moving at unit slope.
///
/// At relative time `τ` the region on axis `i` is
/// `[begin_i + s_i·τ, end_i − s_i·τ)`: an opening axis (slope −1) widens
/// with time, a closing axis (slope +1) narrows. Zoids are plain values;
/// splitting produces new zoids covering the same space-time cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zoid<const N: usize> {
    base: Base<N>,
    slopes: Slopes<N>,
    t_begin: Time,
    t_end: Time,
}

/// Result of a time split: `bottom` covers the earlier half.
#[derive(Clone, Copy, Debug)]
pub struct TimeSplit<const N: usize> {
    /// The earlier sub-interval, on the original base.
    pub bottom: Zoid<N>,
    /// The later sub-interval, on the contracted base.
    pub top: Zoid<N>,
}

/// Result of a space split along one axis into three fragments.
///
/// The centre fragment has the split axis's slope reversed. When the split
/// axis was opening, the centre is the dependency cone of the wings and
/// must execute first; when closing, the wings feed the centre and execute
/// first.
#[derive(Clone, Copy, Debug)]
pub struct SpaceSplit<const N: usize> {
    /// Fragment below the split window.
    pub left: Zoid<N>,
    /// Fragment covering the split window, slope reversed.
    pub center: Zoid<N>,
    /// Fragment above the split window.
    pub right: Zoid<N>,
    /// True if the split axis was opening (slope −1).
    pub opening: bool,
}

impl<const N: usize> Zoid<N> {
    /// A zoid from its base, slopes, and time interval.
    pub fn new(base: Base<N>, slopes: Slopes<N>, t_begin: Time, t_end: Time) -> Self {
        debug_assert!(t_begin <= t_end);
        Self {
            base,
            slopes,
            t_begin,
            t_end,
        }
    }

    /// The spatial base at `t_begin`.
    pub fn base(&self) -> &Base<N> {
        &self.base
    }

    /// Per-axis slope directions.
    pub fn slopes(&self) -> &Slopes<N> {
        &self.slopes
    }

    /// First covered time step.
    pub fn t_begin(&self) -> Time {
        self.t_begin
    }

    /// One past the last covered time step.
    pub fn t_end(&self) -> Time {
        self.t_end
    }

    /// Temporal height; a height of 0 covers no time steps.
    pub fn height(&self) -> Time {
        self.t_end - self.t_begin
    }

    /// Width of the zoid's shadow on one axis: the base width, plus the
    /// overhang an opening boundary gains over the full height.
    pub fn projected_width(&self, axis: usize) -> Index {
        let width = self.base.width(axis);
        if self.slopes.is_opening(axis) {
            width + 2 * self.height() as Index
        } else {
            width
        }
    }

    /// Number of cells in the zoid's spatial shadow.
    ///
    /// Advisory cost measure; scheduling decisions use the split
    /// predicates below instead.
    pub fn footprint(&self) -> usize {
        let mut size: usize = 1;
        for axis in 0..N {
            size *= self.projected_width(axis).max(0) as usize;
        }
        size
    }

    /// True if the zoid is too small to be split further.
    pub fn is_terminal(&self) -> bool {
        self.height() <= 1 && self.base.max_width() < 3
    }

    /// True if some axis can be split in space.
    pub fn is_space_splittable(&self) -> bool {
        (0..N).any(|axis| self.is_splittable(axis))
    }

    /// True if the given axis can be split in space: its projected width
    /// must clear four times the height so all three fragments stay
    /// well-formed.
    pub fn is_splittable(&self, axis: usize) -> bool {
        self.projected_width(axis) > 4 * self.height() as Index
    }

    /// True if a time split makes progress (both halves non-empty).
    pub fn can_split_time(&self) -> bool {
        self.height() >= 2
    }

    /// Split the time interval in half.
    ///
    /// The bottom keeps the original base; the top starts from the base
    /// contracted over the bottom's height. The bottom must execute before
    /// the top.
    pub fn split_time(&self) -> TimeSplit<N> {
        debug_assert!(self.can_split_time());
        let split = self.height() / 2;
        let mid = self.base.contract(&self.slopes, split as Index);
        TimeSplit {
            bottom: Zoid::new(self.base, self.slopes, self.t_begin, self.t_begin + split),
            top: Zoid::new(mid, self.slopes, self.t_begin + split, self.t_end),
        }
    }

    /// Split in space along the axis of largest projected width.
    ///
    /// The split window around the midpoint spans `2·height` cells for an
    /// opening axis and is empty for a closing axis; the centre fragment
    /// covers the window with the split axis's slope reversed.
    pub fn split_space(&self) -> SpaceSplit<N> {
        debug_assert!(self.is_space_splittable());

        let mut split_axis = 0;
        let mut max_width = 0;
        for axis in 0..N {
            let width = self.projected_width(axis);
            if width > max_width {
                max_width = width;
                split_axis = axis;
            }
        }
        debug_assert!(self.is_splittable(split_axis));

        let opening = self.slopes.is_opening(split_axis);
        let center = (self.base[split_axis].begin + self.base[split_axis].end) / 2;
        let (left, right) = if opening {
            let height = self.height() as Index;
            (center - height, center + height)
        } else {
            (center, center)
        };

        let mut l = *self;
        let mut c = *self;
        let mut r = *self;
        l.base[split_axis].end = left;
        c.base[split_axis] = AxisRange {
            begin: left,
            end: right,
        };
        r.base[split_axis].begin = right;
        c.slopes = self.slopes.flip(split_axis);

        SpaceSplit {
            left: l,
            center: c,
            right: r,
            opening,
        }
    }

    /// Sequentially visit every `(cell, t)` of the zoid.
    ///
    /// For each time step, `even` is invoked on the current region when
    /// `t` is even and `odd` when it is odd, then the region advances by
    /// the slopes. Axis ranges are interpreted modulo `limits`
    /// (wrap-around, see [`scan`]). A zero-height zoid is a no-op.
    pub fn for_each<E, O>(&self, even: &E, odd: &O, limits: Size<N>)
    where
        E: Fn(Coord<N>, Time),
        O: Fn(Coord<N>, Time),
    {
        let mut plane = self.base;
        for t in self.t_begin..self.t_end {
            if t & 1 == 1 {
                scan(&plane, limits, t, odd);
            } else {
                scan(&plane, limits, t, even);
            }
            plane = plane.contract(&self.slopes, 1);
        }
    }
}

impl<const N: usize> fmt::Display for Zoid<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoid({},{},{}-{})",
            self.base, self.slopes, self.t_begin, self.t_end
        )
    }
}
