//! Subset-lattice enumeration for the top-level task graph.
//!
//! Within one time layer the `2^N` root zoids are indexed by an N-bit
//! mask, and zoid `m` may only run after every zoid whose mask is an
//! immediate subset of `m`. The masks and edges of that hyper-cube are
//! enumerated here for both plan drivers.

use smallvec::SmallVec;

/// All masks `0..2^dims` ordered by ascending popcount.
///
/// Within a popcount class the masks are mutually independent, so their
/// relative order is arbitrary (ascending here, for determinism).
pub fn popcount_ascending(dims: u32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..(1usize << dims)).collect();
    order.sort_by_key(|mask| mask.count_ones());
    order
}

/// The immediate subsets of a mask: `mask` with one set bit cleared.
///
/// These are exactly the predecessors of task `mask` in a layer's
/// dependency graph. The empty mask has none.
pub fn immediate_subsets(mask: usize) -> SmallVec<[usize; 8]> {
    let mut subsets = SmallVec::new();
    let mut bits = mask;
    while bits != 0 {
        let bit = bits & bits.wrapping_neg();
        subsets.push(mask & !bit);
        bits &= !bit;
    }
    subsets
}

/// The mask of the final task of a layer (all bits set).
pub fn sink_mask(dims: u32) -> usize {
    (1 << dims) - 1
}
