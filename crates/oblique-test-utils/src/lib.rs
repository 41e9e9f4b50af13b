//! Reusable update-function fixtures.
//!
//! Standard stencil updates for engine and integration testing, all
//! integer-valued so results are bit-comparable across schedulers:
//!
//! - [`identity`] — every cell keeps its value.
//! - [`shift_right`] / [`shift_left`] — the grid rotates one cell per step.
//! - [`xor_rule`] — rule-90 style neighbour XOR.
//! - [`avg_rule`] — truncating two-neighbour average.
//! - [`four_point_avg`] — 2-D four-neighbour average.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{avg_rule, four_point_avg, identity, shift_left, shift_right, xor_rule};
