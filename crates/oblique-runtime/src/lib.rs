//! Task-runtime primitives consumed by the oblique stencil engine.
//!
//! The engine needs exactly three things from a runtime: a fork-join
//! combinator for the recursive zoid decomposition ([`join`]), a
//! dependency-gated task graph for the top-level schedule and the
//! neighbourhood-synchronised sweeps ([`TaskGraph`]), and a measure of
//! available parallelism for sizing work partitions
//! ([`available_parallelism`]). All three are backed by the `rayon` pool;
//! this crate is the seam that would be replaced to target a different
//! runtime.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod graph;

pub use graph::{TaskGraph, TaskId};

/// Run two closures, potentially in parallel, returning both results.
///
/// Both closures have completed when this returns, which is what the
/// engine's ordering arguments rely on. Under `rayon`'s work-first
/// scheduling the second closure runs inline unless another worker steals
/// it, so saturated pools degrade gracefully to sequential execution.
pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(oper_a, oper_b)
}

/// Number of worker threads in the underlying pool.
pub fn available_parallelism() -> usize {
    rayon::current_num_threads()
}
