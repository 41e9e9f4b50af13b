//! Space-time trapezoid ("zoid") geometry for the oblique stencil engine.
//!
//! A zoid is an axis-aligned spatial [`Base`] swept through a half-open
//! time interval, its boundaries moving inward or outward at unit slope
//! per step. The recursive decomposition of zoids into smaller zoids is
//! what gives the engine its cache-oblivious schedule; this crate owns the
//! geometry (bases, slopes, splits) and the wrap-around plane scanner,
//! while scheduling lives in the engine crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod base;
pub mod scanner;
pub mod slopes;
pub mod zoid;

pub use base::{AxisRange, Base};
pub use scanner::scan;
pub use slopes::Slopes;
pub use zoid::{SpaceSplit, TimeSplit, Zoid};
