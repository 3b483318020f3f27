//! Skeleton tracing.
//!
//! [`trace_skeleton`] turns a one-pixel-wide skeleton (as produced by
//! `iv_morph::skeletonize`) into ordered [`StrokePath`]s. Paths are split at
//! branch pixels, so every path is a simple run between tips, branches or
//! the two ends of a cut loop.

mod path;
mod trace;

pub use path::StrokePath;
pub use trace::trace_skeleton;
