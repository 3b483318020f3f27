//! Umbrella crate for the `ink-vectorize` workspace.
//!
//! Re-exports the pipeline stages so callers can depend on one crate:
//! pixel sets and images (`iv-core`), grouping and thinning (`iv-morph`),
//! tracing (`iv-trace`), curve fitting (`iv-curve`) and the end-to-end
//! conversion (`iv-convert`).

pub use iv_convert::*;
pub use iv_core::*;
pub use iv_curve::*;
pub use iv_morph::*;
pub use iv_trace::*;
