//! Stroke mask to colored vector paths.
//!
//! [`convert_to_paths`] runs the whole pipeline on a boolean stroke mask:
//! component grouping, thinning and tracing per component, then fitting and
//! color sampling per traced path. Both stages run on a bounded pool of
//! scoped worker threads ([`ConvertConfig::workers`]).
//!
//! Deciding which pixels are strokes is left to a [`StrokeClassifier`];
//! [`LumaThresholdClassifier`] is a plain CPU implementation.
//! [`Vectorizer`] bundles a classifier with a [`ConvertConfig`].

mod classify;
mod convert;
mod pool;
mod sample;

pub use classify::{LumaThresholdClassifier, StrokeClassifier, luma};
pub use convert::{ConvertConfig, VectorStroke, Vectorizer, convert_to_paths};
pub use pool::resolve_workers;
pub use sample::{DEFAULT_COLOR_SAMPLES, sample_color};
