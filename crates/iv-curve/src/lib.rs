//! Vector output for traced strokes.
//!
//! - [`fit_path`] turns an ordered pixel run into a [`VectorPath`], either as
//!   a plain polyline or as piecewise cubics within an error bound
//!   ([`FitMode`]).
//! - [`VectorPath::intersects`] and [`VectorPath::contains`] answer the
//!   geometric queries used by selection and erasing.
//!
//! Geometry is expressed with `kurbo` segments in pixel coordinates.

mod fit;
mod geom;
mod path;

pub use fit::{FitConfig, FitMode, fit_path};
pub use geom::DEFAULT_TOLERANCE;
pub use path::{VectorPath, split_range};
