//! Foundational types for stroke vectorization.
//!
//! ## Points and Pixel Sets
//! Pixels are addressed by integer [`Point`]s and grouped in sparse
//! [`PixelSet`]s. A point never implies a buffer index: stroke masks,
//! connected components and skeletons are all plain coordinate sets, and a
//! point outside any image is simply "absent".
//!
//! ## Neighborhoods
//! Neighbor directions follow a fixed ring order (E, NE, N, NW, W, SW, S, SE)
//! with `y` growing downwards. [`Connectivity::C4`] uses the axis-aligned
//! subset, [`Connectivity::C8`] all eight.
//!
//! ## Images and Colors
//! [`Image`]/[`ImageView`] hold source pixels (element stride, not byte
//! stride). Colors are looked up through [`ColorLookup`], which tolerates
//! missing pixels, and can be snapped to a small [`SemanticColor`] palette.

mod color;
mod error;
mod image;
mod pixel_set;
mod point;

pub use color::{Color, ColorLookup, SemanticColor};
pub use error::Error;
pub use image::{Image, ImageView, Rgb8};
pub use pixel_set::PixelSet;
pub use point::{Connectivity, DIRS_C4, DIRS_C8, DX, DY, Point};
