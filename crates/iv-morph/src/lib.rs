//! Binary morphology over sparse pixel sets.
//!
//! - [`group_components`] splits a stroke mask into 4-connected groups.
//! - [`skeletonize`] thins one group to a one-pixel-wide skeleton by removing
//!   boundary pixels whose 3x3 neighborhood matches none of the `keep`
//!   patterns in [`PatternLibrary`].
//!
//! Skeletons are meant to be read with 8-connectivity: a 4-connected group
//! thins to exactly one 8-connected skeleton.

mod components;
mod pattern;
mod skeleton;

pub use components::{count_components, group_components, group_components_with};
pub use pattern::{Cell, Neighborhood, Pattern, PatternLibrary};
pub use skeleton::skeletonize;
