//! Greedy quadtree approximation of raster images
//!
//! The worst-approximated region of the image is split into four quadrants
//! at every step, each painted with its mean color. Regions are ranked by
//! an unnormalized squared-error score, so large noisy areas are refined first.

#![forbid(unsafe_code)]

/// Refinement driver and the priority queue it owns
pub mod algorithm;
/// Mean color and error statistics over pixel samples
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Ellipse geometry for decorations
pub mod math;
/// Painting the tree back into pixels
pub mod render;
/// Region model, quadrant splitting and the quadtree arena
pub mod spatial;

pub use io::error::{QuadsError, Result};
