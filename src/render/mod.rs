//! Rendering of the quadtree back into pixels

/// Full and incremental buffer painting
pub mod canvas;
/// Border and ellipse decorations
pub mod decoration;

pub use canvas::{Canvas, render_tree};
pub use decoration::{Decoration, RenderStyle};
