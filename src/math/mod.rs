//! Mathematical utilities for the renderer

/// Ellipse geometry for region masking
pub mod geometry;
