//! Statistical analysis of pixel sample blocks

/// Mean color and error score computation
pub mod statistics;
