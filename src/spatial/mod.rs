//! Quadtree data structures
//!
//! This module contains the region model and its tree:
//! - Region nodes with eagerly computed statistics
//! - Arena storage addressed by stable handles
//! - The four-way quadrant split

/// Region nodes and their handles
pub mod region;
/// Four-way region partitioning
pub mod split;
/// Arena-backed quadtree
pub mod tree;

pub use region::{Region, RegionId};
pub use tree::QuadTree;
