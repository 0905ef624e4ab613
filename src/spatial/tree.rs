//! Arena-backed quadtree of regions
//!
//! Regions are stored in insertion order and addressed by [`RegionId`].
//! Handles stay valid for the lifetime of the tree because regions are
//! never removed, only appended.

use crate::io::error::{Result, invalid_state};
use crate::spatial::region::{Region, RegionId};
use crate::spatial::split::split;
use bitvec::prelude::*;

/// Quadtree owning every region created during a refinement run
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Region>,
}

impl QuadTree {
    /// Start a tree from the region covering the whole image
    pub fn from_root(root: Region) -> Self {
        Self { nodes: vec![root] }
    }

    /// Handle of the root region
    pub const fn root(&self) -> RegionId {
        RegionId(0)
    }

    /// Look up a region by handle
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.nodes.get(id.0)
    }

    /// Total number of regions, internal nodes included
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root region, which spans the whole image
    ///
    /// # Errors
    ///
    /// Returns an error if the arena is empty
    pub fn root_region(&self) -> Result<&Region> {
        self.region(self.root())
    }

    /// Look up a region, treating a dangling handle as a state error
    ///
    /// # Errors
    ///
    /// Returns an error if the handle does not belong to this tree
    pub fn region(&self, id: RegionId) -> Result<&Region> {
        self.nodes.get(id.0).ok_or_else(|| {
            invalid_state(
                "region lookup",
                &format!("handle {} outside arena of {}", id.0, self.nodes.len()),
            )
        })
    }

    fn insert(&mut self, region: Region) -> RegionId {
        let id = RegionId(self.nodes.len());
        self.nodes.push(region);
        id
    }

    /// Split a leaf into four children and attach them
    ///
    /// Children are appended to the arena in top-left, top-right,
    /// bottom-left, bottom-right order.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is dangling, the region already has
    /// children, or the region is too small to split
    pub fn split(&mut self, id: RegionId) -> Result<[RegionId; 4]> {
        let parent = self.region(id)?;
        if !parent.is_leaf() {
            return Err(invalid_state(
                "split",
                &format!("region {} already has children", id.0),
            ));
        }

        let [c1, c2, c3, c4] = split(parent)?;
        let children = [
            self.insert(c1),
            self.insert(c2),
            self.insert(c3),
            self.insert(c4),
        ];

        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| invalid_state("split", &"parent vanished from arena"))?
            .attach_children(children)?;

        Ok(children)
    }

    /// Handles of all current leaves in depth-first child order
    pub fn leaves(&self) -> Vec<RegionId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            let Some(region) = self.get(id) else {
                continue;
            };
            match region.children() {
                Some([c1, c2, c3, c4]) => stack.extend([c4, c3, c2, c1]),
                None => leaves.push(id),
            }
        }

        leaves
    }

    /// Number of regions currently rendered as flat rectangles
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|region| region.is_leaf()).count()
    }

    /// Depth of the deepest leaf, with the root at depth zero
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root(), 0)];

        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some(children) = self.get(id).and_then(Region::children) {
                stack.extend(children.into_iter().map(|child| (child, depth + 1)));
            }
        }

        deepest
    }

    /// Check that the leaves cover every root pixel exactly once
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pixel that is covered twice,
    /// falls outside the root, or is never covered
    pub fn verify_tiling(&self) -> Result<()> {
        let root = self.root_region()?;
        let [root_x, root_y] = root.origin();
        let width = root.width() as usize;
        let height = root.height() as usize;
        let mut covered = bitvec![0; width * height];

        for id in self.leaves() {
            let leaf = self.region(id)?;
            let [x, y] = leaf.origin();
            for row in 0..leaf.height() {
                for col in 0..leaf.width() {
                    let px = (x + col).checked_sub(root_x);
                    let py = (y + row).checked_sub(root_y);
                    let index = match (px, py) {
                        (Some(px), Some(py)) if (px as usize) < width && (py as usize) < height => {
                            py as usize * width + px as usize
                        }
                        _ => {
                            return Err(invalid_state(
                                "verify tiling",
                                &format!("leaf {} covers ({}, {}) outside the root", id.0, x + col, y + row),
                            ));
                        }
                    };
                    let Some(mut bit) = covered.get_mut(index) else {
                        continue;
                    };
                    if *bit {
                        return Err(invalid_state(
                            "verify tiling",
                            &format!("pixel ({}, {}) covered twice", x + col, y + row),
                        ));
                    }
                    bit.set(true);
                }
            }
        }

        match covered.first_zero() {
            Some(index) => Err(invalid_state(
                "verify tiling",
                &format!(
                    "pixel ({}, {}) is not covered by any leaf",
                    root_x as usize + index % width,
                    root_y as usize + index / width
                ),
            )),
            None => Ok(()),
        }
    }
}
