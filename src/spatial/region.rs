//! Quadtree node carrying a rectangular block of pixel samples
//!
//! Statistics are computed once at construction and never change. A region
//! starts life as a leaf and can be demoted to an internal node exactly once
//! by attaching its four children.

use crate::analysis::statistics;
use crate::io::error::{Result, invalid_state};
use ndarray::{Array1, Array3};

/// Handle to a region stored in a [`QuadTree`](crate::spatial::QuadTree) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    /// Position of the region in the arena
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Axis-aligned rectangle of the source image with its derived statistics
#[derive(Debug, Clone)]
pub struct Region {
    origin: [u32; 2],
    width: u32,
    height: u32,
    samples: Array3<u8>,
    mean_color: Array1<f64>,
    error_score: f64,
    children: Option<[RegionId; 4]>,
}

impl Region {
    /// Build a leaf from a `(height, width, channels)` sample block
    ///
    /// `origin` is the `[x, y]` position of the top-left pixel in root
    /// image coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the block holds no pixels or its extent does
    /// not fit image coordinates
    pub fn new(origin: [u32; 2], samples: Array3<u8>) -> Result<Self> {
        let (rows, cols, _) = samples.dim();
        let (mean_color, error_score) = statistics::analyze(samples.view()).ok_or_else(|| {
            invalid_state("region construction", &"sample block holds no pixels")
        })?;

        let width = u32::try_from(cols)
            .map_err(|e| invalid_state("region construction", &format!("width: {e}")))?;
        let height = u32::try_from(rows)
            .map_err(|e| invalid_state("region construction", &format!("height: {e}")))?;

        Ok(Self {
            origin,
            width,
            height,
            samples,
            mean_color,
            error_score,
            children: None,
        })
    }

    /// Top-left `[x, y]` pixel coordinate
    pub const fn origin(&self) -> [u32; 2] {
        self.origin
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of sampled pixels, always `width * height`
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Channels tracked per sample (3 or 4)
    pub fn channels(&self) -> usize {
        self.samples.dim().2
    }

    /// Pixel samples in `(row, column, channel)` order
    pub const fn samples(&self) -> &Array3<u8> {
        &self.samples
    }

    /// Per-channel mean over all samples
    pub const fn mean_color(&self) -> &Array1<f64> {
        &self.mean_color
    }

    /// Unnormalized squared RGB deviation from the mean
    pub const fn error_score(&self) -> f64 {
        self.error_score
    }

    /// Child handles in top-left, top-right, bottom-left, bottom-right order
    pub const fn children(&self) -> Option<[RegionId; 4]> {
        self.children
    }

    /// True while the region has not been split
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether the region is at least two pixels in both directions
    pub const fn is_splittable(&self) -> bool {
        self.width > 1 && self.height > 1
    }

    /// Mean color truncated to 8-bit RGBA
    ///
    /// Alpha is the mean alpha when tracked and opaque otherwise.
    pub fn fill_color(&self) -> [u8; 4] {
        let mut rgba = [0, 0, 0, u8::MAX];
        for (slot, &mean) in rgba.iter_mut().zip(self.mean_color.iter()) {
            *slot = num_traits::cast::<f64, u8>(mean.trunc()).unwrap_or(u8::MAX);
        }
        rgba
    }

    /// Demote this leaf to an internal node
    ///
    /// # Errors
    ///
    /// Returns an error if children are already attached
    pub fn attach_children(&mut self, children: [RegionId; 4]) -> Result<()> {
        if self.children.is_some() {
            return Err(invalid_state(
                "attach children",
                &format!(
                    "region at {:?} ({}x{}) already has children",
                    self.origin, self.width, self.height
                ),
            ));
        }
        self.children = Some(children);
        Ok(())
    }
}
