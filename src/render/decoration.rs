//! Post-fill decorations for painted regions
//!
//! Every leaf is first filled with its mean color, then decorated in a
//! fixed order: border first, ellipse mask last so the mask is the
//! outermost visual layer.

use crate::math::geometry::outside_ellipse;
use crate::spatial::Region;
use image::{Rgba, RgbaImage};

/// A single decoration step applied to a filled tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    /// Overwrite the outermost ring of pixels
    Border,
    /// Overwrite pixels on or outside the inscribed ellipse
    EllipseMask,
}

impl Decoration {
    /// Apply this decoration to a tile using the border/background color
    pub fn apply(self, tile: &mut RgbaImage, color: Rgba<u8>) {
        match self {
            Self::Border => paint_border(tile, color),
            Self::EllipseMask => mask_ellipse(tile, color),
        }
    }
}

/// Visual options shared by every painted region
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    /// Draw a one-pixel border around each region
    pub border: bool,
    /// Clip each region to its inscribed ellipse
    pub ellipse: bool,
    /// Border and background color
    pub color: Rgba<u8>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            border: false,
            ellipse: false,
            color: Rgba([0, 0, 0, u8::MAX]),
        }
    }
}

impl RenderStyle {
    /// Enabled decorations in pipeline order
    pub fn decorations(&self) -> impl Iterator<Item = Decoration> {
        [
            (self.border, Decoration::Border),
            (self.ellipse, Decoration::EllipseMask),
        ]
        .into_iter()
        .filter_map(|(enabled, decoration)| enabled.then_some(decoration))
    }

    /// Fill a tile with the region's mean color and run the decoration pipeline
    pub fn paint(&self, region: &Region) -> RgbaImage {
        let mut tile =
            RgbaImage::from_pixel(region.width(), region.height(), Rgba(region.fill_color()));
        for decoration in self.decorations() {
            decoration.apply(&mut tile, self.color);
        }
        tile
    }
}

fn paint_border(tile: &mut RgbaImage, color: Rgba<u8>) {
    let (width, height) = tile.dimensions();
    for (x, y, pixel) in tile.enumerate_pixels_mut() {
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            *pixel = color;
        }
    }
}

// Offsets are measured between pixel centers, so the semi-axes span from
// the middle of the tile to the middle of its outermost pixels
fn mask_ellipse(tile: &mut RgbaImage, color: Rgba<u8>) {
    let (width, height) = tile.dimensions();
    let a = (f64::from(width) - 1.0) / 2.0;
    let b = (f64::from(height) - 1.0) / 2.0;
    for (x, y, pixel) in tile.enumerate_pixels_mut() {
        let dx = f64::from(x) - a;
        let dy = f64::from(y) - b;
        if outside_ellipse(dx, dy, a, b) {
            *pixel = color;
        }
    }
}
