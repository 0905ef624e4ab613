//! Reconstruction of the quadtree into a pixel buffer
//!
//! [`render_tree`] repaints every leaf from scratch. [`Canvas`] keeps a
//! buffer alive across steps and repaints only the four children produced
//! by each split, which gives the same pixels because children exactly
//! tile the parent they replace.

use crate::algorithm::executor::SplitRecord;
use crate::io::error::Result;
use crate::render::decoration::RenderStyle;
use crate::spatial::{QuadTree, RegionId};
use image::RgbaImage;
use image::imageops::replace;

/// Paint every current leaf of the tree into a fresh buffer
///
/// Traversal starts at the root and accumulates child offsets, so the
/// buffer is in root-relative coordinates.
///
/// # Errors
///
/// Returns an error if a child handle is dangling
pub fn render_tree(tree: &QuadTree, style: &RenderStyle) -> Result<RgbaImage> {
    let root = tree.root_region()?;
    let mut canvas = RgbaImage::new(root.width(), root.height());
    paint_subtree(&mut canvas, tree, tree.root(), [0, 0], style)?;
    Ok(canvas)
}

fn paint_subtree(
    canvas: &mut RgbaImage,
    tree: &QuadTree,
    id: RegionId,
    offset: [u32; 2],
    style: &RenderStyle,
) -> Result<()> {
    let region = tree.region(id)?;
    let [x, y] = offset;

    match region.children() {
        None => {
            let tile = style.paint(region);
            replace(canvas, &tile, i64::from(x), i64::from(y));
        }
        Some([c1, c2, c3, c4]) => {
            let half_width = region.width() / 2;
            let half_height = region.height() / 2;
            paint_subtree(canvas, tree, c1, [x, y], style)?;
            paint_subtree(canvas, tree, c2, [x + half_width, y], style)?;
            paint_subtree(canvas, tree, c3, [x, y + half_height], style)?;
            paint_subtree(canvas, tree, c4, [x + half_width, y + half_height], style)?;
        }
    }

    Ok(())
}

/// Incrementally updated rendering of a refinement run
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    style: RenderStyle,
    root_origin: [u32; 2],
}

impl Canvas {
    /// Render the tree in full as the starting buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the tree has dangling handles
    pub fn new(tree: &QuadTree, style: RenderStyle) -> Result<Self> {
        let root_origin = tree.root_region()?.origin();
        let image = render_tree(tree, &style)?;
        Ok(Self {
            image,
            style,
            root_origin,
        })
    }

    /// Paint the four children of a split over their parent's footprint
    ///
    /// # Errors
    ///
    /// Returns an error if a child handle is dangling
    pub fn apply_split(&mut self, tree: &QuadTree, record: &SplitRecord) -> Result<()> {
        let [root_x, root_y] = self.root_origin;
        for child in record.children {
            let region = tree.region(child)?;
            let [x, y] = region.origin();
            let tile = self.style.paint(region);
            replace(
                &mut self.image,
                &tile,
                i64::from(x) - i64::from(root_x),
                i64::from(y) - i64::from(root_y),
            );
        }
        Ok(())
    }

    /// Current buffer
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Style applied to every painted region
    pub const fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Consume the canvas, keeping the buffer
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
