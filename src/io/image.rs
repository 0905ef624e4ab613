//! Image ingestion, power-of-two cropping and PNG export

use crate::algorithm::executor::ChannelLayout;
use crate::io::error::{QuadsError, Result, invalid_image};
use crate::spatial::Region;
use image::RgbaImage;
use image::imageops::crop_imm;
use ndarray::{Array3, Axis, Slice};
use std::path::Path;

/// Decode an image file and convert it to 8-bit RGBA
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| QuadsError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Largest power of two not exceeding `n`, or zero for zero
pub const fn largest_power_of_two(n: u32) -> u32 {
    if n == 0 { 0 } else { 1 << (u32::BITS - 1 - n.leading_zeros()) }
}

/// Centered square crop whose side is a power of two
///
/// The side is the largest power of two that fits the shorter dimension,
/// so every region of the resulting tree splits evenly down to one pixel.
pub fn crop_to_power_of_two_square(img: &RgbaImage) -> RgbaImage {
    let (width, height) = img.dimensions();
    let side = largest_power_of_two(width.min(height));
    let x = (width - side) / 2;
    let y = (height - side) / 2;
    crop_imm(img, x, y, side, side).to_image()
}

/// Convert an RGBA buffer into a `(height, width, channels)` sample block
///
/// Alpha is dropped under [`ChannelLayout::Rgb`].
///
/// # Errors
///
/// Returns an error if the image has no pixels
pub fn samples_from_image(img: &RgbaImage, layout: ChannelLayout) -> Result<Array3<u8>> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(invalid_image(&format!(
            "image is {width}x{height}, at least one pixel is required"
        )));
    }

    let rgba = Array3::from_shape_vec((height as usize, width as usize, 4), img.as_raw().clone())
        .map_err(|e| invalid_image(&format!("pixel buffer does not match dimensions: {e}")))?;

    Ok(match layout {
        ChannelLayout::Rgba => rgba,
        ChannelLayout::Rgb => rgba.slice_axis(Axis(2), Slice::from(..3)).to_owned(),
    })
}

/// Build the root region covering the whole (already cropped) image
///
/// # Errors
///
/// Returns an error if the image has no pixels
pub fn root_region(img: &RgbaImage, layout: ChannelLayout) -> Result<Region> {
    Region::new([0, 0], samples_from_image(img, layout)?)
}

/// Save a rendered buffer as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| QuadsError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| QuadsError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
