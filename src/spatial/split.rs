//! Four-way partition of a region into equal quadrants

use crate::io::error::{Result, invalid_state};
use crate::spatial::region::Region;
use ndarray::{Array3, Axis, Slice};

/// Partition a region into top-left, top-right, bottom-left and bottom-right children
///
/// Rows in the first half of the height go to the top pair and columns in
/// the first half of the width go to the left pair. Each child is built
/// through [`Region::new`] so its statistics come from its own quarter only.
///
/// # Errors
///
/// Returns an error if the region is a single pixel wide or tall
pub fn split(region: &Region) -> Result<[Region; 4]> {
    if !region.is_splittable() {
        return Err(invalid_state(
            "split",
            &format!(
                "region at {:?} is {}x{}, both sides must exceed one pixel",
                region.origin(),
                region.width(),
                region.height()
            ),
        ));
    }

    let half_width = region.width() / 2;
    let half_height = region.height() / 2;
    let [x, y] = region.origin();
    let col_mid = half_width as usize;
    let row_mid = half_height as usize;
    let samples = region.samples();
    let top = Slice::from(..row_mid);
    let bottom = Slice::from(row_mid..);
    let left = Slice::from(..col_mid);
    let right = Slice::from(col_mid..);

    Ok([
        Region::new([x, y], quadrant(samples, top, left))?,
        Region::new([x + half_width, y], quadrant(samples, top, right))?,
        Region::new([x, y + half_height], quadrant(samples, bottom, left))?,
        Region::new(
            [x + half_width, y + half_height],
            quadrant(samples, bottom, right),
        )?,
    ])
}

fn quadrant(samples: &Array3<u8>, rows: Slice, cols: Slice) -> Array3<u8> {
    samples
        .view()
        .slice_axis_move(Axis(0), rows)
        .slice_axis_move(Axis(1), cols)
        .to_owned()
}
