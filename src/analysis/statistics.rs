//! Mean color and approximation error over a block of pixel samples
//!
//! Samples are stored as `(height, width, channels)` arrays in row-major
//! order. The error score scales with area: it is the plain
//! sum of squared deviations, never divided by the pixel count, so large
//! noisy regions are refined before small equally noisy ones.

use ndarray::{Array1, ArrayView3, Axis};

/// Number of leading channels that contribute to the error score
pub const SCORED_CHANNELS: usize = 3;

/// Per-channel arithmetic mean over all pixels in the block
///
/// Returns `None` when the block holds no pixels.
pub fn mean_color(samples: ArrayView3<'_, u8>) -> Option<Array1<f64>> {
    let (height, width, channels) = samples.dim();
    let pixel_count = height * width;
    if pixel_count == 0 {
        return None;
    }

    // Integer sums are exact; a 2^16 square of 255s fits easily in u64
    let mut sums = vec![0u64; channels];
    for pixel in samples.lanes(Axis(2)) {
        for (sum, &value) in sums.iter_mut().zip(pixel.iter()) {
            *sum += u64::from(value);
        }
    }

    let count = pixel_count as f64;
    Some(sums.into_iter().map(|sum| sum as f64 / count).collect())
}

/// Sum over pixels of squared RGB deviations from `mean`
///
/// Alpha is never scored, even when tracked. Channels missing from
/// `mean` are treated as contributing nothing.
pub fn error_score(samples: ArrayView3<'_, u8>, mean: &Array1<f64>) -> f64 {
    let mut total = 0.0;
    for pixel in samples.lanes(Axis(2)) {
        for (&value, &channel_mean) in pixel.iter().zip(mean.iter()).take(SCORED_CHANNELS) {
            let deviation = f64::from(value) - channel_mean;
            total += deviation * deviation;
        }
    }
    total
}

/// Mean color and error score computed together
pub fn analyze(samples: ArrayView3<'_, u8>) -> Option<(Array1<f64>, f64)> {
    let mean = mean_color(samples)?;
    let score = error_score(samples, &mean);
    Some((mean, score))
}
