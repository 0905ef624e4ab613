//! Streaming GIF generation for refinement animation

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{QuadsError, Result, invalid_image};
use crate::io::snapshot::SnapshotSink;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Encodes rendered snapshots into a looping GIF as they arrive
///
/// Every frame is shown for the frame delay except the last, which is
/// held for the end-of-loop pause before the animation restarts. Only the
/// most recent frame is kept in memory, since it may turn out to be the last.
/// The file is created when the first frame is encoded.
pub struct GifWriter {
    output_path: PathBuf,
    encoder: Option<GifEncoder<File>>,
    pending: Option<RgbaImage>,
    frame_count: usize,
    frame_delay_ms: u32,
    end_pause_ms: u32,
}

impl GifWriter {
    /// Frame delays below what viewers support are raised to that minimum
    pub fn new(output_path: &Path, frame_delay_ms: u32, end_pause_ms: u32) -> Self {
        if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            log::warn!(
                "Frame delay {frame_delay_ms}ms raised to {VIEWER_MIN_FRAME_DELAY_MS}ms for viewer support"
            );
        }

        Self {
            output_path: output_path.to_path_buf(),
            encoder: None,
            pending: None,
            frame_count: 0,
            frame_delay_ms: frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS),
            end_pause_ms,
        }
    }

    /// Returns the total number of recorded frames
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Delay applied to every frame but the last
    pub const fn frame_delay_ms(&self) -> u32 {
        self.frame_delay_ms
    }

    /// Display time of the last frame, never shorter than the frame delay
    pub fn end_delay_ms(&self) -> u32 {
        self.end_pause_ms.max(self.frame_delay_ms)
    }

    /// Destination of the animation
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Encode the held-back frame with the end pause and close the file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were recorded
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn finish(mut self) -> Result<()> {
        let Some(last) = self.pending.take() else {
            return Err(invalid_image(&"No frames captured for animation"));
        };
        let delay_ms = self.end_delay_ms();
        self.encode(last, delay_ms)?;

        log::debug!(
            "Wrote {} frames to {}",
            self.frame_count,
            self.output_path.display()
        );
        Ok(())
    }

    fn encode(&mut self, frame: RgbaImage, delay_ms: u32) -> Result<()> {
        let encoder = match &mut self.encoder {
            Some(encoder) => encoder,
            empty => empty.insert(open_encoder(&self.output_path)?),
        };

        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        encoder
            .encode_frame(Frame::from_parts(frame, 0, 0, delay))
            .map_err(|e| QuadsError::ImageExport {
                path: self.output_path.clone(),
                source: e,
            })
    }
}

impl SnapshotSink for GifWriter {
    fn record(&mut self, _iteration: usize, frame: &RgbaImage) -> Result<()> {
        if let Some(previous) = self.pending.replace(frame.clone()) {
            self.encode(previous, self.frame_delay_ms)?;
        }
        self.frame_count += 1;
        Ok(())
    }
}

fn open_encoder(output_path: &Path) -> Result<GifEncoder<File>> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| QuadsError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = File::create(output_path).map_err(|e| QuadsError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let mut encoder = GifEncoder::new(file);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| QuadsError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;
    Ok(encoder)
}
