//! Per-iteration snapshot sinks
//!
//! After every successful split the current buffer is handed to each
//! configured sink together with its iteration index.

use crate::io::error::Result;
use crate::io::image::export_png;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Receiver of rendered snapshots, one per iteration
pub trait SnapshotSink {
    /// Accept the buffer rendered after `iteration` splits
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be stored
    fn record(&mut self, iteration: usize, frame: &RgbaImage) -> Result<()>;
}

/// Zero-pad `iteration` to the digit width of `final_iteration`
///
/// Keeps frame files in lexicographic order.
pub fn padded_index(iteration: usize, final_iteration: usize) -> String {
    let width = final_iteration.max(iteration).to_string().len();
    format!("{iteration:0width$}")
}

/// Writes every snapshot as a numbered PNG
#[derive(Debug, Clone)]
pub struct FrameSequenceWriter {
    directory: PathBuf,
    stem: String,
    final_iteration: usize,
    frames_written: usize,
}

impl FrameSequenceWriter {
    /// Create a writer for `<directory>/<stem>_<index>.png` files
    pub fn new(directory: &Path, stem: &str, final_iteration: usize) -> Self {
        Self {
            directory: directory.to_path_buf(),
            stem: stem.to_string(),
            final_iteration,
            frames_written: 0,
        }
    }

    /// Path the snapshot for `iteration` is written to
    pub fn frame_path(&self, iteration: usize) -> PathBuf {
        self.directory.join(format!(
            "{}_{}.png",
            self.stem,
            padded_index(iteration, self.final_iteration)
        ))
    }

    /// Number of snapshots written so far
    pub const fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl SnapshotSink for FrameSequenceWriter {
    fn record(&mut self, iteration: usize, frame: &RgbaImage) -> Result<()> {
        export_png(frame, &self.frame_path(iteration))?;
        self.frames_written += 1;
        Ok(())
    }
}
