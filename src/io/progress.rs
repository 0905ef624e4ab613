//! Multi-image progress tracking with automatic batching for large sets

use crate::algorithm::executor::RefinementState;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Progress of one image as shown on its bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageProgress {
    /// File name, prefixed with a completion marker once finished
    pub name: String,
    /// Splits performed so far
    pub splits: usize,
    /// Bar length
    pub budget: usize,
}

/// Coordinates progress display for batch refinement
///
/// Shows one bar per image for small batches and adds a batch bar once
/// the image count exceeds what fits on screen; the per-image bars then
/// follow the most recent images.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    image_bars: Vec<ProgressBar>,
    images: Vec<ImageProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static SPLIT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            image_bars: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Initialize progress bars based on image count
    pub fn initialize(&mut self, image_count: usize) {
        if image_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(image_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..image_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(SPLIT_STYLE.clone());
            self.image_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress for a new image
    pub fn start_image(&mut self, index: usize, path: &Path, budget: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.images.len() {
            self.images.resize(index + 1, ImageProgress::default());
        }
        if let Some(progress) = self.images.get_mut(index) {
            *progress = ImageProgress {
                name,
                splits: 0,
                budget,
            };
        }
        self.update_bars();
    }

    /// Report the number of splits performed so far
    pub fn update_splits(&mut self, index: usize, splits: usize) {
        if let Some(progress) = self.images.get_mut(index) {
            progress.splits = splits;
        }
        self.update_bars();
    }

    /// Mark an image as finished with its final refinement state
    pub fn complete_image(&mut self, index: usize, state: RefinementState) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(progress) = self.images.get_mut(index) {
            let marker = match state {
                RefinementState::Halted => "⏹",
                RefinementState::Done | RefinementState::Running => "✓",
            };
            progress.name = format!("{marker} {}", progress.name);
            // Halted runs stop short of the budget; show them as complete
            progress.budget = progress.splits.max(1);
            progress.splits = progress.budget;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Number of images registered so far
    pub fn image_count(&self) -> usize {
        self.images.iter().filter(|p| !p.name.is_empty()).count()
    }

    /// Progress of the image at `index`, if it has been started
    pub fn image(&self, index: usize) -> Option<&ImageProgress> {
        self.images.get(index).filter(|p| !p.name.is_empty())
    }

    /// Most recently started images, oldest first, at most one per bar
    pub fn visible_images(&self) -> Vec<&ImageProgress> {
        let active: Vec<&ImageProgress> =
            self.images.iter().filter(|p| !p.name.is_empty()).collect();
        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        active.into_iter().skip(start_idx).collect()
    }

    fn update_bars(&self) {
        let visible = self.visible_images();
        let shown = visible.len().min(self.image_bars.len());

        for (bar, progress) in self.image_bars.iter().zip(visible) {
            bar.set_length(progress.budget as u64);
            bar.set_position(progress.splits as u64);
            let max_width = progress.budget.to_string().len();
            bar.set_message(format!("{:>max_width$}/{}", progress.splits, progress.budget));
            bar.set_prefix(progress.name.clone());
        }

        for bar in self.image_bars.iter().skip(shown) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
