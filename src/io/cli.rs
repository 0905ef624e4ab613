//! Command-line interface for batch quadtree refinement of images

use crate::algorithm::executor::{
    ChannelLayout, GreedyRefiner, RefinementConfig, RefinementState, UnsplittablePolicy,
};
use crate::io::color::parse_color;
use crate::io::configuration::{
    DEFAULT_BACKGROUND, DEFAULT_END_PAUSE_MS, DEFAULT_FRAME_DELAY_MS, DEFAULT_ITERATIONS,
    DEFAULT_OUTPUT_DIR, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{QuadsError, Result, invalid_parameter};
use crate::io::image::{crop_to_power_of_two_square, export_png, load_image, root_region};
use crate::io::progress::ProgressManager;
use crate::io::snapshot::{FrameSequenceWriter, SnapshotSink};
use crate::io::visualization::GifWriter;
use crate::render::{Canvas, RenderStyle};
use crate::spatial::Region;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "greedyquads")]
#[command(
    author,
    version,
    about = "Approximate images with greedily refined quadtrees of flat rectangles"
)]
/// Command-line arguments for the quadtree refinement tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of split steps to attempt
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Draw a one-pixel border around each quad
    #[arg(short, long)]
    pub border: bool,

    /// Clip each quad to its inscribed ellipse
    #[arg(short, long)]
    pub ellipse: bool,

    /// Border and background color as R,G,B or R,G,B,A
    #[arg(short, long, default_value = DEFAULT_BACKGROUND)]
    pub color: String,

    /// Save a numbered PNG after every split
    #[arg(short, long)]
    pub save_intermediate: bool,

    /// Assemble every step into an animated GIF
    #[arg(short, long)]
    pub gif: bool,

    /// Delay between GIF frames in milliseconds
    #[arg(short = 'd', long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    pub frame_delay: u32,

    /// Pause at the end of the GIF loop in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_END_PAUSE_MS)]
    pub pause: u32,

    /// Track and average the alpha channel
    #[arg(short, long)]
    pub alpha: bool,

    /// Skip regions that cannot be split instead of halting the run
    #[arg(long)]
    pub skip_unsplittable: bool,

    /// Directory receiving results, frames and animations
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub out_dir: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Session parameters for the refinement driver
    ///
    /// # Errors
    ///
    /// Returns an error if the iteration count is out of range
    pub fn refinement_config(&self) -> Result<RefinementConfig> {
        let config = RefinementConfig {
            iterations: self.iterations,
            layout: if self.alpha {
                ChannelLayout::Rgba
            } else {
                ChannelLayout::Rgb
            },
            policy: if self.skip_unsplittable {
                UnsplittablePolicy::SkipRegion
            } else {
                UnsplittablePolicy::HaltAll
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Rendering options for every snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the color string is malformed
    pub fn render_style(&self) -> Result<RenderStyle> {
        Ok(RenderStyle {
            border: self.border,
            ellipse: self.ellipse,
            color: parse_color(&self.color)?,
        })
    }
}

/// Orchestrates batch processing of images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process images according to CLI arguments
    ///
    /// Configuration is validated before any image is read.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, target validation or image
    /// processing fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.refinement_config()?;
        let style = self.cli.render_style()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            log::warn!("No images found in {}", self.cli.target.display());
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, &config, style)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_supported_image(target) {
                Ok(vec![target.clone()])
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("file must be one of: {}", SUPPORTED_EXTENSIONS.join(", ")),
                ))
            }
        } else if target.is_dir() {
            let read_error = |e| QuadsError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if path.is_file() && is_supported_image(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        config: &RefinementConfig,
        style: RenderStyle,
    ) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_image(index, input_path, config.iterations);
        }

        let source = load_image(input_path)?;
        let cropped = crop_to_power_of_two_square(&source);
        if cropped.dimensions() != source.dimensions() {
            log::info!(
                "{}: cropped {}x{} to {}x{}",
                input_path.display(),
                source.width(),
                source.height(),
                cropped.width(),
                cropped.height()
            );
        }

        let mut refiner = GreedyRefiner::from_config(root_region(&cropped, config.layout)?, config)?;
        let mut canvas = Canvas::new(refiner.tree(), style)?;

        let stem = Self::file_stem(input_path);
        let mut frames = self
            .cli
            .save_intermediate
            .then(|| FrameSequenceWriter::new(&self.cli.out_dir, &stem, config.iterations));
        let mut animation = self.cli.gif.then(|| {
            GifWriter::new(
                &self.animation_path(input_path),
                self.cli.frame_delay,
                self.cli.pause,
            )
        });

        if let Some(ref mut gif) = animation {
            gif.record(0, canvas.image())?;
        }

        let progress = &mut self.progress_manager;
        let state = refiner.run(|tree, record| {
            canvas.apply_split(tree, record)?;
            if let Some(ref mut writer) = frames {
                writer.record(record.iteration, canvas.image())?;
            }
            if let Some(ref mut gif) = animation {
                gif.record(record.iteration, canvas.image())?;
            }
            if let Some(pm) = progress.as_mut() {
                pm.update_splits(index, record.iteration);
            }
            Ok(())
        })?;

        if state == RefinementState::Halted {
            let blocker = refiner
                .halted_on()
                .and_then(|id| refiner.tree().get(id))
                .map(Region::origin);
            log::info!(
                "{}: halted after {} of {} splits, smallest region reached at {blocker:?}",
                input_path.display(),
                refiner.iteration(),
                config.iterations
            );
        }

        export_png(canvas.image(), &self.output_path(input_path))?;

        if let Some(gif) = animation {
            gif.finish()?;
        }

        log::info!(
            "{}: {} splits, {} leaves, depth {} in {:.2?}",
            input_path.display(),
            refiner.iteration(),
            refiner.tree().leaf_count(),
            refiner.tree().max_depth(),
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_image(index, state);
        }

        Ok(())
    }

    fn file_stem(input_path: &Path) -> String {
        input_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// Path of the final rendered result for an input image
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        self.cli.out_dir.join(format!(
            "{}{OUTPUT_SUFFIX}.png",
            Self::file_stem(input_path)
        ))
    }

    /// Path of the animated GIF for an input image
    pub fn animation_path(&self, input_path: &Path) -> PathBuf {
        self.cli
            .out_dir
            .join(format!("{}.gif", Self::file_stem(input_path)))
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}
