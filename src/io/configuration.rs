//! Refinement constants and defaults

/// Default number of split steps attempted per image
pub const DEFAULT_ITERATIONS: usize = 20;

// Safety limit on arena growth; every split adds four regions
/// Maximum allowed iteration count
pub const MAX_ITERATIONS: usize = 1_000_000;

/// Default border and background color (black)
pub const DEFAULT_BACKGROUND: &str = "0,0,0";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Directory receiving results, frames and animations
pub const DEFAULT_OUTPUT_DIR: &str = "out";
/// Suffix added to final result filenames
pub const OUTPUT_SUFFIX: &str = "_quads";
/// Image extensions accepted when scanning a directory
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

// Animation settings
/// Delay between GIF animation frames (20 frames per second)
pub const DEFAULT_FRAME_DELAY_MS: u32 = 50;
/// Hold time for the last frame before the animation loops
pub const DEFAULT_END_PAUSE_MS: u32 = 2000;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
