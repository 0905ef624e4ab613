//! Input/output collaborators around the refinement core

/// Command-line interface and batch orchestration
pub mod cli;
/// Border and background color parsing
pub mod color;
/// Defaults and limits
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image loading, cropping and export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Per-iteration snapshot sinks
pub mod snapshot;
/// Animated GIF assembly
pub mod visualization;
