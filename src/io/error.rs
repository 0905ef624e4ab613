//! Error types and context management for refinement operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all quadtree operations
#[derive(Debug)]
pub enum QuadsError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source image cannot be ingested
    ///
    /// Occurs when the decoded image has no pixels, or the cropped
    /// sample block does not match the requested channel layout
    InvalidImage {
        /// Description of what's wrong with the image
        reason: String,
    },

    /// Configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tree operation attempted on a region in the wrong state
    ///
    /// Splitting a region that already has children, or one that is
    /// a single pixel wide or tall, lands here
    InvalidState {
        /// Operation being performed
        operation: &'static str,
        /// Description of the violated precondition
        reason: String,
        /// Refinement iteration when this occurred, if known
        iteration: Option<usize>,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for QuadsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidImage { reason } => {
                write!(f, "Invalid source image: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidState {
                operation,
                reason,
                iteration,
            } => match iteration {
                Some(iteration) => write!(
                    f,
                    "Invalid state during {operation} at iteration {iteration}: {reason}"
                ),
                None => write!(f, "Invalid state during {operation}: {reason}"),
            },
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for QuadsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for quadtree results
pub type Result<T> = std::result::Result<T, QuadsError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current refinement iteration
    pub iteration: Option<usize>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with refinement state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<QuadsError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only state errors carry refinement context
            if let QuadsError::InvalidState {
                iteration,
                operation,
                ..
            } = &mut error
            {
                if let Some(iter) = context.iteration {
                    *iteration = Some(iter);
                }
                if let Some(op) = context.operation {
                    *operation = op;
                }
            }
            error
        })
    }

    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for QuadsError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for QuadsError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QuadsError {
    QuadsError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid state error without iteration context
pub fn invalid_state(operation: &'static str, reason: &impl ToString) -> QuadsError {
    QuadsError::InvalidState {
        operation,
        reason: reason.to_string(),
        iteration: None,
    }
}

/// Create an invalid image error
pub fn invalid_image(reason: &impl ToString) -> QuadsError {
    QuadsError::InvalidImage {
        reason: reason.to_string(),
    }
}
