//! Error types for sampler construction, collection access and CLI input

use std::fmt;
use std::path::PathBuf;

use crate::collection::ArrayRole;

/// Main error type for all sampling operations
#[derive(Debug)]
pub enum SamplingError {
    /// Patch size specification is malformed or inconsistent with the axes
    InvalidPatchSize {
        /// Patch size as supplied by the caller
        value: String,
        /// Explanation of why the value was rejected
        reason: String,
    },

    /// Spatial axis string contains unrecognized or repeated labels
    InvalidAxes {
        /// Axis string as supplied by the caller
        axes: String,
        /// Explanation of why the axes were rejected
        reason: String,
    },

    /// The collection does not provide an array the operation requires
    MissingArray {
        /// Role of the missing array
        role: ArrayRole,
    },

    /// Array data, axis labels and chunking disagree with each other
    InvalidArray {
        /// Description of the inconsistency
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
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

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPatchSize { value, reason } => {
                write!(f, "Invalid patch size '{value}': {reason}")
            }
            Self::InvalidAxes { axes, reason } => {
                write!(f, "Invalid spatial axes '{axes}': {reason}")
            }
            Self::MissingArray { role } => {
                write!(f, "Collection has no '{role}' array")
            }
            Self::InvalidArray { reason } => {
                write!(f, "Invalid array: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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

impl std::error::Error for SamplingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for sampling results
pub type Result<T> = std::result::Result<T, SamplingError>;

impl From<image::ImageError> for SamplingError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SamplingError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid patch size error
pub fn invalid_patch_size(value: &impl ToString, reason: &impl ToString) -> SamplingError {
    SamplingError::InvalidPatchSize {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid axes error
pub fn invalid_axes(axes: &impl ToString, reason: &impl ToString) -> SamplingError {
    SamplingError::InvalidAxes {
        axes: axes.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid array error
pub fn invalid_array(reason: &impl ToString) -> SamplingError {
    SamplingError::InvalidArray {
        reason: reason.to_string(),
    }
}
