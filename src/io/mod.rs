//! Input/output: errors, constants, PNG loading, progress and the command line

/// Command-line argument parsing and the listing driver
pub mod cli;
/// Constants shared across samplers and the command line
pub mod configuration;
/// Error types for sampling and I/O
pub mod error;
/// PNG loading into chunked arrays
pub mod image;
/// Progress display for chunk processing
pub mod progress;
