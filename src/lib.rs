//! Chunk-aligned patch sampling for large, chunked image arrays
//!
//! Samplers enumerate the chunks of a reference image that hold any region of
//! interest according to an optional mask, possibly stored at a different
//! resolution, and then cut each chunk into patches either on a regular grid
//! or at blue-noise (Poisson-disk) positions.

#![forbid(unsafe_code)]

/// Image collections and the arrays they hold
pub mod collection;
/// Axes, regions, patch sizes, rescaling and tiling
pub mod geometry;
/// Input/output operations and error handling
pub mod io;
/// Chunk and patch sampling strategies
pub mod sampling;

pub use io::error::{Result, SamplingError};
