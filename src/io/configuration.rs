//! Sampling constants and runtime configuration defaults

/// Axis labels that may be tiled by a sampler, outermost first
pub const RECOGNIZED_SPATIAL_AXES: &str = "ZYX";

/// Spatial axes used when the caller does not declare any
pub const DEFAULT_SPATIAL_AXES: &str = "YX";

/// Fixed seed for reproducible blue-noise sampling
pub const DEFAULT_SEED: u64 = 42;

/// Chunk edge length assigned to images loaded from PNG files
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Default patch edge length for the command-line tool
pub const DEFAULT_PATCH_SIZE: &str = "32";

// Bridson's recommended candidate count per active point
/// Number of candidates tried around an active point before retiring it
pub const POISSON_ATTEMPTS: usize = 30;

/// Minimum separation between overlapping blue-noise patches, as a fraction of the patch size
pub const OVERLAP_SEPARATION: f64 = 0.5;

/// Axis labels of images loaded from PNG files
pub const IMAGE_AXES: &str = "YXC";

/// Axis labels of masks loaded from PNG files
pub const MASK_AXES: &str = "YX";
