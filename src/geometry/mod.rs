//! Geometric building blocks shared by the samplers
//!
//! This module contains:
//! - Spatial axis validation
//! - Axis-labelled regions and size maps
//! - Patch size normalization
//! - Reference-to-mask coordinate rescaling
//! - Row-major tiling of regions into chunk or patch cells

/// Spatial axis label validation
pub mod axes;
/// Patch size specifications and normalization
pub mod patch_size;
/// Regions, size maps and scale maps
pub mod region;
/// Axis-aware rescaling between arrays of different resolution
pub mod scale;
/// Regular tiling of regions
pub mod tiling;

pub use axes::SpatialAxes;
pub use patch_size::PatchSize;
pub use region::{AxisSizeMap, ScaleMap, SpatialRegion};
pub use scale::AxisScale;
pub use tiling::TileGrid;
