//! Axis-aware rescaling between a reference array and a secondary array
//!
//! Both samplers translate regions expressed in reference (image)
//! coordinates into the coordinate system of the mask through this type.
//! Rescaling is done in integer arithmetic on the two extents, so a
//! reference interval `[start, stop)` maps exactly to
//! `[floor(start * scale), ceil(stop * scale))`.

use std::collections::BTreeMap;

use crate::collection::ArrayMeta;
use crate::geometry::axes::SpatialAxes;
use crate::geometry::region::{AxisSizeMap, ScaleMap, SpatialRegion};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SharedAxis {
    reference_extent: usize,
    secondary_extent: usize,
}

impl SharedAxis {
    fn factor(self) -> f64 {
        self.secondary_extent as f64 / self.reference_extent as f64
    }

    fn floor(self, index: usize) -> usize {
        index.saturating_mul(self.secondary_extent) / self.reference_extent
    }

    fn ceil(self, index: usize) -> usize {
        index
            .saturating_mul(self.secondary_extent)
            .div_ceil(self.reference_extent)
    }
}

// Chunks longer than the array hold a single, shorter block
fn capped_chunk(reference: &ArrayMeta) -> AxisSizeMap {
    reference
        .chunk_size()
        .into_iter()
        .map(|(axis, chunk)| {
            let extent = reference.extent_of(axis).unwrap_or(chunk);
            (axis, chunk.min(extent.max(1)))
        })
        .collect()
}

/// Per-axis scale factors and reference chunking for one pair of arrays
#[derive(Clone, Debug, PartialEq)]
pub struct AxisScale {
    shared: BTreeMap<char, SharedAxis>,
    reference_chunk: AxisSizeMap,
}

impl AxisScale {
    /// Relate every axis the two arrays have in common
    ///
    /// The reference chunk size covers every reference axis.
    pub fn between(reference: &ArrayMeta, secondary: &ArrayMeta) -> Self {
        let shared = reference
            .axes()
            .iter()
            .filter_map(|&axis| {
                let reference_extent = reference.extent_of(axis)?;
                let secondary_extent = secondary.extent_of(axis)?;
                (reference_extent > 0).then_some((
                    axis,
                    SharedAxis {
                        reference_extent,
                        secondary_extent,
                    },
                ))
            })
            .collect();

        Self {
            shared,
            reference_chunk: capped_chunk(reference),
        }
    }

    /// Relate two arrays as seen by a sampler tiling `axes`
    ///
    /// Scale factors still cover every shared axis so that fixed, undeclared
    /// axes are translated too; the reference chunk size is restricted to the
    /// declared axes the reference array carries.
    pub fn resolve(reference: &ArrayMeta, secondary: &ArrayMeta, axes: &SpatialAxes) -> Self {
        let mut scale = Self::between(reference, secondary);
        scale.reference_chunk.retain(|axis, _| axes.contains(*axis));
        scale
    }

    /// Scale for a reference array without a secondary array
    pub fn identity(reference: &ArrayMeta, axes: &SpatialAxes) -> Self {
        let mut reference_chunk = capped_chunk(reference);
        reference_chunk.retain(|axis, _| axes.contains(*axis));
        Self {
            shared: BTreeMap::new(),
            reference_chunk,
        }
    }

    /// Secondary-to-reference extent ratio per shared axis
    pub fn factors(&self) -> ScaleMap {
        self.shared
            .iter()
            .map(|(&axis, shared)| (axis, shared.factor()))
            .collect()
    }

    /// Scale factor along one axis, if both arrays carry it
    pub fn factor(&self, axis: char) -> Option<f64> {
        self.shared.get(&axis).map(|shared| shared.factor())
    }

    /// Native chunk lengths of the reference array, capped at its extent
    pub const fn reference_chunk(&self) -> &AxisSizeMap {
        &self.reference_chunk
    }

    /// Express reference-space sizes in secondary-space units
    ///
    /// Axes the secondary array lacks are left out.
    pub fn scaled_sizes(&self, sizes: &AxisSizeMap) -> ScaleMap {
        sizes
            .iter()
            .filter_map(|(&axis, &size)| Some((axis, size as f64 * self.factor(axis)?)))
            .collect()
    }

    /// Translate a reference-space region into secondary-space indices
    ///
    /// Axes the secondary array lacks are dropped, leaving the secondary
    /// unrestricted along them. Intervals are clamped to the secondary
    /// extent, so a region beyond the secondary array maps to an empty one.
    pub fn to_secondary(&self, region: &SpatialRegion) -> SpatialRegion {
        region
            .iter()
            .filter_map(|(axis, bounds)| {
                let shared = self.shared.get(&axis)?;
                let start = shared.floor(bounds.start).min(shared.secondary_extent);
                let stop = shared
                    .ceil(bounds.end)
                    .clamp(start, shared.secondary_extent);
                Some((axis, start..stop))
            })
            .collect()
    }
}
