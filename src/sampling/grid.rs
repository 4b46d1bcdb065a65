//! Chunk-aligned grid sampling of patches

use crate::collection::{ArrayMeta, ArrayRole, ImageCollection};
use crate::geometry::axes::SpatialAxes;
use crate::geometry::patch_size::PatchSize;
use crate::geometry::region::{AxisSizeMap, SpatialRegion};
use crate::geometry::scale::AxisScale;
use crate::geometry::tiling::TileGrid;
use crate::io::error::{Result, SamplingError};
use crate::sampling::mask::{BlockOccupancy, MaskFilter};
use crate::sampling::{Sampler, SamplingStats, StatsSnapshot};

/// Sampler tiling each chunk into a regular grid of patches
///
/// Chunks follow the reference array's native chunk grid; both chunks and
/// patches are kept only when their footprint in the mask holds a nonzero
/// value.
#[derive(Debug)]
pub struct PatchSampler {
    patch_size: AxisSizeMap,
    spatial_axes: SpatialAxes,
    stats: SamplingStats,
}

impl PatchSampler {
    /// Create a sampler tiling over `spatial_axes`
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidAxes`] for an invalid axis string and
    /// [`SamplingError::InvalidPatchSize`] when the patch size cannot be
    /// resolved against the axes
    pub fn new(patch_size: impl Into<PatchSize>, spatial_axes: &str) -> Result<Self> {
        let spatial_axes = SpatialAxes::new(spatial_axes)?;
        Self::with_axes(patch_size, spatial_axes)
    }

    /// Create a sampler tiling over the default `YX` axes
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidPatchSize`] when the patch size cannot
    /// be resolved against the axes
    pub fn with_default_axes(patch_size: impl Into<PatchSize>) -> Result<Self> {
        Self::with_axes(patch_size, SpatialAxes::default())
    }

    /// Create a sampler from already validated axes
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidPatchSize`] when the patch size cannot
    /// be resolved against the axes
    pub fn with_axes(patch_size: impl Into<PatchSize>, spatial_axes: SpatialAxes) -> Result<Self> {
        let patch_size = patch_size.into().normalize(&spatial_axes)?;
        Ok(Self {
            patch_size,
            spatial_axes,
            stats: SamplingStats::new(),
        })
    }

    /// Normalized patch size per declared axis
    pub const fn patch_size(&self) -> &AxisSizeMap {
        &self.patch_size
    }

    /// Declared spatial axes
    pub const fn spatial_axes(&self) -> &SpatialAxes {
        &self.spatial_axes
    }

    /// Counters of accepted and rejected chunks and patches
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub(crate) const fn stats_recorder(&self) -> &SamplingStats {
        &self.stats
    }

    /// Reference array metadata and its scale relative to the mask
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::MissingArray`] when the collection has no
    /// reference array
    pub fn resolve_scale<'c, C>(&self, collection: &'c C) -> Result<(&'c ArrayMeta, AxisScale)>
    where
        C: ImageCollection + ?Sized,
    {
        let reference = collection
            .meta(ArrayRole::Images)
            .ok_or(SamplingError::MissingArray {
                role: ArrayRole::Images,
            })?;

        let scale = match collection.meta(ArrayRole::Masks) {
            Some(mask) => {
                let scale = AxisScale::resolve(reference, mask, &self.spatial_axes);
                for axis in self.spatial_axes.iter() {
                    if reference.has_axis(axis) && scale.factor(axis).is_none() {
                        tracing::debug!(%axis, "mask lacks axis; treating it as unrestricted");
                    }
                }
                scale
            }
            None => AxisScale::identity(reference, &self.spatial_axes),
        };

        Ok((reference, scale))
    }

    /// Accepted/rejected map over the whole chunk grid, with the grid itself
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::MissingArray`] when the collection has no
    /// reference array and propagates mask read failures
    pub fn chunk_occupancy<C>(&self, collection: &C) -> Result<(TileGrid, BlockOccupancy)>
    where
        C: ImageCollection + ?Sized,
    {
        let (reference, scale) = self.resolve_scale(collection)?;
        let grid = TileGrid::over_region(
            reference,
            &SpatialRegion::new(),
            &self.spatial_axes,
            scale.reference_chunk(),
        );

        tracing::debug!(
            axes = ?grid.tiled_axes(),
            chunk = ?scale.reference_chunk(),
            mask_chunk = ?scale.scaled_sizes(scale.reference_chunk()),
            "tiling chunk grid"
        );

        let filter = MaskFilter::new(collection, &scale);
        let occupancy = BlockOccupancy::evaluate(&grid, |chunk| filter.accepts(chunk))?;
        Ok((grid, occupancy))
    }
}

impl Sampler for PatchSampler {
    fn compute_chunks<C>(&self, collection: &C) -> Result<Vec<SpatialRegion>>
    where
        C: ImageCollection + ?Sized,
    {
        let (grid, occupancy) = self.chunk_occupancy(collection)?;
        let chunks: Vec<SpatialRegion> = occupancy.regions(&grid).collect();

        self.stats.record_chunks(occupancy.len(), chunks.len());
        tracing::debug!(
            candidates = occupancy.len(),
            accepted = chunks.len(),
            grid = ?occupancy.shape(),
            "computed chunks"
        );

        Ok(chunks)
    }

    fn compute_patches<C>(&self, collection: &C, chunk: &SpatialRegion) -> Result<Vec<SpatialRegion>>
    where
        C: ImageCollection + ?Sized,
    {
        let (reference, scale) = self.resolve_scale(collection)?;
        let grid = TileGrid::over_region(reference, chunk, &self.spatial_axes, &self.patch_size);

        let filter = MaskFilter::new(collection, &scale);
        let occupancy = BlockOccupancy::evaluate(&grid, |patch| filter.accepts(patch))?;
        let patches: Vec<SpatialRegion> = occupancy.regions(&grid).collect();

        self.stats.record_patches(occupancy.len(), patches.len());
        tracing::trace!(
            %chunk,
            mask_patch = ?scale.scaled_sizes(&self.patch_size),
            candidates = occupancy.len(),
            accepted = patches.len(),
            "computed grid patches"
        );

        Ok(patches)
    }
}
