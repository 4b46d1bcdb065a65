//! Blue-noise patch placement inside chunks
//!
//! Chunks are computed exactly as in grid sampling. Inside a chunk, patch
//! positions come from a Poisson-disk pattern generated over one nominal
//! chunk and translated to each chunk's origin, which avoids both the
//! clustering of uniform random positions and the bias of a fixed grid.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collection::{ArrayMeta, ImageCollection};
use crate::geometry::axes::SpatialAxes;
use crate::geometry::patch_size::PatchSize;
use crate::geometry::region::{AxisSizeMap, SpatialRegion};
use crate::io::configuration::{DEFAULT_SEED, OVERLAP_SEPARATION};
use crate::io::error::Result;
use crate::sampling::grid::PatchSampler;
use crate::sampling::mask::MaskFilter;
use crate::sampling::poisson::{DiskAxis, PoissonDisk};
use crate::sampling::{Sampler, StatsSnapshot};

/// Chunk and patch extents a base pattern is generated for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternGeometry {
    axes: Vec<char>,
    chunk: Vec<usize>,
    patch: Vec<usize>,
    allow_overlap: bool,
}

impl PatternGeometry {
    /// Geometry of one nominal chunk of `reference` along the declared axes
    ///
    /// Chunk lengths are capped at the array extent; declared axes the array
    /// does not carry are left out.
    pub fn new(
        reference: &ArrayMeta,
        chunk_size: &AxisSizeMap,
        patch_size: &AxisSizeMap,
        axes: &SpatialAxes,
        allow_overlap: bool,
    ) -> Self {
        let mut geometry = Self {
            axes: Vec::with_capacity(axes.len()),
            chunk: Vec::with_capacity(axes.len()),
            patch: Vec::with_capacity(axes.len()),
            allow_overlap,
        };

        for axis in axes.iter() {
            let (Some(extent), Some(&chunk), Some(&patch)) = (
                reference.extent_of(axis),
                chunk_size.get(&axis),
                patch_size.get(&axis),
            ) else {
                continue;
            };
            geometry.axes.push(axis);
            geometry.chunk.push(chunk.min(extent));
            geometry.patch.push(patch);
        }

        geometry
    }

    /// Sampled axis labels
    pub fn axes(&self) -> &[char] {
        &self.axes
    }

    /// True when a patch fits inside a chunk along every sampled axis
    pub fn fits(&self) -> bool {
        self.patch
            .iter()
            .zip(&self.chunk)
            .all(|(patch, chunk)| patch <= chunk)
    }

    fn disk(&self) -> PoissonDisk {
        let factor = if self.allow_overlap {
            OVERLAP_SEPARATION
        } else {
            1.0
        };
        PoissonDisk::new(self.patch.iter().zip(&self.chunk).map(|(&patch, &chunk)| {
            DiskAxis {
                limit: chunk - patch,
                separation: patch as f64 * factor,
            }
        }))
    }
}

/// Chunk-relative patch offsets, one per sampled point
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasePattern {
    geometry: PatternGeometry,
    offsets: Vec<Vec<usize>>,
}

impl BasePattern {
    /// Generate a pattern for a geometry
    ///
    /// A patch larger than the chunk leaves no admissible offset and yields
    /// an empty pattern.
    pub fn generate(geometry: PatternGeometry, rng: &mut StdRng) -> Self {
        let offsets = if geometry.fits() {
            geometry.disk().fill_space(rng)
        } else {
            tracing::warn!(
                axes = ?geometry.axes,
                chunk = ?geometry.chunk,
                patch = ?geometry.patch,
                "patch does not fit in a chunk; no blue-noise positions"
            );
            Vec::new()
        };

        Self { geometry, offsets }
    }

    /// Geometry this pattern was generated for
    pub const fn geometry(&self) -> &PatternGeometry {
        &self.geometry
    }

    /// Offsets per sampled axis, relative to the chunk origin
    pub fn offsets(&self) -> &[Vec<usize>] {
        &self.offsets
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True when no position could be placed
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Sampler placing patches at blue-noise positions inside each chunk
///
/// With `resample_positions` unset, one base pattern is generated lazily on
/// first use and shared by every chunk and thread; concurrent first calls
/// agree on a single pattern. The pattern is regenerated once whenever the
/// chunk geometry changes and reused from then on. With `resample_positions`
/// set, every `compute_patches` call draws a new pattern from the sampler's
/// seeded generator.
#[derive(Debug)]
pub struct BlueNoisePatchSampler {
    grid: PatchSampler,
    resample_positions: bool,
    allow_overlap: bool,
    base: RwLock<Option<Arc<BasePattern>>>,
    last_pattern_len: AtomicUsize,
    rng: Mutex<StdRng>,
}

impl BlueNoisePatchSampler {
    /// Create a sampler tiling over `spatial_axes`
    ///
    /// Positions are fixed and non-overlapping until configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::InvalidAxes`] for an invalid axis
    /// string and [`crate::SamplingError::InvalidPatchSize`] when the patch
    /// size cannot be resolved against the axes
    pub fn new(patch_size: impl Into<PatchSize>, spatial_axes: &str) -> Result<Self> {
        PatchSampler::new(patch_size, spatial_axes).map(Self::from_grid)
    }

    /// Create a sampler tiling over the default `YX` axes
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::InvalidPatchSize`] when the patch size
    /// cannot be resolved against the axes
    pub fn with_default_axes(patch_size: impl Into<PatchSize>) -> Result<Self> {
        PatchSampler::with_default_axes(patch_size).map(Self::from_grid)
    }

    /// Reuse a grid sampler's patch size and axes
    pub fn from_grid(grid: PatchSampler) -> Self {
        Self {
            grid,
            resample_positions: false,
            allow_overlap: false,
            base: RwLock::new(None),
            last_pattern_len: AtomicUsize::new(0),
            rng: Mutex::new(StdRng::seed_from_u64(DEFAULT_SEED)),
        }
    }

    /// Draw a new pattern on every `compute_patches` call
    #[must_use]
    pub fn with_resample_positions(mut self, resample_positions: bool) -> Self {
        self.resample_positions = resample_positions;
        self
    }

    /// Allow neighbouring patches to overlap by up to half a patch
    #[must_use]
    pub fn with_allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self.base = RwLock::new(None);
        self
    }

    /// Reseed the position generator and drop any cached pattern
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self.base = RwLock::new(None);
        self
    }

    /// Grid sampler providing chunk computation
    pub const fn grid(&self) -> &PatchSampler {
        &self.grid
    }

    /// Normalized patch size per declared axis
    pub const fn patch_size(&self) -> &AxisSizeMap {
        self.grid.patch_size()
    }

    /// Declared spatial axes
    pub const fn spatial_axes(&self) -> &SpatialAxes {
        self.grid.spatial_axes()
    }

    /// Whether every call draws a new pattern
    pub const fn resample_positions(&self) -> bool {
        self.resample_positions
    }

    /// Whether patches may overlap
    pub const fn allow_overlap(&self) -> bool {
        self.allow_overlap
    }

    /// Cached base pattern, once one has been generated
    pub fn base_pattern(&self) -> Option<Arc<BasePattern>> {
        self.base
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of positions in the pattern used by the latest call
    pub fn last_pattern_len(&self) -> usize {
        self.last_pattern_len.load(Ordering::Relaxed)
    }

    /// Discard the cached base pattern so the next call generates a new one
    pub fn force_resample(&self) {
        self.base
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Counters of accepted and rejected chunks and patches
    pub fn stats(&self) -> StatsSnapshot {
        self.grid.stats()
    }

    fn draw(&self, geometry: PatternGeometry) -> BasePattern {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        BasePattern::generate(geometry, &mut rng)
    }

    fn pattern_for(&self, geometry: &PatternGeometry) -> Arc<BasePattern> {
        if self.resample_positions {
            return Arc::new(self.draw(geometry.clone()));
        }

        if let Some(cached) = self
            .base_pattern()
            .filter(|cached| cached.geometry() == geometry)
        {
            return cached;
        }

        // Re-check under the write lock so racing callers keep one pattern
        let mut slot = self.base.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref() {
            if cached.geometry() == geometry {
                return Arc::clone(cached);
            }
            tracing::debug!(
                cached = ?cached.geometry(),
                requested = ?geometry,
                "chunk geometry changed; regenerating the base pattern"
            );
        }

        let pattern = Arc::new(self.draw(geometry.clone()));
        *slot = Some(Arc::clone(&pattern));
        pattern
    }
}

// Translate chunk-relative offsets to one patch region, clipped to the chunk
// and the array extent.
fn place_patch(
    chunk: &SpatialRegion,
    reference: &ArrayMeta,
    geometry: &PatternGeometry,
    offsets: &[usize],
) -> SpatialRegion {
    let mut patch = chunk.clone();
    for ((&axis, &length), &offset) in geometry.axes.iter().zip(&geometry.patch).zip(offsets) {
        let extent = reference.extent_of(axis).unwrap_or(0);
        let (origin, limit) = chunk
            .get(axis)
            .map_or((0, extent), |bounds| (bounds.start, bounds.end.min(extent)));
        let start = origin + offset;
        patch.set(axis, start..(start + length).min(limit));
    }
    patch
}

impl Sampler for BlueNoisePatchSampler {
    fn compute_chunks<C>(&self, collection: &C) -> Result<Vec<SpatialRegion>>
    where
        C: ImageCollection + ?Sized,
    {
        self.grid.compute_chunks(collection)
    }

    fn compute_patches<C>(&self, collection: &C, chunk: &SpatialRegion) -> Result<Vec<SpatialRegion>>
    where
        C: ImageCollection + ?Sized,
    {
        let (reference, scale) = self.grid.resolve_scale(collection)?;
        let geometry = PatternGeometry::new(
            reference,
            scale.reference_chunk(),
            self.grid.patch_size(),
            self.grid.spatial_axes(),
            self.allow_overlap,
        );
        let pattern = self.pattern_for(&geometry);
        self.last_pattern_len
            .store(pattern.len(), Ordering::Relaxed);

        let filter = MaskFilter::new(collection, &scale);
        let mut patches = Vec::with_capacity(pattern.len());
        for offsets in pattern.offsets() {
            let patch = place_patch(chunk, reference, &geometry, offsets);
            if filter.accepts(&patch)? {
                patches.push(patch);
            }
        }

        self.grid
            .stats_recorder()
            .record_patches(pattern.len(), patches.len());
        if patches.is_empty() {
            tracing::debug!(
                %chunk,
                positions = pattern.len(),
                "no blue-noise patch holds any region of interest"
            );
        }

        Ok(patches)
    }
}
