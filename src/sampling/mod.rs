//! Chunk and patch sampling strategies
//!
//! Both strategies share chunk computation: the reference array's chunk grid
//! is filtered against the (rescaled) mask. They differ in how a chunk is
//! cut into patches: a regular grid, or a blue-noise point pattern.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::collection::ImageCollection;
use crate::geometry::region::SpatialRegion;
use crate::io::error::Result;

/// Blue-noise patch placement
pub mod blue_noise;
/// Regular grid patch placement
pub mod grid;
/// Mask rescaling, local-mean reduction and occupancy maps
pub mod mask;
/// Poisson-disk point process
pub mod poisson;

pub use blue_noise::BlueNoisePatchSampler;
pub use grid::PatchSampler;

/// Strategy turning a collection into chunks and chunks into patches
pub trait Sampler {
    /// Chunk-aligned regions of the reference array holding any region of interest
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::MissingArray`] when the collection has
    /// no reference array and propagates mask read failures
    fn compute_chunks<C>(&self, collection: &C) -> Result<Vec<SpatialRegion>>
    where
        C: ImageCollection + ?Sized;

    /// Patch regions inside one chunk, each contained in the chunk
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::MissingArray`] when the collection has
    /// no reference array and propagates mask read failures
    fn compute_patches<C>(&self, collection: &C, chunk: &SpatialRegion) -> Result<Vec<SpatialRegion>>
    where
        C: ImageCollection + ?Sized;
}

/// Running counters of sampling decisions
///
/// Shared across threads; empty results caused by mask or geometry
/// mismatches show up here as rejections.
#[derive(Debug, Default)]
pub struct SamplingStats {
    chunks_considered: AtomicUsize,
    chunks_accepted: AtomicUsize,
    patches_considered: AtomicUsize,
    patches_accepted: AtomicUsize,
    empty_patch_lists: AtomicUsize,
}

/// Point-in-time copy of [`SamplingStats`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Candidate chunks tested against the mask
    pub chunks_considered: usize,
    /// Chunks that passed the mask test
    pub chunks_accepted: usize,
    /// Candidate patches tested against the mask
    pub patches_considered: usize,
    /// Patches that passed the mask test
    pub patches_accepted: usize,
    /// Calls to `compute_patches` that returned no patch
    pub empty_patch_lists: usize,
}

impl StatsSnapshot {
    /// Chunks rejected by the mask test
    pub const fn chunks_rejected(&self) -> usize {
        self.chunks_considered.saturating_sub(self.chunks_accepted)
    }

    /// Patches rejected by the mask test or emptied by clipping
    pub const fn patches_rejected(&self) -> usize {
        self.patches_considered.saturating_sub(self.patches_accepted)
    }
}

impl SamplingStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `compute_chunks` call
    pub fn record_chunks(&self, considered: usize, accepted: usize) {
        self.chunks_considered.fetch_add(considered, Ordering::Relaxed);
        self.chunks_accepted.fetch_add(accepted, Ordering::Relaxed);
    }

    /// Record one `compute_patches` call
    pub fn record_patches(&self, considered: usize, accepted: usize) {
        self.patches_considered.fetch_add(considered, Ordering::Relaxed);
        self.patches_accepted.fetch_add(accepted, Ordering::Relaxed);
        if accepted == 0 {
            self.empty_patch_lists.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            chunks_considered: self.chunks_considered.load(Ordering::Relaxed),
            chunks_accepted: self.chunks_accepted.load(Ordering::Relaxed),
            patches_considered: self.patches_considered.load(Ordering::Relaxed),
            patches_accepted: self.patches_accepted.load(Ordering::Relaxed),
            empty_patch_lists: self.empty_patch_lists.load(Ordering::Relaxed),
        }
    }
}
