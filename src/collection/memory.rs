//! Image collection held entirely in memory

use ndarray::ArrayD;
use num_traits::ToPrimitive;

use crate::collection::array::{ArrayMeta, ChunkedArray};
use crate::collection::{ArrayRole, ImageCollection};
use crate::geometry::region::SpatialRegion;
use crate::io::error::{Result, SamplingError};

/// Reference image plus optional mask, both resident in memory
#[derive(Clone, Debug)]
pub struct MemoryCollection<I = f32, M = u8> {
    images: ChunkedArray<I>,
    masks: Option<ChunkedArray<M>>,
}

impl<I> MemoryCollection<I> {
    /// Create a collection without a mask; every chunk is of interest
    pub const fn new(images: ChunkedArray<I>) -> Self {
        Self {
            images,
            masks: None,
        }
    }
}

impl<I, M> MemoryCollection<I, M> {
    /// Create a collection whose sampling is restricted by a mask
    pub const fn with_mask(images: ChunkedArray<I>, masks: ChunkedArray<M>) -> Self {
        Self {
            images,
            masks: Some(masks),
        }
    }

    /// Reference image array
    pub const fn images(&self) -> &ChunkedArray<I> {
        &self.images
    }

    /// Mask array, if masking is enabled
    pub const fn masks(&self) -> Option<&ChunkedArray<M>> {
        self.masks.as_ref()
    }
}

fn read_as_f64<T: Copy + ToPrimitive>(array: &ChunkedArray<T>, region: &SpatialRegion) -> ArrayD<f64> {
    array
        .view_region(region)
        .mapv(|value| value.to_f64().unwrap_or(0.0))
}

impl<I, M> ImageCollection for MemoryCollection<I, M>
where
    I: Copy + ToPrimitive,
    M: Copy + ToPrimitive,
{
    fn meta(&self, role: ArrayRole) -> Option<&ArrayMeta> {
        match role {
            ArrayRole::Images => Some(self.images.meta()),
            ArrayRole::Masks => self.masks.as_ref().map(ChunkedArray::meta),
        }
    }

    fn read(&self, role: ArrayRole, region: &SpatialRegion) -> Result<ArrayD<f64>> {
        match role {
            ArrayRole::Images => Ok(read_as_f64(&self.images, region)),
            ArrayRole::Masks => self
                .masks
                .as_ref()
                .map(|masks| read_as_f64(masks, region))
                .ok_or(SamplingError::MissingArray { role }),
        }
    }
}
