//! Image collections: the named arrays samplers read geometry and masks from
//!
//! A collection exposes a reference array (`images`) and, optionally, a
//! region-of-interest array (`masks`) that may be stored at a different
//! resolution and with different axes.

use std::fmt;

use ndarray::ArrayD;

use crate::geometry::region::{AxisSizeMap, ScaleMap, SpatialRegion};
use crate::geometry::scale::AxisScale;
use crate::io::error::Result;

/// Axis-labelled arrays and their metadata
pub mod array;
/// Collection backed by arrays held in memory
pub mod memory;

pub use array::{ArrayMeta, ChunkedArray};
pub use memory::MemoryCollection;

/// Named arrays a collection may hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayRole {
    /// Reference array whose chunk grid drives sampling
    Images,
    /// Region-of-interest mask, truthy where sampling is allowed
    Masks,
}

impl ArrayRole {
    /// Name of the role as used in collection descriptions
    pub const fn name(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Masks => "masks",
        }
    }
}

impl fmt::Display for ArrayRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Access contract samplers rely on
///
/// Implementors provide metadata and region reads; everything else is
/// derived from those two operations.
pub trait ImageCollection {
    /// Geometric description of an array, if the collection holds it
    fn meta(&self, role: ArrayRole) -> Option<&ArrayMeta>;

    /// Read the sub-array covered by a region as `f64` values
    ///
    /// Axes the region does not restrict are read whole.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::MissingArray`] when the collection has
    /// no array for `role`; implementations backed by storage propagate
    /// their own read failures
    fn read(&self, role: ArrayRole, region: &SpatialRegion) -> Result<ArrayD<f64>>;

    /// Axis labels of an array in storage order
    fn axes(&self, role: ArrayRole) -> Option<&[char]> {
        self.meta(role).map(ArrayMeta::axes)
    }

    /// Native chunk length per axis
    fn chunk_size(&self, role: ArrayRole) -> Option<AxisSizeMap> {
        self.meta(role).map(ArrayMeta::chunk_size)
    }

    /// Total length per axis
    fn extent(&self, role: ArrayRole) -> Option<AxisSizeMap> {
        self.meta(role).map(ArrayMeta::extent)
    }

    /// Ratio of an array's extent to the reference array's, per shared axis
    fn scale(&self, role: ArrayRole) -> Option<ScaleMap> {
        let reference = self.meta(ArrayRole::Images)?;
        let secondary = self.meta(role)?;
        Some(AxisScale::between(reference, secondary).factors())
    }
}
