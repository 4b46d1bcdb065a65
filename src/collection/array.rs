//! Axis-labelled chunked arrays and their geometric metadata

use ndarray::{ArrayD, ArrayViewD, IxDyn, Slice};

use crate::geometry::region::{AxisSizeMap, SpatialRegion};
use crate::io::error::{Result, invalid_array};

/// Axis labels, extent and native chunking of one array
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayMeta {
    axes: Vec<char>,
    shape: Vec<usize>,
    chunks: Vec<usize>,
}

impl ArrayMeta {
    /// Describe an array by its axis string, shape and chunk shape
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::InvalidArray`] when the three
    /// descriptions disagree in length, an axis label repeats, or a chunk
    /// length is zero
    pub fn new(axes: &str, shape: &[usize], chunks: &[usize]) -> Result<Self> {
        let labels: Vec<char> = axes.chars().collect();

        if labels.len() != shape.len() || labels.len() != chunks.len() {
            return Err(invalid_array(&format!(
                "axes '{axes}' do not match shape {shape:?} and chunks {chunks:?}"
            )));
        }
        for (position, axis) in labels.iter().enumerate() {
            if labels.iter().skip(position + 1).any(|other| other == axis) {
                return Err(invalid_array(&format!("axis '{axis}' is repeated in '{axes}'")));
            }
        }
        if chunks.contains(&0) {
            return Err(invalid_array(&format!(
                "chunk shape {chunks:?} has a zero length"
            )));
        }

        Ok(Self {
            axes: labels,
            shape: shape.to_vec(),
            chunks: chunks.to_vec(),
        })
    }

    /// Axis labels in storage order
    pub fn axes(&self) -> &[char] {
        &self.axes
    }

    /// Array shape in storage order
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Test whether the array carries an axis
    pub fn has_axis(&self, axis: char) -> bool {
        self.axes.contains(&axis)
    }

    /// Length of the array along an axis
    pub fn extent_of(&self, axis: char) -> Option<usize> {
        self.position(axis)
            .and_then(|position| self.shape.get(position).copied())
    }

    /// Native chunk length along an axis
    pub fn chunk_of(&self, axis: char) -> Option<usize> {
        self.position(axis)
            .and_then(|position| self.chunks.get(position).copied())
    }

    /// Total length per axis
    pub fn extent(&self) -> AxisSizeMap {
        self.axes
            .iter()
            .copied()
            .zip(self.shape.iter().copied())
            .collect()
    }

    /// Native chunk length per axis
    pub fn chunk_size(&self) -> AxisSizeMap {
        self.axes
            .iter()
            .copied()
            .zip(self.chunks.iter().copied())
            .collect()
    }

    fn position(&self, axis: char) -> Option<usize> {
        self.axes.iter().position(|&label| label == axis)
    }
}

/// In-memory array addressed by axis labels
#[derive(Clone, Debug)]
pub struct ChunkedArray<T> {
    meta: ArrayMeta,
    data: ArrayD<T>,
}

impl<T> ChunkedArray<T> {
    /// Wrap dense data with its axis labels and chunk shape
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::InvalidArray`] when the labels or
    /// chunks do not fit the data's dimensionality
    pub fn new(data: ArrayD<T>, axes: &str, chunks: &[usize]) -> Result<Self> {
        let meta = ArrayMeta::new(axes, data.shape(), chunks)?;
        Ok(Self { meta, data })
    }

    /// Wrap dense data stored as a single chunk
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::InvalidArray`] when the labels do not
    /// fit the data's dimensionality or an axis is empty
    pub fn single_chunk(data: ArrayD<T>, axes: &str) -> Result<Self> {
        let chunks = data.shape().to_vec();
        Self::new(data, axes, &chunks)
    }

    /// Geometric description of the array
    pub const fn meta(&self) -> &ArrayMeta {
        &self.meta
    }

    /// Dense data in storage order
    pub const fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    /// View the sub-array covered by a region
    ///
    /// Axes the region does not restrict are taken whole; intervals are
    /// clamped to the array extent, so a region past the edge yields an
    /// empty view rather than an error.
    pub fn view_region(&self, region: &SpatialRegion) -> ArrayViewD<'_, T> {
        self.data.slice_each_axis(|description| {
            let axis = self.meta.axes.get(description.axis.index()).copied();
            let len = description.len;
            match axis.and_then(|label| region.get(label)) {
                Some(bounds) => {
                    let start = bounds.start.min(len);
                    let stop = bounds.end.clamp(start, len);
                    Slice::from(start..stop)
                }
                None => Slice::from(..),
            }
        })
    }
}

impl ChunkedArray<u8> {
    /// Build a single-chunk 0/1 mask from boolean data
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::InvalidArray`] when the labels do not
    /// fit the data's dimensionality or an axis is empty
    pub fn from_mask(mask: &ArrayD<bool>, axes: &str) -> Result<Self> {
        Self::single_chunk(mask.mapv(u8::from), axes)
    }

    /// Build an all-true mask of the given shape
    ///
    /// # Errors
    ///
    /// Returns [`crate::SamplingError::InvalidArray`] when the labels do not
    /// fit the shape or an axis is empty
    pub fn filled_mask(shape: &[usize], axes: &str) -> Result<Self> {
        Self::single_chunk(ArrayD::from_elem(IxDyn(shape), 1), axes)
    }
}
