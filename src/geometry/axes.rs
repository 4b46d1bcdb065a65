//! Validated ordered sets of spatial axis labels

use std::fmt;
use std::str::FromStr;

use crate::io::configuration::{DEFAULT_SPATIAL_AXES, RECOGNIZED_SPATIAL_AXES};
use crate::io::error::{Result, SamplingError, invalid_axes};

/// Check whether a label can take part in spatial tiling
pub fn is_spatial_axis(axis: char) -> bool {
    RECOGNIZED_SPATIAL_AXES.contains(axis)
}

/// Ordered, duplicate-free list of spatial axes a sampler tiles over
///
/// Declaration order matters: it fixes the row-major enumeration order of
/// chunks and patches (the last axis varies fastest) and the positional
/// meaning of per-axis patch sizes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpatialAxes {
    labels: Vec<char>,
}

impl SpatialAxes {
    /// Validate an axis string such as `"YX"` or `"ZYX"`
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidAxes`] when the string is empty,
    /// contains a label outside `Z`, `Y`, `X`, or repeats a label
    pub fn new(axes: &str) -> Result<Self> {
        if axes.is_empty() {
            return Err(invalid_axes(&axes, &"at least one axis is required"));
        }

        let mut labels = Vec::with_capacity(axes.len());
        for axis in axes.chars() {
            if !is_spatial_axis(axis) {
                return Err(invalid_axes(
                    &axes,
                    &format!("'{axis}' is not one of {RECOGNIZED_SPATIAL_AXES}"),
                ));
            }
            if labels.contains(&axis) {
                return Err(invalid_axes(&axes, &format!("'{axis}' is repeated")));
            }
            labels.push(axis);
        }

        Ok(Self { labels })
    }

    /// Axis labels in declared order
    pub fn labels(&self) -> &[char] {
        &self.labels
    }

    /// Iterate over axis labels in declared order
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.labels.iter().copied()
    }

    /// Test whether an axis was declared
    pub fn contains(&self, axis: char) -> bool {
        self.labels.contains(&axis)
    }

    /// Number of declared axes
    pub const fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a validated axis set
    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for SpatialAxes {
    fn default() -> Self {
        Self {
            labels: DEFAULT_SPATIAL_AXES.chars().collect(),
        }
    }
}

impl FromStr for SpatialAxes {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for SpatialAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in &self.labels {
            write!(f, "{axis}")?;
        }
        Ok(())
    }
}
