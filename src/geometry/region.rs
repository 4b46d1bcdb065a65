//! Axis-labelled half-open regions and per-axis size maps

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Per-axis positive sizes (patch or chunk lengths)
pub type AxisSizeMap = BTreeMap<char, usize>;

/// Per-axis ratio of a secondary array's extent to the reference extent
pub type ScaleMap = BTreeMap<char, f64>;

/// Rectangular region expressed as one half-open interval per axis
///
/// Axes without an interval are unrestricted: readers take the full extent
/// of the array along them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpatialRegion {
    bounds: BTreeMap<char, Range<usize>>,
}

impl SpatialRegion {
    /// Create an unrestricted region
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`SpatialRegion::set`]
    #[must_use]
    pub fn with_axis(mut self, axis: char, bounds: Range<usize>) -> Self {
        self.set(axis, bounds);
        self
    }

    /// Restrict an axis to `[start, stop)`
    ///
    /// Inverted intervals are collapsed to an empty interval at `start`.
    pub fn set(&mut self, axis: char, bounds: Range<usize>) {
        let stop = bounds.end.max(bounds.start);
        self.bounds.insert(axis, bounds.start..stop);
    }

    /// Interval along an axis, if the axis is restricted
    pub fn get(&self, axis: char) -> Option<&Range<usize>> {
        self.bounds.get(&axis)
    }

    /// Remove the restriction along an axis
    pub fn remove(&mut self, axis: char) -> Option<Range<usize>> {
        self.bounds.remove(&axis)
    }

    /// Iterate over restricted axes and their intervals
    pub fn iter(&self) -> impl Iterator<Item = (char, &Range<usize>)> + '_ {
        self.bounds.iter().map(|(&axis, range)| (axis, range))
    }

    /// Restricted axis labels
    pub fn axes(&self) -> impl Iterator<Item = char> + '_ {
        self.bounds.keys().copied()
    }

    /// Lower corner along an axis (0 when unrestricted)
    pub fn origin(&self, axis: char) -> usize {
        self.bounds.get(&axis).map_or(0, |range| range.start)
    }

    /// Interval length along an axis, if restricted
    pub fn len_along(&self, axis: char) -> Option<usize> {
        self.bounds
            .get(&axis)
            .map(|range| range.end.saturating_sub(range.start))
    }

    /// True when any restricted axis has an empty interval
    pub fn is_empty(&self) -> bool {
        self.bounds.values().any(|range| range.start >= range.end)
    }

    /// Test whether `other` lies entirely within this region
    ///
    /// An axis restricted here must also be restricted in `other`, with an
    /// interval inside this one.
    pub fn contains_region(&self, other: &Self) -> bool {
        self.bounds.iter().all(|(axis, outer)| {
            other
                .bounds
                .get(axis)
                .is_some_and(|inner| inner.start >= outer.start && inner.end <= outer.end)
        })
    }
}

impl fmt::Display for SpatialRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (axis, range) in &self.bounds {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{axis}:{}..{}", range.start, range.end)?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<(char, Range<usize>)> for SpatialRegion {
    fn from_iter<I: IntoIterator<Item = (char, Range<usize>)>>(iter: I) -> Self {
        let mut region = Self::new();
        for (axis, bounds) in iter {
            region.set(axis, bounds);
        }
        region
    }
}
