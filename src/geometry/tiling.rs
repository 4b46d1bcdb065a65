//! Row-major tiling of a region into fixed-size cells

use std::collections::BTreeMap;
use std::ops::Range;

use crate::collection::ArrayMeta;
use crate::geometry::axes::{SpatialAxes, is_spatial_axis};
use crate::geometry::region::{AxisSizeMap, SpatialRegion};

#[derive(Clone, Debug, PartialEq, Eq)]
struct TiledAxis {
    axis: char,
    bounds: Range<usize>,
    step: usize,
}

impl TiledAxis {
    fn count(&self) -> usize {
        self.bounds.end.saturating_sub(self.bounds.start).div_ceil(self.step)
    }

    fn cell(&self, index: usize) -> Range<usize> {
        let start = self.bounds.start + index * self.step;
        start..(start + self.step).min(self.bounds.end)
    }
}

/// Regular grid of cells covering a region of the reference array
///
/// Declared spatial axes are cut into cells of a fixed step, the last cell
/// clipped to the region. Every other axis the region restricts is copied
/// unchanged into each cell, and recognized spatial axes of the array that
/// were not declared are pinned to `[0, 1)`. Cells are numbered row-major
/// with the last declared axis varying fastest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    tiled: Vec<TiledAxis>,
    fixed: BTreeMap<char, Range<usize>>,
}

impl TileGrid {
    /// Tile `region` of `reference` along `axes` with the given steps
    ///
    /// Declared axes the array does not carry, or for which no step is
    /// known, are not tiled. Intervals are clamped to the array extent.
    pub fn over_region(
        reference: &ArrayMeta,
        region: &SpatialRegion,
        axes: &SpatialAxes,
        steps: &AxisSizeMap,
    ) -> Self {
        let mut tiled = Vec::with_capacity(axes.len());
        for axis in axes.iter() {
            let (Some(extent), Some(&step)) = (reference.extent_of(axis), steps.get(&axis)) else {
                continue;
            };
            let bounds = region.get(axis).map_or(0..extent, |bounds| {
                let start = bounds.start.min(extent);
                start..bounds.end.clamp(start, extent)
            });
            tiled.push(TiledAxis {
                axis,
                bounds,
                step: step.max(1),
            });
        }

        let mut fixed: BTreeMap<char, Range<usize>> = region
            .iter()
            .filter(|(axis, _)| !tiled.iter().any(|tile| tile.axis == *axis))
            .map(|(axis, bounds)| (axis, bounds.clone()))
            .collect();
        for &axis in reference.axes() {
            if is_spatial_axis(axis) && !axes.contains(axis) {
                fixed.entry(axis).or_insert(0..1);
            }
        }

        Self { tiled, fixed }
    }

    /// Number of cells along each tiled axis, in declared order
    pub fn shape(&self) -> Vec<usize> {
        self.tiled.iter().map(TiledAxis::count).collect()
    }

    /// Labels of the tiled axes, in declared order
    pub fn tiled_axes(&self) -> Vec<char> {
        self.tiled.iter().map(|tile| tile.axis).collect()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.tiled.iter().map(TiledAxis::count).product()
    }

    /// True when the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Region of the cell with the given row-major index
    pub fn cell(&self, flat_index: usize) -> Option<SpatialRegion> {
        if flat_index >= self.len() {
            return None;
        }

        let mut region: SpatialRegion = self
            .fixed
            .iter()
            .map(|(&axis, bounds)| (axis, bounds.clone()))
            .collect();

        let mut remainder = flat_index;
        for tile in self.tiled.iter().rev() {
            let count = tile.count();
            region.set(tile.axis, tile.cell(remainder % count));
            remainder /= count;
        }

        Some(region)
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = SpatialRegion> + '_ {
        (0..self.len()).filter_map(|index| self.cell(index))
    }
}
