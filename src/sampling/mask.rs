//! Region-of-interest filtering against a rescaled mask
//!
//! Filtering is an explicit two-step operation: a reference-space region is
//! first rescaled into mask coordinates, then the mask block it covers is
//! reduced by its local mean and tested for a nonzero result.

use std::fmt;

use bitvec::prelude::*;
use ndarray::{ArrayBase, Data, Dimension};

use crate::collection::{ArrayRole, ImageCollection};
use crate::geometry::region::SpatialRegion;
use crate::geometry::scale::AxisScale;
use crate::geometry::tiling::TileGrid;
use crate::io::error::Result;

/// Fraction of truthy (nonzero) elements in a mask block
///
/// Empty blocks have a mean of zero.
pub fn local_mean<S, D>(block: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if block.is_empty() {
        return 0.0;
    }
    let truthy = block.iter().filter(|&&value| value != 0.0).count();
    truthy as f64 / block.len() as f64
}

/// Test whether a mask block contains any region of interest
pub fn has_content<S, D>(block: &ArrayBase<S, D>) -> bool
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    local_mean(block) > 0.0
}

/// Accepts reference-space regions whose mask footprint is nonzero
pub struct MaskFilter<'a, C: ?Sized> {
    collection: &'a C,
    scale: &'a AxisScale,
    masked: bool,
}

impl<'a, C> MaskFilter<'a, C>
where
    C: ImageCollection + ?Sized,
{
    /// Build a filter over a collection's mask, if it has one
    pub fn new(collection: &'a C, scale: &'a AxisScale) -> Self {
        Self {
            collection,
            scale,
            masked: collection.meta(ArrayRole::Masks).is_some(),
        }
    }

    /// Whether a mask restricts sampling at all
    pub const fn is_masked(&self) -> bool {
        self.masked
    }

    /// Decide whether a region holds any region of interest
    ///
    /// Empty regions are always rejected. Without a mask every other region
    /// is accepted. With a mask, a region whose rescaled footprint falls
    /// outside the mask is rejected rather than reported as an error.
    ///
    /// # Errors
    ///
    /// Propagates failures from the collection's mask read
    pub fn accepts(&self, region: &SpatialRegion) -> Result<bool> {
        if region.is_empty() {
            return Ok(false);
        }
        if !self.masked {
            return Ok(true);
        }

        let footprint = self.scale.to_secondary(region);
        if footprint.is_empty() {
            tracing::trace!(%region, %footprint, "region maps outside the mask");
            return Ok(false);
        }

        let block = self.collection.read(ArrayRole::Masks, &footprint)?;
        Ok(has_content(&block))
    }
}

/// Accepted/rejected flags over the cells of a [`TileGrid`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockOccupancy {
    shape: Vec<usize>,
    bits: BitVec,
}

impl BlockOccupancy {
    /// Evaluate `accept` on every cell of a grid, in row-major order
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `accept`
    pub fn evaluate<F>(grid: &TileGrid, mut accept: F) -> Result<Self>
    where
        F: FnMut(&SpatialRegion) -> Result<bool>,
    {
        let mut bits = bitvec![0; grid.len()];
        for (index, cell) in grid.cells().enumerate() {
            if accept(&cell)? {
                bits.set(index, true);
            }
        }

        Ok(Self {
            shape: grid.shape(),
            bits,
        })
    }

    /// Cells per tiled axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of accepted cells
    pub fn count_occupied(&self) -> usize {
        self.bits.count_ones()
    }

    /// Row-major indices of accepted cells
    pub fn occupied_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Regions of accepted cells, in row-major order
    pub fn regions<'g>(&'g self, grid: &'g TileGrid) -> impl Iterator<Item = SpatialRegion> + 'g {
        self.occupied_indices()
            .filter_map(move |index| grid.cell(index))
    }
}

/// Renders the last tiled axis as columns, `#` for accepted cells
impl fmt::Display for BlockOccupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.shape.last().copied().unwrap_or(1).max(1);
        for (index, bit) in self.bits.iter().enumerate() {
            if index > 0 && index % columns == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", if *bit { '#' } else { '.' })?;
        }
        Ok(())
    }
}
