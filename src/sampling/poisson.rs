//! Poisson-disk sampling on an integer lattice
//!
//! Bridson's dart-throwing scheme generalized to any number of axes, with a
//! per-axis minimum separation and the Chebyshev (L∞) metric: two accepted
//! points are always at least one separation apart along some axis. With a
//! separation equal to the patch size this guarantees that patches placed at
//! the points do not overlap.

use ndarray::{ArrayD, IxDyn, Slice};
use rand::Rng;

use crate::io::configuration::POISSON_ATTEMPTS;

/// Extent and separation of one sampled axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiskAxis {
    /// Largest admissible coordinate (coordinates span `0..=limit`)
    pub limit: usize,
    /// Minimum distance between points along this axis
    pub separation: f64,
}

/// Blue-noise point process over a box of integer coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct PoissonDisk {
    axes: Vec<DiskAxis>,
}

impl PoissonDisk {
    /// Create a process over the given axes
    ///
    /// Separations below one lattice step are raised to one, which leaves
    /// the acceptance rule unchanged on integer coordinates.
    pub fn new(axes: impl IntoIterator<Item = DiskAxis>) -> Self {
        let axes = axes
            .into_iter()
            .map(|axis| DiskAxis {
                limit: axis.limit,
                separation: if axis.separation.is_finite() {
                    axis.separation.max(1.0)
                } else {
                    1.0
                },
            })
            .collect();

        Self { axes }
    }

    /// Fill the box until no active point can spawn another
    ///
    /// Returns points in generation order; consumption of `rng` is fully
    /// determined by its state, so a seeded generator reproduces the pattern.
    pub fn fill_space<R: Rng>(&self, rng: &mut R) -> Vec<Vec<usize>> {
        let cell_counts: Vec<usize> = self
            .axes
            .iter()
            .map(|axis| (axis.limit as f64 / axis.separation).floor() as usize + 1)
            .collect();
        let mut cells: ArrayD<Option<usize>> = ArrayD::from_elem(IxDyn(&cell_counts), None);

        let first: Vec<usize> = self
            .axes
            .iter()
            .map(|axis| rng.random_range(0..=axis.limit))
            .collect();

        let mut points = Vec::new();
        let mut active = Vec::new();
        self.insert(&mut cells, &mut points, &mut active, first);

        while !active.is_empty() {
            let slot = rng.random_range(0..active.len());
            let Some(parent) = active.get(slot).and_then(|&index| points.get(index)).cloned()
            else {
                break;
            };

            let mut placed = false;
            for _ in 0..POISSON_ATTEMPTS {
                let Some(candidate) = self.candidate_around(&parent, rng) else {
                    continue;
                };
                if self.is_free(&cells, &points, &candidate) {
                    self.insert(&mut cells, &mut points, &mut active, candidate);
                    placed = true;
                    break;
                }
            }

            if !placed {
                active.swap_remove(slot);
            }
        }

        points
    }

    fn cell_of(&self, point: &[usize]) -> Vec<usize> {
        self.axes
            .iter()
            .zip(point)
            .map(|(axis, &coordinate)| (coordinate as f64 / axis.separation).floor() as usize)
            .collect()
    }

    fn insert(
        &self,
        cells: &mut ArrayD<Option<usize>>,
        points: &mut Vec<Vec<usize>>,
        active: &mut Vec<usize>,
        point: Vec<usize>,
    ) {
        let index = points.len();
        if let Some(cell) = cells.get_mut(self.cell_of(&point).as_slice()) {
            *cell = Some(index);
        }
        points.push(point);
        active.push(index);
    }

    // Uniform in the L∞ shell between one and two separations; None when the
    // draw lands inside the inner box or outside the domain.
    fn candidate_around<R: Rng>(&self, parent: &[usize], rng: &mut R) -> Option<Vec<usize>> {
        let mut reach: f64 = 0.0;
        let mut candidate = Vec::with_capacity(self.axes.len());

        for (axis, &origin) in self.axes.iter().zip(parent) {
            if axis.limit == 0 {
                candidate.push(0);
                continue;
            }
            let step: f64 = rng.random_range(-2.0..=2.0);
            reach = reach.max(step.abs());
            let coordinate = step.mul_add(axis.separation, origin as f64).round();
            if coordinate < 0.0 || coordinate > axis.limit as f64 {
                return None;
            }
            candidate.push(coordinate as usize);
        }

        (reach >= 1.0).then_some(candidate)
    }

    fn is_free(&self, cells: &ArrayD<Option<usize>>, points: &[Vec<usize>], candidate: &[usize]) -> bool {
        let centre = self.cell_of(candidate);
        let neighbourhood = cells.slice_each_axis(|description| {
            let index = centre
                .get(description.axis.index())
                .copied()
                .unwrap_or(0);
            let start = index.saturating_sub(1);
            let stop = (index + 2).min(description.len);
            Slice::from(start..stop.max(start))
        });

        neighbourhood
            .iter()
            .flatten()
            .filter_map(|&index| points.get(index))
            .all(|existing| {
                self.axes
                    .iter()
                    .zip(existing.iter().zip(candidate))
                    .any(|(axis, (&a, &b))| a.abs_diff(b) as f64 >= axis.separation)
            })
    }
}
