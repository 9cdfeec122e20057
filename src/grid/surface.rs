use rayon::prelude::*;

use super::Grid;
use crate::settings::SURFACE_CLASS_WEIGHTS;

/// Per-class voxel counts from the 6-neighbor surface classifier.
/// Index 0 holds fully-interior filled voxels (all 6 neighbors filled);
/// indices 1..=9 are the classes described in the classifier dispatch and
/// are the ones that contribute to `area()`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceHistogram(pub [u64; 10]);

impl SurfaceHistogram {
	pub fn count(&self, class: usize) -> u64 {
		self.0[class]
	}

	/// Sum of classes 1..=9 — the voxels the classifier considers "on the
	/// surface" as opposed to fully interior (class 0).
	pub fn surface_voxel_count(&self) -> u64 {
		self.0[1..=9].iter().sum()
	}

	pub fn total_voxel_count(&self) -> u64 {
		self.0.iter().sum()
	}
}

const OPPOSITE_PAIRS: [(usize, usize); 3] = [(0, 1), (2, 3), (4, 5)];

impl Grid {
	/// Classify every filled voxel by its count of empty 6-face neighbors
	/// and accumulate the resulting class histogram. Neighbors that fall
	/// outside the domain body are treated as empty (the halo is always
	/// zero).
	pub fn surface_histogram(&self) -> SurfaceHistogram {
		let domain = self.domain();
		let counts: [u64; 10] = (0..domain.nxyz as usize)
			.into_par_iter()
			.filter(|&pt| self.is_filled(pt))
			.fold(
				|| [0u64; 10],
				|mut acc, pt| {
					acc[self.classify_edge_point(pt)] += 1;
					acc
				},
			)
			.reduce(
				|| [0u64; 10],
				|mut a, b| {
					for i in 0..10 {
						a[i] += b[i];
					}
					a
				},
			);
		SurfaceHistogram(counts)
	}

	/// `spacing^2 * sum(weight[class] * count[class])`, calibrating
	/// voxel-face patches to continuous surface area.
	pub fn surface_area(&self) -> f64 {
		let hist = self.surface_histogram();
		let spacing2 = self.domain().spacing * self.domain().spacing;
		let weighted: f64 = (0..=9).map(|i| SURFACE_CLASS_WEIGHTS[i] * hist.count(i) as f64).sum();
		spacing2 * weighted
	}

	fn classify_edge_point(&self, pt: usize) -> usize {
		let neighbors = self.face_neighbors(pt);
		let is_empty = |idx: usize| -> bool {
			match neighbors[idx] {
				Some(n) => !self.is_filled(n),
				None => true,
			}
		};
		let empty_count = (0..6).filter(|&i| is_empty(i)).count();

		match empty_count {
			0 | 1 => empty_count,
			2 => {
				if OPPOSITE_PAIRS.iter().any(|&(a, b)| is_empty(a) && is_empty(b)) {
					7
				} else {
					2
				}
			}
			3 => {
				if OPPOSITE_PAIRS.iter().any(|&(a, b)| is_empty(a) && is_empty(b)) {
					4
				} else {
					3
				}
			}
			4 => {
				if OPPOSITE_PAIRS.iter().any(|&(a, b)| !is_empty(a) && !is_empty(b)) {
					8
				} else {
					5
				}
			}
			5 => 6,
			6 => 9,
			_ => unreachable!("at most 6 face neighbors"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;
	use crate::domain::GridDomain;
	use std::sync::Arc;

	#[test]
	fn single_atom_surface_area_matches_known_value() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 2.0), Atom::new(10.0, 0.0, 0.0, 2.0), Atom::new(0.0, 10.0, 0.0, 2.0)];
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 0.0, 1.0).unwrap());
		let mut grid = Grid::zeroed(domain);
		grid.fill_access((0.0, 0.0, 0.0), 2.0);
		let area = grid.surface_area();
		// Continuous value is 4*pi*r^2 ~= 50.27; the voxel classifier
		// approximates it, not reproduces it exactly.
		assert!((30.0..70.0).contains(&area), "area was {area}");
	}

	#[test]
	fn histogram_classes_sum_to_surface_voxel_count() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 2.0), Atom::new(10.0, 0.0, 0.0, 2.0), Atom::new(0.0, 10.0, 0.0, 2.0)];
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 0.0, 1.0).unwrap());
		let mut grid = Grid::zeroed(domain);
		grid.fill_access((0.0, 0.0, 0.0), 2.0);
		let hist = grid.surface_histogram();
		assert_eq!(hist.total_voxel_count(), grid.count() as u64);
		assert!(hist.surface_voxel_count() <= hist.total_voxel_count());
	}
}
