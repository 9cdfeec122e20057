use rayon::prelude::*;

use super::Grid;
use crate::domain::GridDomain;

impl Grid {
	/// Erosion-style excluded-volume operator. `self` is an **accessible**
	/// grid (built with `atom.r + probe`); returns the **excluded** grid:
	/// every accessible voxel within `probe` of an outside voxel is carved
	/// away. Net effect is the classical solvent-excluded surface.
	///
	/// The edge-point scan (which voxels need a stamp) is data-parallel;
	/// the stamps themselves are applied sequentially afterwards. Because
	/// every stamp in one pass writes the same value, two stamps touching
	/// the same voxel are idempotent, so this would be equally correct
	/// stamped concurrently with relaxed byte writes.
	pub fn trun_exclude(&self, probe: f64) -> Grid {
		let mut exc = self.clone();
		let r_vox = probe / self.domain().spacing;
		let r_int = r_vox.ceil() as i64;
		let edges = self.collect_interior(|grid, pt, neighbors| {
			!grid.is_filled(pt) && neighbors.into_iter().flatten().any(|n| grid.is_filled(n))
		});
		for pt in edges {
			stamp_sphere(self.domain(), &mut exc, pt, r_int, r_vox, false);
		}
		exc
	}

	/// Dilation-style excluded-volume operator: expands `self` (an
	/// accessible grid) outward by `probe`.
	pub fn grow_exclude(&self, probe: f64) -> Grid {
		let mut exc = self.clone();
		let r_vox = probe / self.domain().spacing;
		let r_int = r_vox.ceil() as i64;
		let edges = self.collect_interior(|grid, pt, neighbors| {
			grid.is_filled(pt) && neighbors.into_iter().flatten().any(|n| !grid.is_filled(n))
		});
		for pt in edges {
			stamp_sphere(self.domain(), &mut exc, pt, r_int, r_vox, true);
		}
		exc
	}

	/// Collect interior voxels (excluding the outermost boundary plane on
	/// every axis, which has no full set of face neighbors) for which
	/// `predicate` holds, reading only `self` (the accessible grid), never
	/// the excluded grid being built.
	fn collect_interior(&self, predicate: impl Fn(&Grid, usize, [Option<usize>; 6]) -> bool + Sync) -> Vec<usize> {
		let domain = self.domain();
		(0..domain.nxyz as usize)
			.into_par_iter()
			.filter(|&pt| {
				let (i, j, k) = domain.pt2ijk(pt);
				if i == 0 || j == 0 || k == 0 || i == domain.nx - 1 || j == domain.ny - 1 || k == domain.nz - 1 {
					return false;
				}
				predicate(self, pt, self.face_neighbors(pt))
			})
			.collect()
	}
}

/// Stamp a sphere of voxel-radius `r_vox` (clamped iteration box `r_int`)
/// centered on voxel `center_pt` into `exc`, writing `value` to every
/// voxel inside the ball. The iteration box is clamped to the domain body
/// so stamps near the boundary never index outside `[0, nxyz)`.
fn stamp_sphere(domain: &GridDomain, exc: &mut Grid, center_pt: usize, r_int: i64, r_vox: f64, value: bool) {
	let (ci, cj, ck) = domain.pt2ijk(center_pt);
	let r_vox2 = r_vox * r_vox;
	let imin = (ci - r_int).max(0);
	let imax = (ci + r_int).min(domain.nx - 1);
	let jmin = (cj - r_int).max(0);
	let jmax = (cj + r_int).min(domain.ny - 1);
	let kmin = (ck - r_int).max(0);
	let kmax = (ck + r_int).min(domain.nz - 1);
	for k in kmin..=kmax {
		let dk = (k - ck) as f64;
		for j in jmin..=jmax {
			let dj = (j - cj) as f64;
			for i in imin..=imax {
				let di = (i - ci) as f64;
				if di * di + dj * dj + dk * dk <= r_vox2 {
					let pt = domain.ijk2pt(i, j, k);
					exc.set(pt, value);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;
	use std::sync::Arc;

	#[test]
	fn trun_exclude_shrinks_accessible_set() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 3.0), Atom::new(10.0, 0.0, 0.0, 3.0), Atom::new(0.0, 10.0, 0.0, 3.0)];
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 1.5, 1.0).unwrap());
		let mut acc = Grid::zeroed(domain);
		acc.fill_access((0.0, 0.0, 0.0), 4.5);
		let exc = acc.trun_exclude(1.5);
		assert!(exc.count() <= acc.count());
	}

	#[test]
	fn grow_exclude_expands_accessible_set() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 3.0), Atom::new(10.0, 0.0, 0.0, 3.0), Atom::new(0.0, 10.0, 0.0, 3.0)];
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 1.5, 1.0).unwrap());
		let mut acc = Grid::zeroed(domain);
		acc.fill_access((0.0, 0.0, 0.0), 3.0);
		let exc = acc.grow_exclude(1.5);
		assert!(exc.count() >= acc.count());
	}
}
