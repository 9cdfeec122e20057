use super::Grid;
use crate::atom::Atom;
use crate::reporter::Reporter;
use crate::settings::PROGRESS_TICKS;

impl Grid {
	/// Set every voxel whose center lies inside a sphere of
	/// `effective_radius` around `center`. Iterates only the enclosing
	/// integer box and tests squared distance, so it is idempotent on
	/// repeated calls and trivially parallel across voxels of one sphere —
	/// here done sequentially per sphere since spheres are processed one
	/// atom at a time by the caller.
	///
	/// Returns the number of voxels newly set (not already filled).
	pub fn fill_access(&mut self, center: (f64, f64, f64), effective_radius: f64) -> usize {
		let domain = self.domain().clone();
		let spacing = domain.spacing;
		if effective_radius <= 0.0 {
			return 0;
		}
		let r_vox = effective_radius / spacing;
		let r_vox2 = r_vox * r_vox;

		let ci = (center.0 - domain.origin.0) / spacing;
		let cj = (center.1 - domain.origin.1) / spacing;
		let ck = (center.2 - domain.origin.2) / spacing;

		let clamp_range = |c: f64, n: i64| -> (i64, i64) {
			let lo = (c - r_vox).floor().max(0.0) as i64;
			let hi = (c + r_vox).ceil().min((n - 1) as f64) as i64;
			(lo, hi)
		};
		let (imin, imax) = clamp_range(ci, domain.nx);
		let (jmin, jmax) = clamp_range(cj, domain.ny);
		let (kmin, kmax) = clamp_range(ck, domain.nz);
		if imin > imax || jmin > jmax || kmin > kmax {
			return 0;
		}

		let mut newly_set = 0usize;
		for k in kmin..=kmax {
			let dk = k as f64 - ck;
			for j in jmin..=jmax {
				let dj = j as f64 - cj;
				for i in imin..=imax {
					let di = i as f64 - ci;
					if di * di + dj * dj + dk * dk <= r_vox2 {
						let pt = domain.ijk2pt(i, j, k);
						if !self.is_filled(pt) {
							self.set(pt, true);
							newly_set += 1;
						}
					}
				}
			}
		}
		newly_set
	}

	/// Rasterize `atoms` onto the grid at `effective_radius = atom.r +
	/// probe` and report the total filled count after the union. Reports
	/// progress in ~60 ticks against `atoms.len()`.
	pub fn fill_access_from_list(&mut self, atoms: &[Atom], probe: f64, reporter: &dyn Reporter) -> usize {
		let tick_every = (atoms.len() / PROGRESS_TICKS).max(1);
		for (idx, atom) in atoms.iter().enumerate() {
			if !atom.is_valid() {
				continue;
			}
			self.fill_access((atom.x, atom.y, atom.z), atom.r + probe);
			if idx % tick_every == 0 {
				reporter.tick(idx, atoms.len());
			}
		}
		reporter.tick(atoms.len(), atoms.len());
		self.count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::GridDomain;
	use crate::reporter::NullReporter;
	use std::sync::Arc;

	fn domain_for(atoms: &[Atom], probe: f64) -> Arc<GridDomain> {
		Arc::new(GridDomain::for_atoms(atoms, probe, 1.0).unwrap())
	}

	#[test]
	fn single_atom_radius_two_gives_33_voxels() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 2.0), Atom::new(10.0, 0.0, 0.0, 2.0), Atom::new(0.0, 10.0, 0.0, 2.0)];
		let domain = domain_for(&atoms, 0.0);
		let mut grid = Grid::zeroed(domain.clone());
		let pt = domain.xyz2pt(0.0, 0.0, 0.0).unwrap();
		let (x, y, z) = domain.pt2xyz(pt);
		let filled = grid.fill_access((x, y, z), 2.0);
		assert_eq!(filled, 33);
	}

	#[test]
	fn repeated_fill_is_idempotent() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 2.0), Atom::new(10.0, 0.0, 0.0, 2.0), Atom::new(0.0, 10.0, 0.0, 2.0)];
		let domain = domain_for(&atoms, 0.0);
		let mut grid = Grid::zeroed(domain.clone());
		let first = grid.fill_access((0.0, 0.0, 0.0), 2.0);
		assert!(first > 0);
		let second = grid.fill_access((0.0, 0.0, 0.0), 2.0);
		assert_eq!(second, 0);
	}

	#[test]
	fn two_overlapping_atoms_give_61_voxels() {
		let atoms = vec![
			Atom::new(0.0, 0.0, 0.0, 2.0),
			Atom::new(3.0, 0.0, 0.0, 2.0),
			Atom::new(0.0, 10.0, 0.0, 2.0),
		];
		let domain = domain_for(&atoms, 0.0);
		let mut grid = Grid::zeroed(domain);
		let total = grid.fill_access_from_list(&atoms[..2], 0.0, &NullReporter);
		assert_eq!(total, 61);
	}
}
