use super::Grid;

impl Grid {
	/// Finds enclosed cavities and folds them into the filled set.
	///
	/// 1. Compute the tight filled bounding box.
	/// 2. `cav <- bbox - self` (the complement restricted to the box).
	/// 3. Flood-fill `cav` from its first and last filled voxel (always
	///    exterior, since the box is axis-aligned and convex) into `chan`.
	/// 4. `cav <- cav - chan` — only enclosed cavities remain.
	/// 5. `self <- self | cav`.
	///
	/// Returns the cavity voxel count folded in. Idempotent: running this
	/// twice in a row returns `0` the second time, since step 2 then finds
	/// no complement voxels left inside the box.
	pub fn fill_cavities(&mut self) -> usize {
		let Some(bbox) = self.bounding_box_grid() else {
			return 0;
		};
		let mut cav = bbox;
		cav.subt(self).expect("bbox shares this grid's domain by construction");
		if cav.count() == 0 {
			return 0;
		}

		let mut chan = Grid::zeroed(self.domain().clone());
		if let Some(first) = cav.get_grid_point() {
			cav.get_connected_point_into(&mut chan, first, crate::settings::DEFAULT_MAX_LIST);
		}
		if let Some(last) = cav.last_filled_point() {
			cav.get_connected_point_into(&mut chan, last, crate::settings::DEFAULT_MAX_LIST);
		}
		cav.subt(&chan).expect("shared domain");

		let cavity_count = cav.count();
		self.merge(&cav).expect("shared domain");
		cavity_count
	}

	/// Last filled voxel index in the addressable body, scanning backward.
	pub fn last_filled_point(&self) -> Option<usize> {
		let nxyz = self.domain().nxyz as usize;
		(0..nxyz).rev().find(|&pt| self.is_filled(pt))
	}

	/// A fully-solid grid spanning the tight `(i, j, k)` extrema of this
	/// grid's filled voxels, or `None` if nothing is filled.
	fn bounding_box_grid(&self) -> Option<Grid> {
		let domain = self.domain();
		let nxyz = domain.nxyz as usize;
		let mut mins = (i64::MAX, i64::MAX, i64::MAX);
		let mut maxs = (i64::MIN, i64::MIN, i64::MIN);
		let mut any = false;
		for pt in 0..nxyz {
			if self.is_filled(pt) {
				any = true;
				let (i, j, k) = domain.pt2ijk(pt);
				mins = (mins.0.min(i), mins.1.min(j), mins.2.min(k));
				maxs = (maxs.0.max(i), maxs.1.max(j), maxs.2.max(k));
			}
		}
		if !any {
			return None;
		}
		let mut bbox = Grid::zeroed(self.domain().clone());
		for k in mins.2..=maxs.2 {
			for j in mins.1..=maxs.1 {
				for i in mins.0..=maxs.0 {
					bbox.set(domain.ijk2pt(i, j, k), true);
				}
			}
		}
		Some(bbox)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;
	use crate::domain::GridDomain;
	use std::sync::Arc;

	fn icosahedron_vertices(radius: f64) -> Vec<(f64, f64, f64)> {
		let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
		let raw = [
			(-1.0, phi, 0.0), (1.0, phi, 0.0), (-1.0, -phi, 0.0), (1.0, -phi, 0.0),
			(0.0, -1.0, phi), (0.0, 1.0, phi), (0.0, -1.0, -phi), (0.0, 1.0, -phi),
			(phi, 0.0, -1.0), (phi, 0.0, 1.0), (-phi, 0.0, -1.0), (-phi, 0.0, 1.0),
		];
		let norm = (1.0 + phi * phi).sqrt();
		raw.iter().map(|(x, y, z)| (x / norm * radius, y / norm * radius, z / norm * radius)).collect()
	}

	#[test]
	fn hollow_shell_gets_a_filled_cavity() {
		let verts = icosahedron_vertices(5.0);
		let atoms: Vec<Atom> = verts.iter().map(|(x, y, z)| Atom::new(*x, *y, *z, 2.0)).collect();
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 0.0, 1.0).unwrap());
		let mut grid = Grid::zeroed(domain);
		for a in &atoms {
			grid.fill_access((a.x, a.y, a.z), a.r);
		}
		let before = grid.count();
		let added = grid.fill_cavities();
		assert!(added > 0, "expected an enclosed cavity at the shell's center");
		assert_eq!(grid.count(), before + added);
	}

	#[test]
	fn fill_cavities_is_idempotent() {
		let verts = icosahedron_vertices(5.0);
		let atoms: Vec<Atom> = verts.iter().map(|(x, y, z)| Atom::new(*x, *y, *z, 2.0)).collect();
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 0.0, 1.0).unwrap());
		let mut grid = Grid::zeroed(domain);
		for a in &atoms {
			grid.fill_access((a.x, a.y, a.z), a.r);
		}
		grid.fill_cavities();
		assert_eq!(grid.fill_cavities(), 0);
	}
}
