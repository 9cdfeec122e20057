use super::Grid;
use crate::reporter::{NullReporter, Reporter};
use crate::settings::{CONNECTED_RANGE_SEARCH_RADIUS, CONNECTED_SEARCH_RADIUS, DEFAULT_MAX_LIST};

impl Grid {
	/// First filled voxel index in the addressable body, or `None` if the
	/// grid is entirely empty.
	pub fn get_grid_point(&self) -> Option<usize> {
		let nxyz = self.domain().nxyz as usize;
		(0..nxyz).find(|&pt| self.is_filled(pt))
	}

	/// Seeded 6-neighbor flood fill from voxel index `gp`. Returns the
	/// destination grid and the newly connected voxel count (excluding the
	/// seed itself, per the original contract — callers that want the
	/// seed counted add one).
	pub fn get_connected_point(&self, gp: usize) -> (Grid, usize) {
		self.get_connected_point_capped(gp, DEFAULT_MAX_LIST)
	}

	pub fn get_connected_point_capped(&self, gp: usize, max_list: usize) -> (Grid, usize) {
		let mut dest = Grid::zeroed(self.domain().clone());
		let newly_connected = self.get_connected_point_into(&mut dest, gp, max_list);
		(dest, newly_connected)
	}

	/// As `get_connected_point_capped`, but accumulates into a caller-owned
	/// `dest` instead of allocating a fresh one — the signature the tunnel
	/// and cavity pipelines need when folding several seeds into one
	/// destination grid. Returns the count newly set by this call, not
	/// counting the seed voxel itself (matching `get_connected_point`'s
	/// contract).
	pub fn get_connected_point_into(&self, dest: &mut Grid, gp: usize, max_list: usize) -> usize {
		if gp >= self.domain().nxyz as usize || !self.is_filled(gp) {
			return 0;
		}
		dest.set(gp, true);
		let mut newly_connected = 0usize;
		let mut frontier = vec![gp];
		while !frontier.is_empty() {
			let mut next = Vec::new();
			for pt in frontier {
				for n in self.face_neighbors(pt).into_iter().flatten() {
					if self.is_filled(n) && !dest.is_filled(n) {
						dest.set(n, true);
						newly_connected += 1;
						if next.len() < max_list {
							next.push(n);
						}
					}
				}
			}
			frontier = next;
		}
		newly_connected
	}

	/// World-space seeded flood fill. If `(x, y, z)` maps to an empty
	/// voxel, searches a `±3 Å` neighborhood for the nearest filled voxel
	/// and seeds from there instead, logging a diagnostic either way.
	pub fn get_connected(&self, x: f64, y: f64, z: f64) -> (Grid, usize) {
		self.get_connected_with_radius(x, y, z, CONNECTED_SEARCH_RADIUS, &NullReporter)
	}

	/// As `get_connected`, but with a `±1.5 Å` fallback search radius.
	pub fn get_connected_range(&self, x: f64, y: f64, z: f64) -> (Grid, usize) {
		self.get_connected_with_radius(x, y, z, CONNECTED_RANGE_SEARCH_RADIUS, &NullReporter)
	}

	pub fn get_connected_with_radius(&self, x: f64, y: f64, z: f64, search_radius: f64, reporter: &dyn Reporter) -> (Grid, usize) {
		let domain = self.domain().clone();
		let direct = domain.xyz2pt(x, y, z).filter(|&pt| self.is_filled(pt));
		let seed = match direct {
			Some(pt) => Some(pt),
			None => {
				reporter.diagnostic(&format!(
					"seed ({x}, {y}, {z}) is empty; searching a {search_radius}A neighborhood"
				));
				self.nearest_filled_within(x, y, z, search_radius)
			}
		};
		match seed {
			Some(pt) => self.get_connected_point(pt),
			None => {
				reporter.diagnostic(&format!("no filled voxel found near ({x}, {y}, {z})"));
				(Grid::zeroed(domain), 0)
			}
		}
	}

	fn nearest_filled_within(&self, x: f64, y: f64, z: f64, radius: f64) -> Option<usize> {
		let domain = self.domain();
		let r_int = (radius / domain.spacing).ceil() as i64;
		let ci = ((x - domain.origin.0) / domain.spacing).round() as i64;
		let cj = ((y - domain.origin.1) / domain.spacing).round() as i64;
		let ck = ((z - domain.origin.2) / domain.spacing).round() as i64;

		let mut best: Option<(usize, f64)> = None;
		for k in (ck - r_int).max(0)..=(ck + r_int).min(domain.nz - 1) {
			for j in (cj - r_int).max(0)..=(cj + r_int).min(domain.ny - 1) {
				for i in (ci - r_int).max(0)..=(ci + r_int).min(domain.nx - 1) {
					let d2 = ((i - ci).pow(2) + (j - cj).pow(2) + (k - ck).pow(2)) as f64;
					if d2 > (r_int * r_int) as f64 {
						continue;
					}
					let pt = domain.ijk2pt(i, j, k);
					if self.is_filled(pt) {
						match best {
							Some((_, best_d2)) if best_d2 <= d2 => {}
							_ => best = Some((pt, d2)),
						}
					}
				}
			}
		}
		best.map(|(pt, _)| pt)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;
	use crate::domain::GridDomain;
	use std::sync::Arc;

	fn filled_blob() -> Grid {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 3.0), Atom::new(10.0, 0.0, 0.0, 3.0), Atom::new(0.0, 10.0, 0.0, 3.0)];
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 0.0, 1.0).unwrap());
		let mut grid = Grid::zeroed(domain);
		grid.fill_access((0.0, 0.0, 0.0), 3.0);
		grid
	}

	#[test]
	fn connected_from_exact_seed_covers_whole_blob() {
		let grid = filled_blob();
		let (dest, newly) = grid.get_connected(0.0, 0.0, 0.0);
		assert_eq!(newly + 1, grid.count());
		assert_eq!(dest.count(), grid.count());
	}

	#[test]
	fn reflooding_an_already_covered_dest_grows_nothing() {
		let grid = filled_blob();
		let gp = grid.get_grid_point().unwrap();
		let mut dest = Grid::zeroed(grid.domain().clone());
		let first = grid.get_connected_point_into(&mut dest, gp, DEFAULT_MAX_LIST);
		assert_eq!(first + 1, grid.count());
		let again = grid.get_connected_point_into(&mut dest, gp, DEFAULT_MAX_LIST);
		assert_eq!(again, 0);
	}

	#[test]
	fn empty_seed_falls_back_to_neighborhood_search() {
		let grid = filled_blob();
		let (dest, newly) = grid.get_connected(0.9, 0.0, 0.0);
		assert!(newly > 0 || dest.count() > 0);
	}
}
