use crate::atom::Atom;
use crate::error::{Result, VoxelError};
use crate::settings::{MAX_BINS, MAX_VDW};

/// Axis-aligned grid domain: origin, spacing, and extent, shared (via `Arc`)
/// by every grid produced during one pipeline run. Immutable once built —
/// re-architected from the original's process-wide globals into an owned
/// value passed explicitly to every kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDomain {
	pub spacing: f64,
	pub origin: (f64, f64, f64),
	pub nx: i64,
	pub ny: i64,
	pub nz: i64,
	pub nxy: i64,
	pub nxyz: i64,
	pub num_bins: usize,
}

impl GridDomain {
	/// Build a domain enclosing every valid atom expanded by
	/// `max_vdw + max_probe + 2*spacing`, snapped outward to the nearest
	/// `4*spacing` boundary on every axis.
	pub fn for_atoms(atoms: &[Atom], max_probe: f64, spacing: f64) -> Result<Self> {
		let valid: Vec<&Atom> = atoms.iter().filter(|a| a.is_valid()).collect();
		if valid.len() < 3 {
			return Err(VoxelError::InvalidInput {
				reason: format!("need at least 3 valid atoms, found {}", valid.len()),
			});
		}
		if max_probe <= 0.0 {
			return Err(VoxelError::InvalidInput {
				reason: format!("max_probe must be > 0, got {max_probe}"),
			});
		}

		let (mut xmin, mut ymin, mut zmin) = (f64::INFINITY, f64::INFINITY, f64::INFINITY);
		let (mut xmax, mut ymax, mut zmax) = (f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
		for a in &valid {
			xmin = xmin.min(a.x);
			ymin = ymin.min(a.y);
			zmin = zmin.min(a.z);
			xmax = xmax.max(a.x);
			ymax = ymax.max(a.y);
			zmax = zmax.max(a.z);
		}

		let fact = MAX_VDW + max_probe + 2.0 * spacing;
		let snap_down = |v: f64| -> f64 { (v / (4.0 * spacing)).floor() * 4.0 * spacing };
		let snap_up = |v: f64| -> f64 { (v / (4.0 * spacing)).ceil() * 4.0 * spacing };

		let xmin = snap_down(xmin - fact);
		let ymin = snap_down(ymin - fact);
		let zmin = snap_down(zmin - fact);
		let xmax = snap_up(xmax + fact);
		let ymax = snap_up(ymax + fact);
		let zmax = snap_up(zmax + fact);

		let round4 = |len: f64| -> i64 {
			let n = (len / spacing).ceil() as i64;
			((n + 3) / 4) * 4
		};
		let nx = round4(xmax - xmin).max(4);
		let ny = round4(ymax - ymin).max(4);
		let nz = round4(zmax - zmin).max(4);

		Self::new(spacing, (xmin, ymin, zmin), nx, ny, nz)
	}

	pub fn new(spacing: f64, origin: (f64, f64, f64), nx: i64, ny: i64, nz: i64) -> Result<Self> {
		let nxy = nx * ny;
		let nxyz = nxy * nz;
		let num_bins_u64 = nxyz as u64 + nxy as u64 + nx as u64 + 1;
		if num_bins_u64 > MAX_BINS {
			return Err(VoxelError::GridTooLarge { num_bins: num_bins_u64, limit: MAX_BINS });
		}
		Ok(Self { spacing, origin, nx, ny, nz, nxy, nxyz, num_bins: num_bins_u64 as usize })
	}

	/// Binary-search (to 0.001 Å precision) the smallest spacing whose
	/// resulting `num_bins` stays within `budget` — the "ideal spacing"
	/// suggestion offered when a requested spacing would be too fine.
	pub fn ideal_spacing(atoms: &[Atom], max_probe: f64, budget: u64) -> Result<f64> {
		let fits = |spacing: f64| -> Result<bool> {
			match Self::for_atoms(atoms, max_probe, spacing) {
				Ok(domain) => Ok(domain.num_bins as u64 <= budget),
				Err(VoxelError::GridTooLarge { .. }) => Ok(false),
				Err(e) => Err(e),
			}
		};

		let mut lo = 0.05_f64;
		let mut hi = 5.0_f64;
		let mut guard = 0;
		while !fits(hi)? {
			hi *= 2.0;
			guard += 1;
			if guard > 40 {
				return Err(VoxelError::InvalidInput {
					reason: "could not find a spacing fitting the voxel budget".into(),
				});
			}
		}
		while hi - lo > 0.001 {
			let mid = (lo + hi) / 2.0;
			if fits(mid)? {
				hi = mid;
			} else {
				lo = mid;
			}
		}
		Ok(hi)
	}

	#[inline]
	pub fn ijk2pt(&self, i: i64, j: i64, k: i64) -> usize {
		(i + j * self.nx + k * self.nxy) as usize
	}

	#[inline]
	pub fn pt2ijk(&self, pt: usize) -> (i64, i64, i64) {
		let pt = pt as i64;
		let k = pt / self.nxy;
		let rem = pt % self.nxy;
		let j = rem / self.nx;
		let i = rem % self.nx;
		(i, j, k)
	}

	pub fn pt2xyz(&self, pt: usize) -> (f64, f64, f64) {
		let (i, j, k) = self.pt2ijk(pt);
		(
			self.origin.0 + i as f64 * self.spacing,
			self.origin.1 + j as f64 * self.spacing,
			self.origin.2 + k as f64 * self.spacing,
		)
	}

	/// World coordinates to a voxel index, or `None` if outside the domain.
	pub fn xyz2pt(&self, x: f64, y: f64, z: f64) -> Option<usize> {
		let i = ((x - self.origin.0) / self.spacing).round() as i64;
		let j = ((y - self.origin.1) / self.spacing).round() as i64;
		let k = ((z - self.origin.2) / self.spacing).round() as i64;
		if i < 0 || j < 0 || k < 0 || i >= self.nx || j >= self.ny || k >= self.nz {
			return None;
		}
		Some(self.ijk2pt(i, j, k))
	}

	pub fn same_shape(&self, other: &GridDomain) -> bool {
		self == other
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cube_atoms() -> Vec<Atom> {
		vec![Atom::new(0.0, 0.0, 0.0, 2.0), Atom::new(3.0, 0.0, 0.0, 2.0), Atom::new(0.0, 3.0, 0.0, 2.0)]
	}

	#[test]
	fn dims_are_multiples_of_four() {
		let domain = GridDomain::for_atoms(&cube_atoms(), 1.5, 1.0).unwrap();
		assert_eq!(domain.nx % 4, 0);
		assert_eq!(domain.ny % 4, 0);
		assert_eq!(domain.nz % 4, 0);
		assert_eq!(domain.num_bins, (domain.nxyz + domain.nxy + domain.nx + 1) as usize);
	}

	#[test]
	fn roundtrips_index_to_world_and_back() {
		let domain = GridDomain::for_atoms(&cube_atoms(), 1.5, 1.0).unwrap();
		let pt = domain.ijk2pt(2, 3, 4);
		let (i, j, k) = domain.pt2ijk(pt);
		assert_eq!((i, j, k), (2, 3, 4));
		let (x, y, z) = domain.pt2xyz(pt);
		assert_eq!(domain.xyz2pt(x, y, z), Some(pt));
	}

	#[test]
	fn rejects_too_few_atoms() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 1.0)];
		assert!(GridDomain::for_atoms(&atoms, 1.5, 1.0).is_err());
	}
}
