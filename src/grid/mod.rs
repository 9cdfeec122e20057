mod cavity;
mod connectivity;
mod morphology;
mod rasterize;
mod setops;
mod surface;

pub use surface::SurfaceHistogram;

use std::sync::Arc;

use crate::domain::GridDomain;
use crate::error::{Result, VoxelError};

/// A dense voxel grid: one byte per voxel (non-zero = filled), sharing a
/// `GridDomain` by reference so every grid built within one pipeline run
/// carries provably-identical shape without re-threading the domain
/// through every call.
///
/// Byte (rather than bit) addressing keeps the parallel relaxed-write story
/// simple: two rayon tasks racing to set the same voxel to the same value
/// is sound because each task's output slice is statically disjoint at the
/// outer-plane boundary rayon splits on.
#[derive(Clone)]
pub struct Grid {
	domain: Arc<GridDomain>,
	bytes: Vec<u8>,
}

impl Grid {
	/// A freshly zeroed grid over `domain`. The trailing halo
	/// (`pt >= nxyz`) stays zero for the grid's entire lifetime.
	pub fn zeroed(domain: Arc<GridDomain>) -> Self {
		let num_bins = domain.num_bins;
		Self { domain, bytes: vec![0u8; num_bins] }
	}

	pub fn domain(&self) -> &Arc<GridDomain> {
		&self.domain
	}

	#[inline]
	pub fn is_filled(&self, pt: usize) -> bool {
		self.bytes[pt] != 0
	}

	#[inline]
	pub fn set(&mut self, pt: usize, filled: bool) {
		self.bytes[pt] = filled as u8;
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Total number of filled voxels.
	pub fn count(&self) -> usize {
		use rayon::prelude::*;
		self.bytes.par_iter().filter(|&&b| b != 0).count()
	}

	pub fn zero(&mut self) {
		self.bytes.iter_mut().for_each(|b| *b = 0);
	}

	/// Copy `other`'s filled voxels into `self`; both must share a domain.
	/// Returns the resulting filled count.
	pub fn copy_from(&mut self, other: &Grid) -> Result<usize> {
		self.require_same_shape(other)?;
		self.bytes.copy_from_slice(&other.bytes);
		Ok(self.count())
	}

	/// `self <- !self` (bitwise complement within the addressable body;
	/// the halo tail is left untouched at zero).
	pub fn invert(&mut self) {
		let nxyz = self.domain.nxyz as usize;
		self.bytes[..nxyz].iter_mut().for_each(|b| *b = (*b == 0) as u8);
	}

	pub(crate) fn require_same_shape(&self, other: &Grid) -> Result<()> {
		if self.domain.same_shape(&other.domain) {
			Ok(())
		} else {
			Err(VoxelError::ShapeMismatch)
		}
	}

	/// The 6 face-adjacent neighbor indices of `pt` that lie within the
	/// addressable body (`0..nxyz`), paired with whether stepping that
	/// direction stays in-bounds along the relevant axis.
	pub(crate) fn face_neighbors(&self, pt: usize) -> [Option<usize>; 6] {
		let (i, j, k) = self.domain.pt2ijk(pt);
		let (nx, ny, nz) = (self.domain.nx, self.domain.ny, self.domain.nz);
		let mk = |cond: bool, di: i64, dj: i64, dk: i64| -> Option<usize> {
			if cond {
				Some(self.domain.ijk2pt(i + di, j + dj, k + dk))
			} else {
				None
			}
		};
		[
			mk(i > 0, -1, 0, 0),
			mk(i < nx - 1, 1, 0, 0),
			mk(j > 0, 0, -1, 0),
			mk(j < ny - 1, 0, 1, 0),
			mk(k > 0, 0, 0, -1),
			mk(k < nz - 1, 0, 0, 1),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn small_domain() -> Arc<GridDomain> {
		Arc::new(GridDomain::new(1.0, (0.0, 0.0, 0.0), 4, 4, 4).unwrap())
	}

	#[test]
	fn zeroed_grid_counts_zero() {
		let grid = Grid::zeroed(small_domain());
		assert_eq!(grid.count(), 0);
	}

	#[test]
	fn copy_requires_same_shape() {
		let mut a = Grid::zeroed(small_domain());
		let b = Grid::zeroed(Arc::new(GridDomain::new(1.0, (0.0, 0.0, 0.0), 8, 8, 8).unwrap()));
		assert!(a.copy_from(&b).is_err());
	}

	#[test]
	fn invert_flips_body_not_halo() {
		let mut grid = Grid::zeroed(small_domain());
		grid.set(0, true);
		grid.invert();
		assert!(!grid.is_filled(0));
		assert!(grid.is_filled(1));
	}
}
