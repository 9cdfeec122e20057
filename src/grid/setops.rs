use rayon::prelude::*;

use super::Grid;
use crate::error::Result;

impl Grid {
	/// `self <- self & !other`. Returns the number of voxels that were set
	/// in both grids before the operation (the portion actually removed).
	pub fn subt(&mut self, other: &Grid) -> Result<usize> {
		self.require_same_shape(other)?;
		let removed = self
			.bytes
			.par_iter_mut()
			.zip(other.bytes.par_iter())
			.filter(|(a, b)| **a != 0 && **b != 0)
			.count();
		self.bytes
			.par_iter_mut()
			.zip(other.bytes.par_iter())
			.for_each(|(a, b)| {
				if *b != 0 {
					*a = 0;
				}
			});
		Ok(removed)
	}

	/// `self <- self & other`. Returns the remaining filled count.
	pub fn intersect(&mut self, other: &Grid) -> Result<usize> {
		self.require_same_shape(other)?;
		self.bytes
			.par_iter_mut()
			.zip(other.bytes.par_iter())
			.for_each(|(a, b)| {
				if *b == 0 {
					*a = 0;
				}
			});
		Ok(self.count())
	}

	/// `self <- self | other`. Returns the number of voxels filled in
	/// *both* grids before the operation (the overlap), not the final
	/// total — matching the original's `merge_Grids` contract.
	pub fn merge(&mut self, other: &Grid) -> Result<usize> {
		self.require_same_shape(other)?;
		let overlap = self
			.bytes
			.par_iter()
			.zip(other.bytes.par_iter())
			.filter(|(a, b)| **a != 0 && **b != 0)
			.count();
		self.bytes
			.par_iter_mut()
			.zip(other.bytes.par_iter())
			.for_each(|(a, b)| {
				if *b != 0 {
					*a = 1;
				}
			});
		Ok(overlap)
	}
}
