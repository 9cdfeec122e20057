use std::sync::Arc;

use super::common::access_from_atoms;
use crate::atom::Atom;
use crate::domain::GridDomain;
use crate::error::Result;
use crate::grid::Grid;

/// Which list's accessible volume is merged into the other's before
/// erosion, mirroring the original `-merge` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Merge {
	None,
	FirstIntoSecond,
	SecondIntoFirst,
}

pub struct TwoVolumeResult {
	pub grid: Grid,
	pub volume_one: usize,
	pub volume_two: usize,
	pub composed_voxels: usize,
}

/// Builds an excluded volume for each of two independent atom lists on a
/// shared domain (filling cavities before erosion), then subtracts one
/// from the other. Grounded in the original "TwoVol" tool, minus its
/// 3D-printing `makerbot_fill` support-fill step, which is out of scope.
pub fn two_volume_composition(
	atoms_one: &[Atom],
	atoms_two: &[Atom],
	domain: Arc<GridDomain>,
	probe_one: f64,
	probe_two: f64,
	merge: Merge,
) -> Result<TwoVolumeResult> {
	let min_probe = probe_one.min(probe_two);

	let mut acc_one = access_from_atoms(domain.clone(), atoms_one, probe_one);
	if merge == Merge::SecondIntoFirst {
		let acc_two_min = access_from_atoms(domain.clone(), atoms_two, min_probe);
		acc_one.merge(&acc_two_min)?;
	}
	acc_one.fill_cavities();
	let volume_one = acc_one.count();
	let exc_one = acc_one.trun_exclude(probe_one);

	let mut acc_two = access_from_atoms(domain.clone(), atoms_two, probe_two);
	if merge == Merge::FirstIntoSecond {
		let acc_one_min = access_from_atoms(domain.clone(), atoms_one, min_probe);
		acc_two.merge(&acc_one_min)?;
	}
	acc_two.fill_cavities();
	let volume_two = acc_two.count();
	let exc_two = acc_two.trun_exclude(probe_two);

	let mut composed = if merge == Merge::SecondIntoFirst { exc_one } else { exc_two.clone() };
	let subtrahend = if merge == Merge::SecondIntoFirst { &exc_two } else { &exc_one };
	composed.subt(subtrahend)?;
	let composed_voxels = composed.count();

	Ok(TwoVolumeResult { grid: composed, volume_one, volume_two, composed_voxels })
}
