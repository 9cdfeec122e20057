use std::sync::Arc;

use super::common::{access_from_atoms, exclude_from_atoms, insert_sorted_desc};
use crate::atom::Atom;
use crate::domain::GridDomain;
use crate::error::{Result, VoxelError};
use crate::grid::Grid;

/// First non-null wins, in this exact order: explicit voxel count, explicit
/// percent, num-channels discovery, then the flat default.
#[derive(Clone, Debug)]
pub enum MinSizePolicy {
	ExplicitVoxels(usize),
	ExplicitPercent(f64),
	NumChannels(usize),
	/// 1% of the big-probe volume, floored at 20 voxels.
	Default,
}

pub struct ChannelResult {
	pub grid: Grid,
	pub accessible_voxels: usize,
	pub excluded_voxels: usize,
	pub surface_area: f64,
}

/// Extract the single channel reachable from a world-space seed point
/// (§4.7, single-channel variant).
pub fn extract_single_channel(
	atoms: &[Atom],
	domain: Arc<GridDomain>,
	big_probe: f64,
	small_probe: f64,
	trim_probe: f64,
	seed: (f64, f64, f64),
) -> ChannelResult {
	let big = exclude_from_atoms(domain.clone(), atoms, big_probe);
	let trim = big.trun_exclude(trim_probe);
	let sm = access_from_atoms(domain, atoms, small_probe);

	let mut solv_acc = trim.clone();
	solv_acc.subt(&sm).expect("shared domain");

	let (channel_acc, _) = solv_acc.get_connected(seed.0, seed.1, seed.2);
	let accessible_voxels = channel_acc.count();

	let mut channel_exc = channel_acc.grow_exclude(small_probe);
	channel_exc.intersect(&trim).expect("shared domain");
	let excluded_voxels = channel_exc.count();
	let surface_area = channel_exc.surface_area();

	ChannelResult { grid: channel_exc, accessible_voxels, excluded_voxels, surface_area }
}

/// Discover and extract every channel whose size exceeds the resolved
/// minimum, in descending order of discovery (§4.7, "AllChannel" variant).
pub fn extract_all_channels(
	atoms: &[Atom],
	domain: Arc<GridDomain>,
	big_probe: f64,
	small_probe: f64,
	trim_probe: f64,
	policy: MinSizePolicy,
) -> Result<Vec<ChannelResult>> {
	let big = exclude_from_atoms(domain.clone(), atoms, big_probe);
	let big_vox = big.count();
	let trim = big.trun_exclude(trim_probe);
	let sm = access_from_atoms(domain, atoms, small_probe);

	let fresh_solv_acc = || -> Grid {
		let mut g = trim.clone();
		g.subt(&sm).expect("shared domain");
		g
	};

	let min_size = resolve_min_size(&policy, big_vox, fresh_solv_acc())?;

	let mut solv_acc = fresh_solv_acc();
	let mut results = Vec::new();
	while solv_acc.count() > min_size {
		let Some(gp) = solv_acc.get_grid_point() else { break };
		let (chan_acc, _) = solv_acc.get_connected_point(gp);
		let vol = chan_acc.count();
		solv_acc.subt(&chan_acc).expect("shared domain");
		if vol <= min_size {
			continue;
		}
		let mut chan_exc = chan_acc.grow_exclude(small_probe);
		chan_exc.intersect(&trim).expect("shared domain");
		let excluded_voxels = chan_exc.count();
		let surface_area = chan_exc.surface_area();
		results.push(ChannelResult { grid: chan_exc, accessible_voxels: vol, excluded_voxels, surface_area });
	}
	Ok(results)
}

fn resolve_min_size(policy: &MinSizePolicy, big_vox: usize, mut solv_acc: Grid) -> Result<usize> {
	match policy {
		MinSizePolicy::ExplicitVoxels(v) => Ok(*v),
		MinSizePolicy::ExplicitPercent(p) => Ok(percent_of(big_vox, *p)),
		MinSizePolicy::Default => Ok(percent_of(big_vox, 0.01)),
		MinSizePolicy::NumChannels(n) => {
			let mut vollist: Vec<usize> = Vec::new();
			loop {
				let Some(gp) = solv_acc.get_grid_point() else { break };
				let (chan, _) = solv_acc.get_connected_point(gp);
				let vol = chan.count();
				solv_acc.subt(&chan).expect("shared domain");
				if vol == 0 {
					continue;
				}
				insert_sorted_desc(&mut vollist, vol, *n + 2);
			}
			if vollist.len() < *n {
				return Err(VoxelError::InvalidInput {
					reason: format!("requested {n} channels but only {} were discovered", vollist.len()),
				});
			}
			let candidate = vollist[*n - 1] as i64 - 1;
			if candidate < 10 {
				return Err(VoxelError::InvalidInput { reason: "no channels were found".into() });
			}
			Ok(candidate as usize)
		}
	}
}

fn percent_of(big_vox: usize, percent: f64) -> usize {
	let mut p = percent;
	while p > 1.0 {
		p /= 100.0;
	}
	((big_vox as f64 * p) as usize).max(20)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;

	/// A 10x10x40 brick of atoms with a straight cylindrical hole of
	/// radius 3 along z (the "channel extraction" end-to-end scenario).
	fn brick_with_channel() -> Vec<Atom> {
		let mut atoms = Vec::new();
		for x in (-5..=5).step_by(2) {
			for y in (-5..=5).step_by(2) {
				if ((x * x + y * y) as f64).sqrt() < 3.0 {
					continue;
				}
				for z in (0..=40).step_by(4) {
					atoms.push(Atom::new(x as f64, y as f64, z as f64, 1.5));
				}
			}
		}
		atoms
	}

	#[test]
	fn single_channel_extraction_reports_a_channel() {
		let atoms = brick_with_channel();
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 6.0, 1.0).unwrap());
		let result = extract_single_channel(&atoms, domain, 6.0, 1.5, 3.0, (0.0, 0.0, 20.0));
		assert!(result.accessible_voxels > 0);
	}

	#[test]
	fn all_channels_extraction_respects_minimum_size() {
		let atoms = brick_with_channel();
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 6.0, 1.0).unwrap());
		let results = extract_all_channels(&atoms, domain, 6.0, 1.5, 3.0, MinSizePolicy::ExplicitVoxels(5)).unwrap();
		for r in &results {
			assert!(r.accessible_voxels > 5);
		}
	}
}
