use std::sync::Arc;

use super::common::access_from_atoms;
use crate::atom::Atom;
use crate::domain::GridDomain;
use crate::error::Result;
use crate::grid::Grid;
use crate::settings::{TUNNEL_ACCESSIBLE_BOUND, TUNNEL_EXCLUDED_BOUND};

pub struct TunnelResult {
	pub grid: Grid,
	pub accessible_voxels: usize,
	pub excluded_voxels: usize,
	pub channel_accessible_voxels: usize,
	pub surface_area: f64,
}

/// World-space anchor seeds used to pick out the ribosome exit tunnel in
/// the H. marismortui large subunit structure this pipeline was originally
/// built against. These are domain data for one reference system, not
/// core parameters — callers targeting a different structure supply their
/// own anchor list to `extract_tunnel`.
pub fn default_tunnel_anchors() -> Vec<(f64, f64, f64)> {
	vec![
		(74.8, 130.0, 83.6),  // highest tunnel point
		(68.3, 132.2, 85.6),  // largest area
		(53.6, 144.8, 69.6),  // below main
		(49.9, 151.8, 67.3),  // 2nd largest & low
		(38.4, 160.4, 63.6),  // low blob point
		(35.6, 163.6, 61.6),  // lowest point
		(53.6, 141.3, 66.4),
		(71.5, 120.4, 97.3),
		(71.5, 125.0, 98.1),
		(70.3, 131.2, 81.9),
		(55.7, 140.2, 73.8),
		(44.6, 153.2, 68.7),
	]
}

/// Extract the tunnel reachable from `anchors` within the shell bounded by
/// `shell_radius`. Returns `Ok(None)` — success, no output — if either hard
/// plausibility bound is exceeded (§4.8), matching `PlausibilityExceeded`'s
/// success-exit contract.
pub fn extract_tunnel(
	atoms: &[Atom],
	domain: Arc<GridDomain>,
	shell_radius: f64,
	tunnel_probe: f64,
	trim_probe: f64,
	anchors: &[(f64, f64, f64)],
) -> Result<Option<TunnelResult>> {
	let voxel_vol = domain.spacing.powi(3);

	let mut shell_acc = access_from_atoms(domain.clone(), atoms, shell_radius);
	shell_acc.fill_cavities();
	let mut shell_exc = shell_acc.trun_exclude(shell_radius);
	if trim_probe > 0.0 {
		shell_exc = shell_exc.trun_exclude(trim_probe);
	}

	let access = access_from_atoms(domain, atoms, tunnel_probe);
	let mut chan_acc = shell_exc.clone();
	chan_acc.subt(&access)?;
	chan_acc.intersect(&shell_exc)?;
	let channel_accessible_voxels = chan_acc.count();

	let mut tunn_acc = Grid::zeroed(chan_acc.domain().clone());
	for &(x, y, z) in anchors {
		let (reached, _) = chan_acc.get_connected(x, y, z);
		tunn_acc.merge(&reached)?;
	}

	let accessible_voxels = tunn_acc.count();
	if accessible_voxels as f64 * voxel_vol > TUNNEL_ACCESSIBLE_BOUND {
		return Ok(None);
	}

	let mut tunn_exc = tunn_acc.grow_exclude(tunnel_probe);
	tunn_exc.intersect(&shell_exc)?;
	let excluded_voxels = tunn_exc.count();
	if excluded_voxels as f64 * voxel_vol > TUNNEL_EXCLUDED_BOUND {
		return Ok(None);
	}

	let surface_area = tunn_exc.surface_area();
	Ok(Some(TunnelResult { grid: tunn_exc, accessible_voxels, excluded_voxels, channel_accessible_voxels, surface_area }))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;

	#[test]
	fn implausible_tunnel_returns_none_not_error() {
		// A single small blob: any tunnel found from world-space anchors
		// far outside it should find nothing, well under the bounds.
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 3.0), Atom::new(10.0, 0.0, 0.0, 3.0), Atom::new(0.0, 10.0, 0.0, 3.0)];
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 6.0, 1.0).unwrap());
		let result = extract_tunnel(&atoms, domain, 6.0, 1.5, 3.0, &[(1000.0, 1000.0, 1000.0)]).unwrap();
		assert!(result.is_none() || result.unwrap().accessible_voxels == 0);
	}
}
