use std::sync::Arc;

use super::common::access_from_atoms;
use crate::atom::Atom;
use crate::domain::GridDomain;
use crate::error::Result;

/// One row of the fractional-solvent-volume sweep.
pub struct FsvSample {
	pub probe: f64,
	pub shell_voxels: usize,
	pub solvent_voxels: usize,
	pub fsv: f64,
}

/// Sweeps `small_probe` from `0` to `big_probe` in `probe_step`
/// increments. At each step, carves the solvent footprint out of a
/// (optionally trimmed) excluded shell built at `big_probe` and reports
/// the fraction of the shell's volume that remains solvent-accessible.
///
/// Grounded directly in the original `fsv_calc` tool.
pub fn fractional_solvent_volume(
	atoms: &[Atom],
	domain: Arc<GridDomain>,
	big_probe: f64,
	trim_probe: f64,
	probe_step: f64,
) -> Result<Vec<FsvSample>> {
	let shell = super::common::exclude_from_atoms(domain.clone(), atoms, big_probe);
	let shell_voxels = shell.count();

	let mut sm_shell = shell.clone();
	if trim_probe > 0.0 {
		sm_shell = shell.trun_exclude(trim_probe);
	}

	let mut samples = Vec::new();
	let mut small_probe = 0.0;
	while small_probe < big_probe {
		let mut solvent_acc = sm_shell.clone();
		let probe_acc = access_from_atoms(domain.clone(), atoms, small_probe);
		solvent_acc.subt(&probe_acc)?;

		let mut solvent_exc = solvent_acc.grow_exclude(small_probe);
		solvent_exc.intersect(&sm_shell)?;

		let solvent_voxels = solvent_exc.count();
		let fsv = solvent_voxels as f64 / shell_voxels.max(1) as f64;
		samples.push(FsvSample { probe: small_probe, shell_voxels, solvent_voxels, fsv });

		small_probe += probe_step;
	}
	Ok(samples)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;

	#[test]
	fn fsv_decreases_as_probe_grows_toward_big_probe() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 3.0), Atom::new(10.0, 0.0, 0.0, 3.0), Atom::new(0.0, 10.0, 0.0, 3.0)];
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 6.0, 1.0).unwrap());
		let samples = fractional_solvent_volume(&atoms, domain, 6.0, 1.5, 1.0).unwrap();
		assert!(!samples.is_empty());
		assert!(samples.iter().all(|s| (0.0..=1.0 + 1e-9).contains(&s.fsv)));
	}
}
