use std::sync::Arc;

use super::common::access_from_atoms;
use crate::atom::Atom;
use crate::domain::GridDomain;
use crate::error::Result;
use crate::grid::Grid;

pub struct CavitiesResult {
	pub accessible_grid: Grid,
	pub accessible_voxels: usize,
	pub excluded_grid: Grid,
	pub excluded_voxels: usize,
	pub surface_area: f64,
}

/// Enclosed-cavity extraction at a given probe, distinct from the
/// `Grid::fill_cavities` kernel it's built on: rather than folding
/// cavities back into the shell, this isolates them as their own result.
pub fn extract_cavities(atoms: &[Atom], domain: Arc<GridDomain>, shell_radius: f64, probe: f64) -> Result<CavitiesResult> {
	let mut shell_acc = access_from_atoms(domain.clone(), atoms, shell_radius);
	shell_acc.fill_cavities();
	let shell_exc = shell_acc.trun_exclude(shell_radius);

	let access = access_from_atoms(domain.clone(), atoms, probe);
	let mut cav_acc = shell_acc.clone();
	cav_acc.subt(&access)?;

	let mut chan_acc = Grid::zeroed(domain.clone());
	if let Some(first) = cav_acc.get_grid_point() {
		cav_acc.get_connected_point_into(&mut chan_acc, first, crate::settings::DEFAULT_MAX_LIST);
	}
	if let Some(last) = cav_acc.last_filled_point() {
		cav_acc.get_connected_point_into(&mut chan_acc, last, crate::settings::DEFAULT_MAX_LIST);
	}
	cav_acc.subt(&chan_acc)?;

	let mut exc_cav = cav_acc.grow_exclude(probe);
	exc_cav.intersect(&shell_exc)?;

	let accessible_voxels = cav_acc.count();
	let excluded_voxels = exc_cav.count();
	let surface_area = exc_cav.surface_area();

	Ok(CavitiesResult { accessible_grid: cav_acc, accessible_voxels, excluded_grid: exc_cav, excluded_voxels, surface_area })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;

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
	fn finds_the_enclosed_cavity_in_a_hollow_shell() {
		let verts = icosahedron_vertices(5.0);
		let atoms: Vec<Atom> = verts.iter().map(|(x, y, z)| Atom::new(*x, *y, *z, 2.0)).collect();
		let domain = Arc::new(GridDomain::for_atoms(&atoms, 1.5, 1.0).unwrap());
		let result = extract_cavities(&atoms, domain, 2.0, 1.4).unwrap();
		assert!(result.accessible_voxels > 0);
	}
}
