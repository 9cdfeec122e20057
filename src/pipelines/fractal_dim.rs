use std::sync::Arc;

use super::common::{access_from_atoms, exclude_from_atoms};
use crate::atom::Atom;
use crate::domain::GridDomain;
use crate::error::Result;

pub struct FractalDimResult {
	pub volume_slope: f64,
	pub volume_correlation: f64,
	pub surface_slope: f64,
	pub surface_correlation: f64,
}

/// Sweeps `spacing` geometrically from `grid_start` to `grid_end` in
/// `steps` steps, rebuilding the domain at each spacing, and accumulates a
/// weighted linear regression of `log(count)` on `-log(spacing)` for both
/// total voxel count (expected slope ~3 for an ideal solid) and surface
/// voxel count (expected slope ~2).
pub fn fractal_dimension(atoms: &[Atom], probe: f64, grid_start: f64, grid_end: f64, steps: usize) -> Result<FractalDimResult> {
	let ratio = (grid_end / grid_start).powf(1.0 / steps as f64);

	let mut volume_samples: Vec<(f64, f64, f64)> = Vec::new();
	let mut surface_samples: Vec<(f64, f64, f64)> = Vec::new();

	let mut spacing = grid_start;
	while spacing <= grid_end {
		let domain = Arc::new(GridDomain::for_atoms(atoms, probe.max(0.5), spacing)?);
		let grid = if probe > 0.0 {
			exclude_from_atoms(domain, atoms, probe)
		} else {
			access_from_atoms(domain, atoms, 0.0)
		};

		let voxels = grid.count();
		let edge_voxels = grid.surface_histogram().surface_voxel_count() as usize;

		let x = -spacing.ln();
		let weight = 1.0 / x - 1.0 / grid_end + 1e-6;
		if voxels > 0 {
			volume_samples.push((weight, x, (voxels as f64).ln()));
		}
		if edge_voxels > 0 {
			surface_samples.push((weight, x, (edge_voxels as f64).ln()));
		}

		spacing *= ratio;
	}

	let (volume_slope, volume_correlation) = weighted_linear_fit(&volume_samples);
	let (surface_slope, surface_correlation) = weighted_linear_fit(&surface_samples);

	Ok(FractalDimResult { volume_slope, volume_correlation, surface_slope, surface_correlation })
}

fn weighted_linear_fit(samples: &[(f64, f64, f64)]) -> (f64, f64) {
	let mut w_sum = 0.0;
	let mut sx = 0.0;
	let mut sy = 0.0;
	let mut sxx = 0.0;
	let mut sxy = 0.0;
	let mut syy = 0.0;
	for &(w, x, y) in samples {
		w_sum += w;
		sx += w * x;
		sy += w * y;
		sxx += w * x * x;
		sxy += w * x * y;
		syy += w * y * y;
	}
	let denom = w_sum * sxx - sx * sx;
	let slope = if denom.abs() > 1e-12 { (w_sum * sxy - sx * sy) / denom } else { 0.0 };
	let corr_den = ((w_sum * sxx - sx * sx) * (w_sum * syy - sy * sy)).sqrt();
	let corr = if corr_den.abs() > 1e-12 { (w_sum * sxy - sx * sy) / corr_den } else { 0.0 };
	(slope, corr)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;

	/// A densely-packed 20x20x20 cube of atoms, `probe = 0`, spacing 0.4
	/// to 0.8 over 10 steps: volume slope should land near 3, surface
	/// slope near 2.
	#[test]
	fn filled_cube_gives_slopes_near_three_and_two() {
		let mut atoms = Vec::new();
		for x in (0..20).step_by(2) {
			for y in (0..20).step_by(2) {
				for z in (0..20).step_by(2) {
					atoms.push(Atom::new(x as f64, y as f64, z as f64, 1.2));
				}
			}
		}
		let result = fractal_dimension(&atoms, 0.0, 0.4, 0.8, 10).unwrap();
		assert!((2.5..3.5).contains(&result.volume_slope), "volume slope was {}", result.volume_slope);
		assert!((1.5..2.5).contains(&result.surface_slope), "surface slope was {}", result.surface_slope);
	}
}
