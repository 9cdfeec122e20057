/// Splits a voxel count into zero-padded millions/thousands/units groups
/// so a column of scalar results lines up, mirroring the original writer's
/// `printVol`/`padLeft` grouping.
fn voxel_groups(vox: i64) -> (String, String, String) {
	let millions = vox / 1_000_000;
	let thousands = (vox / 1_000) % 1_000;
	let units = vox % 1_000;
	(format!("{millions:3}"), format!("{thousands:03}"), format!("{units:03}"))
}

/// Tab-separated scalar result line: `probe, grid, voxels_compact,
/// surface_area, num_atoms, input, column_legend`, where `voxels_compact`
/// is the voxel count (already scaled to Å³ by the caller) printed as
/// three zero-padded groups.
pub fn format_scalar_result(probe: f64, spacing: f64, voxels_angstrom3: i64, surface_area: f64, num_atoms: usize, input: &str, column_legend: &str) -> String {
	let (millions, thousands, units) = voxel_groups(voxels_angstrom3);
	format!("{probe}\t{spacing}\t{millions},{thousands},{units}\t{surface_area}\t{num_atoms}\t{input}\t{column_legend}")
}
