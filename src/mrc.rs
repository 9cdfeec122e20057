use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::GridDomain;
use crate::error::{Result, VoxelError};
use crate::grid::Grid;

const MRC_MAP_MAGIC: u32 = 0x2050_414D; // "MAP " little-endian
const MRC_HEADER_BYTES: usize = 1024;

/// Write an MRC (IMOD dialect) density map: the 1024-byte header described
/// in the component design, followed by one byte per voxel (`num_bins`
/// bytes, little-endian throughout — matching the declared dimensions
/// byte-exactly).
pub fn write_mrc<W: Write>(grid: &Grid, writer: &mut W) -> Result<()> {
	if grid.count() == 0 {
		return Err(VoxelError::EmptyVolume);
	}
	let domain = grid.domain();
	write_header(writer, domain, domain.nx, domain.ny, domain.nz, domain.origin)?;
	writer.write_all(grid.as_bytes()).map_err(io_err)?;
	Ok(())
}

/// The "small" variant: tightly crops to the filled voxels' extent (plus a
/// 1-voxel halo, rounded up to a multiple of 4), shifts the origin
/// accordingly, and writes only that cropped volume.
///
/// Preserves a quirk of the original writer: `nxstart`/`nystart`/`nzstart`
/// are derived from the **pre-crop** extent, not the cropped one, even
/// though `nx`/`ny`/`nz` and the payload describe the cropped grid. A
/// consumer reading `nxstart + xorigin` as the world origin must still do
/// so — this file does not "fix" that inconsistency.
pub fn write_small_mrc<W: Write>(grid: &Grid, writer: &mut W) -> Result<()> {
	let domain = grid.domain();
	let Some((imin, jmin, kmin, imax, jmax, kmax)) = tight_extent(grid) else {
		return Err(VoxelError::EmptyVolume);
	};

	let imin = (imin - 1).max(0);
	let jmin = (jmin - 1).max(0);
	let kmin = (kmin - 1).max(0);
	let imax = (imax + 1).min(domain.nx - 1);
	let jmax = (jmax + 1).min(domain.ny - 1);
	let kmax = (kmax + 1).min(domain.nz - 1);

	let round4 = |n: i64| -> i64 { ((n + 3) / 4) * 4 };
	let new_nx = round4(imax - imin + 1);
	let new_ny = round4(jmax - jmin + 1);
	let new_nz = round4(kmax - kmin + 1);

	let new_origin = (
		domain.origin.0 + domain.spacing * imin as f64,
		domain.origin.1 + domain.spacing * jmin as f64,
		domain.origin.2 + domain.spacing * kmin as f64,
	);
	let cropped_domain = GridDomain::new(domain.spacing, new_origin, new_nx, new_ny, new_nz)?;
	let mut cropped = Grid::zeroed(std::sync::Arc::new(cropped_domain));

	for k in kmin..=kmax {
		for j in jmin..=jmax {
			for i in imin..=imax {
				if grid.is_filled(domain.ijk2pt(i, j, k)) {
					cropped.set(cropped.domain().ijk2pt(i - imin, j - jmin, k - kmin), true);
				}
			}
		}
	}

	// The quirk: nxstart/nystart/nzstart come from the pre-crop extent.
	write_header_with_start(writer, cropped.domain(), new_nx, new_ny, new_nz, new_origin, (domain.nx, domain.ny, domain.nz))?;
	// Unlike the full writer, the original small-MRC payload is exactly
	// xdim*ydim*zdim bytes with no trailing halo, so trim `cropped`'s
	// halo tail before writing.
	let payload_len = cropped.domain().nxyz as usize;
	writer.write_all(&cropped.as_bytes()[..payload_len]).map_err(io_err)?;
	Ok(())
}

fn tight_extent(grid: &Grid) -> Option<(i64, i64, i64, i64, i64, i64)> {
	let domain = grid.domain();
	let mut mins = (i64::MAX, i64::MAX, i64::MAX);
	let mut maxs = (i64::MIN, i64::MIN, i64::MIN);
	let mut any = false;
	for pt in 0..domain.nxyz as usize {
		if grid.is_filled(pt) {
			any = true;
			let (i, j, k) = domain.pt2ijk(pt);
			mins = (mins.0.min(i), mins.1.min(j), mins.2.min(k));
			maxs = (maxs.0.max(i), maxs.1.max(j), maxs.2.max(k));
		}
	}
	any.then_some((mins.0, mins.1, mins.2, maxs.0, maxs.1, maxs.2))
}

fn write_header<W: Write>(
	writer: &mut W,
	domain: &GridDomain,
	nx: i64,
	ny: i64,
	nz: i64,
	origin: (f64, f64, f64),
) -> Result<()> {
	write_header_with_start(writer, domain, nx, ny, nz, origin, (nx, ny, nz))
}

fn write_header_with_start<W: Write>(
	writer: &mut W,
	domain: &GridDomain,
	nx: i64,
	ny: i64,
	nz: i64,
	origin: (f64, f64, f64),
	start_extent: (i64, i64, i64),
) -> Result<()> {
	let mut header = Vec::with_capacity(MRC_HEADER_BYTES);

	let i32_le = |v: i32| v.to_le_bytes();
	let f32_le = |v: f32| v.to_le_bytes();

	header.extend_from_slice(&i32_le(nx as i32)); // word 1
	header.extend_from_slice(&i32_le(ny as i32)); // word 2
	header.extend_from_slice(&i32_le(nz as i32)); // word 3
	header.extend_from_slice(&i32_le(0)); // word 4: mode = byte
	header.extend_from_slice(&i32_le(-(start_extent.0 as i32) / 2)); // word 5: nxstart (pre-crop quirk)
	header.extend_from_slice(&i32_le(-(start_extent.1 as i32) / 2)); // word 6: nystart
	header.extend_from_slice(&i32_le(-(start_extent.2 as i32) / 2)); // word 7: nzstart
	header.extend_from_slice(&i32_le(nx as i32)); // word 8: mx
	header.extend_from_slice(&i32_le(ny as i32)); // word 9: my
	header.extend_from_slice(&i32_le(nz as i32)); // word 10: mz
	header.extend_from_slice(&f32_le((nx as f64 * domain.spacing) as f32)); // word 11: cella.x
	header.extend_from_slice(&f32_le((ny as f64 * domain.spacing) as f32)); // word 12: cella.y
	header.extend_from_slice(&f32_le((nz as f64 * domain.spacing) as f32)); // word 13: cella.z
	header.extend_from_slice(&f32_le(90.0)); // word 14: alpha
	header.extend_from_slice(&f32_le(90.0)); // word 15: beta
	header.extend_from_slice(&f32_le(90.0)); // word 16: gamma
	header.extend_from_slice(&i32_le(1)); // word 17: mapc
	header.extend_from_slice(&i32_le(2)); // word 18: mapr
	header.extend_from_slice(&i32_le(3)); // word 19: maps
	header.extend_from_slice(&f32_le(0.0)); // word 20: amin
	header.extend_from_slice(&f32_le(0.0)); // word 21: amax
	header.extend_from_slice(&f32_le(0.0)); // word 22: amean
	header.extend_from_slice(&i32_le(0)); // word 23: ispg
	header.extend_from_slice(&i32_le(0)); // word 24: nsymbt
	for _ in 0..25 {
		header.extend_from_slice(&i32_le(0)); // words 25-49: unused extra
	}
	header.extend_from_slice(&f32_le(origin.0 as f32)); // word 50: xorigin
	header.extend_from_slice(&f32_le(origin.1 as f32)); // word 51: yorigin
	header.extend_from_slice(&f32_le(origin.2 as f32)); // word 52: zorigin
	header.extend_from_slice(&MRC_MAP_MAGIC.to_le_bytes()); // word 53: "MAP " at byte 208
	let mach = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i32).unwrap_or(0);
	header.extend_from_slice(&i32_le(mach)); // word 54: machine stamp
	header.extend_from_slice(&f32_le(0.0)); // word 55: rms
	header.extend_from_slice(&i32_le(0)); // word 56: nlabl
	header.extend(std::iter::repeat(0u8).take(10 * 80)); // words 57-256: labels

	debug_assert_eq!(header.len(), MRC_HEADER_BYTES);
	writer.write_all(&header).map_err(io_err)
}

fn io_err(source: std::io::Error) -> VoxelError {
	VoxelError::IoFailure { path: std::path::PathBuf::from("<mrc writer>"), source }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;
	use std::sync::Arc;

	#[test]
	fn header_round_trip_has_expected_fields() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 2.0), Atom::new(10.0, 0.0, 0.0, 2.0), Atom::new(0.0, 10.0, 0.0, 2.0)];
		let domain = Arc::new(crate::domain::GridDomain::for_atoms(&atoms, 0.0, 1.0).unwrap());
		let mut grid = Grid::zeroed(domain.clone());
		grid.fill_access((0.0, 0.0, 0.0), 2.0);

		let mut buf = Vec::new();
		write_mrc(&grid, &mut buf).unwrap();

		assert_eq!(buf.len(), MRC_HEADER_BYTES + grid.len());
		let nx = i32::from_le_bytes(buf[0..4].try_into().unwrap());
		assert_eq!(nx, domain.nx as i32);
		let mode = i32::from_le_bytes(buf[12..16].try_into().unwrap());
		assert_eq!(mode, 0);
		let map_magic = u32::from_le_bytes(buf[208..212].try_into().unwrap());
		assert_eq!(map_magic, MRC_MAP_MAGIC);
		let xorigin = f32::from_le_bytes(buf[196..200].try_into().unwrap());
		assert_eq!(xorigin, domain.origin.0 as f32);
	}

	#[test]
	fn empty_grid_is_rejected() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 2.0), Atom::new(10.0, 0.0, 0.0, 2.0), Atom::new(0.0, 10.0, 0.0, 2.0)];
		let domain = Arc::new(crate::domain::GridDomain::for_atoms(&atoms, 0.0, 1.0).unwrap());
		let grid = Grid::zeroed(domain);
		let mut buf = Vec::new();
		assert!(matches!(write_mrc(&grid, &mut buf), Err(VoxelError::EmptyVolume)));
	}
}
