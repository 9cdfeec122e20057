//! Minimal end-to-end demo: read an XYZR atom list, build the accessible and
//! excluded surfaces at one probe radius, and print either a scalar result
//! line or a JSON summary. Not a full per-pipeline CLI — channels, tunnels,
//! cavities, and the sweeps are library calls, not flags here.

use std::env;
use std::fs;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use voxvol::domain::GridDomain;
use voxvol::grid::Grid;

fn main() -> Result<()> {
	let args: Vec<String> = env::args().collect();
	let mut input = String::new();
	let mut spacing = 1.0f64;
	let mut probe = 1.5f64;
	let mut json = false;

	let mut i = 1;
	while i < args.len() {
		match args[i].as_str() {
			"-i" => {
				i += 1;
				input = args.get(i).cloned().unwrap_or_default();
			}
			"-g" => {
				i += 1;
				spacing = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(spacing);
			}
			"-p" => {
				i += 1;
				probe = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(probe);
			}
			"--json" => json = true,
			"-h" | "--help" => {
				eprintln!("voxvol-demo -i <xyzr file> [-g <spacing>] [-p <probe>] [--json]");
				return Ok(());
			}
			_ => {}
		}
		i += 1;
	}

	if input.is_empty() {
		bail!("missing required -i <xyzr file>");
	}

	let text = fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
	let atoms = voxvol::atom::parse_xyzr(&text)?;

	let domain = Arc::new(GridDomain::for_atoms(&atoms, probe, spacing)?);
	let mut access = Grid::zeroed(domain.clone());
	access.fill_access_from_list(&atoms, probe, &voxvol::reporter::NullReporter);
	let excluded = access.trun_exclude(probe);
	let voxels = excluded.count();
	let surface_area = excluded.surface_area();

	if json {
		#[derive(Serialize)]
		struct Output {
			input: String,
			probe: f64,
			spacing: f64,
			num_atoms: usize,
			excluded_voxels: usize,
			surface_area: f64,
		}
		let output = Output { input, probe, spacing, num_atoms: atoms.len(), excluded_voxels: voxels, surface_area };
		println!("{}", serde_json::to_string_pretty(&output)?);
	} else {
		let line = voxvol::format::format_scalar_result(
			probe,
			spacing,
			voxels as i64,
			surface_area,
			atoms.len(),
			&input,
			"probe\tgrid\tvoxels\tsurf\tnatoms\tinput\tlegend",
		);
		println!("{line}");
	}

	Ok(())
}
