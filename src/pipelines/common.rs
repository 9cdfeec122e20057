use std::sync::Arc;

use crate::atom::Atom;
use crate::domain::GridDomain;
use crate::grid::Grid;
use crate::reporter::{NullReporter, Reporter};

/// `fill_access_from_list` convenience wrapper used at the top of nearly
/// every pipeline.
pub fn access_from_atoms(domain: Arc<GridDomain>, atoms: &[Atom], probe: f64) -> Grid {
	access_from_atoms_reported(domain, atoms, probe, &NullReporter)
}

pub fn access_from_atoms_reported(domain: Arc<GridDomain>, atoms: &[Atom], probe: f64, reporter: &dyn Reporter) -> Grid {
	let mut grid = Grid::zeroed(domain);
	grid.fill_access_from_list(atoms, probe, reporter);
	grid
}

/// Builds the excluded grid directly from an atom list: rasterize the
/// accessible sphere set at `probe`, then erode it by the same probe.
pub fn exclude_from_atoms(domain: Arc<GridDomain>, atoms: &[Atom], probe: f64) -> Grid {
	access_from_atoms(domain, atoms, probe).trun_exclude(probe)
}

/// Insert `value` into a descending-sorted `Vec`, capped at `capacity`
/// (values that would sort past the cap are dropped) — mirrors the
/// original channel-discovery pass's fixed-capacity `vollist`.
pub fn insert_sorted_desc(list: &mut Vec<usize>, value: usize, capacity: usize) {
	let pos = list.partition_point(|&v| v > value);
	if pos < capacity {
		list.insert(pos, value);
		list.truncate(capacity);
	}
}
