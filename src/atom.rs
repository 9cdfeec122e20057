use serde::{Deserialize, Serialize};

/// A sphere `(x, y, z, r)` in Angstroms, as consumed by the voxel engine.
///
/// Structure-file parsing (PDB/mmCIF, atom-type radius lookup) is out of
/// scope; callers hand in a ready list of spheres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
	pub x: f64,
	pub y: f64,
	pub z: f64,
	pub r: f64,
}

impl Atom {
	pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
		Self { x, y, z, r }
	}

	/// An atom is valid input iff its radius falls in `(0, 100)`; anything
	/// else is silently dropped by callers before the atom list reaches the
	/// core (see `filter_valid`).
	pub fn is_valid(&self) -> bool {
		self.r > 0.0 && self.r < 100.0
	}
}

/// Drop every atom with `r <= 0` or `r >= 100`, per the upstream contract.
pub fn filter_valid(atoms: &[Atom]) -> Vec<Atom> {
	atoms.iter().copied().filter(Atom::is_valid).collect()
}

/// Parse a whitespace-separated XYZR text file: one `x y z r` record per
/// line, blank lines and `#`-prefixed lines ignored.
pub fn parse_xyzr(text: &str) -> crate::error::Result<Vec<Atom>> {
	let mut atoms = Vec::new();
	for (lineno, line) in text.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let fields: Vec<&str> = line.split_whitespace().collect();
		if fields.len() < 4 {
			return Err(crate::error::VoxelError::InvalidInput {
				reason: format!("line {}: expected 4 fields, found {}", lineno + 1, fields.len()),
			});
		}
		let parse = |s: &str| -> crate::error::Result<f64> {
			s.parse::<f64>().map_err(|_| crate::error::VoxelError::InvalidInput {
				reason: format!("line {}: could not parse {:?} as a number", lineno + 1, s),
			})
		};
		atoms.push(Atom::new(parse(fields[0])?, parse(fields[1])?, parse(fields[2])?, parse(fields[3])?));
	}
	Ok(atoms)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drops_out_of_range_radii() {
		let atoms = vec![Atom::new(0.0, 0.0, 0.0, 1.0), Atom::new(0.0, 0.0, 0.0, 0.0), Atom::new(0.0, 0.0, 0.0, 150.0)];
		assert_eq!(filter_valid(&atoms).len(), 1);
	}

	#[test]
	fn parses_xyzr_text() {
		let text = "# comment\n1.0 2.0 3.0 1.5\n\n4.0 5.0 6.0 2.0\n";
		let atoms = parse_xyzr(text).unwrap();
		assert_eq!(atoms.len(), 2);
		assert_eq!(atoms[0], Atom::new(1.0, 2.0, 3.0, 1.5));
	}
}
