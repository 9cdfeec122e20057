/// VdW padding added to every atom's inflation box (Voss & Gerstein 2006, §2.1)
pub const MAX_VDW: f64 = 2.0;
/// Hard ceiling on `num_bins`; above this a grid cannot be addressed with a 31-bit index
pub const MAX_BINS: u64 = 2_147_483_647; // 2^31 - 1
/// Default target voxel budget for the ideal-spacing suggestion
pub const DEFAULT_VOXEL_BUDGET: u64 = 1 << 30;
/// Default cap on one bounded-BFS flood-fill wavefront generation
pub const DEFAULT_MAX_LIST: usize = 1 << 18;
/// Neighborhood search radius used by `get_connected` when the seed voxel is empty
pub const CONNECTED_SEARCH_RADIUS: f64 = 3.0;
/// Neighborhood search radius used by `get_connected_range`
pub const CONNECTED_RANGE_SEARCH_RADIUS: f64 = 1.5;
/// Hard upper bound on tunnel accessible volume (Å^3) before a run is deemed implausible
pub const TUNNEL_ACCESSIBLE_BOUND: f64 = 2_000_000.0;
/// Hard upper bound on tunnel excluded volume (Å^3) before a run is deemed implausible
pub const TUNNEL_EXCLUDED_BOUND: f64 = 1_800_000.0;
/// Number of progress ticks reported across a full sphere-rasterization pass over an atom list
pub const PROGRESS_TICKS: usize = 60;

/// Per-class weights calibrating a voxel-face surface patch to continuous
/// surface area (index 0 unused; classes are numbered 1..=9).
pub const SURFACE_CLASS_WEIGHTS: [f64; 10] =
	[0.0, 0.894, 1.3409, 1.5879, 4.0, 2.6667, 3.3333, 1.79, 2.68, 4.08];
