use std::path::PathBuf;

/// Errors surfaced by the voxel engine and its pipelines.
///
/// Kernels themselves are total: a degenerate but legal input (an empty
/// flood-fill seed, a zero-count histogram bucket) reports `0`/`None` rather
/// than erroring. Only the conditions below reach this type.
#[derive(thiserror::Error, Debug)]
pub enum VoxelError {
	#[error("invalid input: {reason}")]
	InvalidInput { reason: String },

	#[error("grid would require {num_bins} voxels, exceeding the {limit} limit")]
	GridTooLarge { num_bins: u64, limit: u64 },

	#[error("cannot write an MRC file from a grid with zero filled voxels")]
	EmptyVolume,

	#[error("plausibility bound exceeded: {reason}")]
	PlausibilityExceeded { reason: String },

	#[error("shape mismatch: grids do not share an identical grid domain")]
	ShapeMismatch,

	#[error("i/o failure on {path}")]
	IoFailure {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type Result<T> = std::result::Result<T, VoxelError>;
