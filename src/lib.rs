//! Voxel-grid morphology engine for molecular geometry: accessible/excluded
//! surfaces, channels, cavities, tunnels, and the volumetric map writer
//! they produce, built around a dense boolean grid and a small set of
//! morphological kernels (sphere rasterization, erosion/dilation by a
//! spherical probe, set algebra, connected-component flood fill).

pub mod atom;
pub mod domain;
pub mod error;
pub mod format;
pub mod grid;
pub mod mrc;
pub mod pipelines;
pub mod reporter;
pub mod settings;

pub use atom::Atom;
pub use domain::GridDomain;
pub use error::{Result, VoxelError};
pub use grid::{Grid, SurfaceHistogram};
