//! Error taxonomy for volume and store operations.
//!
//! Absence (a chunk that is not loaded, a voxel outside a volume) is never an
//! error; it is reported as `None`/`false`. These variants cover caller mistakes.

use glam::{IVec3, UVec3};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoxelError {
  /// Bulk copy between volumes of different dimensions.
  #[error("volume dimensions differ: expected {expected}, found {found}")]
  DimensionMismatch { expected: UVec3, found: UVec3 },

  /// Explicitly checked write outside a volume.
  #[error("position {position} is outside a volume of size {size}")]
  OutOfRange { position: IVec3, size: UVec3 },

  /// Volume constructed with a zero-length axis.
  #[error("volume size {0} has a zero-length axis")]
  InvalidSize(UVec3),

  /// Caller-provided mesh buffers cannot hold the worst-case output.
  #[error("mesh buffer holds {available} entries, {required} required")]
  BufferTooSmall { required: usize, available: usize },
}
