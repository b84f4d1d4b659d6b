//! WorldSettings - chunk dimensions and world-to-chunk coordinate mapping.

use glam::{IVec3, UVec3};

use crate::error::VoxelError;
use crate::volume::{Allocation, VoxelVolume};

/// Default logical chunk size per axis.
pub const DEFAULT_CHUNK_SIZE: u32 = 16;

/// Configuration shared by the voxel data store and chunk generators.
///
/// A chunk of logical size `N` covers world samples `origin..=origin + N` on
/// each axis, so its backing volume holds `(N + 1)` samples per axis and shares
/// its maximum face with the neighbouring chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSettings {
  chunk_size: IVec3,
}

impl WorldSettings {
  /// Create settings with the given logical chunk size.
  pub fn new(chunk_size: UVec3) -> Result<Self, VoxelError> {
    if chunk_size.min_element() == 0 || chunk_size.max_element() > i32::MAX as u32 - 1 {
      return Err(VoxelError::InvalidSize(chunk_size));
    }
    Ok(Self {
      chunk_size: chunk_size.as_ivec3(),
    })
  }

  /// Create settings with cubic chunks of `size` voxels per axis.
  pub fn cubic(size: u32) -> Result<Self, VoxelError> {
    Self::new(UVec3::splat(size))
  }

  pub fn with_chunk_size(self, chunk_size: UVec3) -> Result<Self, VoxelError> {
    Self::new(chunk_size)
  }

  /// Logical chunk size (always positive on every axis).
  #[inline]
  pub fn chunk_size(&self) -> IVec3 {
    self.chunk_size
  }

  /// Samples per axis stored for one chunk: `chunk_size + 1`.
  #[inline]
  pub fn chunk_volume_size(&self) -> UVec3 {
    (self.chunk_size + IVec3::ONE).as_uvec3()
  }

  /// World-space position of a chunk's minimum corner.
  #[inline]
  pub fn chunk_origin(&self, coordinate: IVec3) -> IVec3 {
    coordinate * self.chunk_size
  }

  /// Allocate a zeroed volume sized for one chunk.
  pub fn new_chunk_volume(&self) -> VoxelVolume {
    VoxelVolume::new_unchecked(self.chunk_volume_size(), Allocation::Persistent)
  }
}

impl Default for WorldSettings {
  fn default() -> Self {
    Self {
      chunk_size: IVec3::splat(DEFAULT_CHUNK_SIZE as i32),
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
