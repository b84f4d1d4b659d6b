//! Per-chunk state owned by the chunk-management layer.
//!
//! The voxel data store only ever touches `has_changes`: it raises the flag on
//! every chunk whose samples it rewrites, and the meshing side clears it once
//! the chunk has been queued for re-extraction.

use std::collections::HashMap;

use glam::IVec3;

/// State of one loaded chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkProperties {
  pub coordinate: IVec3,
  /// Voxel data changed since the last mesh extraction.
  pub has_changes: bool,
}

impl ChunkProperties {
  pub fn new(coordinate: IVec3) -> Self {
    Self {
      coordinate,
      has_changes: false,
    }
  }
}

/// Chunk properties keyed by chunk coordinate.
#[derive(Clone, Debug, Default)]
pub struct ChunkPropertiesStore {
  chunks: HashMap<IVec3, ChunkProperties>,
}

impl ChunkPropertiesStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a chunk, returning its (possibly pre-existing) properties.
  pub fn insert(&mut self, coordinate: IVec3) -> &mut ChunkProperties {
    self
      .chunks
      .entry(coordinate)
      .or_insert_with(|| ChunkProperties::new(coordinate))
  }

  pub fn remove(&mut self, coordinate: IVec3) -> Option<ChunkProperties> {
    self.chunks.remove(&coordinate)
  }

  pub fn get(&self, coordinate: IVec3) -> Option<&ChunkProperties> {
    self.chunks.get(&coordinate)
  }

  pub fn get_mut(&mut self, coordinate: IVec3) -> Option<&mut ChunkProperties> {
    self.chunks.get_mut(&coordinate)
  }

  pub fn contains(&self, coordinate: IVec3) -> bool {
    self.chunks.contains_key(&coordinate)
  }

  pub fn len(&self) -> usize {
    self.chunks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  /// Raise `has_changes` for a registered chunk. Unregistered chunks are
  /// ignored and `false` is returned.
  pub fn mark_changed(&mut self, coordinate: IVec3) -> bool {
    match self.chunks.get_mut(&coordinate) {
      Some(properties) => {
        properties.has_changes = true;
        true
      }
      None => false,
    }
  }

  /// Coordinates with `has_changes` set, clearing the flag on each.
  pub fn take_changed(&mut self) -> Vec<IVec3> {
    self
      .chunks
      .values_mut()
      .filter(|properties| properties.has_changes)
      .map(|properties| {
        properties.has_changes = false;
        properties.coordinate
      })
      .collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ChunkProperties> {
    self.chunks.values()
  }
}
