//! VoxelDataStore - chunked voxel data with boundary-aware world queries.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │ VoxelDataStore                                                        │
//! │                                                                       │
//! │  generation_handles: IVec3 → GenerationHandle   (pending, background) │
//! │            │                                                          │
//! │            │ first access to coord: wait() + set_voxel_data_chunk     │
//! │            ▼                                                          │
//! │  chunks:             IVec3 → VoxelVolume        ((N+1)³ samples)      │
//! │            │                                                          │
//! │            │ every write                                              │
//! │            ▼                                                          │
//! │  chunk_properties:   IVec3 → ChunkProperties    (has_changes = true)  │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Shared boundary samples
//!
//! Chunk `c` stores world samples `c * N ..= c * N + N`, so face-adjacent chunks
//! both hold the samples on their shared face. Every write goes to every loaded
//! chunk holding the sample, which keeps the copies identical without a separate
//! synchronization pass.
//!
//! ```text
//!   chunk (0,0,0)                chunk (1,0,0)
//!   local x: 0 ... 15 [16]       [0] 1 ... 16
//!   world x: 0 ... 15 [16]       [16] 17 ... 32
//!                       └── same sample ──┘
//! ```
//!
//! # Reconciliation
//!
//! Every operation that reads or writes a chunk first checks for a pending
//! generation handle at that coordinate. If one exists the calling thread
//! blocks until it completes, installs the result, and clears the entry.
//!
//! The store is not internally synchronized; callers serialize access.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use glam::IVec3;

use crate::bounds::BoundsInt;
use crate::chunk_properties::ChunkPropertiesStore;
use crate::config::WorldSettings;
use crate::coords::{
  chunk_coordinates_containing_point, chunks_overlapping, world_to_chunk, world_to_local,
};
use crate::error::VoxelError;
use crate::generation::GenerationHandle;
use crate::types::WHITE;
use crate::volume::{Allocation, VoxelVolume};

/// Owner of all loaded chunk volumes and pending generation jobs.
pub struct VoxelDataStore {
  settings: WorldSettings,
  chunks: HashMap<IVec3, VoxelVolume>,
  generation_handles: HashMap<IVec3, GenerationHandle>,
  chunk_properties: ChunkPropertiesStore,
}

impl VoxelDataStore {
  /// Create an empty store.
  pub fn new(settings: WorldSettings) -> Self {
    Self {
      settings,
      chunks: HashMap::new(),
      generation_handles: HashMap::new(),
      chunk_properties: ChunkPropertiesStore::new(),
    }
  }

  #[inline]
  pub fn settings(&self) -> &WorldSettings {
    &self.settings
  }

  pub fn chunk_properties(&self) -> &ChunkPropertiesStore {
    &self.chunk_properties
  }

  /// Mutable access for the chunk-management layer (register, unregister,
  /// consume `has_changes`).
  pub fn chunk_properties_mut(&mut self) -> &mut ChunkPropertiesStore {
    &mut self.chunk_properties
  }

  /// Number of installed chunks (pending jobs not included).
  pub fn chunk_count(&self) -> usize {
    self.chunks.len()
  }

  /// Number of registered generation jobs not yet reconciled.
  pub fn pending_count(&self) -> usize {
    self.generation_handles.len()
  }

  pub fn is_pending(&self, coordinate: IVec3) -> bool {
    self.generation_handles.contains_key(&coordinate)
  }

  /// True when chunk data is installed, without reconciling pending jobs.
  pub fn contains_chunk(&self, coordinate: IVec3) -> bool {
    self.chunks.contains_key(&coordinate)
  }

  /// Coordinates of installed chunks.
  pub fn loaded_coordinates(&self) -> impl Iterator<Item = IVec3> + '_ {
    self.chunks.keys().copied()
  }

  // ===========================================================================
  // Reads
  // ===========================================================================

  /// Density at a world position, or `None` when the owning chunk is not
  /// loaded.
  pub fn try_get_voxel_data(&mut self, world: IVec3) -> Option<f32> {
    let chunk_size = self.settings.chunk_size();
    let coordinate = world_to_chunk(world, chunk_size);
    self.apply_chunk_changes(coordinate);

    let chunk = self.chunks.get(&coordinate)?;
    chunk.get(world_to_local(world, chunk_size))
  }

  /// Whole volume of one chunk.
  pub fn try_get_voxel_data_chunk(&mut self, coordinate: IVec3) -> Option<&VoxelVolume> {
    self.apply_chunk_changes(coordinate);
    self.chunks.get(&coordinate)
  }

  /// Copy an arbitrary world-space box into a new volume of `query.size`.
  ///
  /// Samples not covered by any loaded chunk keep the default density of 0.
  /// Colours are copied from chunks that carry them.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "store::get_voxel_data_custom"))]
  pub fn get_voxel_data_custom(
    &mut self,
    query: BoundsInt,
    allocation: Allocation,
  ) -> Result<VoxelVolume, VoxelError> {
    if query.is_empty() {
      return Err(VoxelError::InvalidSize(query.size.max(IVec3::ZERO).as_uvec3()));
    }

    let mut result = VoxelVolume::new(query.size.as_uvec3(), allocation)?;
    let chunk_size = self.settings.chunk_size();

    for coordinate in chunks_overlapping(&query, chunk_size) {
      self.apply_chunk_changes(coordinate);
      let Some(chunk) = self.chunks.get(&coordinate) else {
        continue;
      };

      let chunk_origin = coordinate * chunk_size;
      let chunk_bounds = BoundsInt::new(chunk_origin, chunk.size().as_ivec3());
      let Some(intersection) = query.intersection(&chunk_bounds) else {
        continue;
      };

      for world in intersection.iter() {
        let local = world - chunk_origin;
        let target = world - query.min;
        if let Some(value) = chunk.get(local) {
          result.set(value, target);
        }
        if let Some(color) = chunk.get_color(local) {
          result.set_color(color, target);
        }
      }
    }

    Ok(result)
  }

  /// [`Self::get_voxel_data_custom`] with a long-lived result.
  pub fn get_voxel_data_custom_persistent(
    &mut self,
    query: BoundsInt,
  ) -> Result<VoxelVolume, VoxelError> {
    self.get_voxel_data_custom(query, Allocation::Persistent)
  }

  // ===========================================================================
  // Writes
  // ===========================================================================

  /// Write `volume` into the world with its minimum corner at `origin`.
  ///
  /// Chunks that are not loaded are skipped, never created. Colours of a
  /// coloured source are copied, except that a chunk without colour data only
  /// gains a colour array once a non-white colour is written to it (absent
  /// colours already mesh as white).
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "store::set_voxel_data_custom"))]
  pub fn set_voxel_data_custom(&mut self, volume: &VoxelVolume, origin: IVec3) {
    let query = BoundsInt::new(origin, volume.size().as_ivec3());
    let chunk_size = self.settings.chunk_size();

    for coordinate in chunks_overlapping(&query, chunk_size) {
      self.apply_chunk_changes(coordinate);
      let Some(chunk) = self.chunks.get_mut(&coordinate) else {
        continue;
      };

      let chunk_origin = coordinate * chunk_size;
      let chunk_bounds = BoundsInt::new(chunk_origin, chunk.size().as_ivec3());
      let Some(intersection) = query.intersection(&chunk_bounds) else {
        continue;
      };

      for world in intersection.iter() {
        let source = world - origin;
        let local = world - chunk_origin;
        if let Some(value) = volume.get(source) {
          chunk.set(value, local);
        }
        if let Some(color) = volume.get_color(source) {
          if color != WHITE || chunk.colors().is_some() {
            chunk.set_color(color, local);
          }
        }
      }

      self.chunk_properties.mark_changed(coordinate);
    }
  }

  /// Set one world sample in every loaded chunk that stores it.
  ///
  /// Returns the number of chunks written.
  pub fn set_voxel_data(&mut self, value: f32, world: IVec3) -> usize {
    self.modify_point(world, |chunk, local| chunk.set(value, local))
  }

  /// Add `delta` to one world sample in every loaded chunk that stores it.
  ///
  /// Returns the number of chunks written.
  pub fn increase_voxel_data(&mut self, delta: f32, world: IVec3) -> usize {
    self.modify_point(world, |chunk, local| chunk.increase(delta, local))
  }

  /// Apply `increase(world_position, current_value) -> delta` to every sample
  /// of `query` held by a loaded chunk.
  ///
  /// Shared boundary samples are visited once per chunk holding them, so
  /// `increase` must be deterministic for the copies to stay identical.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "store::increase_voxel_data_custom"))]
  pub fn increase_voxel_data_custom<F>(&mut self, query: BoundsInt, mut increase: F)
  where
    F: FnMut(IVec3, f32) -> f32,
  {
    let chunk_size = self.settings.chunk_size();

    for coordinate in chunks_overlapping(&query, chunk_size) {
      self.apply_chunk_changes(coordinate);
      let Some(chunk) = self.chunks.get_mut(&coordinate) else {
        continue;
      };

      let chunk_origin = coordinate * chunk_size;
      let chunk_bounds = BoundsInt::new(chunk_origin, chunk.size().as_ivec3());
      let Some(intersection) = query.intersection(&chunk_bounds) else {
        continue;
      };

      for world in intersection.iter() {
        let Some(index) = chunk.index(world - chunk_origin) else {
          continue;
        };
        if let Some(current) = chunk.get_by_index(index) {
          chunk.increase_by_index(increase(world, current), index);
        }
      }

      self.chunk_properties.mark_changed(coordinate);
    }
  }

  /// Install a chunk's voxel data.
  ///
  /// An existing chunk is overwritten in place; otherwise `volume` is moved
  /// into the store. The volume must be [`WorldSettings::chunk_volume_size`].
  pub fn set_voxel_data_chunk(
    &mut self,
    volume: VoxelVolume,
    coordinate: IVec3,
  ) -> Result<(), VoxelError> {
    let expected = self.settings.chunk_volume_size();
    if volume.size() != expected {
      return Err(VoxelError::DimensionMismatch {
        expected,
        found: volume.size(),
      });
    }

    match self.chunks.entry(coordinate) {
      Entry::Occupied(mut entry) => entry.get_mut().copy_from(&volume)?,
      Entry::Vacant(entry) => {
        entry.insert(volume);
      }
    }

    self.chunk_properties.mark_changed(coordinate);
    Ok(())
  }

  /// Register a pending generation job for a chunk.
  ///
  /// If a job is already pending for `coordinate` the new handle is dropped
  /// (its work finishes and is discarded) and `false` is returned.
  pub fn set_voxel_data_job_handle(&mut self, handle: GenerationHandle, coordinate: IVec3) -> bool {
    match self.generation_handles.entry(coordinate) {
      Entry::Occupied(_) => false,
      Entry::Vacant(entry) => {
        entry.insert(handle);
        true
      }
    }
  }

  /// Reconcile every pending generation job, blocking until all complete.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "store::apply_all_pending"))]
  pub fn apply_all_pending(&mut self) {
    let coordinates: Vec<IVec3> = self.generation_handles.keys().copied().collect();
    for coordinate in coordinates {
      self.apply_chunk_changes(coordinate);
    }
  }

  /// Drop the data of the given chunks.
  ///
  /// A generation job still pending for an unloaded coordinate is discarded
  /// too: it runs to completion on its worker and the result is dropped, so a
  /// later access does not resurrect the chunk. Returns the number of chunks
  /// whose data was removed.
  pub fn unload_coordinates<I>(&mut self, coordinates: I) -> usize
  where
    I: IntoIterator<Item = IVec3>,
  {
    let mut unloaded = 0;

    for coordinate in coordinates {
      if self.generation_handles.remove(&coordinate).is_some() {
        #[cfg(feature = "tracing")]
        tracing::debug!(?coordinate, "discarding pending generation for unloaded chunk");
      }
      if self.chunks.remove(&coordinate).is_some() {
        unloaded += 1;
      }
    }

    unloaded
  }

  /// Release every chunk and pending job.
  pub fn clear(&mut self) {
    self.chunks.clear();
    self.generation_handles.clear();
  }

  // ===========================================================================
  // Internals
  // ===========================================================================

  /// Complete a pending generation job for `coordinate`, if any, and install
  /// its volume.
  fn apply_chunk_changes(&mut self, coordinate: IVec3) {
    let Some(handle) = self.generation_handles.remove(&coordinate) else {
      return;
    };

    match handle.wait() {
      Some(volume) => {
        if let Err(_err) = self.set_voxel_data_chunk(volume, coordinate) {
          #[cfg(feature = "tracing")]
          tracing::warn!(?coordinate, error = %_err, "discarding generated chunk");
        }
      }
      None => {
        #[cfg(feature = "tracing")]
        tracing::warn!(?coordinate, "chunk generation job ended without a result");
      }
    }
  }

  /// Apply `apply` to every loaded chunk that stores the sample at `world`.
  fn modify_point<F>(&mut self, world: IVec3, mut apply: F) -> usize
  where
    F: FnMut(&mut VoxelVolume, IVec3) -> bool,
  {
    let chunk_size = self.settings.chunk_size();
    let mut touched = 0;

    for coordinate in chunk_coordinates_containing_point(world, chunk_size) {
      self.apply_chunk_changes(coordinate);
      let Some(chunk) = self.chunks.get_mut(&coordinate) else {
        continue;
      };

      // Within 0..=chunk_size, including the shared maximum face
      let local = world - coordinate * chunk_size;
      if apply(chunk, local) {
        self.chunk_properties.mark_changed(coordinate);
        touched += 1;
      }
    }

    touched
  }
}

impl Default for VoxelDataStore {
  fn default() -> Self {
    Self::new(WorldSettings::default())
  }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
