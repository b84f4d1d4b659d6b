//! Task queue for parallel chunk meshing.
//!
//! Following the stage pattern: Enqueue → Tick → Completions
//!
//! ```text
//!  VoxelDataStore ──enqueue_changed──► pending ──tick (rayon)──► completed
//!   (has_changes)                     MeshRequest                MeshCompletion
//! ```
//!
//! Requests own a copy of the chunk volume, so the store can keep mutating
//! while a tick is in flight on another thread.

use glam::IVec3;
use rayon::prelude::*;
use web_time::Instant;

use crate::marching_cubes;
use crate::store::VoxelDataStore;
use crate::types::{MeshConfig, MeshOutput};
use crate::volume::VoxelVolume;

/// Request to extract the surface of one chunk.
#[derive(Clone)]
pub struct MeshRequest {
  /// Unique identifier for this request
  pub id: u64,
  /// Chunk the volume belongs to
  pub coordinate: IVec3,
  /// Snapshot of the chunk's samples
  pub volume: VoxelVolume,
  /// Meshing configuration
  pub config: MeshConfig,
}

/// Completed mesh result.
pub struct MeshCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  pub coordinate: IVec3,
  /// Generated mesh in chunk-local coordinates
  pub output: MeshOutput,
  /// Raw meshing time in microseconds
  pub mesh_time_us: u64,
}

/// Meshing stage that processes requests in parallel.
pub struct MeshingStage {
  /// Pending requests waiting to be processed
  pending: Vec<MeshRequest>,
  /// Completed results ready to be collected
  completed: Vec<MeshCompletion>,
  /// Next request ID
  next_id: u64,
}

impl Default for MeshingStage {
  fn default() -> Self {
    Self::new()
  }
}

impl MeshingStage {
  pub fn new() -> Self {
    Self {
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
    }
  }

  /// Enqueue a mesh request, returning the assigned ID.
  pub fn enqueue(&mut self, coordinate: IVec3, volume: VoxelVolume, config: MeshConfig) -> u64 {
    let id = self.next_id;
    self.next_id += 1;

    self.pending.push(MeshRequest {
      id,
      coordinate,
      volume,
      config,
    });

    id
  }

  /// Enqueue every chunk flagged `has_changes`, clearing the flags.
  ///
  /// Flagged chunks that are no longer loaded are skipped. Returns the number
  /// of requests added.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "meshing::enqueue_changed"))]
  pub fn enqueue_changed(&mut self, store: &mut VoxelDataStore, config: &MeshConfig) -> usize {
    let changed = store.chunk_properties_mut().take_changed();
    let mut queued = 0;

    for coordinate in changed {
      let Some(volume) = store.try_get_voxel_data_chunk(coordinate) else {
        continue;
      };
      self.enqueue(coordinate, volume.clone(), config.clone());
      queued += 1;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(queued, "enqueued changed chunks");

    queued
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of tasks processed this tick.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "meshing::tick"))]
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<MeshCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let start = Instant::now();
        let output = marching_cubes::generate(&req.volume, &req.config);
        let mesh_time_us = start.elapsed().as_micros() as u64;
        MeshCompletion {
          id: req.id,
          coordinate: req.coordinate,
          output,
          mesh_time_us,
        }
      })
      .collect();

    self.completed.extend(completions);
    count
  }

  /// Take all completed meshes.
  pub fn drain_completions(&mut self) -> Vec<MeshCompletion> {
    std::mem::take(&mut self.completed)
  }

  /// Number of pending requests.
  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;
