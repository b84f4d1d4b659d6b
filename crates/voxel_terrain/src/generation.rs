//! Background chunk generation.
//!
//! A [`GenerationHandle`] is a one-shot result slot for a chunk volume being
//! produced on rayon's thread pool. The store registers handles and later
//! reconciles them by blocking on [`GenerationHandle::wait`].
//!
//! ```text
//!  caller                       rayon worker
//!  ──────                       ────────────
//!  GenerationHandle::spawn ───► generator.generate(coord)
//!        │                             │
//!  store.set_voxel_data_job_handle     │ sender.send(volume)
//!        │                             ▼
//!  first access to coord ─────► receiver.recv()  (blocks until sent)
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, TryRecvError};
use glam::IVec3;

use crate::config::WorldSettings;
use crate::volume::VoxelVolume;

/// Produces the voxel data for one chunk.
///
/// Implementations must return a volume of
/// [`WorldSettings::chunk_volume_size`]; the store rejects any other size.
pub trait VoxelDataGenerator: Send + Sync + 'static {
  fn generate(&self, coordinate: IVec3, settings: &WorldSettings) -> VoxelVolume;
}

/// Generator sampling a density function at world-space integer positions.
pub struct DensityFnGenerator<F> {
  density: F,
}

impl<F> DensityFnGenerator<F>
where
  F: Fn(IVec3) -> f32 + Send + Sync + 'static,
{
  pub fn new(density: F) -> Self {
    Self { density }
  }
}

impl<F> VoxelDataGenerator for DensityFnGenerator<F>
where
  F: Fn(IVec3) -> f32 + Send + Sync + 'static,
{
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "generation::density_fn"))]
  fn generate(&self, coordinate: IVec3, settings: &WorldSettings) -> VoxelVolume {
    let origin = settings.chunk_origin(coordinate);
    let mut volume = settings.new_chunk_volume();
    for index in 0..volume.len() {
      let world = origin + volume.position_of(index).as_ivec3();
      volume.densities_mut()[index] = (self.density)(world);
    }
    volume
  }
}

/// Pending result of a chunk generation job.
pub struct GenerationHandle {
  receiver: Receiver<VoxelVolume>,
  /// Outcome taken off the channel by `is_finished` (`None` = job failed).
  outcome: Option<Option<VoxelVolume>>,
}

impl GenerationHandle {
  /// Run `generator` for `coordinate` on rayon's thread pool (non-blocking).
  pub fn spawn<G>(generator: Arc<G>, coordinate: IVec3, settings: WorldSettings) -> Self
  where
    G: VoxelDataGenerator + ?Sized,
  {
    Self::spawn_with(move || generator.generate(coordinate, &settings))
  }

  /// Run an arbitrary job producing a chunk volume on rayon's thread pool.
  pub fn spawn_with<F>(work: F) -> Self
  where
    F: FnOnce() -> VoxelVolume + Send + 'static,
  {
    let (sender, receiver) = channel::bounded(1);

    rayon::spawn(move || {
      // A panic must not reach rayon's handler (abort); dropping the sender
      // disconnects the channel instead.
      if let Ok(volume) = panic::catch_unwind(AssertUnwindSafe(work)) {
        // Ignore send error (receiver dropped = handle discarded)
        let _ = sender.send(volume);
      }
    });

    Self {
      receiver,
      outcome: None,
    }
  }

  /// Wrap a volume that is already available.
  pub fn from_volume(volume: VoxelVolume) -> Self {
    let (sender, receiver) = channel::bounded(1);
    // Capacity 1 and the receiver is alive, so this cannot fail
    let _ = sender.send(volume);
    Self {
      receiver,
      outcome: None,
    }
  }

  /// True once the result can be taken without blocking.
  ///
  /// A job that panicked counts as finished; [`Self::wait`] then returns
  /// `None`.
  pub fn is_finished(&mut self) -> bool {
    if self.outcome.is_some() {
      return true;
    }
    match self.receiver.try_recv() {
      Ok(volume) => {
        self.outcome = Some(Some(volume));
        true
      }
      Err(TryRecvError::Disconnected) => {
        self.outcome = Some(None);
        true
      }
      Err(TryRecvError::Empty) => false,
    }
  }

  /// Block until the job completes and take its volume.
  ///
  /// Returns `None` if the job panicked before producing a result.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "generation::wait"))]
  pub fn wait(self) -> Option<VoxelVolume> {
    match self.outcome {
      Some(outcome) => outcome,
      None => self.receiver.recv().ok(),
    }
  }
}

#[cfg(test)]
#[path = "generation_test.rs"]
mod generation_test;
