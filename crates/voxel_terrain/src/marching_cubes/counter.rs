//! Atomic vertex slot allocator shared by all cubes of an extraction.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Running total of emitted vertices.
///
/// Each cube reserves its whole vertex run with a single `fetch_add`, so
/// concurrently processed cubes always write disjoint slot ranges.
#[derive(Debug, Default)]
pub struct VertexCounter {
  count: AtomicUsize,
}

impl VertexCounter {
  pub fn new() -> Self {
    Self::default()
  }

  /// Counter starting at `count`, for appending after existing output.
  pub fn starting_at(count: usize) -> Self {
    Self {
      count: AtomicUsize::new(count),
    }
  }

  /// Reserve `vertex_count` consecutive slots, returning the first.
  #[inline]
  pub fn reserve(&self, vertex_count: usize) -> usize {
    self.count.fetch_add(vertex_count, Ordering::Relaxed)
  }

  /// Slots reserved so far.
  #[inline]
  pub fn count(&self) -> usize {
    self.count.load(Ordering::Acquire)
  }

  pub fn reset(&self) {
    self.count.store(0, Ordering::Release);
  }
}
