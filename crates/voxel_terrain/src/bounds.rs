//! Integer axis-aligned box used for world-space voxel queries.

use glam::IVec3;

/// Integer box covering the half-open range `min..min + size` on each axis.
///
/// A query of size `(4, 4, 4)` touches exactly 64 samples. A chunk's sample
/// box is `BoundsInt::new(origin, volume_size)`, which includes the shared
/// samples on its maximum faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundsInt {
  /// Minimum corner (inclusive).
  pub min: IVec3,
  /// Extent per axis. Non-positive on any axis means empty.
  pub size: IVec3,
}

impl BoundsInt {
  pub fn new(min: IVec3, size: IVec3) -> Self {
    Self { min, size }
  }

  /// Box spanning `min..=max_inclusive`.
  pub fn from_min_max_inclusive(min: IVec3, max_inclusive: IVec3) -> Self {
    Self {
      min,
      size: max_inclusive - min + IVec3::ONE,
    }
  }

  /// Exclusive maximum corner.
  #[inline]
  pub fn max(&self) -> IVec3 {
    self.min + self.size
  }

  /// Inclusive maximum corner (last sample inside the box).
  #[inline]
  pub fn max_inclusive(&self) -> IVec3 {
    self.max() - IVec3::ONE
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.size.min_element() <= 0
  }

  /// Number of samples inside the box.
  pub fn volume(&self) -> usize {
    if self.is_empty() {
      0
    } else {
      self.size.x as usize * self.size.y as usize * self.size.z as usize
    }
  }

  #[inline]
  pub fn contains(&self, point: IVec3) -> bool {
    point.cmpge(self.min).all() && point.cmplt(self.max()).all()
  }

  /// Exact integer intersection, or `None` when the boxes share no sample.
  pub fn intersection(&self, other: &BoundsInt) -> Option<BoundsInt> {
    let min = self.min.max(other.min);
    let max = self.max().min(other.max());
    let bounds = BoundsInt::new(min, max - min);
    (!bounds.is_empty()).then_some(bounds)
  }

  /// Iterate every sample position, X fastest.
  pub fn iter(&self) -> impl Iterator<Item = IVec3> {
    let min = self.min;
    let max = self.max();
    (min.z..max.z).flat_map(move |z| {
      (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| IVec3::new(x, y, z)))
    })
  }
}

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;
