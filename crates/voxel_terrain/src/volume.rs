//! Dense 3D density grid with optional per-sample colours.
//!
//! # Memory Layout
//!
//! ```text
//! index = x + width * (y + height * z)
//!
//! Address:  0      1      2    ...  w-1      w     ...
//! Content: [0,0,0][1,0,0][2,0,0]...[w-1,0,0][0,1,0]...
//!          └────────── X ──────────┘
//! ```
//!
//! X is the fastest axis, matching the marching cubes scan order.
//!
//! # Out-of-range access
//!
//! Reads outside the volume return `None` and writes are silent no-ops that
//! return `false`. Multi-chunk box operations rely on this to iterate past a
//! volume's true extent. [`VoxelVolume::try_set`] reports
//! [`VoxelError::OutOfRange`] for callers that need the distinction.

use glam::{IVec3, UVec3};

use crate::bounds::BoundsInt;
use crate::error::VoxelError;
use crate::types::{VoxelColor, WHITE};

/// How long a volume is expected to live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Allocation {
  /// Short-lived query results and intermediate buffers.
  Scratch,
  /// Chunk data owned by the store.
  #[default]
  Persistent,
}

/// Dense scalar grid of `width * height * depth` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelVolume {
  size: UVec3,
  densities: Box<[f32]>,
  colors: Option<Box<[VoxelColor]>>,
  allocation: Allocation,
}

impl VoxelVolume {
  /// Create a zero-filled volume.
  pub fn new(size: UVec3, allocation: Allocation) -> Result<Self, VoxelError> {
    Self::filled(size, 0.0, allocation)
  }

  /// Create a zero-filled scratch volume.
  pub fn new_scratch(size: UVec3) -> Result<Self, VoxelError> {
    Self::new(size, Allocation::Scratch)
  }

  /// Create a volume with every sample set to `value`.
  pub fn filled(size: UVec3, value: f32, allocation: Allocation) -> Result<Self, VoxelError> {
    validate_size(size)?;
    let len = size.x as usize * size.y as usize * size.z as usize;
    Ok(Self {
      size,
      densities: vec![value; len].into_boxed_slice(),
      colors: None,
      allocation,
    })
  }

  /// Create a volume by evaluating `f` at every local position.
  pub fn from_fn(
    size: UVec3,
    allocation: Allocation,
    mut f: impl FnMut(UVec3) -> f32,
  ) -> Result<Self, VoxelError> {
    let mut volume = Self::new(size, allocation)?;
    for index in 0..volume.densities.len() {
      let position = volume.position_of(index);
      volume.densities[index] = f(position);
    }
    Ok(volume)
  }

  /// Zero-filled volume for a size already known to be valid.
  pub(crate) fn new_unchecked(size: UVec3, allocation: Allocation) -> Self {
    debug_assert!(size.min_element() > 0);
    let len = size.x as usize * size.y as usize * size.z as usize;
    Self {
      size,
      densities: vec![0.0; len].into_boxed_slice(),
      colors: None,
      allocation,
    }
  }

  /// Attach a colour array filled with `color`.
  pub fn with_colors(mut self, color: VoxelColor) -> Self {
    self.colors = Some(vec![color; self.densities.len()].into_boxed_slice());
    self
  }

  #[inline]
  pub fn size(&self) -> UVec3 {
    self.size
  }

  #[inline]
  pub fn width(&self) -> u32 {
    self.size.x
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.size.y
  }

  #[inline]
  pub fn depth(&self) -> u32 {
    self.size.z
  }

  /// Total number of samples.
  #[inline]
  pub fn len(&self) -> usize {
    self.densities.len()
  }

  /// Always false: volumes have at least one sample per axis.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.densities.is_empty()
  }

  #[inline]
  pub fn allocation(&self) -> Allocation {
    self.allocation
  }

  /// Local-space sample box, `0..size`.
  pub fn bounds(&self) -> BoundsInt {
    BoundsInt::new(IVec3::ZERO, self.size.as_ivec3())
  }

  #[inline]
  pub fn densities(&self) -> &[f32] {
    &self.densities
  }

  #[inline]
  pub fn densities_mut(&mut self) -> &mut [f32] {
    &mut self.densities
  }

  #[inline]
  pub fn colors(&self) -> Option<&[VoxelColor]> {
    self.colors.as_deref()
  }

  #[inline]
  pub fn contains(&self, position: IVec3) -> bool {
    position.cmpge(IVec3::ZERO).all() && position.as_uvec3().cmplt(self.size).all()
  }

  /// Flat index of a position, or `None` when out of range.
  #[inline]
  pub fn index(&self, position: IVec3) -> Option<usize> {
    if !self.contains(position) {
      return None;
    }
    let p = position.as_uvec3();
    Some(self.index_unchecked(p.x, p.y, p.z))
  }

  /// Flat index of an in-range position.
  #[inline(always)]
  pub fn index_unchecked(&self, x: u32, y: u32, z: u32) -> usize {
    debug_assert!(x < self.size.x && y < self.size.y && z < self.size.z);
    x as usize + self.size.x as usize * (y as usize + self.size.y as usize * z as usize)
  }

  /// Inverse of [`Self::index_unchecked`].
  #[inline]
  pub fn position_of(&self, index: usize) -> UVec3 {
    let width = self.size.x as usize;
    let height = self.size.y as usize;
    UVec3::new(
      (index % width) as u32,
      ((index / width) % height) as u32,
      (index / (width * height)) as u32,
    )
  }

  /// Density at a local position.
  #[inline]
  pub fn get(&self, position: IVec3) -> Option<f32> {
    self.index(position).map(|i| self.densities[i])
  }

  #[inline]
  pub fn get_by_index(&self, index: usize) -> Option<f32> {
    self.densities.get(index).copied()
  }

  /// Write a density. Out-of-range writes are ignored and return `false`.
  #[inline]
  pub fn set(&mut self, value: f32, position: IVec3) -> bool {
    match self.index(position) {
      Some(i) => {
        self.densities[i] = value;
        true
      }
      None => false,
    }
  }

  /// Write a density, reporting out-of-range positions as an error.
  pub fn try_set(&mut self, value: f32, position: IVec3) -> Result<(), VoxelError> {
    if self.set(value, position) {
      Ok(())
    } else {
      Err(VoxelError::OutOfRange {
        position,
        size: self.size,
      })
    }
  }

  /// Add `delta` to an existing sample. Out-of-range positions are ignored.
  #[inline]
  pub fn increase(&mut self, delta: f32, position: IVec3) -> bool {
    match self.index(position) {
      Some(i) => {
        self.densities[i] += delta;
        true
      }
      None => false,
    }
  }

  #[inline]
  pub fn increase_by_index(&mut self, delta: f32, index: usize) -> bool {
    match self.densities.get_mut(index) {
      Some(density) => {
        *density += delta;
        true
      }
      None => false,
    }
  }

  /// Colour at a local position, or `None` when out of range or uncoloured.
  pub fn get_color(&self, position: IVec3) -> Option<VoxelColor> {
    let colors = self.colors.as_ref()?;
    self.index(position).map(|i| colors[i])
  }

  /// Write a colour, allocating a white colour array on first use.
  pub fn set_color(&mut self, color: VoxelColor, position: IVec3) -> bool {
    let Some(i) = self.index(position) else {
      return false;
    };
    let len = self.densities.len();
    let colors = self
      .colors
      .get_or_insert_with(|| vec![WHITE; len].into_boxed_slice());
    colors[i] = color;
    true
  }

  /// Overwrite this volume's samples with `other`'s.
  ///
  /// Both volumes must have identical dimensions. Colours follow `other`:
  /// copied when present, dropped when absent.
  pub fn copy_from(&mut self, other: &VoxelVolume) -> Result<(), VoxelError> {
    if self.size != other.size {
      return Err(VoxelError::DimensionMismatch {
        expected: self.size,
        found: other.size,
      });
    }

    self.densities.copy_from_slice(&other.densities);
    match (&mut self.colors, &other.colors) {
      (Some(dst), Some(src)) => dst.copy_from_slice(src),
      (dst, src) => *dst = src.clone(),
    }
    Ok(())
  }
}

fn validate_size(size: UVec3) -> Result<(), VoxelError> {
  if size.min_element() == 0 {
    Err(VoxelError::InvalidSize(size))
  } else {
    Ok(())
  }
}

#[cfg(test)]
#[path = "volume_test.rs"]
mod volume_test;
