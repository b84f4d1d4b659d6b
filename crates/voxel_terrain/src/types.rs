//! Core data types for marching cubes meshing.

/// Per-sample RGBA colour.
pub type VoxelColor = [u8; 4];

/// Colour assigned to vertices of volumes without colour data.
pub const WHITE: VoxelColor = [255, 255, 255, 255];

/// Normal computation mode for mesh generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalMode {
  /// Density gradient across the cube's 8 corners. Every vertex emitted by
  /// one cube shares the same normal.
  #[default]
  Gradient,

  /// Face normal of each triangle, oriented along the density gradient.
  Flat,
}

/// Output vertex with all mesh attributes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshingVertex {
  /// Vertex position in chunk-local coordinates, scaled by
  /// [`MeshConfig::voxel_scale`].
  pub position: [f32; 3],

  /// Surface normal (unit vector), pointing towards increasing density.
  pub normal: [f32; 3],

  /// Interpolated vertex colour.
  pub color: VoxelColor,
}

impl Default for MeshingVertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 1.0, 0.0],
      color: WHITE,
    }
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Mesh generation result.
///
/// Marching cubes does not share vertices between triangles, so
/// `indices.len() == vertices.len()` and every index is used exactly once.
#[derive(Clone, Debug, Default)]
pub struct MeshOutput {
  /// Output vertices with positions, normals, and colours.
  pub vertices: Vec<MeshingVertex>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of vertices in the mesh.
  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Recompute `bounds` from the vertex positions.
  pub fn recalculate_bounds(&mut self) {
    self.bounds = MinMaxAABB::empty();
    for vertex in &self.vertices {
      self.bounds.encapsulate(vertex.position);
    }
  }
}

/// Configuration for mesh generation.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshConfig {
  /// Density threshold of the surface. Samples below it are inside.
  pub iso_level: f32,

  /// Scale factor applied to vertex positions.
  pub voxel_scale: f32,

  /// Normal computation mode.
  pub normal_mode: NormalMode,
}

impl Default for MeshConfig {
  fn default() -> Self {
    Self {
      iso_level: 0.0,
      voxel_scale: 1.0,
      normal_mode: NormalMode::default(),
    }
  }
}

impl MeshConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_iso_level(mut self, iso_level: f32) -> Self {
    self.iso_level = iso_level;
    self
  }

  pub fn with_voxel_scale(mut self, scale: f32) -> Self {
    self.voxel_scale = scale;
    self
  }

  pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
    self.normal_mode = mode;
    self
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
