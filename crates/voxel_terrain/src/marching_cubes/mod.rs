//! Marching cubes isosurface extraction.
//!
//! Converts a dense density volume into a triangle soup approximating the
//! surface where density equals `iso_level`. Samples below the iso-level are
//! inside.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  volume: VoxelVolume      - f32 densities (+ optional colours)  │
//! │  config: MeshConfig       - iso_level, voxel_scale, normals     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 1: Classification (per cube)           │
//! │    Load 8 corner densities                                      │
//! │    Bit i of mask = density_i < iso_level                        │
//! │    Early-out if mask == 0 or mask == 255                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 2: Edge crossings                      │
//! │    EDGE_TABLE[mask] → crossing edges                            │
//! │    t = (iso - d0) / (d1 - d0), 0.5 on flat edges                │
//! │    Position and colour lerped along each crossing edge          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 3: Emission                            │
//! │    triangle_list_for(mask) → up to 5 edge triples               │
//! │    counter.reserve(vertex_count) → disjoint output slots        │
//! │    vertices[slot] = vertex, indices[slot] = slot                │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        OUTPUT                                   │
//! │  buffers truncated to counter.count(), bounds recomputed        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Vertices are not shared between triangles. Output buffers are sized for the
//! worst case of [`MAX_VERTICES_PER_CUBE`] per cube up front, which lets the
//! parallel driver write without locks.
//!
//! [`generate`] scans cubes x-fastest on one thread and is fully
//! deterministic. [`generate_parallel`] emits the same set of triangles in an
//! order that depends on scheduling.

mod counter;
mod gradient;
mod interpolate;
mod shared_buffer;

pub use counter::VertexCounter;
pub use gradient::FALLBACK_NORMAL;
pub use interpolate::FLAT_EDGE_EPSILON;

use std::sync::atomic::{AtomicBool, Ordering};

use glam::UVec3;
use rayon::prelude::*;
use shared_buffer::SharedSlice;

use crate::edge_table::{corner_position, CUBE_CORNERS, EDGE_CORNERS, EDGE_TABLE};
use crate::error::VoxelError;
use crate::triangle_table::{triangle_list_for, MAX_VERTICES_PER_CUBE};
use crate::types::{MeshConfig, MeshOutput, MeshingVertex, MinMaxAABB, NormalMode, WHITE};
use crate::volume::VoxelVolume;

/// Cubes per axis for a volume of `size` samples, or `None` when any axis has
/// fewer than 2 samples.
#[inline]
pub fn cube_grid(size: UVec3) -> Option<UVec3> {
  if size.min_element() < 2 {
    None
  } else {
    Some(size - UVec3::ONE)
  }
}

/// Number of cubes marched for a volume of `size` samples.
#[inline]
pub fn cube_count(size: UVec3) -> usize {
  cube_grid(size).map_or(0, |cubes| cubes.x as usize * cubes.y as usize * cubes.z as usize)
}

/// Worst-case vertex (and index) count for a volume of `size` samples.
#[inline]
pub fn max_vertex_count(size: UVec3) -> usize {
  cube_count(size) * MAX_VERTICES_PER_CUBE
}

/// Configuration mask of 8 corner densities.
#[inline]
pub fn cube_mask(densities: &[f32; 8], iso_level: f32) -> u8 {
  let mut mask = 0u8;
  for (corner, &density) in densities.iter().enumerate() {
    if density < iso_level {
      mask |= 1 << corner;
    }
  }
  mask
}

/// March one cube whose minimum corner is sample `cell`.
///
/// Writes the cube's vertices to the front of `out` and returns how many were
/// written (a multiple of 3, at most [`MAX_VERTICES_PER_CUBE`]). `cell + 1`
/// must lie inside the volume on every axis.
pub fn march_cube(
  volume: &VoxelVolume,
  cell: UVec3,
  config: &MeshConfig,
  out: &mut [MeshingVertex; MAX_VERTICES_PER_CUBE],
) -> usize {
  let mut corner_indices = [0usize; 8];
  let mut densities = [0.0f32; 8];
  for (corner, [dx, dy, dz]) in CUBE_CORNERS.into_iter().enumerate() {
    let index = volume.index_unchecked(cell.x + dx, cell.y + dy, cell.z + dz);
    corner_indices[corner] = index;
    densities[corner] = volume.densities()[index];
  }

  let mask = cube_mask(&densities, config.iso_level);
  let triangles = triangle_list_for(mask);
  if triangles.is_empty() {
    return 0;
  }

  let colors = volume.colors();
  let edge_mask = EDGE_TABLE[mask as usize];
  let origin = cell.as_vec3();
  let mut positions = [[0.0f32; 3]; 12];
  let mut edge_colors = [WHITE; 12];

  for (edge, [c0, c1]) in EDGE_CORNERS.into_iter().enumerate() {
    if edge_mask & (1 << edge) == 0 {
      continue;
    }

    let (c0, c1) = (c0 as usize, c1 as usize);
    let t = interpolate::crossing(densities[c0], densities[c1], config.iso_level);
    let local = interpolate::lerp_position(corner_position(c0 as u8), corner_position(c1 as u8), t);
    positions[edge] = [
      (origin.x + local[0]) * config.voxel_scale,
      (origin.y + local[1]) * config.voxel_scale,
      (origin.z + local[2]) * config.voxel_scale,
    ];

    if let Some(colors) = colors {
      edge_colors[edge] = interpolate::lerp_color(colors[corner_indices[c0]], colors[corner_indices[c1]], t);
    }
  }

  let cube_normal = gradient::compute(&densities);
  let mut count = 0;

  for triangle in triangles.triangles() {
    let corners = triangle.map(|edge| positions[edge as usize]);
    let normal = match config.normal_mode {
      NormalMode::Gradient => cube_normal,
      NormalMode::Flat => gradient::face_normal(corners, cube_normal),
    };

    for (position, edge) in corners.into_iter().zip(triangle) {
      out[count] = MeshingVertex {
        position,
        normal,
        color: edge_colors[edge as usize],
      };
      count += 1;
    }
  }

  count
}

/// Extract the isosurface on the calling thread, scanning cubes x-fastest.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marching_cubes::generate"))]
pub fn generate(volume: &VoxelVolume, config: &MeshConfig) -> MeshOutput {
  let mut output = MeshOutput::new();
  let Some(cubes) = cube_grid(volume.size()) else {
    return output;
  };

  let mut scratch = [MeshingVertex::default(); MAX_VERTICES_PER_CUBE];
  for z in 0..cubes.z {
    for y in 0..cubes.y {
      for x in 0..cubes.x {
        let count = march_cube(volume, UVec3::new(x, y, z), config, &mut scratch);
        for vertex in &scratch[..count] {
          output.indices.push(output.vertices.len() as u32);
          output.vertices.push(*vertex);
        }
      }
    }
  }

  output.recalculate_bounds();
  output
}

/// Extract the isosurface with cubes processed in parallel on rayon's pool.
///
/// Produces the same triangles as [`generate`]; their order in the output is
/// unspecified.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marching_cubes::generate_parallel"))]
pub fn generate_parallel(volume: &VoxelVolume, config: &MeshConfig) -> MeshOutput {
  let capacity = max_vertex_count(volume.size());
  let mut vertices = vec![MeshingVertex::default(); capacity];
  let mut indices = vec![0u32; capacity];
  let counter = VertexCounter::new();

  // Sized for the worst case, so every reservation fits
  extract_shared(
    volume,
    config,
    &counter,
    &SharedSlice::new(&mut vertices),
    &SharedSlice::new(&mut indices),
  );

  let count = counter.count();
  vertices.truncate(count);
  indices.truncate(count);

  let mut output = MeshOutput {
    vertices,
    indices,
    bounds: MinMaxAABB::empty(),
  };
  output.recalculate_bounds();
  output
}

/// Extract in parallel into caller-owned buffers, continuing from the
/// counter's current value.
///
/// Several volumes can be appended into one pair of buffers by reusing the
/// counter. Both buffers must hold `counter.count() + max_vertex_count(size)`
/// entries. Returns the counter's final value; entries past it are untouched.
///
/// Every reservation is checked against the buffers, so concurrent calls that
/// share one counter report [`VoxelError::BufferTooSmall`] instead of writing
/// out of bounds. Cubes whose reservation did not fit are dropped and the
/// counter is left past the buffer end.
pub fn extract_into(
  volume: &VoxelVolume,
  config: &MeshConfig,
  counter: &VertexCounter,
  vertices: &mut [MeshingVertex],
  indices: &mut [u32],
) -> Result<usize, VoxelError> {
  let required = counter.count() + max_vertex_count(volume.size());
  let available = vertices.len().min(indices.len());
  if available < required {
    return Err(VoxelError::BufferTooSmall { required, available });
  }

  let fits = extract_shared(
    volume,
    config,
    counter,
    &SharedSlice::new(vertices),
    &SharedSlice::new(indices),
  );
  if !fits {
    return Err(VoxelError::BufferTooSmall {
      required: counter.count(),
      available,
    });
  }
  Ok(counter.count())
}

/// Parallel extraction core.
///
/// Returns `false` when some reservation ran past the buffers; those cubes
/// are not written.
fn extract_shared(
  volume: &VoxelVolume,
  config: &MeshConfig,
  counter: &VertexCounter,
  vertices: &SharedSlice<'_, MeshingVertex>,
  indices: &SharedSlice<'_, u32>,
) -> bool {
  let Some(cubes) = cube_grid(volume.size()) else {
    return true;
  };
  let capacity = vertices.len().min(indices.len());
  let overflowed = AtomicBool::new(false);

  let width = cubes.x as usize;
  let slice = cubes.x as usize * cubes.y as usize;
  let total = slice * cubes.z as usize;

  (0..total).into_par_iter().for_each_init(
    || [MeshingVertex::default(); MAX_VERTICES_PER_CUBE],
    |scratch, cube_index| {
      let cell = UVec3::new(
        (cube_index % width) as u32,
        ((cube_index % slice) / width) as u32,
        (cube_index / slice) as u32,
      );

      let count = march_cube(volume, cell, config, scratch);
      if count == 0 {
        return;
      }

      let start = counter.reserve(count);
      if start + count > capacity {
        overflowed.store(true, Ordering::Relaxed);
        return;
      }
      for (offset, vertex) in scratch[..count].iter().enumerate() {
        let slot = start + offset;
        // SAFETY: [start, start + count) was reserved by this cube alone
        unsafe {
          vertices.write(slot, *vertex);
          indices.write(slot, slot as u32);
        }
      }
    },
  );

  !overflowed.load(Ordering::Relaxed)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
