//! World ↔ chunk coordinate arithmetic.
//!
//! ```text
//! chunk_size = 16
//!
//! world x:   -17  -16  -15 ... -1    0    1 ... 15   16   17
//! chunk x:    -2   -1   -1 ... -1    0    0 ...  0    1    1
//! local x:    15    0    1 ... 15    0    1 ... 15    0    1
//! ```
//!
//! Chunk coordinates use floor division, never truncation, so negative world
//! positions land in the correct chunk. A sample whose local coordinate is 0
//! on some axis is also the last sample of the neighbouring chunk on that axis.

use glam::IVec3;
use smallvec::SmallVec;

use crate::bounds::BoundsInt;
use crate::edge_table::CUBE_CORNERS;

/// Chunk coordinate containing a world position: `floor(world / chunk_size)`.
#[inline]
pub fn world_to_chunk(world: IVec3, chunk_size: IVec3) -> IVec3 {
  world.div_euclid(chunk_size)
}

/// Local position inside the owning chunk: always in `0..chunk_size`.
#[inline]
pub fn world_to_local(world: IVec3, chunk_size: IVec3) -> IVec3 {
  world.rem_euclid(chunk_size)
}

/// World position of a chunk-local sample.
#[inline]
pub fn local_to_world(coordinate: IVec3, local: IVec3, chunk_size: IVec3) -> IVec3 {
  coordinate * chunk_size + local
}

/// Every chunk that stores a sample for `world`.
///
/// The owning chunk is always first. For each axis on which the local
/// coordinate is 0, the chunk one step back on that axis also holds the sample
/// on its maximum face, giving 1, 2, 4 or 8 coordinates.
pub fn chunk_coordinates_containing_point(world: IVec3, chunk_size: IVec3) -> SmallVec<[IVec3; 8]> {
  let local = world_to_local(world, chunk_size);
  let on_min_face = [local.x == 0, local.y == 0, local.z == 0].map(u32::from);
  let origin = world_to_chunk(world, chunk_size);

  let mut coordinates = SmallVec::new();
  coordinates.push(origin);

  // Corner 0 is (0,0,0) and would just repeat the origin
  for offset in &CUBE_CORNERS[1..] {
    if offset[0] <= on_min_face[0] && offset[1] <= on_min_face[1] && offset[2] <= on_min_face[2] {
      let step = IVec3::new(offset[0] as i32, offset[1] as i32, offset[2] as i32);
      coordinates.push(origin - step);
    }
  }

  coordinates
}

/// Chunk coordinates whose samples may intersect `query`.
///
/// The query is widened by one sample on each side so chunks that only
/// contribute their shared boundary samples are included.
pub fn chunks_overlapping(query: &BoundsInt, chunk_size: IVec3) -> impl Iterator<Item = IVec3> {
  let min = world_to_chunk(query.min - IVec3::ONE, chunk_size);
  let max = world_to_chunk(query.max(), chunk_size);
  BoundsInt::from_min_max_inclusive(min, max).iter()
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;
