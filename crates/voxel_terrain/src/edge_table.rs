//! Cube topology tables shared by the marching cubes extractor and the
//! boundary chunk enumeration.
//!
//! # Cube Topology
//!
//! ```text
//!       7──────6         Corners (Y up, bottom face first):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(1,0,1)  3=(0,0,1)
//!     4─┼────5 │           4=(0,1,0)  5=(1,1,0)  6=(1,1,1)  7=(0,1,1)
//!     │ 3────┼─2
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! # Edge Layout
//!
//! ```text
//! Bottom ring:  0:[0,1]  1:[1,2]  2:[2,3]  3:[3,0]
//! Top ring:     4:[4,5]  5:[5,6]  6:[6,7]  7:[7,4]
//! Verticals:    8:[0,4]  9:[1,5] 10:[2,6] 11:[3,7]
//! ```
//!
//! The triangle table in [`crate::triangle_table`] is authored against exactly
//! this labelling. Reordering corners here silently corrupts every mesh.

/// Offsets of the 8 cube corners relative to the cube's minimum corner.
pub const CUBE_CORNERS: [[u32; 3]; 8] = [
  [0, 0, 0],
  [1, 0, 0],
  [1, 0, 1],
  [0, 0, 1],
  [0, 1, 0],
  [1, 1, 0],
  [1, 1, 1],
  [0, 1, 1],
];

/// Edge endpoint corner indices (12 edges × 2 corners).
pub const EDGE_CORNERS: [[u8; 2]; 12] = [
  [0, 1], // Edge 0:  X axis, bottom, Z=0
  [1, 2], // Edge 1:  Z axis, bottom, X=1
  [2, 3], // Edge 2:  X axis, bottom, Z=1
  [3, 0], // Edge 3:  Z axis, bottom, X=0
  [4, 5], // Edge 4:  X axis, top, Z=0
  [5, 6], // Edge 5:  Z axis, top, X=1
  [6, 7], // Edge 6:  X axis, top, Z=1
  [7, 4], // Edge 7:  Z axis, top, X=0
  [0, 4], // Edge 8:  Y axis at (0,0)
  [1, 5], // Edge 9:  Y axis at (1,0)
  [2, 6], // Edge 10: Y axis at (1,1)
  [3, 7], // Edge 11: Y axis at (0,1)
];

/// Precomputed edge crossing table.
/// Index: 8-bit configuration mask (which corners are inside)
/// Value: 12-bit edge mask (which edges have crossings)
///
/// An edge has a crossing if exactly one of its endpoint corners is inside.
pub const EDGE_TABLE: [u16; 256] = generate_edge_table();

/// Generate the edge table at compile time.
const fn generate_edge_table() -> [u16; 256] {
  let mut table = [0u16; 256];
  let mut corner_mask = 0usize;

  while corner_mask < 256 {
    let mut edge_mask = 0u16;
    let mut edge = 0;

    while edge < 12 {
      let c0 = EDGE_CORNERS[edge][0] as usize;
      let c1 = EDGE_CORNERS[edge][1] as usize;

      let inside0 = (corner_mask >> c0) & 1;
      let inside1 = (corner_mask >> c1) & 1;

      if inside0 != inside1 {
        edge_mask |= 1 << edge;
      }

      edge += 1;
    }

    table[corner_mask] = edge_mask;
    corner_mask += 1;
  }

  table
}

/// Get corner position within unit cube.
#[inline(always)]
pub const fn corner_position(corner: u8) -> [f32; 3] {
  let [x, y, z] = CUBE_CORNERS[corner as usize];
  [x as f32, y as f32, z as f32]
}

#[cfg(test)]
#[path = "edge_table_test.rs"]
mod edge_table_test;
