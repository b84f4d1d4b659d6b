//! Normal computation using glam SIMD.
//!
//! The cube gradient uses the 2x2x2 stencil of the 8 corner densities: each
//! axis component is the sum over the far face minus the sum over the near
//! face.
//!
//! ```text
//!        7 ──── 6        +Y
//!       /│     /│         │
//!      4 ──── 5 │         └── +X
//!      │ 3 ───│─ 2       /
//!      │/     │/        +Z
//!      0 ──── 1
//! ```

use glam::Vec3A;

use crate::edge_table::CUBE_CORNERS;

/// Normal returned when the gradient vanishes.
pub const FALLBACK_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Unit gradient of the 8 corner densities (pointing towards increasing
/// density, i.e. out of the surface).
#[inline]
pub fn compute(densities: &[f32; 8]) -> [f32; 3] {
  let mut gradient = Vec3A::ZERO;
  for (corner, &density) in densities.iter().enumerate() {
    let [x, y, z] = CUBE_CORNERS[corner];
    // Offset 0 → -1 (near face), 1 → +1 (far face)
    let sign = Vec3A::new(x as f32, y as f32, z as f32) * 2.0 - Vec3A::ONE;
    gradient += sign * density;
  }

  normalize_or_fallback(gradient, FALLBACK_NORMAL)
}

/// Unit face normal of a triangle, flipped to agree with `reference`.
///
/// Degenerate triangles return `reference`.
#[inline]
pub fn face_normal(positions: [[f32; 3]; 3], reference: [f32; 3]) -> [f32; 3] {
  let p0 = Vec3A::from_array(positions[0]);
  let p1 = Vec3A::from_array(positions[1]);
  let p2 = Vec3A::from_array(positions[2]);

  let mut normal = (p1 - p0).cross(p2 - p0);
  if normal.dot(Vec3A::from_array(reference)) < 0.0 {
    normal = -normal;
  }

  normalize_or_fallback(normal, reference)
}

#[inline]
fn normalize_or_fallback(v: Vec3A, fallback: [f32; 3]) -> [f32; 3] {
  let len_sq = v.length_squared();
  if len_sq < 1e-12 {
    return fallback;
  }
  (v * len_sq.sqrt().recip()).to_array()
}

#[cfg(test)]
#[path = "gradient_test.rs"]
mod gradient_test;
