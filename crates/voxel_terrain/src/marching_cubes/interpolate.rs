//! Edge crossing interpolation.

use crate::types::VoxelColor;

/// Density differences below this are treated as a flat edge.
pub const FLAT_EDGE_EPSILON: f32 = 1e-5;

/// Parameter along an edge where density crosses `iso_level`.
///
/// Returns 0.5 for a flat edge. The result is clamped to `[0, 1]`.
#[inline]
pub fn crossing(d0: f32, d1: f32, iso_level: f32) -> f32 {
  let delta = d1 - d0;
  if delta.abs() < FLAT_EDGE_EPSILON {
    return 0.5;
  }
  ((iso_level - d0) / delta).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp_position(p0: [f32; 3], p1: [f32; 3], t: f32) -> [f32; 3] {
  [
    p0[0] + (p1[0] - p0[0]) * t,
    p0[1] + (p1[1] - p0[1]) * t,
    p0[2] + (p1[2] - p0[2]) * t,
  ]
}

/// Per-channel colour blend, rounded to the nearest value.
#[inline]
pub fn lerp_color(c0: VoxelColor, c1: VoxelColor, t: f32) -> VoxelColor {
  let mut out = [0u8; 4];
  for i in 0..4 {
    let a = c0[i] as f32;
    let b = c1[i] as f32;
    out[i] = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
  }
  out
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
