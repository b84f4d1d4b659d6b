use super::*;

#[test]
fn test_crossing_midpoint() {
  assert_eq!(crossing(-1.0, 1.0, 0.0), 0.5);
}

#[test]
fn test_crossing_weighted() {
  let t = crossing(-1.0, 3.0, 0.0);
  assert!((t - 0.25).abs() < 1e-6);
}

#[test]
fn test_crossing_nonzero_iso_level() {
  let t = crossing(0.0, 10.0, 2.5);
  assert!((t - 0.25).abs() < 1e-6);
}

#[test]
fn test_crossing_flat_edge() {
  assert_eq!(crossing(0.3, 0.3, 0.0), 0.5);
  assert_eq!(crossing(0.3, 0.3 + 1e-7, 0.3), 0.5);
}

#[test]
fn test_crossing_is_clamped() {
  // Iso level outside the edge's range
  assert_eq!(crossing(1.0, 2.0, 0.0), 0.0);
  assert_eq!(crossing(1.0, 2.0, 5.0), 1.0);
}

#[test]
fn test_lerp_position() {
  let p = lerp_position([0.0, 0.0, 0.0], [0.0, 2.0, 0.0], 0.25);
  assert_eq!(p, [0.0, 0.5, 0.0]);
}

#[test]
fn test_lerp_color() {
  assert_eq!(lerp_color([0, 0, 0, 255], [255, 100, 10, 255], 0.5), [128, 50, 5, 255]);
  assert_eq!(lerp_color([10, 20, 30, 40], [90, 80, 70, 60], 0.0), [10, 20, 30, 40]);
  assert_eq!(lerp_color([10, 20, 30, 40], [90, 80, 70, 60], 1.0), [90, 80, 70, 60]);
}
