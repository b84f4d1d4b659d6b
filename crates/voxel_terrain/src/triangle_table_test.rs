use super::*;
use crate::edge_table::{EDGE_CORNERS, EDGE_TABLE};

#[test]
fn test_homogeneous_configurations_are_empty() {
  assert!(triangle_list_for(0).is_empty());
  assert!(triangle_list_for(255).is_empty());
}

#[test]
fn test_access_indices_known_offsets() {
  assert_eq!(TRIANGLE_TABLE_ACCESS_INDICES[0], 0);
  assert_eq!(TRIANGLE_TABLE_ACCESS_INDICES[1], 1);
  assert_eq!(TRIANGLE_TABLE_ACCESS_INDICES[2], 5);
  assert_eq!(TRIANGLE_TABLE_ACCESS_INDICES[3], 9);
  assert_eq!(TRIANGLE_TABLE_ACCESS_INDICES[255], 2715);
}

#[test]
fn test_single_corner_is_one_triangle_on_adjacent_edges() {
  for corner in 0..8u8 {
    let list = triangle_list_for(1 << corner);
    assert_eq!(list.triangle_count(), 1, "corner {}", corner);

    for &edge in list.edges() {
      let [c0, c1] = EDGE_CORNERS[edge as usize];
      assert!(
        c0 == corner || c1 == corner,
        "edge {} is not adjacent to corner {}",
        edge,
        corner
      );
    }
  }
}

#[test]
fn test_rows_use_exactly_the_crossing_edges() {
  for mask in 0..=255u8 {
    let mut used = 0u16;
    for &edge in triangle_list_for(mask).edges() {
      used |= 1 << edge;
    }
    assert_eq!(
      used, EDGE_TABLE[mask as usize],
      "mask {} uses edges {:012b}, crossings are {:012b}",
      mask, used, EDGE_TABLE[mask as usize]
    );
  }
}

#[test]
fn test_triangle_count_bounds() {
  let mut max = 0;
  for mask in 0..=255u8 {
    let list = triangle_list_for(mask);
    assert_eq!(list.vertex_count(), list.triangle_count() * 3);
    assert_eq!(list.triangles().count(), list.triangle_count());
    max = max.max(list.triangle_count());
  }
  assert_eq!(max, MAX_TRIANGLES_PER_CUBE);
}

#[test]
fn test_triangles_are_not_degenerate() {
  for mask in 0..=255u8 {
    for [a, b, c] in triangle_list_for(mask).triangles() {
      assert!(a != b && b != c && a != c, "mask {} repeats an edge", mask);
    }
  }
}
