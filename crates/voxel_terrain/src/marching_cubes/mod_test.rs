use glam::{IVec3, Vec3};

use super::*;
use crate::volume::Allocation;

fn sphere_volume(size: u32, radius: f32) -> (VoxelVolume, Vec3) {
  let center = Vec3::splat((size - 1) as f32 * 0.5);
  let volume = VoxelVolume::from_fn(UVec3::splat(size), Allocation::Scratch, |p| {
    p.as_vec3().distance(center) - radius
  })
  .unwrap();
  (volume, center)
}

/// 2×2×2 volume with corner 0 inside and the rest outside.
fn single_corner_volume() -> VoxelVolume {
  let mut volume = VoxelVolume::filled(UVec3::splat(2), 1.0, Allocation::Scratch).unwrap();
  volume.set(-1.0, IVec3::ZERO);
  volume
}

fn sorted_positions(output: &MeshOutput) -> Vec<[u32; 3]> {
  let mut positions: Vec<[u32; 3]> = output
    .vertices
    .iter()
    .map(|v| v.position.map(f32::to_bits))
    .collect();
  positions.sort_unstable();
  positions
}

fn assert_close(a: [f32; 3], b: [f32; 3]) {
  for i in 0..3 {
    assert!((a[i] - b[i]).abs() < 1e-5, "{a:?} != {b:?}");
  }
}

#[test]
fn test_cube_mask_bits() {
  let mut densities = [1.0f32; 8];
  assert_eq!(cube_mask(&densities, 0.0), 0);

  densities[0] = -1.0;
  densities[6] = -0.5;
  assert_eq!(cube_mask(&densities, 0.0), 0b0100_0001);

  // Equal to the iso-level counts as outside
  assert_eq!(cube_mask(&[0.0; 8], 0.0), 0);
  assert_eq!(cube_mask(&[0.0; 8], 0.5), 255);
}

#[test]
fn test_cube_grid_sizes() {
  assert_eq!(cube_grid(UVec3::new(17, 17, 17)), Some(UVec3::splat(16)));
  assert_eq!(cube_grid(UVec3::new(2, 5, 3)), Some(UVec3::new(1, 4, 2)));
  assert_eq!(cube_grid(UVec3::new(1, 5, 5)), None);
  assert_eq!(cube_count(UVec3::new(3, 3, 2)), 4);
  assert_eq!(max_vertex_count(UVec3::splat(3)), 8 * MAX_VERTICES_PER_CUBE);
}

#[test]
fn test_homogeneous_volumes_are_empty() {
  let config = MeshConfig::default();

  let outside = VoxelVolume::filled(UVec3::splat(8), 1.0, Allocation::Scratch).unwrap();
  assert!(generate(&outside, &config).is_empty());
  assert!(generate_parallel(&outside, &config).is_empty());

  let inside = VoxelVolume::filled(UVec3::splat(8), -1.0, Allocation::Scratch).unwrap();
  assert!(generate(&inside, &config).is_empty());
  assert!(generate_parallel(&inside, &config).is_empty());
}

#[test]
fn test_too_small_volume_is_empty() {
  let flat = VoxelVolume::from_fn(UVec3::new(4, 1, 4), Allocation::Scratch, |p| p.x as f32 - 1.5).unwrap();
  let config = MeshConfig::default();

  assert!(generate(&flat, &config).is_empty());
  assert!(generate_parallel(&flat, &config).is_empty());
}

#[test]
fn test_single_corner_emits_one_triangle() {
  let output = generate(&single_corner_volume(), &MeshConfig::default());

  assert_eq!(output.triangle_count(), 1);
  assert_eq!(output.indices, vec![0, 1, 2]);

  // Midpoints of edges 0 (x), 3 (z) and 8 (y) from corner 0
  let mut positions: Vec<[f32; 3]> = output.vertices.iter().map(|v| v.position).collect();
  positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
  assert_close(positions[0], [0.0, 0.0, 0.5]);
  assert_close(positions[1], [0.0, 0.5, 0.0]);
  assert_close(positions[2], [0.5, 0.0, 0.0]);
}

#[test]
fn test_single_corner_normal_points_away_from_inside() {
  let output = generate(&single_corner_volume(), &MeshConfig::default());
  for vertex in &output.vertices {
    let n = vertex.normal;
    assert!(n[0] > 0.0 && n[1] > 0.0 && n[2] > 0.0, "{n:?}");
  }
}

#[test]
fn test_single_corner_interpolation_weights() {
  let mut volume = VoxelVolume::filled(UVec3::splat(2), 3.0, Allocation::Scratch).unwrap();
  volume.set(-1.0, IVec3::ZERO);

  let output = generate(&volume, &MeshConfig::default());
  // Crossing a quarter of the way from corner 0
  for vertex in &output.vertices {
    let max = vertex.position.iter().copied().fold(0.0f32, f32::max);
    assert!((max - 0.25).abs() < 1e-6);
  }
}

#[test]
fn test_iso_level_shifts_classification() {
  let volume = VoxelVolume::filled(UVec3::splat(4), 0.5, Allocation::Scratch).unwrap();
  assert!(generate(&volume, &MeshConfig::default().with_iso_level(1.0)).is_empty());

  let single = single_corner_volume();
  // With iso 2.0 every corner is inside
  assert!(generate(&single, &MeshConfig::default().with_iso_level(2.0)).is_empty());
}

#[test]
fn test_voxel_scale_scales_positions() {
  let unit = generate(&single_corner_volume(), &MeshConfig::default());
  let scaled = generate(&single_corner_volume(), &MeshConfig::default().with_voxel_scale(2.0));

  for (a, b) in unit.vertices.iter().zip(&scaled.vertices) {
    assert_close(a.position.map(|c| c * 2.0), b.position);
  }
}

#[test]
fn test_vertices_are_white_without_colors() {
  let output = generate(&single_corner_volume(), &MeshConfig::default());
  assert!(output.vertices.iter().all(|v| v.color == WHITE));
}

#[test]
fn test_vertex_colors_are_interpolated() {
  let mut volume = single_corner_volume().with_colors([255, 255, 255, 255]);
  volume.set_color([0, 0, 0, 255], IVec3::ZERO);

  let output = generate(&volume, &MeshConfig::default());
  for vertex in &output.vertices {
    assert_eq!(vertex.color, [128, 128, 128, 255]);
  }
}

#[test]
fn test_flat_normals_shared_per_triangle() {
  let (volume, _) = sphere_volume(10, 3.0);
  let output = generate(&volume, &MeshConfig::default().with_normal_mode(NormalMode::Flat));

  assert!(!output.is_empty());
  for triangle in output.vertices.chunks_exact(3) {
    assert_eq!(triangle[0].normal, triangle[1].normal);
    assert_eq!(triangle[1].normal, triangle[2].normal);
  }
}

#[test]
fn test_sphere_vertices_lie_on_surface() {
  let (volume, center) = sphere_volume(16, 5.0);
  let output = generate(&volume, &MeshConfig::default());

  assert!(output.triangle_count() > 0);
  for vertex in &output.vertices {
    let position = Vec3::from_array(vertex.position);
    let distance = position.distance(center);
    assert!((distance - 5.0).abs() < 0.25, "vertex at distance {distance}");

    let normal = Vec3::from_array(vertex.normal);
    assert!((normal.length() - 1.0).abs() < 1e-4);
    assert!(normal.dot(position - center) > 0.0, "normal points inwards");
  }
}

#[test]
fn test_sphere_bounds() {
  let (volume, center) = sphere_volume(16, 5.0);
  let output = generate(&volume, &MeshConfig::default());

  assert!(output.bounds.is_valid());
  for axis in 0..3 {
    assert!(output.bounds.min[axis] > center[axis] - 5.25);
    assert!(output.bounds.max[axis] < center[axis] + 5.25);
  }
}

#[test]
fn test_sequential_indices_are_identity() {
  let (volume, _) = sphere_volume(12, 4.0);
  let output = generate(&volume, &MeshConfig::default());

  assert_eq!(output.indices.len(), output.vertices.len());
  assert!(output.indices.iter().enumerate().all(|(i, &index)| index as usize == i));
}

#[test]
fn test_generate_is_deterministic() {
  let (volume, _) = sphere_volume(12, 4.0);
  let a = generate(&volume, &MeshConfig::default());
  let b = generate(&volume, &MeshConfig::default());
  assert_eq!(a.vertices, b.vertices);
}

#[test]
fn test_parallel_conserves_vertices() {
  let (volume, _) = sphere_volume(24, 8.5);
  let config = MeshConfig::default();

  let sequential = generate(&volume, &config);
  let parallel = generate_parallel(&volume, &config);

  assert_eq!(parallel.vertex_count(), sequential.vertex_count());
  assert_eq!(parallel.indices.len(), parallel.vertices.len());
  assert!(parallel.indices.iter().enumerate().all(|(i, &index)| index as usize == i));
  assert_eq!(sorted_positions(&parallel), sorted_positions(&sequential));
  assert_eq!(parallel.bounds, sequential.bounds);
}

#[test]
fn test_parallel_triangles_stay_contiguous() {
  let (volume, _) = sphere_volume(16, 5.0);
  let output = generate_parallel(&volume, &MeshConfig::default());

  // Each cube writes whole triangles into its reserved run, so every triple
  // shares the cube's gradient normal
  for triangle in output.vertices.chunks_exact(3) {
    assert_eq!(triangle[0].normal, triangle[2].normal);
  }
}

#[test]
fn test_extract_into_rejects_small_buffers() {
  let (volume, _) = sphere_volume(6, 2.0);
  let counter = VertexCounter::new();
  let mut vertices = vec![MeshingVertex::default(); 10];
  let mut indices = vec![0u32; 10];

  let result = extract_into(&volume, &MeshConfig::default(), &counter, &mut vertices, &mut indices);
  assert_eq!(
    result,
    Err(VoxelError::BufferTooSmall {
      required: max_vertex_count(volume.size()),
      available: 10,
    })
  );
  assert_eq!(counter.count(), 0);
}

#[test]
fn test_reservations_past_buffer_end_are_dropped() {
  let (volume, _) = sphere_volume(6, 2.0);
  let config = MeshConfig::default();
  let counter = VertexCounter::new();
  let mut vertices = vec![MeshingVertex::default(); 3];
  let mut indices = vec![u32::MAX; 3];

  let fits = extract_shared(
    &volume,
    &config,
    &counter,
    &SharedSlice::new(&mut vertices),
    &SharedSlice::new(&mut indices),
  );

  assert!(!fits);
  assert_eq!(counter.count(), generate(&volume, &config).vertex_count());
  assert!(indices.iter().enumerate().all(|(i, &index)| index == u32::MAX || index as usize == i));
}

#[test]
fn test_concurrent_extract_into_never_overruns() {
  let (volume, _) = sphere_volume(8, 2.5);
  let config = MeshConfig::default();
  let capacity = max_vertex_count(volume.size());
  let single = generate(&volume, &config).vertex_count();
  let counter = VertexCounter::new();

  let results: Vec<_> = std::thread::scope(|scope| {
    let workers: Vec<_> = (0..4)
      .map(|_| {
        scope.spawn(|| {
          let mut vertices = vec![MeshingVertex::default(); capacity];
          let mut indices = vec![0u32; capacity];
          extract_into(&volume, &config, &counter, &mut vertices, &mut indices)
        })
      })
      .collect();
    workers.into_iter().map(|worker| worker.join().unwrap()).collect()
  });

  for result in results {
    match result {
      Ok(count) => assert!(count >= single),
      Err(VoxelError::BufferTooSmall { available, .. }) => assert_eq!(available, capacity),
      Err(other) => panic!("unexpected error: {other:?}"),
    }
  }
}

#[test]
fn test_extract_into_appends_with_shared_counter() {
  let (volume, _) = sphere_volume(8, 2.5);
  let config = MeshConfig::default();
  let single = generate(&volume, &config).vertex_count();

  let capacity = 2 * max_vertex_count(volume.size());
  let mut vertices = vec![MeshingVertex::default(); capacity];
  let mut indices = vec![0u32; capacity];
  let counter = VertexCounter::new();

  let first = extract_into(&volume, &config, &counter, &mut vertices, &mut indices).unwrap();
  let second = extract_into(&volume, &config, &counter, &mut vertices, &mut indices).unwrap();

  assert_eq!(first, single);
  assert_eq!(second, 2 * single);
  assert!(indices[..second].iter().enumerate().all(|(i, &index)| index as usize == i));
}

#[test]
fn test_march_cube_matches_table_vertex_count() {
  let volume = single_corner_volume();
  let mut scratch = [MeshingVertex::default(); MAX_VERTICES_PER_CUBE];
  let count = march_cube(&volume, UVec3::ZERO, &MeshConfig::default(), &mut scratch);
  assert_eq!(count, triangle_list_for(0b0000_0001).vertex_count());
}

#[test]
fn test_every_mask_stays_within_cube() {
  let config = MeshConfig::default();
  let mut scratch = [MeshingVertex::default(); MAX_VERTICES_PER_CUBE];

  for mask in 0..=255u8 {
    let mut volume = VoxelVolume::filled(UVec3::splat(2), 1.0, Allocation::Scratch).unwrap();
    for (corner, [x, y, z]) in CUBE_CORNERS.into_iter().enumerate() {
      if mask & (1 << corner) != 0 {
        volume.set(-1.0, IVec3::new(x as i32, y as i32, z as i32));
      }
    }

    let count = march_cube(&volume, UVec3::ZERO, &config, &mut scratch);
    assert_eq!(count, triangle_list_for(mask).vertex_count(), "mask {mask}");
    for vertex in &scratch[..count] {
      assert!(vertex.position.iter().all(|&c| (0.0..=1.0).contains(&c)), "mask {mask}");
    }
  }
}
