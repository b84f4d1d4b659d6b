use super::*;

#[test]
fn test_default_chunk_size() {
  let settings = WorldSettings::default();
  assert_eq!(settings.chunk_size(), IVec3::splat(16));
  assert_eq!(settings.chunk_volume_size(), UVec3::splat(17));
}

#[test]
fn test_zero_chunk_size_rejected() {
  assert_eq!(
    WorldSettings::new(UVec3::new(16, 0, 16)),
    Err(VoxelError::InvalidSize(UVec3::new(16, 0, 16)))
  );
}

#[test]
fn test_non_cubic_chunks() {
  let settings = WorldSettings::new(UVec3::new(8, 32, 4)).unwrap();
  assert_eq!(settings.chunk_volume_size(), UVec3::new(9, 33, 5));
  assert_eq!(
    settings.chunk_origin(IVec3::new(-1, 2, 3)),
    IVec3::new(-8, 64, 12)
  );
}

#[test]
fn test_new_chunk_volume() {
  let settings = WorldSettings::cubic(4).unwrap();
  let volume = settings.new_chunk_volume();
  assert_eq!(volume.size(), UVec3::splat(5));
  assert!(volume.densities().iter().all(|&d| d == 0.0));
}
