use super::*;

fn ramp(size: UVec3) -> VoxelVolume {
  VoxelVolume::from_fn(size, Allocation::Scratch, |p| (p.x + 10 * p.y + 100 * p.z) as f32).unwrap()
}

#[test]
fn test_zero_size_rejected() {
  assert_eq!(
    VoxelVolume::new(UVec3::new(4, 0, 4), Allocation::Persistent),
    Err(VoxelError::InvalidSize(UVec3::new(4, 0, 4)))
  );
}

#[test]
fn test_index_is_x_fastest() {
  let volume = VoxelVolume::new_scratch(UVec3::new(3, 4, 5)).unwrap();
  assert_eq!(volume.index(IVec3::new(0, 0, 0)), Some(0));
  assert_eq!(volume.index(IVec3::new(1, 0, 0)), Some(1));
  assert_eq!(volume.index(IVec3::new(0, 1, 0)), Some(3));
  assert_eq!(volume.index(IVec3::new(0, 0, 1)), Some(12));
  assert_eq!(volume.index(IVec3::new(2, 3, 4)), Some(59));
}

#[test]
fn test_index_roundtrip_is_bijective() {
  let volume = VoxelVolume::new_scratch(UVec3::new(5, 3, 7)).unwrap();
  let mut seen = vec![false; volume.len()];
  for position in volume.bounds().iter() {
    let index = volume.index(position).unwrap();
    assert!(!seen[index], "index {} produced twice", index);
    seen[index] = true;
    assert_eq!(volume.position_of(index).as_ivec3(), position);
  }
  assert!(seen.into_iter().all(|s| s));
}

#[test]
fn test_out_of_range_lookup() {
  let volume = ramp(UVec3::splat(4));
  assert_eq!(volume.get(IVec3::new(-1, 0, 0)), None);
  assert_eq!(volume.get(IVec3::new(0, 4, 0)), None);
  assert_eq!(volume.get(IVec3::new(0, 0, 100)), None);
  assert_eq!(volume.get(IVec3::new(3, 2, 1)), Some(123.0));
}

#[test]
fn test_set_out_of_range_is_noop() {
  let mut volume = ramp(UVec3::splat(4));
  let before = volume.clone();

  assert!(!volume.set(9.0, IVec3::new(4, 0, 0)));
  assert!(!volume.set(9.0, IVec3::new(0, -1, 0)));
  assert_eq!(volume, before);

  assert!(volume.set(9.0, IVec3::new(1, 1, 1)));
  assert_eq!(volume.get(IVec3::new(1, 1, 1)), Some(9.0));
}

#[test]
fn test_try_set_reports_out_of_range() {
  let mut volume = VoxelVolume::new_scratch(UVec3::splat(2)).unwrap();
  assert_eq!(volume.try_set(1.0, IVec3::ONE), Ok(()));
  assert_eq!(
    volume.try_set(1.0, IVec3::new(2, 0, 0)),
    Err(VoxelError::OutOfRange {
      position: IVec3::new(2, 0, 0),
      size: UVec3::splat(2),
    })
  );
}

#[test]
fn test_increase() {
  let mut volume = VoxelVolume::filled(UVec3::splat(3), 1.0, Allocation::Scratch).unwrap();
  assert!(volume.increase(0.5, IVec3::new(2, 2, 2)));
  assert_eq!(volume.get(IVec3::new(2, 2, 2)), Some(1.5));
  assert!(!volume.increase(0.5, IVec3::new(3, 2, 2)));

  let index = volume.index(IVec3::ZERO).unwrap();
  assert!(volume.increase_by_index(-2.0, index));
  assert_eq!(volume.get_by_index(index), Some(-1.0));
  assert!(!volume.increase_by_index(1.0, volume.len()));
}

#[test]
fn test_copy_from_requires_equal_dimensions() {
  let mut a = VoxelVolume::new_scratch(UVec3::splat(3)).unwrap();
  let b = VoxelVolume::new_scratch(UVec3::new(3, 3, 4)).unwrap();
  assert_eq!(
    a.copy_from(&b),
    Err(VoxelError::DimensionMismatch {
      expected: UVec3::splat(3),
      found: UVec3::new(3, 3, 4),
    })
  );
}

#[test]
fn test_copy_from_overwrites_in_place() {
  let mut a = VoxelVolume::new(UVec3::splat(4), Allocation::Persistent).unwrap();
  let b = ramp(UVec3::splat(4)).with_colors([1, 2, 3, 4]);

  a.copy_from(&b).unwrap();
  assert_eq!(a.densities(), b.densities());
  assert_eq!(a.colors(), b.colors());
  // Allocation tag belongs to the destination
  assert_eq!(a.allocation(), Allocation::Persistent);

  let plain = ramp(UVec3::splat(4));
  a.copy_from(&plain).unwrap();
  assert!(a.colors().is_none());
}

#[test]
fn test_colors() {
  let mut volume = VoxelVolume::new_scratch(UVec3::splat(2)).unwrap();
  assert_eq!(volume.get_color(IVec3::ZERO), None);

  assert!(volume.set_color([10, 20, 30, 255], IVec3::new(1, 0, 1)));
  assert_eq!(volume.get_color(IVec3::new(1, 0, 1)), Some([10, 20, 30, 255]));
  assert_eq!(volume.get_color(IVec3::ZERO), Some(WHITE));
  assert!(!volume.set_color(WHITE, IVec3::splat(2)));
}
