//! Slice wrapper allowing disjoint concurrent writes.

use std::marker::PhantomData;

/// Mutable slice that many rayon workers write through at once.
///
/// Soundness relies on every writer owning a range reserved from a
/// [`super::VertexCounter`]: ranges never overlap, so no two threads touch the
/// same element.
pub(crate) struct SharedSlice<'a, T> {
  ptr: *mut T,
  len: usize,
  _borrow: PhantomData<&'a mut [T]>,
}

// SAFETY: the wrapper only hands out writes to disjoint indices (see `write`),
// and the underlying slice is exclusively borrowed for 'a.
unsafe impl<T: Send> Send for SharedSlice<'_, T> {}
unsafe impl<T: Send> Sync for SharedSlice<'_, T> {}

impl<'a, T: Copy> SharedSlice<'a, T> {
  pub(crate) fn new(slice: &'a mut [T]) -> Self {
    Self {
      ptr: slice.as_mut_ptr(),
      len: slice.len(),
      _borrow: PhantomData,
    }
  }

  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.len
  }

  /// Write `value` at `index`.
  ///
  /// # Safety
  ///
  /// No other thread may read or write `index` for the lifetime of the
  /// wrapper.
  #[inline]
  pub(crate) unsafe fn write(&self, index: usize, value: T) {
    assert!(index < self.len, "shared slice write out of bounds");
    // SAFETY: in bounds (checked above), exclusive per the caller contract,
    // and T: Copy has no drop glue to skip.
    unsafe { self.ptr.add(index).write(value) }
  }
}
