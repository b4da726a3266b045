use core::alloc::Layout;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ptr::{self, NonNull};
use core::slice;

use crate::alloc::Allocator;
use crate::capacity::max_capacity;
use crate::error::StorageError;

/// An uninitialized allocation sized for exactly `capacity` elements of `T`.
///
/// The block owns its memory but never its contents: dropping the block
/// releases the allocation without running any element destructors.
/// Blocks without a byte size (zero capacity or zero-sized `T`) use a
/// dangling pointer and never reach the allocator.
pub(crate) struct Block<'a, T, A: Allocator> {
    data: NonNull<T>,
    capacity: usize,
    alloc: &'a A,
}

impl<'a, T, A: Allocator> Block<'a, T, A> {
    pub fn allocate(alloc: &'a A, capacity: usize) -> Result<Self, StorageError> {
        if capacity > max_capacity::<T>() {
            return Err(StorageError::CapacityLimit);
        }
        let layout = Layout::array::<T>(capacity)?;
        let data = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            match alloc.allocate(layout) {
                Ok(ptr) => ptr.cast(),
                Err(_) => return Err(StorageError::AllocError(layout)),
            }
        };
        Ok(Self {
            data,
            capacity,
            alloc,
        })
    }

    /// Take ownership of a previous allocation so that it is released
    /// when the block is dropped.
    ///
    /// # Safety
    /// `data` must have been produced by `allocate` on the same allocator
    /// with the same `capacity`, and must not be released elsewhere.
    #[inline]
    pub unsafe fn from_raw(alloc: &'a A, data: NonNull<T>, capacity: usize) -> Self {
        Self {
            data,
            capacity,
            alloc,
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.data.as_ptr()
    }

    /// Access `count` slots beginning at `start`.
    #[inline]
    pub fn uninit_range(&mut self, start: usize, count: usize) -> &mut [MaybeUninit<T>] {
        assert!(start <= self.capacity && count <= self.capacity - start);
        // SAFETY: the range is within the allocation
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr().add(start).cast(), count) }
    }

    /// Drop the first `count` elements of the block in place.
    ///
    /// # Safety
    /// The first `count` slots must be initialized and not used afterward.
    pub unsafe fn drop_elements(&mut self, count: usize) {
        debug_assert!(count <= self.capacity);
        ptr::drop_in_place(slice::from_raw_parts_mut(self.data.as_ptr(), count));
    }

    /// Release ownership of the allocation without deallocating it.
    #[inline]
    pub fn into_raw(self) -> (NonNull<T>, usize) {
        let block = ManuallyDrop::new(self);
        (block.data, block.capacity)
    }
}

impl<T, A: Allocator> Drop for Block<'_, T, A> {
    fn drop(&mut self) {
        if let Ok(layout) = Layout::array::<T>(self.capacity) {
            if layout.size() > 0 {
                // SAFETY: the block was allocated by `alloc` with this layout
                unsafe { self.alloc.deallocate(self.data.cast(), layout) };
            }
        }
    }
}
