use core::fmt;
use core::mem::{self, ManuallyDrop, MaybeUninit};
use core::ptr::{self, NonNull};
use core::slice;

use const_default::ConstDefault;

use crate::alloc::{Allocator, AllocatorDefault};
use crate::error::StorageError;

use super::block::Block;
use super::insert::Inserter;

/// The capacity and length of a `Vec` buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct VecHeader {
    pub capacity: usize,
    pub length: usize,
}

impl VecHeader {
    pub const EMPTY: Self = VecHeader {
        capacity: 0,
        length: 0,
    };
}

/// A contiguous allocation of `capacity` slots, the first `length` of which
/// hold live elements.
///
/// The buffer releases its allocation when dropped but never drops the
/// elements themselves; that is left to the owning collection.
pub(crate) struct VecBuffer<T, A: Allocator> {
    header: VecHeader,
    data: NonNull<T>,
    alloc: A,
}

impl<T, A: Allocator> VecBuffer<T, A> {
    #[inline]
    pub const fn dangling(alloc: A) -> Self {
        Self {
            header: VecHeader::EMPTY,
            data: NonNull::dangling(),
            alloc,
        }
    }

    pub fn allocate_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        let (data, capacity) = Block::<T, A>::allocate(&alloc, capacity)?.into_raw();
        Ok(Self {
            header: VecHeader {
                capacity,
                length: 0,
            },
            data,
            alloc,
        })
    }

    /// # Safety
    /// The parts must describe an allocation of `capacity` elements made by
    /// `alloc`, with the first `length` elements initialized.
    #[inline]
    pub unsafe fn from_parts(data: NonNull<T>, length: usize, capacity: usize, alloc: A) -> Self {
        Self {
            header: VecHeader { capacity, length },
            data,
            alloc,
        }
    }

    #[inline]
    pub fn into_parts(self) -> (NonNull<T>, usize, usize, A) {
        let slf = ManuallyDrop::new(self);
        (slf.data, slf.header.length, slf.header.capacity, unsafe {
            ptr::read(&slf.alloc)
        })
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.header.capacity
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.header.length
    }

    /// # Safety
    /// The first `length` slots must be initialized, and `length` may not
    /// exceed the capacity.
    #[inline]
    pub unsafe fn set_length(&mut self, length: usize) {
        debug_assert!(length <= self.header.capacity);
        self.header.length = length;
    }

    #[inline]
    pub fn data_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data_ptr(), self.header.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data_ptr_mut(), self.header.length) }
    }

    /// # Safety
    /// The index must be within the bounds of the buffer's capacity, otherwise a
    /// memory access error may occur.
    #[inline]
    pub unsafe fn uninit_index(&mut self, index: usize) -> &mut MaybeUninit<T> {
        &mut *self.data_ptr_mut().add(index).cast()
    }

    /// Drop the elements from `length` onward, keeping the allocation.
    pub fn truncate(&mut self, length: usize) {
        let old_len = self.header.length;
        if length < old_len {
            // The length is reduced first so that a panicking destructor
            // leaks the remaining elements instead of dropping them twice.
            self.header.length = length;
            unsafe {
                let to_drop: &mut [T] =
                    slice::from_raw_parts_mut(self.data_ptr_mut().add(length), old_len - length);
                ptr::drop_in_place(to_drop);
            }
        }
    }

    /// Drop every element and release the allocation, leaving an empty
    /// buffer with no capacity.
    pub fn release(&mut self) {
        let length = mem::replace(&mut self.header.length, 0);
        let capacity = mem::replace(&mut self.header.capacity, 0);
        let data = mem::replace(&mut self.data, NonNull::dangling());
        // SAFETY: the block takes over the allocation just detached from the buffer
        let mut old = unsafe { Block::from_raw(&self.alloc, data, capacity) };
        unsafe { old.drop_elements(length) };
    }

    /// Move the contents into a new allocation of exactly `capacity` slots.
    ///
    /// The new allocation is obtained before anything else happens, so a
    /// failure leaves the buffer untouched. Elements which do not fit in the
    /// new capacity are dropped.
    pub fn reallocate(&mut self, capacity: usize) -> Result<(), StorageError> {
        let block = Block::<T, A>::allocate(&self.alloc, capacity)?;
        let old_len = self.header.length;
        let keep = old_len.min(capacity);
        if keep < old_len {
            self.header.length = keep;
            unsafe {
                let to_drop: &mut [T] =
                    slice::from_raw_parts_mut(self.data.as_ptr().add(keep), old_len - keep);
                ptr::drop_in_place(to_drop);
            }
        }
        unsafe {
            ptr::copy_nonoverlapping(self.data.as_ptr(), block.as_ptr(), keep);
        }
        let (data, capacity) = block.into_raw();
        let old_data = mem::replace(&mut self.data, data);
        let old_capacity = mem::replace(&mut self.header.capacity, capacity);
        // SAFETY: the elements were moved out, only the memory remains to be released
        drop(unsafe { Block::from_raw(&self.alloc, old_data, old_capacity) });
        Ok(())
    }

    /// Construct up to `count` elements at `index` within the current
    /// allocation, shifting the elements from `index` onward out of the way.
    /// Returns the number of elements inserted.
    ///
    /// If `fill` panics, the inserted elements are dropped and the buffer
    /// is restored to its previous contents.
    pub fn fill_in_place<F>(&mut self, index: usize, count: usize, fill: F) -> usize
    where
        F: FnOnce(&mut Inserter<'_, T>),
    {
        let length = self.header.length;
        assert!(index <= length && count <= self.header.capacity - length);
        let tail_count = length - index;
        self.header.length = index;
        let slots = unsafe {
            let head = self.data.as_ptr().add(index);
            if tail_count > 0 && count > 0 {
                ptr::copy(head, head.add(count), tail_count);
            }
            slice::from_raw_parts_mut(head.cast::<MaybeUninit<T>>(), count + tail_count)
        };
        let mut insert = Inserter::new_with_tail(slots, &mut self.header.length, tail_count);
        fill(&mut insert);
        insert.complete()
    }

    /// Construct up to `count` elements at `index` in a new allocation of
    /// `capacity` slots, then move the existing elements around them and
    /// release the previous allocation. Returns the number of elements inserted.
    ///
    /// The existing allocation is not modified until every new element has
    /// been constructed, so a failed allocation or a panic in `fill` leaves
    /// the buffer as it was.
    pub fn fill_relocated<F>(
        &mut self,
        capacity: usize,
        index: usize,
        count: usize,
        fill: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(&mut Inserter<'_, T>),
    {
        let length = self.header.length;
        assert!(index <= length && count <= capacity.saturating_sub(length));
        let mut block = Block::<T, A>::allocate(&self.alloc, capacity)?;
        let mut inserted = 0;
        let mut insert = Inserter::new(block.uninit_range(index, count), &mut inserted);
        fill(&mut insert);
        insert.complete();
        unsafe {
            let src = self.data.as_ptr();
            let dst = block.as_ptr();
            ptr::copy_nonoverlapping(src, dst, index);
            ptr::copy_nonoverlapping(src.add(index), dst.add(index + inserted), length - index);
        }
        let (data, capacity) = block.into_raw();
        let old_data = mem::replace(&mut self.data, data);
        let old_capacity = mem::replace(&mut self.header.capacity, capacity);
        self.header.length = length + inserted;
        drop(unsafe { Block::from_raw(&self.alloc, old_data, old_capacity) });
        Ok(inserted)
    }

    /// Construct up to `count` elements in a new allocation of `capacity`
    /// slots and replace the current contents with them. Returns the number
    /// of elements constructed.
    ///
    /// The previous elements are only dropped once the new contents are
    /// complete.
    pub fn fill_replaced<F>(
        &mut self,
        capacity: usize,
        count: usize,
        fill: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(&mut Inserter<'_, T>),
    {
        assert!(count <= capacity);
        let mut block = Block::<T, A>::allocate(&self.alloc, capacity)?;
        let mut inserted = 0;
        let mut insert = Inserter::new(block.uninit_range(0, count), &mut inserted);
        fill(&mut insert);
        insert.complete();
        let (data, capacity) = block.into_raw();
        let old_data = mem::replace(&mut self.data, data);
        let old_capacity = mem::replace(&mut self.header.capacity, capacity);
        let old_length = mem::replace(&mut self.header.length, inserted);
        let mut old = unsafe { Block::from_raw(&self.alloc, old_data, old_capacity) };
        unsafe { old.drop_elements(old_length) };
        Ok(inserted)
    }
}

impl<T, A: AllocatorDefault> ConstDefault for VecBuffer<T, A> {
    const DEFAULT: Self = Self::dangling(A::DEFAULT);
}

impl<T, A: Allocator> fmt::Debug for VecBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecBuffer")
            .field("header", &self.header)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl<T, A: Allocator> Drop for VecBuffer<T, A> {
    fn drop(&mut self) {
        // SAFETY: the buffer owns its allocation, any live elements have
        // already been dropped by the owner
        drop(unsafe { Block::from_raw(&self.alloc, self.data, self.header.capacity) });
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    use super::VecBuffer;
    use crate::alloc::Global;

    fn filled(values: &[u32], capacity: usize) -> VecBuffer<u32, Global> {
        let mut buf = VecBuffer::allocate_in(capacity, Global).unwrap();
        buf.fill_in_place(0, values.len(), |ins| ins.push_slice(values));
        buf
    }

    #[test]
    fn reallocate_keeps_prefix() {
        let mut buf = filled(&[1, 2, 3, 4], 4);
        buf.reallocate(8).unwrap();
        assert_eq!((buf.capacity(), buf.as_slice()), (8, &[1, 2, 3, 4][..]));
        buf.reallocate(2).unwrap();
        assert_eq!((buf.capacity(), buf.as_slice()), (2, &[1, 2][..]));
        buf.reallocate(0).unwrap();
        assert_eq!((buf.capacity(), buf.length()), (0, 0));
    }

    #[test]
    fn reallocate_drops_excess() {
        let marker = Rc::new(());
        let mut buf = VecBuffer::<Rc<()>, _>::allocate_in(3, Global).unwrap();
        buf.fill_in_place(0, 3, |ins| ins.push_repeat(&marker, 3));
        assert_eq!(Rc::strong_count(&marker), 4);
        buf.reallocate(1).unwrap();
        assert_eq!(Rc::strong_count(&marker), 2);
        buf.release();
        assert_eq!(Rc::strong_count(&marker), 1);
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn fill_in_place_shifts_tail() {
        let mut buf = filled(&[1, 2, 3], 6);
        let count = buf.fill_in_place(1, 2, |ins| ins.push_slice(&[8, 9]));
        assert_eq!(count, 2);
        assert_eq!(buf.as_slice(), &[1, 8, 9, 2, 3]);
    }

    #[test]
    fn fill_relocated_surrounds_new_elements() {
        let mut buf = filled(&[1, 2, 3], 3);
        let count = buf.fill_relocated(6, 2, 2, |ins| ins.push_slice(&[8, 9]));
        assert_eq!(count, Ok(2));
        assert_eq!((buf.capacity(), buf.as_slice()), (6, &[1, 2, 8, 9, 3][..]));
    }

    #[test]
    fn fill_relocated_panic_keeps_buffer() {
        let mut buf = filled(&[1, 2, 3], 3);
        let data = buf.data_ptr();
        let res = catch_unwind(AssertUnwindSafe(|| {
            buf.fill_relocated(6, 0, 2, |ins| {
                ins.push(7);
                ins.push_with(1, || panic!("no value"));
            })
        }));
        assert!(res.is_err());
        assert_eq!(buf.data_ptr(), data);
        assert_eq!((buf.capacity(), buf.as_slice()), (3, &[1, 2, 3][..]));
    }

    #[test]
    fn fill_replaced_swaps_contents() {
        let mut buf = filled(&[1, 2, 3], 3);
        let count = buf.fill_replaced(5, 5, |ins| ins.push_repeat(&7, 5));
        assert_eq!(count, Ok(5));
        assert_eq!(buf.as_slice(), &[7; 5]);
    }
}
