//! Support for the `Vec` collection.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::mem::{self, size_of, ManuallyDrop};
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

use const_default::ConstDefault;

use crate::alloc::{Allocator, AllocatorDefault, Global};
use crate::capacity::{max_capacity, next_capacity};
use crate::error::{BoundsError, StorageError, UpdateError};
use crate::storage::{Inserter, VecBuffer};

pub use self::cursor::{Cursor, CursorMut, Position, Reverse};
pub use self::into_iter::IntoIter;

mod cmp;
pub mod cursor;
mod into_iter;

#[macro_use]
mod macros;

#[cfg(feature = "zeroize")]
/// A `Vec` which automatically zeroizes its buffer when it is released.
pub type ZeroizingVec<T> = Vec<T, crate::alloc::ZeroizingAlloc<Global>>;

#[cold]
#[inline(never)]
fn index_panic() -> ! {
    panic!("Invalid element index");
}

/// A contiguous growable array type.
///
/// The elements are stored in a single allocation obtained from the allocator
/// `A`, which the `Vec` keeps for its whole lifetime. The first `len()` slots
/// of the allocation hold live elements and the remaining slots up to
/// `capacity()` are uninitialized.
///
/// Growth doubles the capacity (starting from a single slot) and always
/// relocates the elements into a newly allocated buffer before the previous
/// buffer is released. A failed allocation leaves the `Vec` unchanged.
pub struct Vec<T, A: Allocator = Global> {
    buffer: VecBuffer<T, A>,
}

impl<T, A: AllocatorDefault> Vec<T, A> {
    /// Constructs a new, empty `Vec<T>` without allocating.
    pub const fn new() -> Self {
        Self {
            buffer: <VecBuffer<T, A> as ConstDefault>::DEFAULT,
        }
    }

    /// Constructs a new, empty `Vec<T>` with a capacity of exactly `capacity`
    /// elements. Panics on allocation failure.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, A::DEFAULT)
    }

    /// Try to construct a new, empty `Vec<T>` with a capacity of exactly
    /// `capacity` elements.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Self::try_with_capacity_in(capacity, A::DEFAULT)
    }

    /// Constructs a `Vec<T>` containing `count` default values, with a
    /// capacity of exactly `count`.
    pub fn with_default(count: usize) -> Self
    where
        T: Default,
    {
        Self::with_default_in(count, A::DEFAULT)
    }

    /// Constructs a `Vec<T>` containing `count` clones of `elem`, with a
    /// capacity of exactly `count`.
    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(elem, count, A::DEFAULT)
    }

    /// Constructs a `Vec<T>` by cloning the items of a slice.
    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(data, A::DEFAULT)
    }

    /// Try to construct a `Vec<T>` by cloning the items of a slice.
    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(data, A::DEFAULT)
    }
}

impl<T, A: Allocator> Vec<T, A> {
    /// Constructs a new, empty `Vec<T, A>` without allocating.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buffer: VecBuffer::dangling(alloc),
        }
    }

    /// Constructs a new, empty `Vec<T, A>` with a capacity of exactly
    /// `capacity` elements. Panics on allocation failure.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a new, empty `Vec<T, A>` with a capacity of exactly
    /// `capacity` elements.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        Ok(Self {
            buffer: VecBuffer::allocate_in(capacity, alloc)?,
        })
    }

    /// Constructs a `Vec<T, A>` containing `count` default values.
    pub fn with_default_in(count: usize, alloc: A) -> Self
    where
        T: Default,
    {
        match Self::try_with_default_in(count, alloc) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a `Vec<T, A>` containing `count` default values.
    pub fn try_with_default_in(count: usize, alloc: A) -> Result<Self, StorageError>
    where
        T: Default,
    {
        let mut vec = Self::try_with_capacity_in(count, alloc)?;
        vec.buffer
            .fill_in_place(0, count, |ins| ins.push_with(count, T::default));
        Ok(vec)
    }

    /// Constructs a `Vec<T, A>` containing `count` clones of `elem`.
    pub fn from_elem_in(elem: T, count: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem_in(elem, count, alloc) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a `Vec<T, A>` containing `count` clones of `elem`.
    pub fn try_from_elem_in(elem: T, count: usize, alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(count, alloc)?;
        vec.buffer
            .fill_in_place(0, count, |ins| ins.push_repeat(&elem, count));
        Ok(vec)
    }

    /// Constructs a `Vec<T, A>` by cloning the items of a slice.
    pub fn from_slice_in(data: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice_in(data, alloc) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a `Vec<T, A>` by cloning the items of a slice.
    pub fn try_from_slice_in(data: &[T], alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(data.len(), alloc)?;
        vec.buffer
            .fill_in_place(0, data.len(), |ins| ins.push_slice(data));
        Ok(vec)
    }

    /// Constructs a `Vec<T, A>` by moving the items of an array.
    pub fn from_array_in<const N: usize>(data: [T; N], alloc: A) -> Self {
        let mut vec = Self::with_capacity_in(N, alloc);
        vec.extend(data);
        vec
    }

    /// Constructs a `Vec<T, A>` from the items of an iterator.
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (min_cap, _) = iter.size_hint();
        let mut vec = Self::with_capacity_in(min_cap, alloc);
        vec.extend(iter);
        vec
    }

    /// Constructs a `Vec<T, A>` from its raw components.
    ///
    /// # Safety
    /// `data` must be an allocation of exactly `capacity` elements made by
    /// `alloc` (or dangling when no memory was required), and the first
    /// `length` elements must be initialized.
    pub unsafe fn from_parts(data: NonNull<T>, length: usize, capacity: usize, alloc: A) -> Self {
        Self {
            buffer: VecBuffer::from_parts(data, length, capacity, alloc),
        }
    }

    /// Decompose the `Vec` into its data pointer, length, capacity and
    /// allocator.
    pub fn into_parts(self) -> (NonNull<T>, usize, usize, A) {
        self.into_inner().into_parts()
    }

    #[inline]
    fn into_inner(self) -> VecBuffer<T, A> {
        let me = ManuallyDrop::new(self);
        unsafe { ptr::read(&me.buffer) }
    }
}

impl<T, A: Allocator> Vec<T, A> {
    /// Access the allocator instance used by this `Vec`.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buffer.allocator()
    }

    /// Get a pointer to the first slot of the buffer. When the `Vec` has not
    /// allocated this is a dangling, well-aligned pointer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.data_ptr()
    }

    /// Get a mutable pointer to the first slot of the buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.data_ptr_mut()
    }

    /// Access the contained items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Access the contained items as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer.as_mut_slice()
    }

    /// The number of elements which may be stored without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Check whether the `Vec` contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.length()
    }

    /// The largest capacity a `Vec` of this element type can request.
    #[inline]
    pub const fn max_size(&self) -> usize {
        max_capacity::<T>()
    }

    /// Force the length of the `Vec`.
    ///
    /// # Safety
    /// `length` may not exceed the capacity, and the elements up to `length`
    /// must be initialized.
    #[inline]
    pub unsafe fn set_len(&mut self, length: usize) {
        self.buffer.set_length(length)
    }

    /// Access the element at `index`, returning a `BoundsError` when the
    /// index is not less than the length.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, BoundsError> {
        let length = self.len();
        self.as_slice()
            .get(index)
            .ok_or_else(|| BoundsError::new(index, length))
    }

    /// Mutably access the element at `index`, returning a `BoundsError` when
    /// the index is not less than the length.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, BoundsError> {
        let length = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or_else(|| BoundsError::new(index, length))
    }

    /// Access the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Mutably access the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Access the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutably access the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// A cursor at the first element.
    #[inline]
    pub fn begin(&self) -> Cursor<T> {
        Cursor::from_ptr(self.buffer.data_ptr())
    }

    /// A cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<T> {
        self.begin() + self.len()
    }

    /// A mutable cursor at the first element.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<T> {
        CursorMut::from_ptr(self.buffer.data_ptr_mut())
    }

    /// A mutable cursor one past the last element.
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<T> {
        let len = self.len();
        self.begin_mut() + len
    }

    /// A reverse cursor at the last element.
    #[inline]
    pub fn rbegin(&self) -> Reverse<Cursor<T>> {
        Reverse::new(self.end())
    }

    /// A reverse cursor one before the first element.
    #[inline]
    pub fn rend(&self) -> Reverse<Cursor<T>> {
        Reverse::new(self.begin())
    }

    /// A mutable reverse cursor at the last element.
    #[inline]
    pub fn rbegin_mut(&mut self) -> Reverse<CursorMut<T>> {
        Reverse::new(self.end_mut())
    }

    /// A mutable reverse cursor one before the first element.
    #[inline]
    pub fn rend_mut(&mut self) -> Reverse<CursorMut<T>> {
        Reverse::new(self.begin_mut())
    }

    /// Resolve a cursor to an element index.
    ///
    /// Returns `None` unless the cursor refers to a slot of the current
    /// buffer between the first element and the end position (inclusive).
    /// Cursors into a buffer which has since been released will generally
    /// fail to resolve, although an address reused by a later allocation
    /// cannot be told apart.
    pub fn index_of(&self, pos: impl Into<Cursor<T>>) -> Option<usize> {
        let addr = pos.into().as_ptr() as usize;
        let bytes = addr.wrapping_sub(self.buffer.data_ptr() as usize);
        let index = match size_of::<T>() {
            0 => bytes,
            size if bytes % size == 0 => bytes / size,
            _ => return None,
        };
        (index <= self.len()).then_some(index)
    }

    /// Access the element at a cursor position, if the cursor refers to a
    /// live element of this `Vec`.
    pub fn get_at(&self, pos: impl Into<Cursor<T>>) -> Option<&T> {
        let index = self.index_of(pos)?;
        self.as_slice().get(index)
    }

    /// Mutably access the element at a cursor position, if the cursor refers
    /// to a live element of this `Vec`.
    pub fn get_at_mut(&mut self, pos: impl Into<Cursor<T>>) -> Option<&mut T> {
        let index = self.index_of(pos)?;
        self.as_mut_slice().get_mut(index)
    }

    #[inline]
    fn resolve(&self, pos: impl Into<Cursor<T>>) -> usize {
        match self.index_of(pos) {
            Some(index) => index,
            None => index_panic(),
        }
    }

    #[inline]
    fn cursor_at(&mut self, index: usize) -> CursorMut<T> {
        self.begin_mut() + index
    }

    /// Ensure that the capacity is at least `capacity` elements in total.
    /// When it is not, the buffer is reallocated to exactly `capacity`.
    /// Panics if the capacity exceeds `max_size()` or the allocation fails.
    pub fn reserve(&mut self, capacity: usize) {
        match self.try_reserve(capacity) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to ensure that the capacity is at least `capacity` elements in
    /// total. On failure the `Vec` is left unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), StorageError> {
        if capacity > self.max_size() {
            return Err(StorageError::CapacityLimit);
        }
        if capacity > self.buffer.capacity() {
            self.buffer.reallocate(capacity)?;
        }
        Ok(())
    }

    // Make room for `additional` more elements following the growth policy.
    fn _try_grow(&mut self, additional: usize) -> Result<(), StorageError> {
        let capacity = self.buffer.capacity();
        let Some(required) = self.buffer.length().checked_add(additional) else {
            return Err(StorageError::CapacityLimit);
        };
        if required > capacity {
            self.buffer
                .reallocate(next_capacity::<T>(capacity, required)?)?;
        }
        Ok(())
    }

    // Construct up to `count` elements at `index`. Without spare capacity the
    // new elements are built in a fresh buffer before anything is moved, so
    // either a failed allocation or a panic in `fill` leaves the `Vec` intact.
    fn _try_insert_with<F>(
        &mut self,
        index: usize,
        count: usize,
        fill: F,
    ) -> Result<usize, StorageError>
    where
        F: FnOnce(&mut Inserter<'_, T>),
    {
        let length = self.buffer.length();
        if index > length {
            index_panic();
        }
        if count == 0 {
            return Ok(0);
        }
        let capacity = self.buffer.capacity();
        let Some(required) = length.checked_add(count) else {
            return Err(StorageError::CapacityLimit);
        };
        if required <= capacity {
            Ok(self.buffer.fill_in_place(index, count, fill))
        } else {
            let capacity = next_capacity::<T>(capacity, required)?;
            self.buffer.fill_relocated(capacity, index, count, fill)
        }
    }

    /// Reduce the capacity to the current length.
    pub fn shrink_to_fit(&mut self) {
        match self.try_shrink_to_fit() {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to reduce the capacity to the current length.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), StorageError> {
        let len = self.buffer.length();
        if self.buffer.capacity() > len {
            self.buffer.reallocate(len)?;
        }
        Ok(())
    }

    /// Append an element to the end of the `Vec`.
    pub fn push(&mut self, value: T) {
        match self._try_grow(1) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
        unsafe {
            self.push_unchecked(value);
        }
    }

    /// Try to append an element to the end of the `Vec`, returning the
    /// element in an `UpdateError` if storage could not be obtained.
    pub fn try_push(&mut self, value: T) -> Result<(), UpdateError<T>> {
        if let Err(error) = self._try_grow(1) {
            return Err(UpdateError::new(error, value));
        }
        unsafe {
            self.push_unchecked(value);
        }
        Ok(())
    }

    #[inline]
    unsafe fn push_unchecked(&mut self, value: T) {
        let length = self.buffer.length();
        self.buffer.uninit_index(length).write(value);
        self.buffer.set_length(length + 1);
    }

    /// Append an element produced by `f`, constructed directly in the buffer.
    /// Returns a reference to the new element.
    ///
    /// If `f` panics the `Vec` is left exactly as it was, including its
    /// buffer and capacity.
    pub fn emplace_back<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_back(f) {
            Ok(item) => item,
            Err(error) => error.panic(),
        }
    }

    /// Try to append an element produced by `f`, constructed directly in
    /// the buffer.
    pub fn try_emplace_back<F>(&mut self, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        let index = self.buffer.length();
        self._try_insert_with(index, 1, |ins| ins.push(f()))?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Remove the last element and return it.
    pub fn pop(&mut self) -> Option<T> {
        let mut tail = self.buffer.length();
        if tail > 0 {
            tail -= 1;
            unsafe { self.buffer.set_length(tail) };
            Some(unsafe { self.buffer.uninit_index(tail).assume_init_read() })
        } else {
            None
        }
    }

    /// Insert an element before the position `pos`, returning a cursor to
    /// the new element.
    ///
    /// Panics if `pos` does not refer to this `Vec`, or if storage could not
    /// be obtained.
    pub fn insert(&mut self, pos: impl Into<Cursor<T>>, value: T) -> CursorMut<T> {
        match self.try_insert(pos, value) {
            Ok(cursor) => cursor,
            Err(error) => error.panic(),
        }
    }

    /// Try to insert an element before the position `pos`, returning a cursor
    /// to the new element.
    pub fn try_insert(
        &mut self,
        pos: impl Into<Cursor<T>>,
        value: T,
    ) -> Result<CursorMut<T>, UpdateError<T>> {
        let index = self.resolve(pos);
        self.try_insert_at(index, value)?;
        Ok(self.cursor_at(index))
    }

    /// Insert an element at `index`, shifting the following elements.
    pub fn insert_at(&mut self, index: usize, value: T) {
        match self.try_insert_at(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to insert an element at `index`, shifting the following elements.
    pub fn try_insert_at(&mut self, index: usize, value: T) -> Result<(), UpdateError<T>> {
        let prev_len = self.buffer.length();
        if index > prev_len {
            index_panic();
        }
        let tail_count = prev_len - index;
        if let Err(error) = self._try_grow(1) {
            return Err(UpdateError::new(error, value));
        }
        unsafe {
            let head = self.buffer.data_ptr_mut().add(index);
            if tail_count > 0 {
                ptr::copy(head, head.add(1), tail_count);
            }
            head.write(value);
            self.buffer.set_length(prev_len + 1);
        }
        Ok(())
    }

    /// Insert an element produced by `f` before the position `pos`,
    /// returning a cursor to the new element. If `f` panics the `Vec` is
    /// left unchanged.
    pub fn emplace<F>(&mut self, pos: impl Into<Cursor<T>>, f: F) -> CursorMut<T>
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace(pos, f) {
            Ok(cursor) => cursor,
            Err(error) => error.panic(),
        }
    }

    /// Try to insert an element produced by `f` before the position `pos`.
    pub fn try_emplace<F>(
        &mut self,
        pos: impl Into<Cursor<T>>,
        f: F,
    ) -> Result<CursorMut<T>, StorageError>
    where
        F: FnOnce() -> T,
    {
        let index = self.resolve(pos);
        self._try_insert_with(index, 1, |ins| ins.push(f()))?;
        Ok(self.cursor_at(index))
    }

    /// Insert `count` clones of `value` before the position `pos`, returning
    /// a cursor to the first inserted element (or to `pos` when `count` is
    /// zero).
    pub fn insert_n(&mut self, pos: impl Into<Cursor<T>>, count: usize, value: T) -> CursorMut<T>
    where
        T: Clone,
    {
        match self.try_insert_n(pos, count, value) {
            Ok(cursor) => cursor,
            Err(error) => error.panic(),
        }
    }

    /// Try to insert `count` clones of `value` before the position `pos`.
    ///
    /// Should cloning panic, the inserted clones are dropped and the `Vec`
    /// is restored to its previous contents.
    pub fn try_insert_n(
        &mut self,
        pos: impl Into<Cursor<T>>,
        count: usize,
        value: T,
    ) -> Result<CursorMut<T>, StorageError>
    where
        T: Clone,
    {
        let index = self.resolve(pos);
        self._try_insert_with(index, count, |ins| ins.push_repeat(&value, count))?;
        Ok(self.cursor_at(index))
    }

    /// Insert the items of an exact-size iterator before the position `pos`,
    /// returning a cursor to the first inserted element.
    ///
    /// No more items than the iterator reports are consumed. Should the
    /// iterator end early, only the items produced are inserted.
    pub fn insert_iter<I>(&mut self, pos: impl Into<Cursor<T>>, iter: I) -> CursorMut<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        match self.try_insert_iter(pos, iter) {
            Ok(cursor) => cursor,
            Err(error) => error.panic(),
        }
    }

    /// Try to insert the items of an exact-size iterator before the
    /// position `pos`.
    pub fn try_insert_iter<I>(
        &mut self,
        pos: impl Into<Cursor<T>>,
        iter: I,
    ) -> Result<CursorMut<T>, StorageError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let index = self.resolve(pos);
        let mut iter = iter.into_iter();
        let count = iter.len();
        self._try_insert_with(index, count, |ins| ins.push_iter(&mut iter))?;
        Ok(self.cursor_at(index))
    }

    /// Insert clones of the items of a slice before the position `pos`,
    /// returning a cursor to the first inserted element.
    pub fn insert_slice(&mut self, pos: impl Into<Cursor<T>>, values: &[T]) -> CursorMut<T>
    where
        T: Clone,
    {
        match self.try_insert_slice(pos, values) {
            Ok(cursor) => cursor,
            Err(error) => error.panic(),
        }
    }

    /// Try to insert clones of the items of a slice before the position `pos`.
    pub fn try_insert_slice(
        &mut self,
        pos: impl Into<Cursor<T>>,
        values: &[T],
    ) -> Result<CursorMut<T>, StorageError>
    where
        T: Clone,
    {
        let index = self.resolve(pos);
        self._try_insert_with(index, values.len(), |ins| ins.push_slice(values))?;
        Ok(self.cursor_at(index))
    }

    /// Append clones of the items of a slice.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        match self.try_extend_from_slice(values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to append clones of the items of a slice.
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let index = self.buffer.length();
        self._try_insert_with(index, values.len(), |ins| ins.push_slice(values))?;
        Ok(())
    }

    fn try_extend(&mut self, iter: &mut impl Iterator<Item = T>) -> Result<(), StorageError> {
        let (min_len, _) = iter.size_hint();
        self._try_grow(min_len)?;
        loop {
            let len = self.buffer.length();
            let space = self.buffer.capacity() - len;
            if space > 0 {
                let count = self
                    .buffer
                    .fill_in_place(len, space, |ins| ins.push_iter(&mut *iter));
                if count < space {
                    return Ok(());
                }
            }
            match iter.next() {
                Some(item) => {
                    self._try_grow(1)?;
                    unsafe { self.push_unchecked(item) };
                }
                None => return Ok(()),
            }
        }
    }

    /// Remove and return the element at `index`, shifting the following
    /// elements down. Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.buffer.length();
        if index >= len {
            index_panic();
        }
        let copy_count = len - index - 1;
        unsafe {
            let result = self.buffer.uninit_index(index).assume_init_read();
            if copy_count > 0 {
                let head = self.as_mut_ptr().add(index);
                ptr::copy(head.add(1), head, copy_count);
            }
            self.buffer.set_length(len - 1);
            result
        }
    }

    /// Remove the element at the position `pos`, returning a cursor to the
    /// element which followed it (or to the end position).
    ///
    /// Panics if `pos` is not the position of a live element of this `Vec`.
    pub fn erase(&mut self, pos: impl Into<Cursor<T>>) -> CursorMut<T> {
        let index = self.resolve(pos);
        drop(self.remove(index));
        self.cursor_at(index)
    }

    /// Remove the elements from `first` up to but excluding `last`,
    /// returning a cursor to the element which followed them.
    pub fn erase_range(
        &mut self,
        first: impl Into<Cursor<T>>,
        last: impl Into<Cursor<T>>,
    ) -> CursorMut<T> {
        let start = self.resolve(first);
        let end = self.resolve(last);
        if start > end {
            index_panic();
        }
        let len = self.buffer.length();
        let count = end - start;
        if count > 0 {
            unsafe {
                // Should a destructor panic, the tail is leaked rather than
                // dropped twice.
                self.buffer.set_length(start);
                let head = self.buffer.data_ptr_mut().add(start);
                ptr::drop_in_place(slice::from_raw_parts_mut(head, count));
                ptr::copy(head.add(count), head, len - end);
                self.buffer.set_length(len - count);
            }
        }
        self.cursor_at(start)
    }

    /// Replace the contents with `count` clones of `value`.
    ///
    /// When `count` exceeds the capacity, the new contents are built in a
    /// new buffer of exactly `count` slots and the previous contents are only
    /// dropped afterward. Otherwise the buffer is reused and its capacity is
    /// kept.
    pub fn assign(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        match self.try_assign(count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to replace the contents with `count` clones of `value`.
    pub fn try_assign(&mut self, count: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self._try_assign_with(count, |ins| ins.push_repeat(&value, count))
    }

    /// Replace the contents with the items of an exact-size iterator.
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        match self.try_assign_iter(iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to replace the contents with the items of an exact-size iterator.
    pub fn try_assign_iter<I>(&mut self, iter: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut iter = iter.into_iter();
        let count = iter.len();
        self._try_assign_with(count, |ins| ins.push_iter(&mut iter))
    }

    fn _try_assign_with<F>(&mut self, count: usize, fill: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Inserter<'_, T>),
    {
        if count > self.buffer.capacity() {
            self.buffer.fill_replaced(count, count, fill)?;
        } else {
            self.buffer.truncate(0);
            self.buffer.fill_in_place(0, count, fill);
        }
        Ok(())
    }

    /// Resize the `Vec` to `new_len` elements, appending clones of `value`
    /// or dropping trailing elements as necessary.
    ///
    /// Growing beyond the capacity follows the doubling policy of an insert
    /// at the end. Shrinking keeps the capacity.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to resize the `Vec` to `new_len` elements, appending clones of
    /// `value` as necessary.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let len = self.buffer.length();
        if new_len > len {
            let count = new_len - len;
            self._try_insert_with(len, count, |ins| ins.push_repeat(&value, count))?;
        } else {
            self.buffer.truncate(new_len);
        }
        Ok(())
    }

    /// Resize the `Vec` to `new_len` elements, appending default values as
    /// necessary. Growing beyond the capacity reallocates to exactly
    /// `new_len`.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        match self.try_resize_default(new_len) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to resize the `Vec` to `new_len` elements, appending default
    /// values as necessary.
    pub fn try_resize_default(&mut self, new_len: usize) -> Result<(), StorageError>
    where
        T: Default,
    {
        self._try_resize_with(new_len, |ins, count| ins.push_with(count, T::default))
    }

    /// Resize the `Vec` to `new_len` elements, appending values produced by
    /// `f` as necessary.
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Try to resize the `Vec` to `new_len` elements, appending values
    /// produced by `f` as necessary.
    pub fn try_resize_with<F>(&mut self, new_len: usize, f: F) -> Result<(), StorageError>
    where
        F: FnMut() -> T,
    {
        self._try_resize_with(new_len, |ins, count| ins.push_with(count, f))
    }

    fn _try_resize_with<F>(&mut self, new_len: usize, fill: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Inserter<'_, T>, usize),
    {
        let len = self.buffer.length();
        match new_len.cmp(&len) {
            Ordering::Greater => {
                self.try_reserve(new_len)?;
                let count = new_len - len;
                self.buffer
                    .fill_in_place(len, count, |ins| fill(ins, count));
            }
            Ordering::Less => {
                self.buffer.truncate(new_len);
            }
            Ordering::Equal => {}
        }
        Ok(())
    }

    /// Drop the elements beyond `length`, keeping the capacity.
    pub fn truncate(&mut self, length: usize) {
        self.buffer.truncate(length);
    }

    /// Drop all elements and release the buffer, leaving the `Vec` with no
    /// capacity.
    pub fn clear(&mut self) {
        self.buffer.release();
    }

    /// Exchange the contents of two `Vec` instances, including their
    /// allocators. No elements are moved or copied.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.buffer, &mut other.buffer);
    }

    /// Move the contents out into a new `Vec`, leaving this one empty with
    /// no capacity and a clone of its allocator.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let alloc = self.allocator().clone();
        mem::replace(self, Self::new_in(alloc))
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vec<T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vec<T, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Borrow<[T]> for Vec<T, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for Vec<T, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Vec<T, A> {
    fn clone(&self) -> Self {
        let mut inst = Self::with_capacity_in(self.capacity(), self.allocator().clone());
        inst.extend_from_slice(self);
        inst
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_iter(source.iter().cloned());
    }
}

impl<T, A: AllocatorDefault> ConstDefault for Vec<T, A> {
    const DEFAULT: Self = Self::new();
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, A: AllocatorDefault> Default for Vec<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Deref for Vec<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vec<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Drop for Vec<T, A> {
    fn drop(&mut self) {
        self.buffer.truncate(0);
    }
}

impl<T, A: Allocator> Extend<T> for Vec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, A: Allocator> Extend<&'a T> for Vec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter().cloned()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<T, A: AllocatorDefault> FromIterator<T> for Vec<T, A> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, A::DEFAULT)
    }
}

unsafe impl<T: Send, A: Allocator + Send> Send for Vec<T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vec<T, A> {}

impl<T: Clone, A: AllocatorDefault> From<&[T]> for Vec<T, A> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, A: AllocatorDefault> From<&mut [T]> for Vec<T, A> {
    #[inline]
    fn from(data: &mut [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, A: AllocatorDefault, const N: usize> From<[T; N]> for Vec<T, A> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::from_array_in(data, A::DEFAULT)
    }
}

#[cfg(feature = "alloc")]
impl<T> From<alloc_crate::vec::Vec<T>> for Vec<T, Global> {
    fn from(vec: alloc_crate::vec::Vec<T>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        let capacity = vec.capacity();
        let length = vec.len();
        let data = unsafe { NonNull::new_unchecked(vec.as_mut_ptr()) };
        unsafe { Self::from_parts(data, length, capacity, Global) }
    }
}

#[cfg(feature = "alloc")]
impl<T> From<Vec<T, Global>> for alloc_crate::vec::Vec<T> {
    fn from(vec: Vec<T, Global>) -> Self {
        let (data, length, capacity, _) = vec.into_parts();
        unsafe { alloc_crate::vec::Vec::from_raw_parts(data.as_ptr(), length, capacity) }
    }
}

impl<T, A: Allocator> IntoIterator for Vec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_inner())
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "std")]
impl<A: Allocator> std::io::Write for Vec<u8, A> {
    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.try_extend_from_slice(buf) {
            Ok(_) => Ok(buf.len()),
            Err(err) => Err(std::io::Error::new(std::io::ErrorKind::Other, err)),
        }
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: Allocator> zeroize::Zeroize for Vec<T, crate::alloc::ZeroizingAlloc<A>> {
    #[inline]
    fn zeroize(&mut self) {
        self.clear();
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: Allocator> zeroize::ZeroizeOnDrop for Vec<T, crate::alloc::ZeroizingAlloc<A>> {}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::Vec;

    #[test]
    fn three_words() {
        assert_eq!(
            core::mem::size_of::<Vec<u64>>(),
            3 * core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn resolve_rejects_misaligned_cursor() {
        let v = Vec::<u32>::from_slice(&[1, 2, 3]);
        let odd = super::Cursor::from_ptr(v.as_ptr().cast::<u8>().wrapping_add(1).cast::<u32>());
        assert_eq!(v.index_of(odd), None);
        assert_eq!(v.index_of(v.end()), Some(3));
        assert_eq!(v.index_of(v.end() + 1), None);
        assert_eq!(v.index_of(v.begin() - 1), None);
    }

    #[test]
    fn ranges_of_zero_sized_values() {
        let mut v = Vec::<()>::with_default(4);
        assert_eq!(v.capacity(), 4);
        let pos = v.begin() + 2;
        assert_eq!(v.index_of(pos), Some(2));
        v.erase(pos);
        assert_eq!(v.len(), 3);
        v.insert_n(v.end(), 3, ());
        assert_eq!(v.len(), 6);
    }
}
