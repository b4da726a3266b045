//! Positions within the elements of a `Vec`.
//!
//! A cursor is a bare slot address: it carries no lifetime and does not keep
//! the collection borrowed. Any operation which reallocates the buffer
//! invalidates every cursor into it, and inserting or removing elements in
//! place invalidates the cursors at or after the affected index. Reading
//! through a cursor is therefore `unsafe`; the collection offers checked
//! resolution with [`Vec::index_of`](super::Vec::index_of) and
//! [`Vec::get_at`](super::Vec::get_at).

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem::size_of;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr::NonNull;

/// Common stepping behavior of cursor types.
pub trait Position: Copy + Ord {
    /// Move the position by `count` elements, which may be negative.
    fn offset(self, count: isize) -> Self;

    /// The number of elements from `origin` to this position.
    fn distance(self, origin: Self) -> isize;
}

#[inline]
fn step<T>(ptr: *const T, count: isize) -> *const T {
    if size_of::<T>() == 0 {
        // Zero-sized elements are addressed by byte offset.
        ptr.cast::<u8>().wrapping_offset(count).cast()
    } else {
        ptr.wrapping_offset(count)
    }
}

#[inline]
fn span<T>(from: *const T, to: *const T) -> isize {
    let bytes = (to as usize).wrapping_sub(from as usize) as isize;
    match size_of::<T>() {
        0 => bytes,
        size => bytes / size as isize,
    }
}

/// A read-only position within the elements of a `Vec`.
pub struct Cursor<T> {
    ptr: *const T,
    _marker: PhantomData<*const T>,
}

impl<T> Cursor<T> {
    #[inline]
    pub(crate) const fn from_ptr(ptr: *const T) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Access the slot address of this cursor.
    #[inline]
    pub const fn as_ptr(self) -> *const T {
        self.ptr
    }

    /// Advance to the following element.
    #[inline]
    pub fn inc(&mut self) {
        *self = self.offset(1);
    }

    /// Step back to the preceding element.
    #[inline]
    pub fn dec(&mut self) {
        *self = self.offset(-1);
    }

    /// Access the element at this position.
    ///
    /// # Safety
    /// The cursor must refer to a live element of a collection, and must not
    /// have been invalidated by a later update to that collection. The
    /// returned reference must not outlive the element.
    #[inline]
    pub unsafe fn get<'a>(self) -> &'a T {
        if size_of::<T>() == 0 {
            &*NonNull::dangling().as_ptr()
        } else {
            &*self.ptr
        }
    }
}

impl<T> Position for Cursor<T> {
    #[inline]
    fn offset(self, count: isize) -> Self {
        Self::from_ptr(step(self.ptr, count))
    }

    #[inline]
    fn distance(self, origin: Self) -> isize {
        span(origin.ptr, self.ptr)
    }
}

/// A position within the elements of a `Vec` permitting mutable access.
///
/// A `CursorMut` converts into a [`Cursor`], and may be passed anywhere a
/// read position is accepted.
pub struct CursorMut<T> {
    inner: Cursor<T>,
}

impl<T> CursorMut<T> {
    #[inline]
    pub(crate) const fn from_ptr(ptr: *mut T) -> Self {
        Self {
            inner: Cursor::from_ptr(ptr),
        }
    }

    /// Access the slot address of this cursor.
    #[inline]
    pub const fn as_ptr(self) -> *mut T {
        self.inner.ptr as *mut T
    }

    /// Obtain a read-only cursor for the same position.
    #[inline]
    pub const fn as_cursor(self) -> Cursor<T> {
        self.inner
    }

    /// Advance to the following element.
    #[inline]
    pub fn inc(&mut self) {
        self.inner.inc();
    }

    /// Step back to the preceding element.
    #[inline]
    pub fn dec(&mut self) {
        self.inner.dec();
    }

    /// Access the element at this position.
    ///
    /// # Safety
    /// See [`Cursor::get`].
    #[inline]
    pub unsafe fn get<'a>(self) -> &'a T {
        self.inner.get()
    }

    /// Mutably access the element at this position.
    ///
    /// # Safety
    /// The same requirements as [`Cursor::get`] apply, and no other reference
    /// to the element may exist while the returned reference is in use.
    #[inline]
    pub unsafe fn get_mut<'a>(self) -> &'a mut T {
        if size_of::<T>() == 0 {
            &mut *NonNull::dangling().as_ptr()
        } else {
            &mut *self.as_ptr()
        }
    }
}

impl<T> Position for CursorMut<T> {
    #[inline]
    fn offset(self, count: isize) -> Self {
        Self {
            inner: self.inner.offset(count),
        }
    }

    #[inline]
    fn distance(self, origin: Self) -> isize {
        self.inner.distance(origin.inner)
    }
}

impl<T> From<CursorMut<T>> for Cursor<T> {
    #[inline]
    fn from(cursor: CursorMut<T>) -> Self {
        cursor.inner
    }
}

impl<T> PartialEq<CursorMut<T>> for Cursor<T> {
    #[inline]
    fn eq(&self, other: &CursorMut<T>) -> bool {
        self.ptr == other.inner.ptr
    }
}

impl<T> PartialEq<Cursor<T>> for CursorMut<T> {
    #[inline]
    fn eq(&self, other: &Cursor<T>) -> bool {
        self.inner.ptr == other.ptr
    }
}

/// A position which walks the elements of a `Vec` from back to front.
///
/// The adapter wraps a forward cursor `base` and refers to the element
/// immediately before it, so that `Reverse::new(vec.end())` denotes the
/// last element and `Reverse::new(vec.begin())` is the end of the reversed
/// sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reverse<C> {
    base: C,
}

impl<C: Position> Reverse<C> {
    /// Create a reverse position from a forward cursor.
    #[inline]
    pub const fn new(base: C) -> Self {
        Self { base }
    }

    /// Access the underlying forward cursor, which refers to the slot
    /// following the current element.
    #[inline]
    pub fn base(self) -> C {
        self.base
    }

    /// Advance to the preceding element of the underlying sequence.
    #[inline]
    pub fn inc(&mut self) {
        *self = self.offset(1);
    }

    /// Step back to the following element of the underlying sequence.
    #[inline]
    pub fn dec(&mut self) {
        *self = self.offset(-1);
    }
}

impl<T> Reverse<Cursor<T>> {
    /// Access the element at this position.
    ///
    /// # Safety
    /// See [`Cursor::get`].
    #[inline]
    pub unsafe fn get<'a>(self) -> &'a T {
        self.base.offset(-1).get()
    }
}

impl<T> Reverse<CursorMut<T>> {
    /// Access the element at this position.
    ///
    /// # Safety
    /// See [`Cursor::get`].
    #[inline]
    pub unsafe fn get<'a>(self) -> &'a T {
        self.base.offset(-1).get()
    }

    /// Mutably access the element at this position.
    ///
    /// # Safety
    /// See [`CursorMut::get_mut`].
    #[inline]
    pub unsafe fn get_mut<'a>(self) -> &'a mut T {
        self.base.offset(-1).get_mut()
    }
}

impl<C: Position> Position for Reverse<C> {
    #[inline]
    fn offset(self, count: isize) -> Self {
        Self {
            base: self.base.offset(-count),
        }
    }

    #[inline]
    fn distance(self, origin: Self) -> isize {
        origin.base.distance(self.base)
    }
}

impl<C: Position> PartialOrd for Reverse<C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Position> Ord for Reverse<C> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.base.cmp(&self.base)
    }
}

impl<T> From<Reverse<CursorMut<T>>> for Reverse<Cursor<T>> {
    #[inline]
    fn from(cursor: Reverse<CursorMut<T>>) -> Self {
        Self {
            base: cursor.base.into(),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Reverse<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reverse").field(&self.base).finish()
    }
}

macro_rules! cursor_impls {
    ($($name:ident),+) => {$(
        impl<T> Clone for $name<T> {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> PartialEq for $name<T> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.as_ptr() == other.as_ptr()
            }
        }

        impl<T> Eq for $name<T> {}

        impl<T> PartialOrd for $name<T> {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<T> Ord for $name<T> {
            #[inline]
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_ptr().cmp(&other.as_ptr())
            }
        }

        impl<T> Hash for $name<T> {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.as_ptr().hash(state)
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.as_ptr()).finish()
            }
        }
    )+};
}

cursor_impls!(Cursor, CursorMut);

macro_rules! position_ops {
    ($(impl[$($gen:tt)*] $ty:ty;)+) => {$(
        impl<$($gen)*> Add<usize> for $ty {
            type Output = Self;

            #[inline]
            fn add(self, count: usize) -> Self {
                self.offset(count as isize)
            }
        }

        impl<$($gen)*> AddAssign<usize> for $ty {
            #[inline]
            fn add_assign(&mut self, count: usize) {
                *self = self.offset(count as isize);
            }
        }

        impl<$($gen)*> Sub<usize> for $ty {
            type Output = Self;

            #[inline]
            fn sub(self, count: usize) -> Self {
                self.offset(-(count as isize))
            }
        }

        impl<$($gen)*> SubAssign<usize> for $ty {
            #[inline]
            fn sub_assign(&mut self, count: usize) {
                *self = self.offset(-(count as isize));
            }
        }

        impl<$($gen)*> Sub for $ty {
            type Output = isize;

            #[inline]
            fn sub(self, origin: Self) -> isize {
                self.distance(origin)
            }
        }
    )+};
}

position_ops! {
    impl[T] Cursor<T>;
    impl[T] CursorMut<T>;
    impl[C: Position] Reverse<C>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_arithmetic() {
        let data = [1u32, 2, 3, 4];
        let begin = Cursor::from_ptr(data.as_ptr());
        let end = begin + data.len();
        assert_eq!(end - begin, 4);
        assert_eq!(begin - end, -4);
        let mut pos = begin;
        pos.inc();
        pos += 2;
        assert_eq!(unsafe { *pos.get() }, 4);
        pos -= 1;
        pos.dec();
        assert_eq!(unsafe { *pos.get() }, 2);
        assert!(begin < pos && pos < end);
        assert_eq!(pos.offset(-1), begin);
    }

    #[test]
    fn zero_sized_positions_are_distinct() {
        let data = [(), (), ()];
        let begin = Cursor::from_ptr(data.as_ptr());
        let end = begin + 3;
        assert_ne!(begin, end);
        assert_eq!(end - begin, 3);
        assert_eq!(unsafe { *(begin + 1).get() }, ());
    }

    #[test]
    fn reverse_walks_backward() {
        let data = [1u32, 2, 3];
        let begin = Cursor::from_ptr(data.as_ptr());
        let end = begin + 3;
        let mut rpos = Reverse::new(end);
        let rend = Reverse::new(begin);
        let mut seen = [0u32; 3];
        for slot in seen.iter_mut() {
            *slot = unsafe { *rpos.get() };
            rpos.inc();
        }
        assert_eq!(seen, [3, 2, 1]);
        assert_eq!(rpos, rend);
        assert_eq!(rend - Reverse::new(end), 3);
        assert!(Reverse::new(end) < rend);
        assert_eq!((Reverse::new(end) + 1).base(), end - 1);
    }

    #[test]
    fn mutable_cursor_writes() {
        let mut data = [1u32, 2, 3];
        let pos = CursorMut::from_ptr(data.as_mut_ptr()) + 1;
        unsafe { *pos.get_mut() = 20 };
        let rpos = Reverse::new(pos);
        unsafe { *rpos.get_mut() += 10 };
        let read: Cursor<u32> = pos.into();
        assert_eq!(read, pos);
        assert_eq!(data, [11, 20, 3]);
    }
}
