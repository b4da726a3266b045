use core::mem::MaybeUninit;
use core::ptr;

/// Constructs new elements into a run of uninitialized slots, optionally
/// followed by `tail_count` live elements which were shifted out of the way.
///
/// The inserter holds the owner's length while it is active. If it is dropped
/// before `complete` (for instance because `Clone` panicked) the elements
/// written so far are dropped, the tail is moved back to the start of the
/// run, and the length is restored to cover the tail again.
pub(crate) struct Inserter<'a, T> {
    buf: &'a mut [MaybeUninit<T>],
    length: &'a mut usize,
    pos: usize,
    cap: usize,
}

impl<'a, T> Inserter<'a, T> {
    #[inline]
    pub fn new(data: &'a mut [MaybeUninit<T>], length: &'a mut usize) -> Self {
        Self::new_with_tail(data, length, 0)
    }

    #[inline]
    pub fn new_with_tail(
        data: &'a mut [MaybeUninit<T>],
        length: &'a mut usize,
        tail_count: usize,
    ) -> Self {
        let cap = data.len() - tail_count;
        Self {
            buf: data,
            length,
            pos: 0,
            cap,
        }
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        assert!(self.pos < self.cap);
        self.buf[self.pos].write(val);
        self.pos += 1;
    }

    #[inline]
    pub fn push_iter(&mut self, iter: &mut impl Iterator<Item = T>) {
        while self.pos < self.cap {
            if let Some(item) = iter.next() {
                self.buf[self.pos].write(item);
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    #[inline]
    pub fn push_repeat(&mut self, val: &T, len: usize)
    where
        T: Clone,
    {
        assert!(self.cap - self.pos >= len);
        for _ in 0..len {
            self.buf[self.pos].write(val.clone());
            self.pos += 1;
        }
    }

    #[inline]
    pub fn push_with(&mut self, len: usize, mut f: impl FnMut() -> T) {
        assert!(self.cap - self.pos >= len);
        for _ in 0..len {
            self.buf[self.pos].write(f());
            self.pos += 1;
        }
    }

    #[inline]
    pub fn push_slice(&mut self, data: &[T])
    where
        T: Clone,
    {
        assert!(self.cap - self.pos >= data.len());
        for item in data {
            self.buf[self.pos].write(item.clone());
            self.pos += 1;
        }
    }

    // Successfully complete the insertion, closing any unused gap before the
    // tail. Returns the number of inserted entries.
    #[inline]
    pub fn complete(mut self) -> usize {
        let count = self.pos;
        let tail_count = self.buf.len() - self.cap;
        if count < self.cap && tail_count > 0 {
            let base = self.buf.as_mut_ptr();
            unsafe {
                ptr::copy(base.add(self.cap), base.add(count), tail_count);
            }
        }
        *self.length += count + tail_count;
        self.buf = &mut [];
        count
    }
}

impl<T> Drop for Inserter<'_, T> {
    #[inline]
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            // Drop the inserted items
            unsafe {
                ptr::drop_in_place(&mut self.buf[..self.pos] as *mut [MaybeUninit<T>] as *mut [T])
            };
            let tail_count = self.buf.len() - self.cap;
            if tail_count > 0 {
                // Restore the tail items
                let base = self.buf.as_mut_ptr();
                unsafe {
                    ptr::copy(base.add(self.cap), base, tail_count);
                }
            }
            *self.length += tail_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use core::mem::MaybeUninit;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::string::{String, ToString};

    use super::Inserter;

    fn slots<const N: usize>() -> [MaybeUninit<String>; N] {
        [(); N].map(|_| MaybeUninit::uninit())
    }

    fn read(slots: &[MaybeUninit<String>], len: usize) -> std::vec::Vec<String> {
        slots[..len]
            .iter()
            .map(|s| unsafe { s.assume_init_ref().clone() })
            .collect()
    }

    fn release(slots: &mut [MaybeUninit<String>], len: usize) {
        for slot in &mut slots[..len] {
            unsafe { slot.assume_init_drop() };
        }
    }

    #[test]
    fn complete_closes_gap() {
        let mut buf = slots::<5>();
        // A tail of two items waiting behind a gap of three slots.
        buf[3].write("x".to_string());
        buf[4].write("y".to_string());
        let mut length = 0;
        let mut ins = Inserter::new_with_tail(&mut buf, &mut length, 2);
        ins.push("a".to_string());
        assert_eq!(ins.complete(), 1);
        assert_eq!(length, 3);
        assert_eq!(read(&buf, 3), ["a", "x", "y"]);
        release(&mut buf, 3);
    }

    #[test]
    fn unwind_restores_tail() {
        let mut buf = slots::<4>();
        buf[2].write("x".to_string());
        buf[3].write("y".to_string());
        let mut length = 0;
        let res = catch_unwind(AssertUnwindSafe(|| {
            let mut ins = Inserter::new_with_tail(&mut buf, &mut length, 2);
            ins.push("a".to_string());
            ins.push_with(1, || panic!("construction failed"));
        }));
        assert!(res.is_err());
        assert_eq!(length, 2);
        assert_eq!(read(&buf, 2), ["x", "y"]);
        release(&mut buf, 2);
    }

    #[test]
    fn push_iter_stops_at_gap() {
        let mut buf = slots::<3>();
        let mut length = 0;
        let mut source = ["a", "b", "c", "d"].into_iter().map(String::from);
        let mut ins = Inserter::new(&mut buf, &mut length);
        ins.push_iter(&mut source);
        assert_eq!(ins.complete(), 3);
        assert_eq!(source.next().as_deref(), Some("d"));
        assert_eq!(read(&buf, length), ["a", "b", "c"]);
        release(&mut buf, 3);
    }
}
