//! Capacity limits and growth behavior for collections which have exceeded
//! their available storage.

use core::mem::size_of;

use crate::error::StorageError;

/// The maximum number of elements of type `T` which may be stored in a
/// single buffer.
///
/// For sized types this is bounded by the largest representable allocation
/// (`isize::MAX` bytes). Zero-sized types are limited only by `usize`.
#[inline]
pub const fn max_capacity<T>() -> usize {
    let size = size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}

/// Calculate the next capacity to request when a buffer of `capacity`
/// elements must hold at least `required` elements.
///
/// An empty buffer starts from a single slot. The capacity is then doubled
/// until it satisfies `required`, limited by [`max_capacity`].
pub fn next_capacity<T>(capacity: usize, required: usize) -> Result<usize, StorageError> {
    let limit = max_capacity::<T>();
    if required > limit {
        return Err(StorageError::CapacityLimit);
    }
    let mut target = capacity.max(1);
    while target < required {
        target = target.saturating_mul(2);
    }
    Ok(target.min(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_sequence() {
        let mut capacity = 0;
        let mut seen = [0usize; 5];
        for (len, cap) in seen.iter_mut().enumerate() {
            if len + 1 > capacity {
                capacity = next_capacity::<u32>(capacity, len + 1).unwrap();
            }
            *cap = capacity;
        }
        assert_eq!(seen, [1, 2, 4, 4, 8]);
    }

    #[test]
    fn bulk_growth() {
        assert_eq!(next_capacity::<u32>(0, 5), Ok(8));
        assert_eq!(next_capacity::<u32>(2, 5), Ok(8));
        assert_eq!(next_capacity::<u32>(3, 4), Ok(6));
        assert_eq!(next_capacity::<u32>(10, 11), Ok(20));
    }

    #[test]
    fn growth_is_clamped() {
        let limit = max_capacity::<u64>();
        assert_eq!(next_capacity::<u64>(limit - 1, limit), Ok(limit));
        assert_eq!(
            next_capacity::<u64>(limit, limit + 1),
            Err(StorageError::CapacityLimit)
        );
    }

    #[test]
    fn zero_sized_limit() {
        assert_eq!(max_capacity::<()>(), usize::MAX);
        assert_eq!(max_capacity::<u8>(), isize::MAX as usize);
        assert_eq!(max_capacity::<u32>(), isize::MAX as usize / 4);
        assert_eq!(next_capacity::<()>(usize::MAX / 2 + 1, usize::MAX), Ok(usize::MAX));
    }
}
