use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::alloc::Allocator;

use super::Vec;

// Equality requires equal lengths and pairwise equal elements. Ordering is
// lexicographic: the first unequal pair decides, otherwise the shorter
// sequence orders first.

impl<T1, A1, T2, A2> PartialEq<Vec<T2, A2>> for Vec<T1, A1>
where
    A1: Allocator,
    A2: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, A: Allocator> Eq for Vec<T, A> {}

impl<T: PartialOrd, A1: Allocator, A2: Allocator> PartialOrd<Vec<T, A2>> for Vec<T, A1> {
    #[inline]
    fn partial_cmp(&self, other: &Vec<T, A2>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for Vec<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for Vec<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T1, A1, T2> PartialEq<&[T2]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, A1, T2> PartialEq<&mut [T2]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &&mut [T2]) -> bool {
        self.as_slice().eq(&**other)
    }
}

impl<T1, A1, T2> PartialEq<[T2]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<&[T2; N]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<[T2; N]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, A2> PartialEq<Vec<T2, A2>> for &[T1]
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        (*self).eq(other.as_slice())
    }
}

impl<T1, T2, A2> PartialEq<Vec<T2, A2>> for [T1]
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        self.eq(other.as_slice())
    }
}

impl<T1, T2, A2, const N: usize> PartialEq<Vec<T2, A2>> for [T1; N]
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        self[..].eq(other.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T1, A1, T2> PartialEq<alloc_crate::vec::Vec<T2>> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: Allocator,
{
    #[inline]
    fn eq(&self, other: &alloc_crate::vec::Vec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T1, T2, A2> PartialEq<Vec<T2, A2>> for alloc_crate::vec::Vec<T1>
where
    T1: PartialEq<T2>,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use crate::vec::Vec;

    #[test]
    fn equality_checks_length() {
        let a = Vec::<u32>::from_slice(&[1, 2, 3]);
        let b = Vec::<u32>::from_slice(&[1, 2]);
        assert_ne!(a, b);
        assert_ne!(b, a);
        assert_eq!(a, a.clone());
        assert_eq!(a, [1, 2, 3]);
        assert_eq!(&[1u32, 2, 3][..], a);
    }

    #[test]
    fn lexicographic_order() {
        let a = Vec::<u32>::from_slice(&[1, 2, 3]);
        let b = Vec::<u32>::from_slice(&[1, 2, 4]);
        let prefix = Vec::<u32>::from_slice(&[1, 2]);
        assert!(a < b);
        assert!(b > a);
        assert!(prefix < a);
        assert!(a <= a.clone() && a >= a.clone());
        assert_eq!(a.cmp(&b), core::cmp::Ordering::Less);
        assert!(Vec::<u32>::new() < prefix);
    }
}
