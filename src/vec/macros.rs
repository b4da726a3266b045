/// Construct a `Vec` from a list of elements or a repeated element.
///
/// ```
/// use dynvec::vec;
///
/// let a = vec![1, 2, 3];
/// assert_eq!(a, [1, 2, 3]);
///
/// let b = vec![0u8; 4];
/// assert_eq!((b.len(), b.capacity()), (4, 4));
///
/// let c: dynvec::Vec<u32> = vec![];
/// assert!(c.is_empty());
/// ```
///
/// A leading `in alloc;` selects the allocator instance.
#[macro_export]
macro_rules! vec {
    (in $alloc:expr $(;)?) => (
        $crate::vec::Vec::new_in($alloc)
    );
    (in $alloc:expr; $elem:expr; $n:expr) => (
        $crate::vec::Vec::from_elem_in($elem, $n, $alloc)
    );
    (in $alloc:expr; $($x:expr),+ $(,)?) => (
        $crate::vec::Vec::from_array_in([$($x),+], $alloc)
    );
    () => (
        $crate::vec::Vec::<_, $crate::alloc::Global>::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::Vec::<_, $crate::alloc::Global>::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::Vec::from_array_in([$($x),+], $crate::alloc::Global)
    );
}
