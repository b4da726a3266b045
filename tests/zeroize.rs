#![cfg(all(feature = "alloc", feature = "zeroize"))]
#![cfg_attr(feature = "nightly", feature(allocator_api))]

use core::alloc::Layout;
use core::cell::RefCell;
use core::ptr::NonNull;
use core::slice;

use dynvec::{
    alloc::{AllocError, Allocator, Global, ZeroizingAlloc},
    vec,
    vec::{Vec as DynVec, ZeroizingVec},
};
use zeroize::Zeroize;

#[derive(Debug)]
struct TestAlloc<A: Allocator> {
    alloc: A,
    released: RefCell<Vec<Vec<u8>>>,
}

impl<A: Allocator> TestAlloc<A> {
    fn new(alloc: A) -> Self {
        Self {
            alloc,
            released: RefCell::new(Vec::new()),
        }
    }
}

unsafe impl<A: Allocator> Allocator for &TestAlloc<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.alloc.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let cp = Vec::from(unsafe { slice::from_raw_parts(ptr.as_ptr(), layout.size()) });
        self.released.borrow_mut().push(cp);
        self.alloc.deallocate(ptr, layout)
    }
}

#[test]
fn test_alloc_log() {
    // check functioning of alloc log
    let alloc = TestAlloc::new(Global);
    let b = vec![in &alloc; 99usize; 1];
    drop(b);
    let log = alloc.released.borrow().clone();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with(&99usize.to_ne_bytes()));
}

#[test]
fn vec_zeroizing_alloc_global() {
    let mut v = DynVec::<usize, _>::new_in(ZeroizingAlloc::<Global>::default());
    v.extend([1, 2, 3]);
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn vec_zeroizing_alloc_verify() {
    let alloc = TestAlloc::new(Global);
    let mut v = DynVec::<usize, _>::new_in(ZeroizingAlloc(&alloc));
    v.push(1usize);
    drop(v);
    let log = alloc.released.borrow().clone();
    assert_eq!(log.len(), 1);
    assert!(log[0].iter().all(|i| *i == 0));
}

#[test]
fn vec_zeroizing_growth_verify() {
    let alloc = TestAlloc::new(Global);
    let mut v = DynVec::<usize, _>::new_in(ZeroizingAlloc(&alloc));
    v.extend([usize::MAX; 5]);
    assert_eq!(v.capacity(), 8);
    v.shrink_to_fit();
    v.insert_n(v.begin(), 2, usize::MAX);
    assert_eq!(v.capacity(), 10);
    // Each relocation released the previous buffer of 8 and then 5 slots
    let log = alloc.released.borrow().clone();
    let word = core::mem::size_of::<usize>();
    assert_eq!(
        log.iter().map(|buf| buf.len()).collect::<Vec<_>>(),
        [8 * word, 5 * word]
    );
    assert!(log.iter().all(|buf| buf.iter().all(|i| *i == 0)));
}

#[test]
fn vec_zeroize_clear() {
    let alloc = TestAlloc::new(Global);
    let mut v = DynVec::<u8, _>::new_in(ZeroizingAlloc(&alloc));
    v.extend_from_slice(b"secret");
    v.zeroize();
    assert_eq!((v.len(), v.capacity()), (0, 0));
    let log = alloc.released.borrow().clone();
    assert_eq!(log.len(), 1);
    assert!(log[0].iter().all(|i| *i == 0));
}

#[test]
fn vec_zeroizingvec_alias() {
    let mut v = ZeroizingVec::new();
    v.extend([1, 2, 3]);
    assert_eq!(v.len(), 3);
}
