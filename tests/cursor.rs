#![cfg(feature = "alloc")]
#![cfg_attr(feature = "nightly", feature(allocator_api))]

use dynvec::vec::{Cursor, Position, Reverse};
use dynvec::Vec as DynVec;

#[test]
fn cursor_forward_traversal() {
    let v = DynVec::<u32>::from_slice(&[1, 2, 3, 4]);
    let mut pos = v.begin();
    let end = v.end();
    let mut seen = std::vec::Vec::new();
    while pos != end {
        seen.push(*v.get_at(pos).unwrap());
        pos.inc();
    }
    assert_eq!(seen, [1, 2, 3, 4]);
    assert_eq!(end - v.begin(), 4);
    assert!(v.begin() < end);
    assert_eq!(v.get_at(end), None);
}

#[test]
fn cursor_unchecked_access() {
    let mut v = DynVec::<u32>::from_slice(&[1, 2, 3]);
    let mut pos = v.begin_mut() + 1;
    unsafe { *pos.get_mut() = 20 };
    pos.dec();
    assert_eq!(unsafe { *pos.get() }, 1);
    assert_eq!(unsafe { *(v.end() - 1).get() }, 3);
    assert_eq!(v, [1, 20, 3]);
}

#[test]
fn cursor_reverse_traversal() {
    let mut v = DynVec::<u32>::from_slice(&[1, 2, 3, 4]);
    let mut pos = v.rbegin();
    let mut seen = std::vec::Vec::new();
    while pos != v.rend() {
        seen.push(unsafe { *pos.get() });
        pos.inc();
    }
    assert_eq!(seen, [4, 3, 2, 1]);
    assert_eq!(v.rend() - v.rbegin(), 4);
    assert!(v.rbegin() < v.rend());
    assert_eq!(v.rbegin().base(), v.end());

    let mut pos = v.rbegin_mut();
    let mut next = 10;
    while pos != v.rend_mut() {
        unsafe { *pos.get_mut() = next };
        next += 10;
        pos += 1;
    }
    assert_eq!(v, [40, 30, 20, 10]);
    let rev: Reverse<Cursor<u32>> = v.rbegin_mut().into();
    assert_eq!(rev, v.rbegin());
}

#[test]
fn cursor_offset_and_distance() {
    let v = DynVec::<u64>::from_slice(&[5; 8]);
    let pos = v.begin().offset(5);
    assert_eq!(pos.distance(v.begin()), 5);
    assert_eq!(v.begin().distance(pos), -5);
    let mut back = pos;
    back -= 2;
    assert_eq!(v.index_of(back), Some(3));
    assert_eq!(pos - 5, v.begin());
}

#[test]
fn cursor_invalidated_by_reallocation() {
    let mut v = DynVec::<u32>::with_capacity(2);
    v.extend_from_slice(&[1, 2]);
    let first = v.begin();
    let end = v.end();
    assert_eq!(v.index_of(first), Some(0));
    v.reserve(16);
    v.push(3);
    assert_eq!(v.index_of(first), None);
    assert_eq!(v.index_of(end), None);
    assert_eq!(v.get_at(first), None);
}

#[test]
fn cursor_invalidated_by_clear() {
    let mut v = DynVec::<u32>::from_slice(&[1, 2, 3]);
    let first = v.begin();
    v.clear();
    assert_eq!(v.index_of(first), None);
    assert_eq!(v.get_at(first), None);
}

#[test]
fn cursor_invalidated_by_assign() {
    let mut v = DynVec::<u32>::from_slice(&[1, 2]);
    let first = v.begin();
    let end = v.end();
    v.assign(5, 7);
    assert_eq!(v.index_of(first), None);
    assert_eq!(v.index_of(end), None);
    assert_eq!(v, [7; 5]);

    // Assigning within the capacity reuses the buffer.
    let mut v = DynVec::<u32>::with_capacity(4);
    v.extend_from_slice(&[1, 2, 3]);
    let pos = v.begin() + 1;
    v.assign(2, 9);
    assert_eq!(v.index_of(pos), Some(1));
    assert_eq!(v.get_at(pos), Some(&9));
}

#[test]
fn cursor_before_insert_stays_valid() {
    let mut v = DynVec::<u32>::with_capacity(10);
    v.extend_from_slice(&[1, 2, 3, 4]);
    let first = v.begin();
    let second = v.begin() + 1;
    let pos = v.insert_n(v.begin() + 2, 2, 9);
    assert_eq!(v.get_at(first), Some(&1));
    assert_eq!(v.get_at(second), Some(&2));
    assert_eq!(v.get_at(pos), Some(&9));
    assert_eq!(v, [1, 2, 9, 9, 3, 4]);
}

#[test]
fn cursor_before_erase_stays_valid() {
    let mut v = DynVec::<u32>::from_slice(&[1, 2, 3, 4]);
    let first = v.begin();
    let next = v.erase(v.begin() + 2);
    assert_eq!(v.get_at(first), Some(&1));
    assert_eq!(v.get_at(next), Some(&4));
    // The former last position is now the end position.
    let last = v.begin() + 3;
    assert_eq!(v.index_of(last), Some(3));
    assert_eq!(v.get_at(last), None);
}

#[test]
fn cursor_returned_from_reallocating_insert() {
    let mut v = DynVec::<u32>::from_slice(&[1, 2, 3]);
    let old = v.begin();
    let pos = v.insert(v.begin() + 1, 7);
    assert_eq!(v.capacity(), 6);
    assert_eq!(v.index_of(old), None);
    assert_eq!(v.index_of(pos), Some(1));
    let mut pos = pos;
    *v.get_at_mut(pos).unwrap() += 1;
    pos.inc();
    assert_eq!(v.get_at(pos), Some(&2));
    assert_eq!(v, [1, 8, 2, 3]);
}

#[test]
fn cursor_mut_converts() {
    let mut v = DynVec::<u32>::from_slice(&[1, 2]);
    let pos = v.begin_mut();
    let read: Cursor<u32> = pos.into();
    assert_eq!(read, pos);
    assert_eq!(pos.as_cursor(), v.begin());
    assert_eq!(pos.as_ptr() as *const u32, v.as_ptr());
}

#[test]
fn cursor_zero_sized() {
    let mut v = DynVec::<()>::with_default(3);
    let mut pos = v.begin();
    let mut count = 0;
    while pos != v.end() {
        count += 1;
        pos.inc();
    }
    assert_eq!(count, 3);
    let next = v.erase(v.begin());
    assert_eq!(v.index_of(next), Some(0));
    assert_eq!(v.end() - v.begin(), 2);
}
