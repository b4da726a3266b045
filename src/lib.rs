//! A contiguous growable array with explicit storage management.
//!
//! [`Vec`] keeps its elements in a single buffer obtained from an
//! [`Allocator`](alloc::Allocator), grows it by doubling, and relocates
//! the live elements into a fresh buffer whenever more capacity is needed.
//! Fallible operations come in pairs: a panicking form and a `try_` form
//! returning a [`StorageError`].

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "nightly", feature(allocator_api))]
#![warn(missing_docs)]

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
struct _ReadmeDoctests;

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc as alloc_crate;

pub mod alloc;

pub mod capacity;

pub(crate) mod error;

pub(crate) mod storage;

pub mod vec;

pub use self::error::{BoundsError, StorageError, UpdateError};
pub use self::vec::Vec;
