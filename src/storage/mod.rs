//! Raw storage management for `Vec` buffers.

mod block;
mod buffer;
mod insert;

pub(crate) use self::{buffer::VecBuffer, insert::Inserter};
