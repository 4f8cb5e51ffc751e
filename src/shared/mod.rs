//! Reference-counted tree handle for embedding hosts.
//!
//! An [`AvlTree`](crate::AvlTree) iterator borrows its tree, so the compiler
//! rules out mutation during iteration. Hosts that hand out iterators as
//! independent objects need the opposite arrangement: the iterator keeps the
//! tree alive, and the tree stays mutable. [`SharedTree`] provides that, and
//! [`SharedIter`] reports a mutation during iteration as
//! [`Error::ConcurrentModification`](crate::Error::ConcurrentModification)
//! instead of reading a tree that changed underneath it.

mod shared_tree;

pub use shared_tree::{SharedIter, SharedTree};
