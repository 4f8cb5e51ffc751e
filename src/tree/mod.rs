//! The AVL tree.
//!
//! # Components
//! - [`AvlTree`] - The container: insert, replace, delete, lookup, export
//! - [`Iter`] - Explicit-stack in-order iterator
//! - [`Comparator`] - The total-order capability elements are sorted by
//! - [`Snapshot`] - Nested `(left, element, height, right)` export
//! - [`TreeStats`] - Operation counters

mod avl_tree;
mod iter;
mod node;
pub mod order;
mod path;
mod snapshot;
mod stats;

pub use avl_tree::AvlTree;
pub use iter::Iter;
pub use order::{Comparator, LessFn, NaturalOrder, PartialOrder};
pub use snapshot::Snapshot;
pub use stats::TreeStats;
