//! avltree - A height-balanced ordered container.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            avltree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Shared Handle (shared/)                       │   │
//! │  │   SharedTree = Arc<RwLock<AvlTree>> + generation         │   │
//! │  │   SharedIter (owns a handle, detects modification)       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 AVL Tree (tree/)                         │   │
//! │  │   AvlTree: insert | replace | delete | lookup | export   │   │
//! │  │   Iter: explicit-stack in-order traversal                │   │
//! │  │   Comparator: NaturalOrder | PartialOrder | LessFn       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Common (common/)                               │   │
//! │  │        Error + Result + TreeConfig (max depth)           │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`tree`] - The AVL tree, its iterator and ordering capability
//! - [`shared`] - Reference-counted handle with iterator invalidation
//!
//! # Quick Start
//! ```
//! use avltree::AvlTree;
//!
//! let mut tree = AvlTree::from_elements([5, 3, 8, 1]).unwrap();
//! tree.insert(4).unwrap();
//! assert_eq!(tree.delete(&3).unwrap(), Some(3));
//!
//! let items: Vec<i32> = tree.to_vec().unwrap();
//! assert_eq!(items, vec![1, 4, 5, 8]);
//! assert_eq!(tree.height(), 3);
//! ```

pub mod common;
pub mod shared;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use common::config::DEFAULT_MAX_DEPTH;
pub use common::{Error, Result, TreeConfig};

pub use shared::{SharedIter, SharedTree};
pub use tree::{AvlTree, Comparator, Iter, LessFn, NaturalOrder, PartialOrder, Snapshot, TreeStats};
