//! Structural export of a tree.

use std::fmt;

use crate::tree::node::Node;

/// A nested `(left, element, height, right)` picture of a tree.
///
/// Intended for inspection and tests. An absent subtree is the explicit
/// [`Snapshot::Empty`] marker.
///
/// # Example
/// ```
/// use avltree::{AvlTree, Snapshot};
///
/// let tree = AvlTree::from_elements([1, 3, 2]).unwrap();
/// let expected = Snapshot::node(Snapshot::leaf(1), 2, 2, Snapshot::leaf(3));
///
/// assert_eq!(tree.to_snapshot(), expected);
/// assert_eq!(expected.to_string(), "((None, 1, 1, None), 2, 2, (None, 3, 1, None))");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot<T> {
    /// No subtree.
    Empty,
    /// `(left, element, height, right)`.
    Node(Box<Snapshot<T>>, T, usize, Box<Snapshot<T>>),
}

impl<T> Snapshot<T> {
    /// Build an inner node.
    pub fn node(left: Snapshot<T>, element: T, height: usize, right: Snapshot<T>) -> Self {
        Snapshot::Node(Box::new(left), element, height, Box::new(right))
    }

    /// Build a leaf: `(None, element, 1, None)`.
    pub fn leaf(element: T) -> Self {
        Self::node(Snapshot::Empty, element, 1, Snapshot::Empty)
    }

    /// Height recorded at the top of the snapshot (0 when empty).
    pub fn height(&self) -> usize {
        match self {
            Snapshot::Empty => 0,
            Snapshot::Node(_, _, height, _) => *height,
        }
    }

    /// Element at the top of the snapshot, if any.
    pub fn element(&self) -> Option<&T> {
        match self {
            Snapshot::Empty => None,
            Snapshot::Node(_, element, _, _) => Some(element),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Snapshot::Empty)
    }
}

impl<T: Clone> Snapshot<T> {
    /// Recursive read-only walk. Depth equals tree height.
    pub(crate) fn capture(node: Option<&Node<T>>) -> Self {
        match node {
            None => Snapshot::Empty,
            Some(node) => Self::node(
                Self::capture(node.left.as_deref()),
                node.element.clone(),
                node.height,
                Self::capture(node.right.as_deref()),
            ),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Empty => write!(f, "None"),
            Snapshot::Node(left, element, height, right) => {
                write!(f, "({}, {}, {}, {})", left, element, height, right)
            }
        }
    }
}
