//! Tree cells and the rotation primitives.
//!
//! A [`Node`] owns its element and both children. Rotations reassign the
//! `Box` links in place; elements are never cloned or moved between cells.

use log::trace;

/// An owned, possibly absent subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Which child slot a descent took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A cell of the tree.
///
/// # Invariants
/// - Every element under `left` orders strictly before `element`
/// - Every element under `right` orders strictly after `element`
/// - `height == 1 + max(height(left), height(right))`
/// - `|height(left) - height(right)| <= 1`
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) height: usize,
}

impl<T> Node<T> {
    /// Allocate a new leaf (height 1).
    pub(crate) fn leaf(element: T) -> Box<Self> {
        Box::new(Node {
            element,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<&Node<T>> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Recompute the cached height from the children.
    ///
    /// Returns the previous height so callers can tell whether it changed.
    #[inline]
    pub(crate) fn update_height(&mut self) -> usize {
        let old = self.height;
        self.height = 1 + height(&self.left).max(height(&self.right));
        old
    }

    /// `height(right) - height(left)`.
    #[inline]
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.right) as isize - height(&self.left) as isize
    }
}

/// Height of a possibly absent subtree.
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

#[inline]
fn balance_factor<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

/// Rotate `node` to the left, returning the new subtree root.
///
/// ```text
///     node                 root
///    /    \               /    \
///   a     root    ==>   node    c
///        /    \        /    \
///       b      c      a      b
/// ```
///
/// Heights are recomputed child first (`node`), then parent (`root`).
/// Returns `node` unchanged if it has no right child.
pub(crate) fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut root) = node.right.take() else {
        return node;
    };

    node.right = root.left.take();
    node.update_height();

    root.left = Some(node);
    root.update_height();

    root
}

/// Mirror of [`rotate_left`].
pub(crate) fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut root) = node.left.take() else {
        return node;
    };

    node.left = root.right.take();
    node.update_height();

    root.right = Some(node);
    root.update_height();

    root
}

/// Outcome of rebalancing one ancestor.
pub(crate) struct Rebalanced<T> {
    /// Root of the (possibly rotated) subtree.
    pub(crate) node: Box<Node<T>>,
    /// Number of single rotations performed (0, 1 or 2).
    pub(crate) rotations: u32,
    /// Whether ancestors further up may still need work.
    pub(crate) propagate: bool,
}

/// Restore the AVL invariant at `node`, whose children are already balanced.
///
/// - `bf == 2`: rotate left, preceded by a right rotation of the right child
///   when that child leans left
/// - `bf == -2`: mirror image
/// - otherwise: nothing moves; propagation stops when the height is unchanged
pub(crate) fn rebalance<T>(mut node: Box<Node<T>>) -> Rebalanced<T> {
    let old = node.update_height();

    match node.balance_factor() {
        2 => {
            let mut rotations = 1;
            if balance_factor(&node.right) < 0 {
                node.right = node.right.take().map(rotate_right);
                rotations += 1;
            }
            trace!("rotating left at height {} ({} rotations)", node.height, rotations);
            Rebalanced {
                node: rotate_left(node),
                rotations,
                propagate: true,
            }
        }
        -2 => {
            let mut rotations = 1;
            if balance_factor(&node.left) > 0 {
                node.left = node.left.take().map(rotate_left);
                rotations += 1;
            }
            trace!("rotating right at height {} ({} rotations)", node.height, rotations);
            Rebalanced {
                node: rotate_right(node),
                rotations,
                propagate: true,
            }
        }
        _ => {
            let propagate = node.height != old;
            Rebalanced {
                node,
                rotations: 0,
                propagate,
            }
        }
    }
}
