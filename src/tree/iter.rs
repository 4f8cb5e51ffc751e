//! Ascending in-order iterator driven by an explicit stack.
//!
//! Each stack entry models one frame of a recursive in-order walk:
//!
//! ```text
//! DescendLeft ──▶ Yield ──▶ DescendRight ──▶ Pop
//!     │                         │             │
//!     └─ push left child        └─ push right └─ remove entry
//! ```
//!
//! An element is produced exactly when an entry passes through `Yield`.
//! No native recursion is used, so traversal depth is bounded only by the
//! tree's configured `max_depth`.

use std::iter::FusedIterator;

use crate::common::Result;
use crate::tree::node::Node;
use crate::tree::path::PathStack;

/// Resume point of a stack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    DescendLeft,
    Yield,
    DescendRight,
    Pop,
}

#[derive(Debug)]
struct Entry<'a, T> {
    node: &'a Node<T>,
    phase: Phase,
}

impl<'a, T> Entry<'a, T> {
    fn new(node: &'a Node<T>) -> Self {
        Self {
            node,
            phase: Phase::DescendLeft,
        }
    }
}

/// Iterator over the elements of an [`AvlTree`](crate::AvlTree) in ascending order.
///
/// Items are `Result<&T>`: if the traversal would need more than the tree's
/// `max_depth` stack entries, the iterator yields one
/// `Err(Error::StackOverflow)` and then ends.
///
/// The iterator borrows the tree, so the tree cannot be mutated while it is
/// alive. It is single-pass; call [`AvlTree::iter`](crate::AvlTree::iter)
/// again to traverse a second time.
///
/// # Example
/// ```
/// use avltree::AvlTree;
///
/// let tree = AvlTree::from_elements([3, 1, 2]).unwrap();
/// let items: Vec<&i32> = tree.iter().collect::<avltree::Result<_>>().unwrap();
/// assert_eq!(items, vec![&1, &2, &3]);
/// ```
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: PathStack<Entry<'a, T>>,
    /// Root waiting to be pushed on the first call to `next`.
    pending: Option<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, max_depth: usize) -> Self {
        Self {
            stack: PathStack::new(max_depth),
            pending: root,
        }
    }

    fn descend(&mut self, node: &'a Node<T>) -> Result<()> {
        if let Err(err) = self.stack.push(Entry::new(node)) {
            // Fuse: a failed traversal never resumes.
            self.stack.clear();
            return Err(err);
        }
        Ok(())
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = Result<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.pending.take() {
            if let Err(err) = self.descend(root) {
                return Some(Err(err));
            }
        }

        loop {
            let entry = self.stack.last_mut()?;
            let node = entry.node;

            let child = match entry.phase {
                Phase::DescendLeft => {
                    entry.phase = Phase::Yield;
                    node.left.as_deref()
                }
                Phase::Yield => {
                    entry.phase = Phase::DescendRight;
                    return Some(Ok(&node.element));
                }
                Phase::DescendRight => {
                    entry.phase = Phase::Pop;
                    node.right.as_deref()
                }
                Phase::Pop => {
                    self.stack.pop();
                    None
                }
            };

            if let Some(child) = child {
                if let Err(err) = self.descend(child) {
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Box<Node<u32>> {
        //       4
        //     /   \
        //    2     5
        //   / \
        //  1   3
        let mut two = Node::leaf(2);
        two.left = Some(Node::leaf(1));
        two.right = Some(Node::leaf(3));
        two.update_height();

        let mut root = Node::leaf(4);
        root.left = Some(two);
        root.right = Some(Node::leaf(5));
        root.update_height();
        root
    }

    #[test]
    fn test_empty() {
        let mut iter: Iter<'_, u32> = Iter::new(None, 64);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_in_order() {
        let root = sample();
        let items: Vec<u32> = Iter::new(Some(&*root), 64)
            .map(|item| *item.unwrap())
            .collect();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_stack_overflow_fuses() {
        let root = sample();
        // Reaching element 1 needs three entries (4, 2, 1).
        let mut iter = Iter::new(Some(&*root), 2);

        match iter.next() {
            Some(Err(crate::Error::StackOverflow { limit })) => assert_eq!(limit, 2),
            other => panic!("Expected StackOverflow, got {:?}", other),
        }
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_exact_depth_is_enough() {
        let root = sample();
        let count = Iter::new(Some(&*root), 3).filter(|item| item.is_ok()).count();
        assert_eq!(count, 5);
    }
}
