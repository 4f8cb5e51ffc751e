//! AvlTree - the height-balanced ordered container.
//!
//! The [`AvlTree`] provides:
//! - Insert / replace / delete with AVL rebalancing
//! - Point lookup and ascending iteration
//! - Height introspection and a structural snapshot
//! - Invariant validation and operation statistics

use std::fmt;
use std::mem;

use log::{debug, trace, warn};

use crate::common::{Error, Result, TreeConfig};
use crate::tree::iter::Iter;
use crate::tree::node::{height, rebalance, Link, Node, Side};
use crate::tree::order::{locate, Comparator, NaturalOrder, Position};
use crate::tree::path::PathStack;
use crate::tree::snapshot::Snapshot;
use crate::tree::stats::TreeStats;

/// Ancestors detached from the tree, each with the side its child hangs on.
type Spine<T> = Vec<(Box<Node<T>>, Side)>;

/// Outcome of the read-only descent.
enum Search {
    /// An equal element sits at the end of the path.
    Found(PathStack<Side>),
    /// The path ends at the absent slot where the element belongs.
    Vacant(PathStack<Side>),
}

/// A self-balancing binary search tree.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                        AvlTree                           │
/// │  ┌──────────────┐   ┌────────────────────────────────┐   │
/// │  │ order: C     │   │ root: Option<Box<Node<T>>>     │   │
/// │  │ less(a, b)   │──▶│   ┌─────┐                      │   │
/// │  └──────────────┘   │   │  4  │ h=3                  │   │
/// │  ┌──────────────┐   │   └─────┘                      │   │
/// │  │ config       │   │   /     \                      │   │
/// │  │ max_depth    │   │ ┌───┐  ┌───┐                   │   │
/// │  └──────────────┘   │ │ 2 │  │ 6 │ h=2 / h=1 ...     │   │
/// │  ┌──────────────┐   │ └───┘  └───┘                   │   │
/// │  │ stats        │   └────────────────────────────────┘   │
/// │  └──────────────┘                                        │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// # Mutation protocol
/// Every mutating operation runs in two phases:
/// 1. A read-only descent compares the element against each visited node and
///    records the sides taken on a bounded path stack. Comparator failures,
///    stack overflow and allocation failure all surface here, so the tree is
///    untouched when an error is returned.
/// 2. The recorded ancestors are detached from the root down, the change is
///    made at the bottom, and the ancestors are reattached bottom-up while
///    rebalancing. Rebalancing stops once a subtree's height is unchanged;
///    the remaining ancestors are only reattached.
///
/// # Ownership
/// Each node exclusively owns its children. Dropping the tree releases all
/// nodes iteratively, without recursion.
///
/// # Usage
/// ```
/// use avltree::AvlTree;
///
/// let mut tree = AvlTree::from_elements([3, 1, 4, 1, 5, 9, 2, 6]).unwrap();
/// assert_eq!(tree.to_vec().unwrap(), vec![1, 2, 3, 4, 5, 6, 9]);
///
/// // Duplicates are rejected and the existing element is returned.
/// assert_eq!(tree.insert(4).unwrap(), Some(&4));
///
/// assert_eq!(tree.delete(&4).unwrap(), Some(4));
/// assert_eq!(tree.delete(&4).unwrap(), None);
/// ```
pub struct AvlTree<T, C = NaturalOrder> {
    /// Top of the tree, replaced when a rotation or splice changes it.
    root: Link<T>,

    /// Number of elements.
    len: usize,

    /// Total order over elements.
    order: C,

    /// Stack ceilings.
    config: TreeConfig,

    /// Operation counters.
    stats: TreeStats,
}

impl<T> AvlTree<T> {
    /// Create an empty tree ordered by `T: Ord`.
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }

    /// Create an empty tree ordered by `T: Ord` with custom settings.
    pub fn with_config(config: TreeConfig) -> Self {
        Self::with_order_and_config(NaturalOrder, config)
    }

    /// Build a tree by inserting each element in sequence order.
    ///
    /// Duplicates (by the total order) are silently ignored; the first
    /// occurrence wins.
    pub fn from_elements<I>(elements: I) -> Result<Self>
    where
        T: Ord,
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        tree.try_extend(elements)?;
        debug!("built tree of {} elements, height {}", tree.len, tree.height());
        Ok(tree)
    }
}

impl<T, C> AvlTree<T, C> {
    /// Create an empty tree using `order` for comparisons.
    pub fn with_order(order: C) -> Self {
        Self::with_order_and_config(order, TreeConfig::default())
    }

    /// Create an empty tree with a custom order and custom settings.
    pub fn with_order_and_config(order: C, config: TreeConfig) -> Self {
        Self {
            root: None,
            len: 0,
            order,
            config,
            stats: TreeStats::default(),
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Height of the tree: 0 when empty, 1 for a single element. O(1).
    #[inline]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The comparator in use.
    pub fn order(&self) -> &C {
        &self.order
    }

    /// The settings in use.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Counters for operations that changed the tree.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Reset all counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats = TreeStats::default();
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.element)
    }

    /// Largest element.
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.element)
    }

    // ========================================================================
    // Traversal and export
    // ========================================================================

    /// Iterate over the elements in ascending order.
    ///
    /// See [`Iter`] for the failure mode.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.config.max_depth())
    }

    /// Clone the elements into a vector, in ascending order.
    pub fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.iter().map(|item| item.cloned()).collect()
    }

    /// Export the structure as nested `(left, element, height, right)` snapshots.
    pub fn to_snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::capture(self.root.as_deref())
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Remove every element.
    ///
    /// Nodes are released in post-order with an explicit stack, so teardown
    /// never recurses regardless of tree height.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = Vec::new();
        pending.extend(self.root.take());

        let mut released = 0usize;
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            released += 1;
            // `node` drops here with no children attached.
        }

        if released > 0 {
            debug!("released {} nodes", released);
        }
        self.len = 0;
    }

    // ========================================================================
    // Internal: path resolution
    // ========================================================================

    fn node_at(&self, path: &[Side]) -> Option<&Node<T>> {
        let mut node = self.root.as_deref()?;
        for &side in path {
            node = node.child(side)?;
        }
        Some(node)
    }
}

impl<T, C: Comparator<T>> AvlTree<T, C> {
    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert `element`.
    ///
    /// Returns `Ok(None)` when the element was inserted, or the pre-existing
    /// equal element when one is present. A duplicate is never inserted and
    /// the tree is left untouched.
    ///
    /// # Errors
    /// - `Error::Comparison` if the comparator fails during the descent
    /// - `Error::StackOverflow` if the new leaf would sit below level `max_depth`
    /// - `Error::OutOfMemory` if the ancestor path cannot be allocated
    ///
    /// The tree is unchanged on every error path.
    pub fn insert(&mut self, element: T) -> Result<Option<&T>> {
        let path = match self.search(&element)? {
            Search::Found(path) => {
                let node = self.node_at(path.as_slice()).ok_or_else(lost_path)?;
                return Ok(Some(&node.element));
            }
            Search::Vacant(path) => path,
        };

        self.attach(path.as_slice(), element)?;
        Ok(None)
    }

    /// Insert `element`, overwriting an equal element if one is present.
    ///
    /// Returns the element that was replaced, or `Ok(None)` if `element` was
    /// newly inserted. Replacing never changes the tree's shape.
    ///
    /// # Errors
    /// Same as [`insert`](Self::insert).
    pub fn replace(&mut self, element: T) -> Result<Option<T>> {
        match self.search(&element)? {
            Search::Found(path) => {
                let node = node_at_mut(&mut self.root, path.as_slice()).ok_or_else(lost_path)?;
                let old = mem::replace(&mut node.element, element);
                self.stats.replacements += 1;
                Ok(Some(old))
            }
            Search::Vacant(path) => {
                self.attach(path.as_slice(), element)?;
                Ok(None)
            }
        }
    }

    /// Insert every element of `elements` in order, ignoring duplicates.
    ///
    /// Stops at the first error; elements inserted before it stay in the tree.
    pub fn try_extend<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for element in elements {
            self.insert(element)?;
        }
        Ok(())
    }

    // ========================================================================
    // Public API: Delete
    // ========================================================================

    /// Remove the element equal to `element`.
    ///
    /// Returns the removed element, or `Ok(None)` if no equal element is
    /// present (the tree is then unchanged).
    ///
    /// A node with two children keeps its place in the tree: its in-order
    /// successor (leftmost node of the right subtree) is spliced out instead
    /// and the successor's element moves into the target node.
    ///
    /// # Errors
    /// Same as [`insert`](Self::insert); the tree is unchanged on every error
    /// path.
    pub fn delete(&mut self, element: &T) -> Result<Option<T>> {
        let mut path = match self.search(element)? {
            Search::Found(path) => path,
            Search::Vacant(_) => return Ok(None),
        };
        let target_depth = path.len();

        // Two children: extend the path down to the in-order successor.
        let target = self.node_at(path.as_slice()).ok_or_else(lost_path)?;
        if let (Some(_), Some(right)) = (target.left.as_deref(), target.right.as_deref()) {
            path.push(Side::Right)?;
            let mut node = right;
            while let Some(left) = node.left.as_deref() {
                path.push(Side::Left)?;
                node = left;
            }
        }

        let mut spine = Vec::new();
        spine.try_reserve_exact(path.len())?;

        // Nothing below this point can fail.
        let (mut spine, end) = detach(&mut self.root, path.as_slice(), spine);
        let Some(cell) = end else {
            self.root = restore(spine, None);
            return Err(lost_path());
        };

        let (removed, replacement) = if spine.len() > target_depth {
            // `cell` is the successor; it has no left child.
            let (target, _) = &mut spine[target_depth];
            let Node {
                element: successor,
                right,
                ..
            } = *cell;
            (mem::replace(&mut target.element, successor), right)
        } else {
            let Node {
                element,
                left,
                right,
                ..
            } = *cell;
            (element, left.or(right))
        };

        trace!("spliced node at depth {}", spine.len());

        let (root, rotations) = reattach(spine, replacement);
        self.root = root;
        self.len -= 1;
        self.stats.deletes += 1;
        self.stats.rotations += rotations;

        Ok(Some(removed))
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Find the element equal to `element`.
    pub fn get(&self, element: &T) -> Result<Option<&T>> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match locate(&self.order, element, &node.element)? {
                Position::Before => node.left.as_deref(),
                Position::After => node.right.as_deref(),
                Position::Equal => return Ok(Some(&node.element)),
            };
        }
        Ok(None)
    }

    /// Whether an element equal to `element` is present.
    pub fn contains(&self, element: &T) -> Result<bool> {
        Ok(self.get(element)?.is_some())
    }

    /// Smallest element strictly after `element`.
    pub(crate) fn next_after(&self, element: &T) -> Result<Option<&T>> {
        let mut link = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = link {
            if self.order.less(element, &node.element)? {
                candidate = Some(&node.element);
                link = node.left.as_deref();
            } else {
                link = node.right.as_deref();
            }
        }
        Ok(candidate)
    }

    // ========================================================================
    // Public API: Validation
    // ========================================================================

    /// Check every invariant of the tree.
    ///
    /// - Cached heights match the subtrees
    /// - Every node is balanced (`|bf| <= 1`)
    /// - In-order elements are strictly ascending
    /// - The element count matches `len()`
    ///
    /// # Errors
    /// `Error::InvariantViolation` describing the first problem found, or any
    /// error raised by the comparator or the traversal.
    pub fn validate(&self) -> Result<()> {
        let count = match self.root.as_deref() {
            Some(root) => check_structure(root)?.1,
            None => 0,
        };
        if count != self.len {
            return Err(Error::InvariantViolation(format!(
                "tree holds {} nodes but len() is {}",
                count, self.len
            )));
        }

        let mut previous: Option<&T> = None;
        for item in self.iter() {
            let element = item?;
            if let Some(previous) = previous {
                if !self.order.less(previous, element)? {
                    return Err(Error::InvariantViolation(
                        "in-order elements are not strictly ascending".to_string(),
                    ));
                }
            }
            previous = Some(element);
        }

        Ok(())
    }

    // ========================================================================
    // Internal: Core descent and attach logic
    // ========================================================================

    /// Read-only descent recording the sides taken.
    ///
    /// `max_depth` bounds the number of levels a tree may have, the same unit
    /// the iterator stack counts in. A vacant slot below the last allowed
    /// level is reported as `Error::StackOverflow`, so every tree this
    /// descent lets grow can still be traversed with the same config.
    fn search(&self, element: &T) -> Result<Search> {
        let mut path = PathStack::with_capacity(self.config.max_depth(), self.height())?;
        let mut link = self.root.as_deref();

        while let Some(node) = link {
            let side = match locate(&self.order, element, &node.element)? {
                Position::Before => Side::Left,
                Position::After => Side::Right,
                Position::Equal => return Ok(Search::Found(path)),
            };
            path.push(side)?;
            link = node.child(side);
        }

        // The new leaf would sit one level below the last recorded side.
        let limit = self.config.max_depth();
        if path.len() >= limit {
            warn!("insert would grow the tree past {} levels", limit);
            return Err(Error::StackOverflow { limit });
        }

        Ok(Search::Vacant(path))
    }

    /// Hang a new leaf at the absent slot `path` leads to, then rebalance.
    fn attach(&mut self, path: &[Side], element: T) -> Result<()> {
        let mut spine = Vec::new();
        spine.try_reserve_exact(path.len())?;
        let leaf = Node::leaf(element);

        let (spine, _) = detach(&mut self.root, path, spine);
        trace!("attaching leaf at depth {}", spine.len());

        let (root, rotations) = reattach(spine, Some(leaf));
        self.root = root;
        self.len += 1;
        self.stats.inserts += 1;
        self.stats.rotations += rotations;

        Ok(())
    }
}

// ============================================================================
// Internal: Spine manipulation
// ============================================================================

/// Take ownership of every node along `path`, root first.
///
/// Returns the detached ancestors and whatever the final slot held.
fn detach<T>(root: &mut Link<T>, path: &[Side], mut spine: Spine<T>) -> (Spine<T>, Link<T>) {
    let mut link = root.take();
    for &side in path {
        let Some(mut node) = link.take() else {
            break;
        };
        link = node.link_mut(side).take();
        spine.push((node, side));
    }
    (spine, link)
}

/// Reattach `spine` bottom-up around `subtree`, rebalancing each ancestor
/// until one keeps its height.
///
/// Returns the new root and the number of rotations performed.
fn reattach<T>(mut spine: Spine<T>, mut subtree: Link<T>) -> (Link<T>, u64) {
    let mut rotations = 0;
    let mut propagate = true;

    while let Some((mut parent, side)) = spine.pop() {
        *parent.link_mut(side) = subtree;

        let parent = if propagate {
            let result = rebalance(parent);
            rotations += u64::from(result.rotations);
            propagate = result.propagate;
            result.node
        } else {
            parent
        };
        subtree = Some(parent);
    }

    (subtree, rotations)
}

/// Reattach `spine` without touching heights.
fn restore<T>(mut spine: Spine<T>, mut subtree: Link<T>) -> Link<T> {
    while let Some((mut parent, side)) = spine.pop() {
        *parent.link_mut(side) = subtree;
        subtree = Some(parent);
    }
    subtree
}

fn node_at_mut<'a, T>(root: &'a mut Link<T>, path: &[Side]) -> Option<&'a mut Node<T>> {
    let mut node = root.as_deref_mut()?;
    for &side in path {
        node = node.link_mut(side).as_deref_mut()?;
    }
    Some(node)
}

fn lost_path() -> Error {
    Error::InvariantViolation("recorded path no longer resolves to a node".to_string())
}

/// Verify heights and balance below `node`; returns `(height, node count)`.
fn check_structure<T>(node: &Node<T>) -> Result<(usize, usize)> {
    let (left_height, left_count) = match node.left.as_deref() {
        Some(left) => check_structure(left)?,
        None => (0, 0),
    };
    let (right_height, right_count) = match node.right.as_deref() {
        Some(right) => check_structure(right)?,
        None => (0, 0),
    };

    let expected = 1 + left_height.max(right_height);
    if node.height != expected {
        return Err(Error::InvariantViolation(format!(
            "cached height {} but subtree height is {}",
            node.height, expected
        )));
    }
    if left_height.abs_diff(right_height) > 1 {
        return Err(Error::InvariantViolation(format!(
            "unbalanced node: left height {}, right height {}",
            left_height, right_height
        )));
    }

    Ok((expected, left_count + right_count + 1))
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T, C: Default> Default for AvlTree<T, C> {
    fn default() -> Self {
        Self::with_order(C::default())
    }
}

impl<T, C> Drop for AvlTree<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for item in self.iter() {
            match item {
                Ok(element) => {
                    set.entry(element);
                }
                Err(err) => {
                    set.entry(&format_args!("<{}>", err));
                    break;
                }
            }
        }
        set.finish()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = Result<&'a T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::order::{LessFn, PartialOrder};

    fn collect(tree: &AvlTree<i32>) -> Vec<i32> {
        tree.to_vec().unwrap()
    }

    #[test]
    fn test_empty_tree() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.iter().next().is_none());
        assert_eq!(tree.first(), None);
        assert!(tree.to_snapshot().is_empty());
        tree.validate().unwrap();
    }

    #[test]
    fn test_insert_single() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert(10).unwrap(), None);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.to_snapshot(), Snapshot::leaf(10));
    }

    #[test]
    fn test_insert_duplicate_returns_existing() {
        let mut tree = AvlTree::from_elements([5, 3, 8]).unwrap();
        let before = tree.to_snapshot();

        assert_eq!(tree.insert(3).unwrap(), Some(&3));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.to_snapshot(), before);
        assert_eq!(tree.stats().inserts, 3);
    }

    #[test]
    fn test_insert_ascending_rotates() {
        let tree = AvlTree::from_elements(1..=3).unwrap();
        assert_eq!(
            tree.to_snapshot(),
            Snapshot::node(Snapshot::leaf(1), 2, 2, Snapshot::leaf(3))
        );
        assert_eq!(tree.stats().rotations, 1);
    }

    #[test]
    fn test_insert_double_rotation() {
        let tree = AvlTree::from_elements([1, 3, 2]).unwrap();
        assert_eq!(
            tree.to_snapshot(),
            Snapshot::node(Snapshot::leaf(1), 2, 2, Snapshot::leaf(3))
        );
        assert_eq!(tree.stats().rotations, 2);
    }

    #[test]
    fn test_replace() {
        // Order by the first tuple field only.
        let by_key = LessFn(|a: &(u32, char), b: &(u32, char)| -> Result<bool> { Ok(a.0 < b.0) });
        let mut tree = AvlTree::with_order(by_key);
        tree.insert((1, 'a')).unwrap();
        tree.insert((2, 'b')).unwrap();

        assert_eq!(tree.insert((1, 'x')).unwrap(), Some(&(1, 'a')));
        assert_eq!(tree.replace((1, 'x')).unwrap(), Some((1, 'a')));
        assert_eq!(tree.get(&(1, '?')).unwrap(), Some(&(1, 'x')));
        assert_eq!(tree.replace((3, 'c')).unwrap(), None);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.stats().replacements, 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_leaf() {
        let mut tree = AvlTree::from_elements([2, 1, 3]).unwrap();
        assert_eq!(tree.delete(&1).unwrap(), Some(1));
        assert_eq!(collect(&tree), vec![2, 3]);
        assert_eq!(tree.height(), 2);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_one_child_updates_ancestors() {
        //        4
        //      /   \
        //     2     6
        //    /     / \
        //   1     5   7
        let mut tree = AvlTree::from_elements([4, 2, 6, 1, 5, 7]).unwrap();
        assert_eq!(tree.height(), 3);

        assert_eq!(tree.delete(&2).unwrap(), Some(2));
        assert_eq!(collect(&tree), vec![1, 4, 5, 6, 7]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_two_children_promotes_successor() {
        let mut tree = AvlTree::from_elements([4, 2, 6, 1, 3, 5, 7]).unwrap();

        assert_eq!(tree.delete(&4).unwrap(), Some(4));
        assert_eq!(tree.to_snapshot().element(), Some(&5));
        assert_eq!(collect(&tree), vec![1, 2, 3, 5, 6, 7]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_rebalances() {
        let mut tree = AvlTree::from_elements([2, 1, 3, 4]).unwrap();
        tree.reset_stats();

        // Removing 1 leaves 2 right-heavy by two levels.
        assert_eq!(tree.delete(&1).unwrap(), Some(1));
        assert_eq!(tree.stats().rotations, 1);
        assert_eq!(
            tree.to_snapshot(),
            Snapshot::node(Snapshot::leaf(2), 3, 2, Snapshot::leaf(4))
        );
    }

    #[test]
    fn test_delete_absent() {
        let mut tree = AvlTree::from_elements([1, 2, 3]).unwrap();
        let before = tree.to_snapshot();

        assert_eq!(tree.delete(&42).unwrap(), None);
        assert_eq!(tree.to_snapshot(), before);
        assert_eq!(tree.stats().deletes, 0);
    }

    #[test]
    fn test_delete_root_until_empty() {
        let mut tree = AvlTree::from_elements([1]).unwrap();
        assert_eq!(tree.delete(&1).unwrap(), Some(1));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.delete(&1).unwrap(), None);
    }

    #[test]
    fn test_get_and_contains() {
        let tree = AvlTree::from_elements([10, 20, 30]).unwrap();
        assert_eq!(tree.get(&20).unwrap(), Some(&20));
        assert_eq!(tree.get(&25).unwrap(), None);
        assert!(tree.contains(&30).unwrap());
        assert!(!tree.contains(&5).unwrap());
    }

    #[test]
    fn test_first_last_next_after() {
        let tree = AvlTree::from_elements([5, 1, 9, 3]).unwrap();
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&9));
        assert_eq!(tree.next_after(&3).unwrap(), Some(&5));
        assert_eq!(tree.next_after(&4).unwrap(), Some(&5));
        assert_eq!(tree.next_after(&9).unwrap(), None);
    }

    #[test]
    fn test_comparison_failure_leaves_tree_unchanged() {
        let mut tree = AvlTree::with_order(PartialOrder);
        tree.try_extend([1.0, 2.0, 3.0]).unwrap();
        let before = tree.to_snapshot();

        assert!(matches!(tree.insert(f64::NAN), Err(Error::Comparison(_))));
        assert!(matches!(tree.delete(&f64::NAN), Err(Error::Comparison(_))));
        assert_eq!(tree.to_snapshot(), before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_insert_rejected_below_depth_limit() {
        let config = TreeConfig::new().with_max_depth(2);
        let mut tree = AvlTree::with_config(config);
        tree.try_extend(1..=3).unwrap(); // height 2
        let before = tree.to_snapshot();

        // 4 would hang on a third level: 2 -> 3 -> slot.
        assert_eq!(tree.insert(4), Err(Error::StackOverflow { limit: 2 }));
        assert_eq!(tree.replace(4), Err(Error::StackOverflow { limit: 2 }));
        assert_eq!(tree.to_snapshot(), before);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.stats().inserts, 3);

        // Existing elements on the last level are still reachable.
        assert_eq!(tree.insert(3).unwrap(), Some(&3));
        assert_eq!(tree.delete(&3).unwrap(), Some(3));
        assert_eq!(collect(&tree), vec![1, 2]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_depth_limit_matches_iterator() {
        let mut tree = AvlTree::with_config(TreeConfig::new().with_max_depth(4));
        let mut accepted = Vec::new();
        for i in 0..100 {
            match tree.insert((i * 37) % 101) {
                Ok(_) => accepted.push((i * 37) % 101),
                Err(Error::StackOverflow { limit: 4 }) => {}
                Err(other) => panic!("Expected StackOverflow, got {:?}", other),
            }
        }
        accepted.sort_unstable();

        // Every tree the limit admits can be walked under the same limit.
        assert!(tree.height() <= 4);
        assert!(accepted.len() >= 7);
        assert_eq!(collect(&tree), accepted);
        tree.validate().unwrap();
    }

    #[test]
    fn test_clear() {
        let mut tree = AvlTree::from_elements(0..100).unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);

        // Still usable afterwards.
        tree.insert(1).unwrap();
        assert_eq!(collect(&tree), vec![1]);
    }

    #[test]
    fn test_validate_detects_bad_height() {
        let mut tree = AvlTree::from_elements([1, 2, 3]).unwrap();
        if let Some(root) = tree.root.as_mut() {
            root.height = 7;
        }
        assert!(matches!(tree.validate(), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_validate_detects_bad_order() {
        let mut tree = AvlTree::from_elements([1, 2, 3]).unwrap();
        if let Some(root) = tree.root.as_mut() {
            root.element = 10;
        }
        assert!(matches!(tree.validate(), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_into_iterator() {
        let tree = AvlTree::from_elements([2, 1]).unwrap();
        let mut seen = Vec::new();
        for item in &tree {
            seen.push(*item.unwrap());
        }
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_debug() {
        let tree = AvlTree::from_elements([2, 1]).unwrap();
        assert_eq!(format!("{:?}", tree), "{1, 2}");
    }

    #[test]
    fn test_debug_shows_traversal_error() {
        let mut tree = AvlTree::from_elements(1..=7).unwrap(); // height 3
        tree.config = TreeConfig::new().with_max_depth(2);

        assert_eq!(
            format!("{:?}", tree),
            "{<stack exceeded maximum depth of 2>}"
        );
    }
}
