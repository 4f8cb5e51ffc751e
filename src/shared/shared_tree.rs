//! SharedTree - a cloneable handle around one AvlTree.

use std::fmt;
use std::sync::Arc;

use log::warn;
use parking_lot::RwLock;

use crate::common::{Error, Result};
use crate::tree::{AvlTree, Comparator, NaturalOrder, Snapshot};

/// The tree plus a counter bumped on every structural change.
struct Shared<T, C> {
    tree: AvlTree<T, C>,
    generation: u64,
}

/// A reference-counted handle to an [`AvlTree`].
///
/// Cloning the handle is cheap and every clone sees the same tree. The tree
/// lives until the last handle (including handles held by iterators) drops.
///
/// # Thread Safety
/// - `inner`: `Arc<RwLock<..>>` makes each operation atomic
/// - The lock is held only for the duration of one call, never across an
///   iteration
///
/// Elements cross the lock boundary by value, so most methods need `T: Clone`.
///
/// # Example
/// ```
/// use avltree::SharedTree;
///
/// let tree = SharedTree::from_elements([3, 1, 2]).unwrap();
/// let iter = tree.iter();
/// drop(tree); // the iterator keeps the tree alive
///
/// let items: Vec<i32> = iter.collect::<avltree::Result<_>>().unwrap();
/// assert_eq!(items, vec![1, 2, 3]);
/// ```
pub struct SharedTree<T, C = NaturalOrder> {
    inner: Arc<RwLock<Shared<T, C>>>,
}

impl<T> SharedTree<T> {
    /// Create an empty shared tree ordered by `T: Ord`.
    pub fn new() -> Self {
        Self::from_tree(AvlTree::new())
    }

    /// Build a shared tree from a sequence, ignoring duplicates.
    pub fn from_elements<I>(elements: I) -> Result<Self>
    where
        T: Ord,
        I: IntoIterator<Item = T>,
    {
        Ok(Self::from_tree(AvlTree::from_elements(elements)?))
    }
}

impl<T, C> SharedTree<T, C> {
    /// Wrap an existing tree.
    pub fn from_tree(tree: AvlTree<T, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Shared {
                tree,
                generation: 0,
            })),
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn height(&self) -> usize {
        self.inner.read().tree.height()
    }

    pub fn len(&self) -> usize {
        self.inner.read().tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().tree.is_empty()
    }

    /// Number of structural changes made through this handle or its clones.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Number of live handles, iterators included.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub fn to_snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        self.inner.read().tree.to_snapshot()
    }

    pub fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.inner.read().tree.to_vec()
    }

    // ========================================================================
    // Direct access
    // ========================================================================

    /// Run `f` with shared access to the tree.
    pub fn read<R>(&self, f: impl FnOnce(&AvlTree<T, C>) -> R) -> R {
        f(&self.inner.read().tree)
    }

    /// Run `f` with exclusive access to the tree.
    ///
    /// Counts as a structural change: outstanding iterators will report
    /// `Error::ConcurrentModification`.
    pub fn write<R>(&self, f: impl FnOnce(&mut AvlTree<T, C>) -> R) -> R {
        let mut shared = self.inner.write();
        shared.generation += 1;
        f(&mut shared.tree)
    }

    /// Remove every element.
    pub fn clear(&self) {
        self.write(|tree| tree.clear());
    }

    /// Iterate over a consistent view of the tree in ascending order.
    ///
    /// The iterator holds its own handle. Mutating the tree through any
    /// handle before the iterator is exhausted makes its next call yield
    /// `Err(Error::ConcurrentModification)`.
    pub fn iter(&self) -> SharedIter<T, C> {
        SharedIter {
            generation: self.generation(),
            tree: self.clone(),
            last: None,
            done: false,
        }
    }
}

impl<T: Clone, C: Comparator<T>> SharedTree<T, C> {
    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert `element`; returns a clone of the existing equal element, if any.
    pub fn insert(&self, element: T) -> Result<Option<T>> {
        let mut shared = self.inner.write();
        let existing = shared.tree.insert(element)?.cloned();
        if existing.is_none() {
            shared.generation += 1;
        }
        Ok(existing)
    }

    /// Insert `element`, overwriting and returning an equal element if present.
    pub fn replace(&self, element: T) -> Result<Option<T>> {
        let mut shared = self.inner.write();
        let replaced = shared.tree.replace(element)?;
        shared.generation += 1;
        Ok(replaced)
    }

    /// Remove and return the element equal to `element`.
    pub fn delete(&self, element: &T) -> Result<Option<T>> {
        let mut shared = self.inner.write();
        let removed = shared.tree.delete(element)?;
        if removed.is_some() {
            shared.generation += 1;
        }
        Ok(removed)
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    pub fn get(&self, element: &T) -> Result<Option<T>> {
        Ok(self.inner.read().tree.get(element)?.cloned())
    }

    pub fn contains(&self, element: &T) -> Result<bool> {
        self.inner.read().tree.contains(element)
    }
}

impl<T, C> Clone for SharedTree<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, C: Default> Default for SharedTree<T, C> {
    fn default() -> Self {
        Self::from_tree(AvlTree::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SharedTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedTree")
            .field("tree", &self.inner.read().tree)
            .finish()
    }
}

/// Ascending iterator that owns a handle to its tree.
///
/// Each call to `next` takes the read lock, checks that the tree has not
/// changed since the iterator was created, and yields a clone of the
/// smallest element after the previous one. After an error or the last
/// element it returns `None` forever.
pub struct SharedIter<T, C = NaturalOrder> {
    tree: SharedTree<T, C>,
    /// Generation observed at creation.
    generation: u64,
    /// Last element yielded.
    last: Option<T>,
    done: bool,
}

impl<T: Clone, C: Comparator<T>> Iterator for SharedIter<T, C> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let shared = self.tree.inner.read();
        if shared.generation != self.generation {
            warn!(
                "tree changed during iteration (generation {} -> {})",
                self.generation, shared.generation
            );
            self.done = true;
            return Some(Err(Error::ConcurrentModification));
        }

        let next = match &self.last {
            None => Ok(shared.tree.first()),
            Some(last) => shared.tree.next_after(last),
        };

        match next {
            Ok(Some(element)) => {
                self.last = Some(element.clone());
                Some(Ok(element.clone()))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<T: Clone, C: Comparator<T>> std::iter::FusedIterator for SharedIter<T, C> {}
