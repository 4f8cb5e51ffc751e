//! Tree operation statistics.

use std::fmt;

/// Counters maintained by an [`AvlTree`](crate::AvlTree).
///
/// The tree is mutated through `&mut self`, so plain integers suffice.
/// Only operations that change the tree are counted; a rejected duplicate
/// or a miss on delete leaves the counters alone.
///
/// # Example
/// ```
/// use avltree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.try_extend([1, 2, 3]).unwrap();
///
/// let stats = tree.stats();
/// assert_eq!(stats.inserts, 3);
/// assert_eq!(stats.rotations, 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// New elements attached.
    pub inserts: u64,

    /// Existing elements overwritten by `replace`.
    pub replacements: u64,

    /// Elements removed.
    pub deletes: u64,

    /// Single rotations performed (a double rotation counts as two).
    pub rotations: u64,
}

impl TreeStats {
    /// Average rotations per structural change (insert or delete).
    pub fn rotations_per_change(&self) -> f64 {
        let changes = self.inserts + self.deletes;
        if changes == 0 {
            0.0
        } else {
            self.rotations as f64 / changes as f64
        }
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, replacements: {}, deletes: {}, rotations: {} }}",
            self.inserts, self.replacements, self.deletes, self.rotations
        )
    }
}
