//! Configuration for AVL trees.

/// Default ceiling for the ancestor-path and iterator stacks.
///
/// An AVL tree of height `h` holds at least `F(h + 2) - 1` elements, where
/// `F` is the Fibonacci sequence. Height 64 therefore needs roughly 2.7e13
/// nodes, far more than fits in memory:
/// - A correct tree never reaches this depth
/// - A tree that does has a broken balance invariant
///
/// Reaching the ceiling is reported as [`Error::StackOverflow`](crate::Error::StackOverflow).
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables for an [`AvlTree`](crate::AvlTree).
///
/// # Example
/// ```
/// use avltree::TreeConfig;
///
/// let config = TreeConfig::new().with_max_depth(32);
/// assert_eq!(config.max_depth(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum number of levels a descent or traversal may hold on its stack.
    max_depth: usize,
}

impl TreeConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the stack ceiling.
    ///
    /// # Panics
    /// Panics if `max_depth` is 0.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        assert!(max_depth > 0, "max_depth must be > 0");
        self.max_depth = max_depth;
        self
    }

    /// Stack ceiling for descents and traversals.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}
