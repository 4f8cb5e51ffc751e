//! Error types for avltree.

use std::collections::TryReserveError;

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by tree operations.
///
/// Every variant is recoverable. Errors raised during a descent are reported
/// before any node is moved, so the tree is left exactly as it was.
///
/// Deleting an element that is not present is *not* an error; it returns
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The comparator could not order two elements.
    ///
    /// Raised by [`PartialOrder`](crate::PartialOrder) for values such as NaN,
    /// or by any custom comparator.
    #[error("comparison failed: {0}")]
    Comparison(String),

    /// A path or traversal stack could not grow.
    #[error("allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// A descent or traversal went deeper than the configured ceiling.
    ///
    /// This indicates a broken balance invariant: a valid tree never gets
    /// this tall.
    #[error("stack exceeded maximum depth of {limit}")]
    StackOverflow { limit: usize },

    /// A shared iterator observed a mutation of its tree.
    #[error("tree was modified during iteration")]
    ConcurrentModification,

    /// [`AvlTree::validate`](crate::AvlTree::validate) found a broken invariant.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Build a comparison error from any displayable reason.
    pub fn comparison(reason: impl std::fmt::Display) -> Self {
        Error::Comparison(reason.to_string())
    }
}
