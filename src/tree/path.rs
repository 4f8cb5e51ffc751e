//! Bounded, growable stack for descents and traversals.
//!
//! Both the ancestor path recorded by insert/delete and the iterator's
//! traversal stack live in a [`PathStack`]. Storage grows on demand through
//! `try_reserve`, so allocation failure is reported instead of aborting, and
//! the number of entries is capped by the tree's configured `max_depth`.

use log::warn;

use crate::common::{Error, Result};

/// A stack with a hard ceiling on its length.
#[derive(Debug)]
pub(crate) struct PathStack<E> {
    entries: Vec<E>,
    limit: usize,
}

impl<E> PathStack<E> {
    /// Create an empty stack that refuses to hold more than `limit` entries.
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Create a stack with room for `hint` entries (clamped to the limit).
    pub(crate) fn with_capacity(limit: usize, hint: usize) -> Result<Self> {
        let mut stack = Self::new(limit);
        stack.entries.try_reserve(hint.min(limit))?;
        Ok(stack)
    }

    /// Push an entry.
    ///
    /// # Errors
    /// - `Error::StackOverflow` if the stack already holds `limit` entries
    /// - `Error::OutOfMemory` if the storage cannot grow
    pub(crate) fn push(&mut self, entry: E) -> Result<()> {
        if self.entries.len() >= self.limit {
            warn!("path stack reached its limit of {} entries", self.limit);
            return Err(Error::StackOverflow { limit: self.limit });
        }
        self.entries.try_reserve(1)?;
        self.entries.push(entry);
        Ok(())
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<E> {
        self.entries.pop()
    }

    #[inline]
    pub(crate) fn last_mut(&mut self) -> Option<&mut E> {
        self.entries.last_mut()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[E] {
        &self.entries
    }
}
