//! Ordering capability for tree elements.
//!
//! The tree never calls `Ord` directly. Every comparison goes through a
//! [`Comparator`], which answers a single question, "is `a` strictly before
//! `b`?", and may fail. Equality is derived: two elements are equal when
//! neither is less than the other.
//!
//! Provided comparators:
//! - [`NaturalOrder`] - `T: Ord`, never fails (the default)
//! - [`PartialOrder`] - `T: PartialOrd`, fails on incomparable values (NaN)
//! - [`LessFn`] - wraps a closure returning `Result<bool>`

use std::fmt;

use crate::common::{Error, Result};

/// A strict "less-than" relation over `T`.
///
/// Implementations must describe a strict total order over the values that
/// are actually stored; otherwise tree ordering is unspecified.
pub trait Comparator<T> {
    /// Return `Ok(true)` if `a` orders strictly before `b`.
    fn less(&self, a: &T, b: &T) -> Result<bool>;
}

/// Orders elements by their `Ord` implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> Result<bool> {
        Ok(a < b)
    }
}

/// Orders elements by `PartialOrd`, failing when two values are incomparable.
///
/// # Example
/// ```
/// use avltree::{AvlTree, Error, PartialOrder};
///
/// let mut tree = AvlTree::with_order(PartialOrder);
/// tree.insert(1.5_f64).unwrap();
///
/// let err = tree.insert(f64::NAN).unwrap_err();
/// assert!(matches!(err, Error::Comparison(_)));
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialOrder;

impl<T: PartialOrd + fmt::Debug> Comparator<T> for PartialOrder {
    fn less(&self, a: &T, b: &T) -> Result<bool> {
        match a.partial_cmp(b) {
            Some(ordering) => Ok(ordering.is_lt()),
            None => Err(Error::comparison(format!(
                "{:?} and {:?} are not comparable",
                a, b
            ))),
        }
    }
}

/// Adapts a closure into a [`Comparator`].
///
/// # Example
/// ```
/// use avltree::{AvlTree, LessFn, Result};
///
/// // Descending order
/// let mut tree = AvlTree::with_order(LessFn(|a: &u32, b: &u32| -> Result<bool> { Ok(a > b) }));
/// tree.try_extend([1, 3, 2]).unwrap();
/// assert_eq!(tree.to_vec().unwrap(), vec![3, 2, 1]);
/// ```
#[derive(Clone, Copy)]
pub struct LessFn<F>(pub F);

impl<T, F> Comparator<T> for LessFn<F>
where
    F: Fn(&T, &T) -> Result<bool>,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> Result<bool> {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for LessFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LessFn(..)")
    }
}

/// Where an element falls relative to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Before,
    Equal,
    After,
}

/// Two-sided test: `element < node`, then `node < element`.
///
/// The second comparison only runs when the first one is false.
pub(crate) fn locate<T, C: Comparator<T>>(order: &C, element: &T, node: &T) -> Result<Position> {
    if order.less(element, node)? {
        return Ok(Position::Before);
    }
    if order.less(node, element)? {
        return Ok(Position::After);
    }
    Ok(Position::Equal)
}
