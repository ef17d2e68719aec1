//! Eager, reusable list containers.
//!
//! [`List<T>`] wraps an owned, insertion-ordered `Vec<T>` and supports
//! `append`; [`FrozenList<T>`] wraps an immutable shared slice constructed
//! once and never mutated. Both are freely traversable any number of times:
//! every [`traverse`](crate::Traversable::traverse) call yields an
//! independent cursor over a snapshot of the backing store, so traversal is
//! idempotent.
//!
//! ## Example
//! ```
//! use scalaseq::{List, Traversable};
//!
//! let mut xs = List::new();
//! xs.append(3);
//! xs.append(1);
//! xs.append(2);
//!
//! // Lists can be traversed repeatedly.
//! assert_eq!(xs.sum()?, 6);
//! assert_eq!(xs.sort()?, List::from(vec![1, 2, 3]));
//! # scalaseq::Result::<()>::Ok(())
//! ```

use crate::error::Result;
use crate::projection::IndexAccess;
use crate::seq::Seq;
use crate::traverse::{Cursor, Traversable};
use std::fmt;
use std::rc::Rc;

/// A mutable, insertion-ordered, reusable list.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> List<T> {
    /// An empty list.
    pub fn new() -> Self {
        List { items: Vec::new() }
    }

    /// Append an element, preserving insertion order. Amortized O(1).
    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The element at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    /// Borrowing iterator over the backing store.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consume the wrapper, yielding the backing vector.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone + 'static> Traversable for List<T> {
    type Item = T;

    /// Never transitions any state; each call yields an independent cursor.
    fn traverse(&self) -> Result<Cursor<T>> {
        Ok(Box::new(self.items.clone().into_iter().map(Ok)))
    }

    /// Always succeeds; the reversed view is itself single-pass.
    fn reverse(&self) -> Result<Seq<T>> {
        Ok(Seq::from_cursor(Box::new(
            self.items.clone().into_iter().rev().map(Ok),
        )))
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        List { items }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        List {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List({:?})", self.items)
    }
}

impl<T: Clone> IndexAccess for List<T> {
    type Elem = T;

    fn index(&self, idx: i64) -> Option<T> {
        crate::projection::normalize(idx, self.items.len()).map(|i| self.items[i].clone())
    }
}

/// An immutable, insertion-ordered, reusable list.
///
/// Constructed once from any finite iterable; cloning shares the backing
/// slice.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrozenList<T> {
    items: Rc<[T]>,
}

impl<T> FrozenList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The element at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    /// Borrowing iterator over the backing store.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// View of the backing slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone + 'static> Traversable for FrozenList<T> {
    type Item = T;

    /// Never transitions any state; each call yields an independent cursor.
    fn traverse(&self) -> Result<Cursor<T>> {
        let items = Rc::clone(&self.items);
        Ok(Box::new(
            (0..items.len()).map(move |i| Ok(items[i].clone())),
        ))
    }

    /// Always succeeds; the reversed view is itself single-pass.
    fn reverse(&self) -> Result<Seq<T>> {
        let items = Rc::clone(&self.items);
        Ok(Seq::from_cursor(Box::new(
            (0..items.len()).rev().map(move |i| Ok(items[i].clone())),
        )))
    }
}

impl<T> From<Vec<T>> for FrozenList<T> {
    fn from(items: Vec<T>) -> Self {
        FrozenList {
            items: items.into(),
        }
    }
}

impl<T> FromIterator<T> for FrozenList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FrozenList {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a FrozenList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for FrozenList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrozenList({:?})", &self.items[..])
    }
}

impl<T: Clone> IndexAccess for FrozenList<T> {
    type Elem = T;

    fn index(&self, idx: i64) -> Option<T> {
        crate::projection::normalize(idx, self.items.len()).map(|i| self.items[i].clone())
    }
}
