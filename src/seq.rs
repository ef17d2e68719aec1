//! One-shot lazy sequences.
//!
//! [`Seq<T>`] wraps an arbitrary element source and assumes it is single
//! pass: requesting a traversal commits the sequence, and any later attempt
//! fails with [`Error::AlreadyConsumed`]. Use [`List`](crate::List) or
//! [`FrozenList`](crate::FrozenList) for realized sequences that can be
//! traversed any number of times.
//!
//! Three kinds of source back a `Seq`:
//! - a plain forward cursor ([`Seq::new`]) - anything iterable, possibly
//!   unbounded;
//! - a deferred thunk ([`Seq::lazy`]) - how combinators chain without doing
//!   any work up front;
//! - a materialized shared vector ([`Seq::from_vec`]) - the only kind that
//!   supports [`reverse`](crate::Traversable::reverse), because an indexed
//!   source can hand out independent forward and backward views.
//!
//! ## Example
//! ```
//! use scalaseq::{Seq, Traversable};
//!
//! let seq = Seq::new(1..=4);
//! let doubled = seq.map(|x: &i32| x * 2).filter(|x: &i32| *x > 4);
//! assert_eq!(doubled.to_list()?, scalaseq::List::from(vec![6, 8]));
//! # scalaseq::Result::<()>::Ok(())
//! ```

use crate::error::{Error, Result};
use crate::traverse::{Cursor, Traversable};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

enum Source<T> {
    /// One-shot forward cursor.
    Stream(Cursor<T>),
    /// Deferred combinator chain; traversal forces the upstream.
    Lazy(Box<dyn FnOnce() -> Result<Cursor<T>>>),
    /// Materialized source shared between independent views.
    Shared(SharedSource<T>),
}

struct SharedSource<T> {
    forward: Rc<dyn Fn() -> Cursor<T>>,
    backward: Rc<dyn Fn() -> Cursor<T>>,
}

/// A lazy, single-pass sequence of elements.
///
/// `Seq` is a shared handle: cloning it aliases the same underlying source,
/// and whichever alias traverses first wins. Traversal moves the source out
/// of the handle, so upstream resources can be reclaimed as soon as the
/// returned cursor is dropped.
pub struct Seq<T> {
    source: Rc<RefCell<Option<Source<T>>>>,
}

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Seq {
            source: Rc::clone(&self.source),
        }
    }
}

impl<T: 'static> Seq<T> {
    /// Wrap any iterable source in a forward-only lazy sequence.
    ///
    /// The source may be unbounded; pair with
    /// [`take`](crate::Traversable::take) for bounded consumption.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_source(Source::Stream(Box::new(source.into_iter().map(Ok))))
    }

    /// Build a reversible sequence from a materialized vector.
    ///
    /// The vector is shared, so [`reverse`](crate::Traversable::reverse) can
    /// produce an independent backward view without consuming this one.
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: Clone,
    {
        let items = Rc::new(items);
        let fwd = Rc::clone(&items);
        let forward: Rc<dyn Fn() -> Cursor<T>> = Rc::new(move || {
            let items = Rc::clone(&fwd);
            Box::new((0..items.len()).map(move |i| Ok(items[i].clone())))
        });
        let backward: Rc<dyn Fn() -> Cursor<T>> = Rc::new(move || {
            let items = Rc::clone(&items);
            Box::new((0..items.len()).rev().map(move |i| Ok(items[i].clone())))
        });
        Self::from_source(Source::Shared(SharedSource { forward, backward }))
    }

    /// Defer a traversal: the thunk runs when the sequence is first
    /// traversed. This is how combinators compose without doing any work at
    /// construction time.
    pub fn lazy(thunk: impl FnOnce() -> Result<Cursor<T>> + 'static) -> Self {
        Self::from_source(Source::Lazy(Box::new(thunk)))
    }

    pub(crate) fn from_cursor(cursor: Cursor<T>) -> Self {
        Self::from_source(Source::Stream(cursor))
    }

    fn from_source(source: Source<T>) -> Self {
        Seq {
            source: Rc::new(RefCell::new(Some(source))),
        }
    }

    /// Whether the single permitted traversal has already been requested.
    pub fn is_consumed(&self) -> bool {
        self.source.borrow().is_none()
    }
}

impl<T: 'static> Traversable for Seq<T> {
    type Item = T;

    /// Request the single permitted traversal.
    ///
    /// Requesting is committing: the sequence transitions to consumed the
    /// moment this returns, even if the cursor is never advanced.
    fn traverse(&self) -> Result<Cursor<T>> {
        let source = self
            .source
            .borrow_mut()
            .take()
            .ok_or(Error::AlreadyConsumed)?;
        match source {
            Source::Stream(cursor) => Ok(cursor),
            Source::Lazy(thunk) => thunk(),
            Source::Shared(shared) => Ok((shared.forward)()),
        }
    }

    /// Produce an independent reversed view without consuming this sequence.
    ///
    /// Only materialized sources ([`Seq::from_vec`], list views) are
    /// reversible; forward-only and deferred sources fail with
    /// [`Error::NotReversible`].
    fn reverse(&self) -> Result<Seq<T>> {
        match self.source.borrow().as_ref() {
            None => Err(Error::AlreadyConsumed),
            Some(Source::Shared(shared)) => Ok(Seq::from_cursor((shared.backward)())),
            Some(_) => Err(Error::NotReversible),
        }
    }
}

/// Iterating a `Seq` requests its single traversal; a consumed sequence
/// yields one `Err(AlreadyConsumed)` item.
impl<T: 'static> IntoIterator for Seq<T> {
    type Item = Result<T>;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        match self.traverse() {
            Ok(cursor) => cursor,
            Err(e) => Box::new(std::iter::once(Err(e))),
        }
    }
}

impl<T> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.borrow().is_some() {
            write!(f, "Seq(<fresh>)")
        } else {
            write!(f, "Seq(<consumed>)")
        }
    }
}
