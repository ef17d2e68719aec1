//! Projections: the "function-like" argument accepted by every combinator.
//!
//! A projection is one of three shapes:
//! - a plain closure `Fn(&T) -> O`, passed directly;
//! - a **field selector** built with [`field`], for element types that expose
//!   named fields ([`FieldAccess`]);
//! - an **index selector** built with [`index`], for element types that expose
//!   positional access ([`IndexAccess`]). Negative indices count from the
//!   back.
//!
//! Shapes are resolved once, at the call boundary, into a single applied
//! form; combinators never branch on the shape again. A selector that misses
//! on a concrete element (unknown field, out-of-range index, wrong value
//! kind) produces [`Error::UnsupportedProjection`], which flows through the
//! traversal and surfaces at the terminal operation.
//!
//! ## Example
//! ```
//! use scalaseq::{field, index, Seq, Traversable};
//! use serde_json::json;
//!
//! let rows = Seq::from_vec(vec![
//!     json!({"name": "alice", "score": 9}),
//!     json!({"name": "bob", "score": 7}),
//! ]);
//! let names = rows.map(field("name")).to_list()?;
//! assert_eq!(names.len(), 2);
//!
//! let pairs = Seq::from_vec(vec![vec![1, 2, 3], vec![4, 5, 6]]);
//! let lasts = pairs.map(index(-1)).to_list()?;
//! assert_eq!(lasts, scalaseq::List::from(vec![3, 6]));
//! # scalaseq::Result::<()>::Ok(())
//! ```

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::rc::Rc;

/// Element types that expose named fields to [`field`] selectors.
pub trait FieldAccess {
    /// The value a field selector reads out of an element.
    type Value;

    /// Read the named field, or `None` if this element has no such field.
    fn field(&self, name: &str) -> Option<Self::Value>;
}

/// Element types that expose positional access to [`index`] selectors.
pub trait IndexAccess {
    /// The value an index selector reads out of an element.
    type Elem;

    /// Read the element at `idx`; negative indices count from the back.
    /// `None` if the position does not exist.
    fn index(&self, idx: i64) -> Option<Self::Elem>;
}

/// A resolved unary selector: the tagged "callable | field | index" value
/// collapsed into one applied form.
pub struct Projection<T, O> {
    run: Rc<dyn Fn(&T) -> Result<O>>,
}

impl<T, O> Clone for Projection<T, O> {
    fn clone(&self) -> Self {
        Projection {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T: 'static, O: 'static> Projection<T, O> {
    /// Wrap a plain function.
    pub fn func(f: impl Fn(&T) -> O + 'static) -> Self {
        Projection {
            run: Rc::new(move |t| Ok(f(t))),
        }
    }

    /// A selector reading the named field of each element.
    pub fn field(name: impl Into<String>) -> Self
    where
        T: FieldAccess<Value = O>,
    {
        let name = name.into();
        Projection {
            run: Rc::new(move |t| {
                t.field(&name)
                    .ok_or_else(|| Error::missing_field::<T>(&name))
            }),
        }
    }

    /// A selector reading the element at `idx` of each element.
    pub fn index(idx: i64) -> Self
    where
        T: IndexAccess<Elem = O>,
    {
        Projection {
            run: Rc::new(move |t| t.index(idx).ok_or_else(|| Error::missing_index::<T>(idx))),
        }
    }

    /// Apply the projection to one element.
    pub fn apply(&self, value: &T) -> Result<O> {
        (self.run)(value)
    }
}

/// A selector reading the named field of each element.
///
/// Shorthand for [`Projection::field`].
pub fn field<T>(name: impl Into<String>) -> Projection<T, T::Value>
where
    T: FieldAccess + 'static,
    T::Value: 'static,
{
    Projection::field(name)
}

/// A selector reading the element at `idx` of each element.
///
/// Shorthand for [`Projection::index`]. Negative indices count from the back.
pub fn index<T>(idx: i64) -> Projection<T, T::Elem>
where
    T: IndexAccess + 'static,
    T::Elem: 'static,
{
    Projection::index(idx)
}

/// Conversion into a [`Projection`], implemented for closures and for
/// projections themselves so combinators accept both.
///
/// The `M` parameter is an inference marker distinguishing the two impls; it
/// never needs to be named at call sites.
pub trait IntoProjection<T, O, M> {
    fn into_projection(self) -> Projection<T, O>;
}

/// Marker for the closure impl of [`IntoProjection`].
pub enum FnShape {}

/// Marker for the identity impl of [`IntoProjection`].
pub enum ProjectionShape {}

impl<T: 'static, O: 'static, F> IntoProjection<T, O, FnShape> for F
where
    F: Fn(&T) -> O + 'static,
{
    fn into_projection(self) -> Projection<T, O> {
        Projection::func(self)
    }
}

impl<T, O> IntoProjection<T, O, ProjectionShape> for Projection<T, O> {
    fn into_projection(self) -> Projection<T, O> {
        self
    }
}

pub(crate) fn normalize(idx: i64, len: usize) -> Option<usize> {
    if idx < 0 {
        let back = idx.unsigned_abs() as usize;
        if back > len { None } else { Some(len - back) }
    } else {
        let i = idx as usize;
        (i < len).then_some(i)
    }
}

impl<T: Clone> IndexAccess for Vec<T> {
    type Elem = T;

    fn index(&self, idx: i64) -> Option<T> {
        normalize(idx, self.len()).map(|i| self[i].clone())
    }
}

impl<V: Clone> FieldAccess for HashMap<String, V> {
    type Value = V;

    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}

impl FieldAccess for serde_json::Value {
    type Value = serde_json::Value;

    fn field(&self, name: &str) -> Option<serde_json::Value> {
        self.get(name).cloned()
    }
}

impl IndexAccess for serde_json::Value {
    type Elem = serde_json::Value;

    fn index(&self, idx: i64) -> Option<serde_json::Value> {
        let arr = self.as_array()?;
        normalize(idx, arr.len()).map(|i| arr[i].clone())
    }
}
