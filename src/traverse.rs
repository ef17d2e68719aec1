//! The shared traversal capability and the combinator surface built on it.
//!
//! Every container in this crate - [`Seq`], [`List`](crate::List),
//! [`FrozenList`](crate::FrozenList), and the view sequences handed out by
//! [`Dict`](crate::Dict) - implements [`Traversable`]: "produce a single
//! forward traversal of elements". The entire combinator surface is defined
//! once here, as provided methods expressed purely in terms of
//! [`traverse`](Traversable::traverse).
//!
//! Two families of combinators:
//!
//! - **Transformations** ([`map`](Traversable::map),
//!   [`flat_map`](Traversable::flat_map), [`filter`](Traversable::filter),
//!   [`take`](Traversable::take), [`drop`](Traversable::drop),
//!   [`last_n`](Traversable::last_n), [`chain`](Traversable::chain),
//!   [`enumerate`](Traversable::enumerate), [`apply`](Traversable::apply))
//!   return a new lazy [`Seq`] and do no work - nothing is traversed, and
//!   nothing is consumed, until the *resulting* sequence is traversed.
//! - **Materializers** ([`to_list`](Traversable::to_list),
//!   [`group_by`](Traversable::group_by), [`sort_by`](Traversable::sort_by),
//!   [`fold`](Traversable::fold), [`value_counts`](Traversable::value_counts)
//!   and friends) perform exactly one traversal and produce a concrete
//!   container or scalar.
//!
//! Cursors yield `Result<T>`: element-level projection failures flow through
//! the pipeline and surface at the terminal operation, which is also where
//! [`Error::AlreadyConsumed`](crate::Error::AlreadyConsumed) shows up for a
//! sequence traversed twice.

use crate::combiners::Aggregator;
use crate::dict::Dict;
use crate::error::{Error, Result};
use crate::list::{FrozenList, List};
use crate::projection::IntoProjection;
use crate::seq::Seq;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A single forward traversal of elements.
///
/// Element-level failures (projection misses on concrete elements) travel
/// through the cursor as `Err` items.
pub type Cursor<T> = Box<dyn Iterator<Item = Result<T>>>;

/// The capability shared by all traversable containers.
///
/// Implementors provide [`traverse`](Traversable::traverse) and
/// [`reverse`](Traversable::reverse); everything else is defined here in
/// terms of those. Implementors are cheap-to-clone handles: cloning a
/// [`Seq`] aliases its one-shot source, while cloning a list snapshots the
/// backing store.
pub trait Traversable: Clone + 'static {
    /// The element type produced by traversal.
    type Item: 'static;

    /// Produce a forward cursor over the elements.
    ///
    /// For a [`Seq`] this commits the single permitted traversal; for eager
    /// containers every call yields an independent cursor.
    fn traverse(&self) -> Result<Cursor<Self::Item>>;

    /// Produce a single-pass [`Seq`] over the elements in reverse order.
    ///
    /// Always succeeds for eager containers. For a [`Seq`] this requires a
    /// bidirectional (materialized) source and does **not** consume the
    /// original: a reversible source supports independent forward and
    /// backward views, each single-pass on its own.
    fn reverse(&self) -> Result<Seq<Self::Item>>;

    /// Transform each element.
    ///
    /// Accepts a closure, or a [`field`](crate::field)/[`index`](crate::index)
    /// selector for row-like elements.
    ///
    /// # Example
    /// ```
    /// use scalaseq::{Seq, Traversable};
    ///
    /// let out = Seq::new(vec![1, 2, 3, 4])
    ///     .map(|x: &i32| x * 2)
    ///     .filter(|x: &i32| *x > 4)
    ///     .to_list()?;
    /// assert_eq!(out, scalaseq::List::from(vec![6, 8]));
    /// # scalaseq::Result::<()>::Ok(())
    /// ```
    fn map<O, P, M>(&self, projection: P) -> Seq<O>
    where
        O: 'static,
        P: IntoProjection<Self::Item, O, M>,
    {
        let proj = projection.into_projection();
        let src = self.clone();
        Seq::lazy(move || {
            let cursor = src.traverse()?;
            Ok(Box::new(cursor.map(move |row| row.and_then(|x| proj.apply(&x)))) as Cursor<O>)
        })
    }

    /// Transform each element into zero or more outputs and flatten.
    fn flat_map<O, I, P, M>(&self, projection: P) -> Seq<O>
    where
        O: 'static,
        I: IntoIterator<Item = O> + 'static,
        P: IntoProjection<Self::Item, I, M>,
    {
        let proj = projection.into_projection();
        let src = self.clone();
        Seq::lazy(move || {
            let cursor = src.traverse()?;
            Ok(Box::new(cursor.flat_map(move |row| {
                match row.and_then(|x| proj.apply(&x)) {
                    Ok(items) => items.into_iter().map(Ok).collect::<Vec<_>>(),
                    Err(e) => vec![Err(e)],
                }
            })) as Cursor<O>)
        })
    }

    /// Keep only elements for which the predicate projection is true.
    fn filter<P, M>(&self, predicate: P) -> Seq<Self::Item>
    where
        P: IntoProjection<Self::Item, bool, M>,
    {
        let pred = predicate.into_projection();
        let src = self.clone();
        Seq::lazy(move || {
            let cursor = src.traverse()?;
            Ok(Box::new(cursor.filter_map(move |row| match row {
                Ok(x) => match pred.apply(&x) {
                    Ok(true) => Some(Ok(x)),
                    Ok(false) => None,
                    Err(e) => Some(Err(e)),
                },
                Err(e) => Some(Err(e)),
            })) as Cursor<Self::Item>)
        })
    }

    /// Apply a projection to every element for its side effects.
    ///
    /// Performs one traversal.
    fn for_each<O, P, M>(&self, projection: P) -> Result<()>
    where
        O: 'static,
        P: IntoProjection<Self::Item, O, M>,
    {
        let proj = projection.into_projection();
        for row in self.traverse()? {
            proj.apply(&row?)?;
        }
        Ok(())
    }

    /// The first `n` elements.
    fn take(&self, n: usize) -> Seq<Self::Item> {
        let src = self.clone();
        Seq::lazy(move || {
            let cursor = src.traverse()?;
            Ok(Box::new(cursor.take(n)) as Cursor<Self::Item>)
        })
    }

    /// Everything after the first `n` elements.
    ///
    /// Errors among the skipped elements still surface.
    fn drop(&self, n: usize) -> Seq<Self::Item> {
        let src = self.clone();
        Seq::lazy(move || {
            let cursor = src.traverse()?;
            let mut remaining = n;
            Ok(Box::new(cursor.filter_map(move |row| {
                if row.is_err() {
                    return Some(row);
                }
                if remaining > 0 {
                    remaining -= 1;
                    None
                } else {
                    Some(row)
                }
            })) as Cursor<Self::Item>)
        })
    }

    /// The final `n` elements, in order.
    ///
    /// Buffers at most `n` elements; the upstream is drained when the
    /// resulting sequence is traversed.
    fn last_n(&self, n: usize) -> Seq<Self::Item> {
        let src = self.clone();
        Seq::lazy(move || {
            let cursor = src.traverse()?;
            let mut buf: VecDeque<Self::Item> = VecDeque::with_capacity(n.saturating_add(1));
            for row in cursor {
                buf.push_back(row?);
                if buf.len() > n {
                    buf.pop_front();
                }
            }
            Ok(Box::new(buf.into_iter().map(Ok)) as Cursor<Self::Item>)
        })
    }

    /// Concatenate with another traversable of the same element type.
    ///
    /// The second source is not committed until the first is exhausted.
    fn chain<U>(&self, other: &U) -> Seq<Self::Item>
    where
        U: Traversable<Item = Self::Item>,
    {
        let first = self.clone();
        let second = other.clone();
        Seq::lazy(move || {
            let head = first.traverse()?;
            Ok(Box::new(ChainCursor {
                head: Some(head),
                tail: Some(second),
            }) as Cursor<Self::Item>)
        })
    }

    /// Pair each element with its position.
    fn enumerate(&self) -> Seq<(usize, Self::Item)> {
        let src = self.clone();
        Seq::lazy(move || {
            let cursor = src.traverse()?;
            Ok(Box::new(cursor.enumerate().map(|(i, row)| row.map(|x| (i, x))))
                as Cursor<(usize, Self::Item)>)
        })
    }

    /// Apply an arbitrary cursor-to-cursor transformation lazily.
    ///
    /// The escape hatch for transformations the named combinators don't
    /// cover; `f` receives the raw cursor and returns any iterable of
    /// `Result` items.
    fn apply<O, I, F>(&self, f: F) -> Seq<O>
    where
        O: 'static,
        F: FnOnce(Cursor<Self::Item>) -> I + 'static,
        I: IntoIterator<Item = Result<O>>,
        I::IntoIter: 'static,
    {
        let src = self.clone();
        Seq::lazy(move || Ok(Box::new(f(src.traverse()?).into_iter()) as Cursor<O>))
    }

    /// Left fold with an initial accumulator. One traversal.
    fn fold<B, F>(&self, init: B, mut f: F) -> Result<B>
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let mut acc = init;
        for row in self.traverse()? {
            acc = f(acc, row?);
        }
        Ok(acc)
    }

    /// Reduce using the first element as the seed.
    ///
    /// Returns `Ok(None)` for an empty traversal.
    fn reduce<F>(&self, mut f: F) -> Result<Option<Self::Item>>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        let mut acc: Option<Self::Item> = None;
        for row in self.traverse()? {
            let x = row?;
            acc = Some(match acc {
                Some(prev) => f(prev, x),
                None => x,
            });
        }
        Ok(acc)
    }

    /// Sum all elements. One traversal.
    fn sum(&self) -> Result<Self::Item>
    where
        Self::Item: std::iter::Sum<Self::Item>,
    {
        self.traverse()?.sum()
    }

    /// Count the elements. One traversal.
    fn count(&self) -> Result<usize> {
        let mut n = 0;
        for row in self.traverse()? {
            row?;
            n += 1;
        }
        Ok(n)
    }

    /// Count occurrences of each distinct element.
    ///
    /// Result keys follow first-occurrence order.
    ///
    /// # Example
    /// ```
    /// use scalaseq::{Seq, Traversable};
    ///
    /// let counts = Seq::new(vec![1, 1, 2, 3, 3, 3]).value_counts()?;
    /// assert_eq!(counts.get(&1), Some(&2));
    /// assert_eq!(counts.get(&2), Some(&1));
    /// assert_eq!(counts.get(&3), Some(&3));
    /// # scalaseq::Result::<()>::Ok(())
    /// ```
    fn value_counts(&self) -> Result<Dict<Self::Item, usize>>
    where
        Self::Item: Eq + Hash + Clone,
    {
        let mut counts: Dict<Self::Item, usize> = Dict::new();
        for row in self.traverse()? {
            let x = row?;
            *counts.get_or_insert_with(x, || 0) += 1;
        }
        Ok(counts)
    }

    /// Materialize sorted by a projected key (stable).
    fn sort_by<K, P, M>(&self, projection: P) -> Result<List<Self::Item>>
    where
        K: Ord + 'static,
        P: IntoProjection<Self::Item, K, M>,
    {
        let proj = projection.into_projection();
        let mut keyed = Vec::new();
        for row in self.traverse()? {
            let x = row?;
            let k = proj.apply(&x)?;
            keyed.push((k, x));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(List::from(
            keyed.into_iter().map(|(_, x)| x).collect::<Vec<_>>(),
        ))
    }

    /// Materialize in natural order.
    fn sort(&self) -> Result<List<Self::Item>>
    where
        Self::Item: Ord,
    {
        let mut items = Vec::new();
        for row in self.traverse()? {
            items.push(row?);
        }
        items.sort();
        Ok(List::from(items))
    }

    /// Materialize with duplicates removed, keeping the first occurrence of
    /// each element.
    fn distinct(&self) -> Result<List<Self::Item>>
    where
        Self::Item: Eq + Hash + Clone,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in self.traverse()? {
            let x = row?;
            if seen.insert(x.clone()) {
                out.push(x);
            }
        }
        Ok(List::from(out))
    }

    /// Group elements by a projected key.
    ///
    /// One traversal. Groups are created on first occurrence; iteration over
    /// the result follows first-occurrence order of each key, and each
    /// group's list preserves insertion order.
    ///
    /// # Example
    /// ```
    /// use scalaseq::{Seq, Traversable};
    ///
    /// let groups = Seq::new(vec!["ant", "bee", "ape"])
    ///     .group_by(|s: &&str| s.as_bytes()[0])?;
    /// let sizes = groups.map_values(|g: &scalaseq::List<&str>| g.len())?;
    /// assert_eq!(sizes.get(&b'a'), Some(&2));
    /// assert_eq!(sizes.get(&b'b'), Some(&1));
    /// # scalaseq::Result::<()>::Ok(())
    /// ```
    fn group_by<K, P, M>(&self, projection: P) -> Result<Dict<K, List<Self::Item>>>
    where
        K: Eq + Hash + Clone + 'static,
        P: IntoProjection<Self::Item, K, M>,
    {
        let proj = projection.into_projection();
        let mut groups: Dict<K, List<Self::Item>> = Dict::new();
        for row in self.traverse()? {
            let x = row?;
            let key = proj.apply(&x)?;
            groups.get_or_insert_with(key, List::new).append(x);
        }
        Ok(groups)
    }

    /// Key each element by a projected key, requiring keys to be unique.
    ///
    /// Fails immediately with [`Error::DuplicateKey`] on the first repeated
    /// key; the partially built container is dropped.
    fn key_by<K, P, M>(&self, projection: P) -> Result<Dict<K, Self::Item>>
    where
        K: Eq + Hash + Clone + Debug + 'static,
        P: IntoProjection<Self::Item, K, M>,
    {
        let proj = projection.into_projection();
        let mut out: Dict<K, Self::Item> = Dict::new();
        for row in self.traverse()? {
            let x = row?;
            let key = proj.apply(&x)?;
            if out.contains_key(&key) {
                return Err(Error::DuplicateKey(format!("{key:?}")));
            }
            out.insert(key, x);
        }
        Ok(out)
    }

    /// Aggregate per key with explicit create/add steps.
    ///
    /// One traversal, one running aggregate per computed key. `create` runs
    /// exactly once per newly seen key, lazily on its first occurrence;
    /// `add` runs once per element.
    fn aggregate_by<K, A, P, M, C, F>(
        &self,
        projection: P,
        mut create: C,
        mut add: F,
    ) -> Result<Dict<K, A>>
    where
        K: Eq + Hash + Clone + 'static,
        A: 'static,
        P: IntoProjection<Self::Item, K, M>,
        C: FnMut() -> A,
        F: FnMut(&mut A, Self::Item),
    {
        let proj = projection.into_projection();
        let mut groups: Dict<K, A> = Dict::new();
        for row in self.traverse()? {
            let x = row?;
            let key = proj.apply(&x)?;
            let acc = groups.get_or_insert_with(key, || create());
            add(acc, x);
        }
        Ok(groups)
    }

    /// Fold per key from a cloned initial accumulator.
    fn fold_by<K, A, P, M, F>(&self, projection: P, init: A, mut f: F) -> Result<Dict<K, A>>
    where
        K: Eq + Hash + Clone + 'static,
        A: Clone + 'static,
        P: IntoProjection<Self::Item, K, M>,
        F: FnMut(A, Self::Item) -> A,
    {
        let proj = projection.into_projection();
        let mut acc: HashMap<K, A> = HashMap::new();
        let mut order: Vec<K> = Vec::new();
        for row in self.traverse()? {
            let x = row?;
            let key = proj.apply(&x)?;
            let prev = match acc.remove(&key) {
                Some(prev) => prev,
                None => {
                    order.push(key.clone());
                    init.clone()
                }
            };
            acc.insert(key, f(prev, x));
        }
        Ok(collect_in_order(order, acc))
    }

    /// Reduce per key; the first element of each group seeds its aggregate.
    ///
    /// The reducer is never invoked for a single-element group.
    ///
    /// # Example
    /// ```
    /// use scalaseq::{Seq, Traversable};
    ///
    /// let totals = Seq::new(vec![("a", 1), ("a", 2), ("b", 5)])
    ///     .reduce_by(|kv: &(&'static str, i32)| kv.0, |a, b| (a.0, a.1 + b.1))?
    ///     .map_values(|kv: &(&str, i32)| kv.1)?;
    /// assert_eq!(totals.get(&"a"), Some(&3));
    /// assert_eq!(totals.get(&"b"), Some(&5));
    /// # scalaseq::Result::<()>::Ok(())
    /// ```
    fn reduce_by<K, P, M, F>(&self, projection: P, mut f: F) -> Result<Dict<K, Self::Item>>
    where
        K: Eq + Hash + Clone + 'static,
        P: IntoProjection<Self::Item, K, M>,
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        let proj = projection.into_projection();
        let mut acc: HashMap<K, Self::Item> = HashMap::new();
        let mut order: Vec<K> = Vec::new();
        for row in self.traverse()? {
            let x = row?;
            let key = proj.apply(&x)?;
            match acc.remove(&key) {
                Some(prev) => {
                    acc.insert(key, f(prev, x));
                }
                None => {
                    order.push(key.clone());
                    acc.insert(key, x);
                }
            }
        }
        Ok(collect_in_order(order, acc))
    }

    /// Aggregate per key with a reusable [`Aggregator`].
    ///
    /// The aggregator's `create` runs once per newly seen key, exactly like
    /// [`aggregate_by`](Traversable::aggregate_by).
    fn combine_by<K, P, M, A>(&self, projection: P, aggregator: A) -> Result<Dict<K, A::Out>>
    where
        K: Eq + Hash + Clone + 'static,
        P: IntoProjection<Self::Item, K, M>,
        A: Aggregator<Self::Item>,
        A::Acc: 'static,
        A::Out: 'static,
    {
        let proj = projection.into_projection();
        let mut groups: Dict<K, A::Acc> = Dict::new();
        for row in self.traverse()? {
            let x = row?;
            let key = proj.apply(&x)?;
            let acc = groups.get_or_insert_with(key, || aggregator.create());
            aggregator.add(acc, x);
        }
        Ok(groups
            .into_iter()
            .map(|(k, acc)| (k, aggregator.finish(acc)))
            .collect())
    }

    /// Materialize into an eager [`List`].
    fn to_list(&self) -> Result<List<Self::Item>> {
        let mut items = Vec::new();
        for row in self.traverse()? {
            items.push(row?);
        }
        Ok(List::from(items))
    }

    /// Materialize into an immutable [`FrozenList`].
    fn to_frozen_list(&self) -> Result<FrozenList<Self::Item>> {
        let mut items = Vec::new();
        for row in self.traverse()? {
            items.push(row?);
        }
        Ok(FrozenList::from(items))
    }

    /// Materialize key-value pairs into a [`Dict`]. Later pairs win on
    /// repeated keys, which keep their first slot.
    fn to_dict<K, V>(&self) -> Result<Dict<K, V>>
    where
        Self: Traversable<Item = (K, V)>,
        K: Eq + Hash + Clone + 'static,
        V: 'static,
    {
        let mut out = Dict::new();
        for row in self.traverse()? {
            let (k, v) = row?;
            out.insert(k, v);
        }
        Ok(out)
    }

    /// Join all elements into a string with a separator. One traversal.
    fn mk_string(&self, sep: &str) -> Result<String>
    where
        Self::Item: Display,
    {
        let mut out = String::new();
        for (i, row) in self.traverse()?.enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            out.push_str(&row?.to_string());
        }
        Ok(out)
    }
}

/// Rebuild a first-occurrence-ordered [`Dict`] from a scratch map.
fn collect_in_order<K, V>(order: Vec<K>, mut scratch: HashMap<K, V>) -> Dict<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    let mut out = Dict::with_capacity(order.len());
    for key in order {
        if let Some(v) = scratch.remove(&key) {
            out.insert(key, v);
        }
    }
    out
}

/// Lazily concatenated cursor: the tail traversable is committed only when
/// the head cursor is exhausted.
struct ChainCursor<U: Traversable> {
    head: Option<Cursor<U::Item>>,
    tail: Option<U>,
}

impl<U: Traversable> Iterator for ChainCursor<U> {
    type Item = Result<U::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cursor) = self.head.as_mut() {
                match cursor.next() {
                    Some(row) => return Some(row),
                    None => self.head = None,
                }
            }
            match self.tail.take() {
                Some(next) => match next.traverse() {
                    Ok(cursor) => self.head = Some(cursor),
                    Err(e) => return Some(Err(e)),
                },
                None => return None,
            }
        }
    }
}
