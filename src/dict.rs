//! The associative container and its view/merge/join operations.
//!
//! [`Dict<K, V>`] is an insertion-ordered mapping: keys are unique,
//! iteration follows first-insertion order, and replacing a value keeps the
//! key's original slot. It is produced by the grouping and aggregation
//! materializers ([`group_by`](crate::Traversable::group_by),
//! [`key_by`](crate::Traversable::key_by),
//! [`value_counts`](crate::Traversable::value_counts), ...) and constructed
//! explicitly from key-value pairs or a `HashMap`.
//!
//! ## Available operations
//! - [`keys`](Dict::keys) / [`values`](Dict::values) / [`items`](Dict::items)
//!   - fresh, independently consumable [`Seq`] views
//! - [`map_values`](Dict::map_values) - same keys, projected values
//! - [`union`](Dict::union) - merged copy, optionally failing on overlap
//! - [`join`](Dict::join) - inner/outer/left/right key join with another dict
//!
//! ## Example
//! ```
//! use scalaseq::{Dict, JoinMode, Traversable};
//!
//! let ages: Dict<&str, u32> = vec![("alice", 34), ("bob", 40)].into_iter().collect();
//! let towns: Dict<&str, &str> = vec![("alice", "leeds"), ("cara", "york")].into_iter().collect();
//!
//! let joined = ages.join(&towns, JoinMode::Left).to_list()?;
//! assert_eq!(joined.len(), 2);
//! assert_eq!(joined.get(0), Some(&("alice", (Some(34), Some("leeds")))));
//! assert_eq!(joined.get(1), Some(&("bob", (Some(40), None))));
//! # scalaseq::Result::<()>::Ok(())
//! ```

use crate::error::{Error, Result};
use crate::projection::{FieldAccess, IntoProjection};
use crate::seq::Seq;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// How [`Dict::join`] chooses its key set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinMode {
    /// Keys present on both sides.
    Inner,
    /// Keys present on either side.
    Outer,
    /// The left dict's keys.
    Left,
    /// The right dict's keys.
    Right,
}

impl FromStr for JoinMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inner" => Ok(JoinMode::Inner),
            "outer" => Ok(JoinMode::Outer),
            "left" => Ok(JoinMode::Left),
            "right" => Ok(JoinMode::Right),
            other => Err(Error::InvalidJoinMode(other.to_string())),
        }
    }
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinMode::Inner => "inner",
            JoinMode::Outer => "outer",
            JoinMode::Left => "left",
            JoinMode::Right => "right",
        };
        f.write_str(name)
    }
}

/// An insertion-ordered mapping with unique keys.
#[derive(Clone)]
pub struct Dict<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Dict<K, V> {
    /// An empty dict.
    pub fn new() -> Self {
        Dict {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Dict {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K, V> Dict<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Insert or replace. A replaced key keeps its original slot; the old
    /// value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index
            .get(key)
            .copied()
            .map(|slot| &mut self.entries[slot].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// The value under `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }
}

impl<K, V> Dict<K, V>
where
    K: Eq + Hash + Clone + 'static,
{
    /// A fresh single-pass view over the keys, in insertion order.
    ///
    /// Each call snapshots independently: calling `keys()` twice gives two
    /// independently consumable sequences.
    pub fn keys(&self) -> Seq<K> {
        Seq::from_vec(self.entries.iter().map(|(k, _)| k.clone()).collect())
    }

    /// A fresh single-pass view over the values, in insertion order.
    pub fn values(&self) -> Seq<V>
    where
        V: Clone + 'static,
    {
        Seq::from_vec(self.entries.iter().map(|(_, v)| v.clone()).collect())
    }

    /// A fresh single-pass view over the `(key, value)` pairs, in insertion
    /// order.
    pub fn items(&self) -> Seq<(K, V)>
    where
        V: Clone + 'static,
    {
        Seq::from_vec(self.entries.clone())
    }

    /// A new dict with the same keys (same order) and projected values.
    pub fn map_values<O, P, M>(&self, projection: P) -> Result<Dict<K, O>>
    where
        O: 'static,
        P: IntoProjection<V, O, M>,
        V: 'static,
    {
        let proj = projection.into_projection();
        let mut out = Dict::with_capacity(self.len());
        for (k, v) in &self.entries {
            out.insert(k.clone(), proj.apply(v)?);
        }
        Ok(out)
    }

    /// A merged copy of `self` and `other`.
    ///
    /// `other`'s values win on shared keys, which keep their original slot.
    /// With `error_on_overlap`, any shared key fails up front with
    /// [`Error::OverlappingKeys`] naming the overlap count - no partial
    /// merge is performed and both inputs are left untouched.
    pub fn union(&self, other: &Dict<K, V>, error_on_overlap: bool) -> Result<Dict<K, V>>
    where
        V: Clone,
    {
        if error_on_overlap {
            let overlap = self
                .entries
                .iter()
                .filter(|(k, _)| other.contains_key(k))
                .count();
            if overlap > 0 {
                return Err(Error::OverlappingKeys(overlap));
            }
        }
        let mut out = self.clone();
        for (k, v) in &other.entries {
            out.insert(k.clone(), v.clone());
        }
        Ok(out)
    }

    /// Key-join with another dict.
    ///
    /// The key set is governed by `mode`: intersection (`Inner`), union
    /// (`Outer`), this dict's keys (`Left`), or the other dict's keys
    /// (`Right`). Pairs come out in the governing side's first-occurrence
    /// order (for `Outer`: this dict's keys, then the other's extras).
    ///
    /// `None` means the key is absent on that side - distinct from a present
    /// null value, which arrives as `Some(..)` of whatever the value type
    /// uses for null.
    pub fn join<W>(&self, other: &Dict<K, W>, mode: JoinMode) -> Seq<(K, (Option<V>, Option<W>))>
    where
        V: Clone + 'static,
        W: Clone + 'static,
    {
        let rows: Vec<(K, (Option<V>, Option<W>))> = match mode {
            JoinMode::Inner => self
                .entries
                .iter()
                .filter(|(k, _)| other.contains_key(k))
                .map(|(k, v)| (k.clone(), (Some(v.clone()), other.get(k).cloned())))
                .collect(),
            JoinMode::Left => self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), (Some(v.clone()), other.get(k).cloned())))
                .collect(),
            JoinMode::Right => other
                .entries
                .iter()
                .map(|(k, w)| (k.clone(), (self.get(k).cloned(), Some(w.clone()))))
                .collect(),
            JoinMode::Outer => {
                let mut rows: Vec<(K, (Option<V>, Option<W>))> = self
                    .entries
                    .iter()
                    .map(|(k, v)| (k.clone(), (Some(v.clone()), other.get(k).cloned())))
                    .collect();
                rows.extend(
                    other
                        .entries
                        .iter()
                        .filter(|(k, _)| !self.contains_key(k))
                        .map(|(k, w)| (k.clone(), (None, Some(w.clone())))),
                );
                rows
            }
        };
        Seq::from_vec(rows)
    }
}

impl<K, V> Default for Dict<K, V> {
    fn default() -> Self {
        Dict::new()
    }
}

/// Equality ignores insertion order, like the host mapping it models.
impl<K, V> PartialEq for Dict<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|w| v == w))
    }
}

impl<K, V> Eq for Dict<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for Dict<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Dict::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<K, V> Extend<(K, V)> for Dict<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> From<HashMap<K, V>> for Dict<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> IntoIterator for Dict<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Dict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Dict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dict(")?;
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()?;
        write!(f, ")")
    }
}

impl<V: Clone> FieldAccess for Dict<String, V> {
    type Value = V;

    fn field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }
}
