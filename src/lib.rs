//! # scalaseq
//!
//! **Scala-inspired collection pipelines** for Rust: a fluent, chainable API
//! (map / filter / group / fold / join) over ordinary sequences, without
//! hand-writing loops.
//!
//! ## Key Features
//!
//! - **Fluent combinator surface** - chain transformations on any container
//! - **Lazy single-pass sequences** - [`Seq`] wraps any iterable, possibly
//!   unbounded, and enforces at most one traversal
//! - **Eager reusable containers** - [`List`], [`FrozenList`], and the
//!   insertion-ordered [`Dict`]
//! - **Grouping and aggregation** - group_by, key_by, aggregate_by, fold_by,
//!   reduce_by, value_counts
//! - **Joins** - inner, outer, left, and right key joins between dicts
//! - **Projections** - pass a closure, or a [`field`]/[`index`] selector for
//!   row-like elements
//! - **Typed errors** - every detectable misuse is a variant of [`Error`]
//!
//! ## Quick Start
//!
//! ```
//! use scalaseq::{Seq, Traversable};
//!
//! let out = Seq::new(vec![1, 2, 3, 4])
//!     .map(|x: &i32| x * 2)
//!     .filter(|x: &i32| *x > 4)
//!     .to_list()?;
//! assert_eq!(out, scalaseq::List::from(vec![6, 8]));
//! # scalaseq::Result::<()>::Ok(())
//! ```
//!
//! ## Core Concepts
//!
//! ### Traversable
//!
//! Every container implements [`Traversable`]: "produce a single forward
//! traversal of elements". The whole combinator surface is defined once
//! against that capability; transformations return a lazy [`Seq`], while
//! materializers return a [`List`], [`FrozenList`], [`Dict`], or scalar.
//!
//! ### Single-pass sequences
//!
//! A [`Seq`] may be traversed at most once. *Requesting* a traversal is
//! committing: the moment [`traverse`](Traversable::traverse) returns, the
//! source is moved out of the sequence and any later traversal fails with
//! [`Error::AlreadyConsumed`]. Building a chain of combinators does no work
//! and consumes nothing - consumption happens when the final sequence is
//! traversed:
//!
//! ```
//! use scalaseq::{Seq, Traversable, Error};
//!
//! let seq = Seq::new(0..100);
//! let pipeline = seq.map(|x: &i32| x * 10).filter(|x: &i32| x % 70 == 0);
//! // Nothing has run yet; `seq` is still fresh. Materializing runs it all:
//! let firsts = pipeline.take(3).to_list()?;
//! assert_eq!(firsts.len(), 3);
//! // ...and now the chain (and `seq` with it) is spent:
//! assert!(matches!(seq.to_list(), Err(Error::AlreadyConsumed)));
//! # scalaseq::Result::<()>::Ok(())
//! ```
//!
//! Eager containers have no such restriction; traverse them as often as you
//! like.
//!
//! ### Grouping and joining
//!
//! ```
//! use scalaseq::{Seq, Traversable};
//!
//! let lines = vec!["ab,alice,hi,1", "ab,bob,yo,2"];
//! let groups = Seq::new(lines)
//!     .map(|l: &&str| l.split(',').map(str::to_string).collect::<Vec<_>>())
//!     .group_by(scalaseq::index(0))?;
//! assert_eq!(groups.len(), 1);
//! # scalaseq::Result::<()>::Ok(())
//! ```
//!
//! ## Error Handling
//!
//! All failures are variants of [`Error`], raised synchronously at the call
//! that detects them: [`Error::AlreadyConsumed`], [`Error::NotReversible`],
//! [`Error::DuplicateKey`], [`Error::OverlappingKeys`],
//! [`Error::InvalidJoinMode`], and [`Error::UnsupportedProjection`]. The
//! library only detects; it never retries or recovers.
//!
//! ## Module Overview
//!
//! - [`traverse`] - the `Traversable` capability and combinator surface
//! - [`seq`] - lazy single-pass sequences
//! - [`list`] - eager and frozen lists
//! - [`dict`] - the insertion-ordered associative container and joins
//! - [`combiners`] - reusable per-key aggregators (Sum, Min, Max, ...)
//! - [`projection`] - closure / field / index projections
//! - [`testing`] - assertion helpers for pipeline outputs

pub mod combiners;
pub mod dict;
pub mod error;
pub mod list;
pub mod projection;
pub mod seq;
mod serde_support;
pub mod testing;
pub mod traverse;

pub use combiners::{Aggregator, AverageF64, Count, Max, Min, Sum};
pub use dict::{Dict, JoinMode};
pub use error::{Error, Result};
pub use list::{FrozenList, List};
pub use projection::{field, index, FieldAccess, IndexAccess, IntoProjection, Projection};
pub use seq::Seq;
pub use traverse::{Cursor, Traversable};
