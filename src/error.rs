//! Error taxonomy for scalaseq.
//!
//! Every failure the library can detect is one of the variants below. Errors
//! are raised synchronously at the call that detects them; nothing is retried
//! or recovered internally. Callers either avoid the triggering condition
//! (e.g. materialize a sequence before traversing it twice) or handle the
//! error at the call site.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All errors produced by scalaseq operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A field or index selector could not be applied to a concrete element.
    ///
    /// The message names the element type and the selector that missed.
    #[error("unsupported projection: {0}")]
    UnsupportedProjection(String),

    /// A lazy sequence was traversed (or reversed) past its single permitted
    /// traversal.
    #[error("sequence already consumed; materialize with to_list() to traverse more than once")]
    AlreadyConsumed,

    /// `reverse()` was requested on a source without bidirectional support.
    #[error("sequence source is not reversible; materialize with to_list() first")]
    NotReversible,

    /// `key_by` computed the same key for two elements.
    #[error("duplicate key {0}")]
    DuplicateKey(String),

    /// `union` with overlap checking found keys present on both sides.
    #[error("there are {0} overlapping keys where none were expected")]
    OverlappingKeys(usize),

    /// A join mode string was not one of `inner`, `outer`, `left`, `right`.
    #[error("invalid join mode {0:?}; must be one of inner, outer, left or right")]
    InvalidJoinMode(String),
}

impl Error {
    pub(crate) fn missing_field<T>(name: &str) -> Self {
        Error::UnsupportedProjection(format!(
            "no field `{name}` on {}",
            std::any::type_name::<T>()
        ))
    }

    pub(crate) fn missing_index<T>(idx: i64) -> Self {
        Error::UnsupportedProjection(format!(
            "no element at index {idx} in {}",
            std::any::type_name::<T>()
        ))
    }
}
