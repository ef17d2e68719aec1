//! Assertion functions for testing pipeline outputs.
//!
//! This module provides specialized assertion functions for comparing
//! containers produced by pipelines with expected results.

use crate::dict::Dict;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// Compares two slices element-by-element and panics with a detailed
/// message if they differ.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use scalaseq::testing::assert_collections_equal;
///
/// let actual = vec![1, 2, 3];
/// let expected = vec![1, 2, 3];
/// assert_collections_equal(&actual, &expected);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two collections contain the same elements, ignoring order.
///
/// # Panics
///
/// Panics if the collections differ in content (ignoring order).
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    let actual_set: HashSet<_> = actual.iter().collect();
    let expected_set: HashSet<_> = expected.iter().collect();

    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );
    assert_eq!(
        actual_set, expected_set,
        "Collection content mismatch (ignoring order):\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that a [`Dict`] holds exactly the expected entries, in the
/// expected insertion order.
///
/// # Panics
///
/// Panics if the dict differs in length, order, keys, or values.
pub fn assert_dict_entries<K, V>(actual: &Dict<K, V>, expected: &[(K, V)])
where
    K: Debug + Eq + Hash + Clone,
    V: Debug + PartialEq,
{
    let entries: Vec<(&K, &V)> = actual.iter().collect();
    assert_eq!(
        entries.len(),
        expected.len(),
        "Dict length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        entries.len()
    );

    for (i, ((ak, av), (ek, ev))) in entries.iter().zip(expected.iter()).enumerate() {
        assert!(
            *ak == ek && *av == ev,
            "Dict mismatch at slot {i}:\n  Expected: ({ek:?}, {ev:?})\n  Actual: ({ak:?}, {av:?})\n  Full actual: {actual:?}"
        );
    }
}
