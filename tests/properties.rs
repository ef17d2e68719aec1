//! Universally-quantified properties of the core contracts.

use proptest::prelude::*;
use scalaseq::{Dict, Error, JoinMode, List, Seq, Traversable};

proptest! {
    /// Consuming a lazy sequence once succeeds; any second traversal of the
    /// same instance fails.
    #[test]
    fn single_pass_holds_for_all_finite_sequences(xs in prop::collection::vec(any::<i32>(), 0..64)) {
        let seq = Seq::from_vec(xs.clone());
        prop_assert_eq!(seq.to_list().unwrap().into_vec(), xs);
        prop_assert!(matches!(seq.to_list(), Err(Error::AlreadyConsumed)));
    }

    /// Eager list traversal is idempotent: same elements, same order, every
    /// time.
    #[test]
    fn list_traversal_is_idempotent(xs in prop::collection::vec(any::<i32>(), 0..64)) {
        let list = List::from(xs);
        let first = list.to_list().unwrap();
        let second = list.to_list().unwrap();
        prop_assert_eq!(first, second);
    }

    /// Group sizes sum to the input length, for any key function.
    #[test]
    fn group_sizes_sum_to_input_length(xs in prop::collection::vec(any::<i16>(), 0..64), modulus in 1i32..7) {
        let n = xs.len();
        let sizes = List::from(xs)
            .group_by(move |x: &i16| i32::from(*x) % modulus)
            .unwrap()
            .map_values(|g: &List<i16>| g.len())
            .unwrap();
        let total: usize = sizes.values().sum().unwrap();
        prop_assert_eq!(total, n);
    }

    /// A left join's key set equals the left dict's key set, and the first
    /// component is always present.
    #[test]
    fn left_join_keys_are_exactly_the_left_keys(
        left in prop::collection::hash_map(0u8..32, any::<i32>(), 0..16),
        right in prop::collection::hash_map(0u8..32, any::<i32>(), 0..16),
    ) {
        let left: Dict<u8, i32> = left.into();
        let right: Dict<u8, i32> = right.into();

        let rows = left.join(&right, JoinMode::Left).to_list().unwrap();
        let row_keys: Vec<u8> = rows.iter().map(|(k, _)| *k).collect();
        let left_keys: Vec<u8> = left.keys().to_list().unwrap().into_vec();
        prop_assert_eq!(row_keys, left_keys);
        prop_assert!(rows.iter().all(|(_, (l, _))| l.is_some()));
    }

    /// Union with overlap checking always fails when a key is shared, and
    /// leaves the inputs untouched.
    #[test]
    fn checked_union_rejects_any_overlap(
        entries in prop::collection::hash_map(0u8..32, any::<i32>(), 1..16),
        extra in any::<i32>(),
    ) {
        let left: Dict<u8, i32> = entries.into();
        let mut right: Dict<u8, i32> = Dict::new();
        let (&shared, _) = left.iter().next().unwrap();
        right.insert(shared, extra);

        let before = left.len();
        prop_assert!(matches!(left.union(&right, true), Err(Error::OverlappingKeys(1))));
        prop_assert_eq!(left.len(), before);
    }

    /// value_counts totals the input length.
    #[test]
    fn value_counts_totals_the_input(xs in prop::collection::vec(0u8..16, 0..64)) {
        let n = xs.len();
        let counts = Seq::new(xs).value_counts().unwrap();
        let total: usize = counts.values().sum().unwrap();
        prop_assert_eq!(total, n);
    }
}
