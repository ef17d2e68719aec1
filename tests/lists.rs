//! Eager and frozen list behavior: reusable, idempotent traversal.

use scalaseq::testing::*;
use scalaseq::{FrozenList, List, Seq, Traversable};

#[test]
fn list_traversal_is_idempotent() -> anyhow::Result<()> {
    let list = List::from(vec![1, 2, 3]);

    let first: Vec<i32> = list.to_list()?.into_vec();
    let second: Vec<i32> = list.to_list()?.into_vec();
    assert_collections_equal(&first, &second);

    assert_eq!(list.sum()?, 6);
    assert_eq!(list.sum()?, 6);
    Ok(())
}

#[test]
fn append_preserves_insertion_order() {
    let mut list = List::new();
    list.append("b");
    list.append("a");
    list.append("c");

    assert_eq!(list.len(), 3);
    assert_eq!(list.get(0), Some(&"b"));
    assert_eq!(list.get(2), Some(&"c"));
    let items: Vec<_> = list.iter().copied().collect();
    assert_collections_equal(&items, &["b", "a", "c"]);
}

#[test]
fn frozen_list_is_immutable_and_shared() -> anyhow::Result<()> {
    let frozen: FrozenList<i32> = vec![1, 2, 3].into_iter().collect();
    let shared = frozen.clone();

    assert_eq!(frozen.to_list()?, List::from(vec![1, 2, 3]));
    assert_eq!(shared.to_list()?, List::from(vec![1, 2, 3]));
    assert_eq!(frozen.as_slice(), &[1, 2, 3]);
    Ok(())
}

#[test]
fn lists_share_the_combinator_surface() -> anyhow::Result<()> {
    let list = List::from(vec![1, 2, 3, 4]);
    let evens = list.filter(|x: &i32| x % 2 == 0).to_list()?;
    assert_eq!(evens, List::from(vec![2, 4]));

    let frozen = FrozenList::from(vec!["fig", "pear"]);
    let upper = frozen.map(|s: &&str| s.to_uppercase()).to_list()?;
    assert_eq!(upper, List::from(vec!["FIG".to_string(), "PEAR".to_string()]));

    // The sources are still intact afterwards.
    assert_eq!(list.count()?, 4);
    assert_eq!(frozen.count()?, 2);
    Ok(())
}

#[test]
fn materializers_round_between_container_kinds() -> anyhow::Result<()> {
    let seq = Seq::new(vec![("a", 1), ("b", 2)]);
    let dict = seq.to_dict()?;
    assert_eq!(dict.get(&"a"), Some(&1));

    let frozen = dict.items().to_frozen_list()?;
    assert_eq!(frozen.len(), 2);
    Ok(())
}

#[test]
fn debug_rendering_names_the_container() {
    let list = List::from(vec![1, 2]);
    assert_eq!(format!("{list:?}"), "List([1, 2])");

    let frozen = FrozenList::from(vec![3]);
    assert_eq!(format!("{frozen:?}"), "FrozenList([3])");

    let seq = Seq::new(vec![1]);
    assert_eq!(format!("{seq:?}"), "Seq(<fresh>)");
    let _ = seq.count();
    assert_eq!(format!("{seq:?}"), "Seq(<consumed>)");
}
