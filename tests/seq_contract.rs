//! The single-pass consumption contract for lazy sequences.

use scalaseq::{Error, List, Seq, Traversable};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn second_traversal_fails() -> anyhow::Result<()> {
    let seq = Seq::new(vec![1, 2, 3]);
    assert_eq!(seq.to_list()?, List::from(vec![1, 2, 3]));

    assert!(matches!(seq.to_list(), Err(Error::AlreadyConsumed)));
    assert!(matches!(seq.count(), Err(Error::AlreadyConsumed)));
    Ok(())
}

#[test]
fn requesting_a_traversal_is_committing() -> anyhow::Result<()> {
    let seq = Seq::new(vec![1, 2, 3]);
    {
        // Obtain a cursor and advance it only part way.
        let mut cursor = seq.traverse()?;
        assert_eq!(cursor.next().transpose()?, Some(1));
    }
    // The cursor is gone, but the sequence was committed the moment the
    // traversal was requested.
    assert!(matches!(seq.traverse().map(|_| ()), Err(Error::AlreadyConsumed)));
    Ok(())
}

#[test]
fn building_a_chain_does_no_work_and_consumes_nothing() -> anyhow::Result<()> {
    let calls = Rc::new(Cell::new(0usize));
    let calls_in_map = Rc::clone(&calls);

    let seq = Seq::new(vec![1, 2, 3, 4]);
    let chained = seq
        .map(move |x: &i32| {
            calls_in_map.set(calls_in_map.get() + 1);
            x * 2
        })
        .filter(|x: &i32| *x > 2)
        .take(10)
        .drop(0);

    // Ten combinators or one: nothing has traversed yet.
    assert_eq!(calls.get(), 0);
    assert!(!seq.is_consumed());

    let out = chained.to_list()?;
    assert_eq!(out, List::from(vec![4, 6, 8]));
    assert_eq!(calls.get(), 4);
    assert!(seq.is_consumed());
    Ok(())
}

#[test]
fn traversing_the_origin_first_spends_the_chain() -> anyhow::Result<()> {
    let seq = Seq::new(vec![1, 2, 3]);
    let mapped = seq.map(|x: &i32| x + 1);

    // The combinator did not consume its input...
    assert_eq!(seq.to_list()?, List::from(vec![1, 2, 3]));
    // ...so the chain loses the race and fails when finally traversed.
    assert!(matches!(mapped.to_list(), Err(Error::AlreadyConsumed)));
    Ok(())
}

#[test]
fn aliases_share_the_single_pass() -> anyhow::Result<()> {
    let seq = Seq::new(vec![1, 2, 3]);
    let alias = seq.clone();

    assert_eq!(seq.sum()?, 6);

    let items: Vec<_> = alias.into_iter().collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(Error::AlreadyConsumed)));
    Ok(())
}

#[test]
fn materialized_sources_are_reversible() -> anyhow::Result<()> {
    let seq = Seq::from_vec(vec![1, 2, 3]);
    let reversed = seq.reverse()?;

    // Reversing does not consume the original; both views traverse
    // independently, each single-pass on its own.
    assert!(!seq.is_consumed());
    assert_eq!(reversed.to_list()?, List::from(vec![3, 2, 1]));
    assert_eq!(seq.to_list()?, List::from(vec![1, 2, 3]));
    Ok(())
}

#[test]
fn reversed_views_are_single_pass_too() -> anyhow::Result<()> {
    let seq = Seq::from_vec(vec![1, 2, 3]);
    let reversed = seq.reverse()?;
    reversed.for_each(|_x: &i32| ())?;
    assert!(matches!(reversed.to_list(), Err(Error::AlreadyConsumed)));
    Ok(())
}

#[test]
fn forward_only_sources_are_not_reversible() {
    let from_iter = Seq::new(vec![1, 2, 3].into_iter().filter(|x| x > &0));
    assert!(matches!(from_iter.reverse().map(|_| ()), Err(Error::NotReversible)));

    // Combinator results are forward-only as well; materialize first.
    let chained = Seq::from_vec(vec![1, 2, 3]).map(|x: &i32| x + 1);
    assert!(matches!(chained.reverse().map(|_| ()), Err(Error::NotReversible)));
}

#[test]
fn reverse_after_consumption_reports_consumed() -> anyhow::Result<()> {
    let seq = Seq::from_vec(vec![1, 2, 3]);
    seq.count()?;
    assert!(matches!(seq.reverse().map(|_| ()), Err(Error::AlreadyConsumed)));
    Ok(())
}

#[test]
fn rebuilding_a_chain_allows_another_pass() -> anyhow::Result<()> {
    // The supported idiom for re-running a lazy pipeline: rebuild it.
    let build = || {
        Seq::new(0..1000)
            .map(|x: &i32| x * 10)
            .filter(|x: &i32| x % 70 == 0)
    };

    let first_three = build().take(3).to_list()?;
    assert_eq!(first_three.len(), 3);
    assert_eq!(build().count()?, build().count()?);
    Ok(())
}

#[test]
fn lists_reverse_into_single_pass_views() -> anyhow::Result<()> {
    let list = List::from(vec![1, 2, 3]);
    let rev = list.reverse()?;
    assert_eq!(rev.to_list()?, List::from(vec![3, 2, 1]));
    // The list itself is untouched and reusable.
    assert_eq!(list.to_list()?, List::from(vec![1, 2, 3]));
    Ok(())
}
