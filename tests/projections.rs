//! Field and index projections over row-like elements.

use scalaseq::{field, index, Error, List, Seq, Traversable};
use serde_json::json;
use std::collections::HashMap;

#[test]
fn field_selectors_read_json_rows() -> anyhow::Result<()> {
    let rows = Seq::from_vec(vec![
        json!({"name": "alice", "score": 9}),
        json!({"name": "bob", "score": 7}),
    ]);

    let names = rows.map(field("name")).to_list()?;
    assert_eq!(
        names,
        List::from(vec![json!("alice"), json!("bob")])
    );
    Ok(())
}

#[test]
fn field_selectors_group_record_rows() -> anyhow::Result<()> {
    let record = |team: &str, n: &str| {
        HashMap::from([
            ("team".to_string(), team.to_string()),
            ("n".to_string(), n.to_string()),
        ])
    };
    let rows = Seq::from_vec(vec![
        record("red", "1"),
        record("blue", "2"),
        record("red", "3"),
    ]);

    let by_team = rows.group_by(field("team"))?;
    assert_eq!(by_team.len(), 2);
    assert_eq!(by_team.get("red").map(List::len), Some(2));
    Ok(())
}

#[test]
fn a_missing_field_surfaces_at_the_terminal_operation() {
    let rows = Seq::from_vec(vec![json!({"name": "alice"}), json!({"age": 3})]);

    let err = rows.map(field("name")).to_list().unwrap_err();
    assert!(matches!(err, Error::UnsupportedProjection(_)));
    let message = err.to_string();
    assert!(message.contains("name"));
    assert!(message.contains("Value"));
}

#[test]
fn index_selectors_support_negative_positions() -> anyhow::Result<()> {
    let rows = Seq::from_vec(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(
        rows.map(index(-1)).to_list()?,
        List::from(vec![3, 6])
    );

    let rows = Seq::from_vec(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(
        rows.map(index(0)).to_list()?,
        List::from(vec![1, 4])
    );
    Ok(())
}

#[test]
fn an_out_of_range_index_surfaces_at_the_terminal_operation() {
    let rows = Seq::from_vec(vec![vec![1, 2], vec![3]]);
    let err = rows.map(index(1)).to_list().unwrap_err();
    assert!(matches!(err, Error::UnsupportedProjection(_)));
    assert!(err.to_string().contains("index 1"));
}

#[test]
fn index_selectors_work_on_json_arrays() -> anyhow::Result<()> {
    let rows = Seq::from_vec(vec![json!([10, 20]), json!([30, 40])]);
    assert_eq!(
        rows.map(index(-1)).to_list()?,
        List::from(vec![json!(20), json!(40)])
    );
    Ok(())
}

#[test]
fn field_selectors_read_hash_maps() -> anyhow::Result<()> {
    let mut a = HashMap::new();
    a.insert("k".to_string(), 1);
    let mut b = HashMap::new();
    b.insert("k".to_string(), 2);

    let out = List::from(vec![a, b]).map(field("k")).to_list()?;
    assert_eq!(out, List::from(vec![1, 2]));
    Ok(())
}

#[test]
fn index_selectors_read_nested_lists() -> anyhow::Result<()> {
    let rows: List<List<i32>> = vec![
        List::from(vec![1, 2]),
        List::from(vec![3, 4]),
    ]
    .into_iter()
    .collect();

    let lasts = rows.map(index(-1)).to_list()?;
    assert_eq!(lasts, List::from(vec![2, 4]));
    Ok(())
}

#[test]
fn for_each_applies_a_projection_per_element() -> anyhow::Result<()> {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    Seq::new(vec![1, 2, 3]).for_each(move |x: &i32| sink.borrow_mut().push(*x))?;
    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    Ok(())
}

#[test]
fn filter_errors_flow_through() {
    // An error raised by an upstream projection is not silently dropped by a
    // downstream filter.
    let rows = Seq::from_vec(vec![json!({"n": 1}), json!({"m": 2})]);
    let err = rows
        .map(field("n"))
        .filter(|v: &serde_json::Value| v.is_number())
        .to_list()
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedProjection(_)));
}
