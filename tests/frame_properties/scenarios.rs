//! Worked examples with fully spelled-out results.

use crate::common::*;
use keyframe::core::{Error, FrameConfig, Lookup, Value};
use keyframe::frame::{Frame, FrameHandle, JoinKind, JoinOptions};
use keyframe::index::KeyIndex;
use keyframe::vector::Column;

fn ints(values: &[Option<i64>]) -> Vec<Option<Value>> {
    values.iter().map(|v| v.map(Value::Int)).collect()
}

fn a() -> TestFrame {
    Frame::from_columns(KeyIndex::new(vec![0, 1, 2]), vec![("x", Column::from(vec![10_i64, 20, 30]))]).unwrap()
}

fn b(column: &'static str) -> TestFrame {
    Frame::from_columns(KeyIndex::new(vec![2, 3]), vec![(column, Column::from(vec![300_i64, 400]))]).unwrap()
}

#[test]
fn test_outer_join_scenario() {
    init_tracing();
    let joined = a().join(&b("y"), JoinKind::Outer).unwrap();
    assert_eq!(joined.row_keys(), &[0, 1, 2, 3]);
    assert_eq!(column_values(&joined, "x"), ints(&[Some(10), Some(20), Some(30), None]));
    assert_eq!(column_values(&joined, "y"), ints(&[None, None, Some(300), Some(400)]));
}

#[test]
fn test_inner_join_scenario() {
    let joined = a().join(&b("y"), JoinKind::Inner).unwrap();
    assert_eq!(joined.row_keys(), &[2]);
    assert_eq!(column_values(&joined, "x"), ints(&[Some(30)]));
    assert_eq!(column_values(&joined, "y"), ints(&[Some(300)]));
}

#[test]
fn test_append_scenario() {
    let stacked = a().append(&b("x")).unwrap();
    assert_eq!(stacked.row_keys(), &[0, 1, 2, 2, 3]);
    assert_eq!(
        column_values(&stacked, "x"),
        ints(&[Some(10), Some(20), Some(30), Some(300), Some(400)])
    );
    // Repeated key resolves to its first row.
    assert_eq!(cell(&stacked, &2, "x"), Some(Value::Int(30)));
}

#[test]
fn test_join_with_shared_column_fails() {
    let err = a().join(&b("x"), JoinKind::Outer).unwrap_err();
    assert!(matches!(err, Error::DuplicateColumnKey(_)));
}

#[test]
fn test_config_drives_join_lookup() {
    let config = FrameConfig::from_toml_str("default_lookup = \"exact_or_smaller\"\n").unwrap();
    let ticks = Frame::from_columns(KeyIndex::new(vec![1, 5]), vec![("t", Column::from(vec![true, false]))]).unwrap();
    let joined = ticks
        .join_with_options(&a(), JoinKind::Left, JoinOptions::from(&config))
        .unwrap();
    assert_eq!(column_values(&joined, "x"), ints(&[Some(20), Some(30)]));
    assert_eq!(config.default_lookup, Lookup::ExactOrSmaller);
}

#[test]
fn test_config_forbids_repeated_rows() {
    let config = FrameConfig::from_toml_str("row_append = \"left_or_right\"\n").unwrap();
    let err = a().append_with(&b("x"), config.row_append).unwrap_err();
    assert_eq!(err, Error::DuplicateRowKey("2".to_string()));
}

#[test]
fn test_handle_edits_leave_snapshots_alone() {
    let mut handle = FrameHandle::new(a().join(&b("y"), JoinKind::Outer).unwrap());
    let snapshot = handle.snapshot();

    handle.drop_series(&"y").unwrap();
    handle
        .add_series("z", Column::from(vec![1.0_f64, 2.0, 3.0, 4.0]))
        .unwrap();

    assert_eq!(handle.frame().column_keys(), &["x", "z"]);
    assert_eq!(snapshot.column_keys(), &["x", "y"]);
    assert_eq!(cell(&snapshot, &3, "y"), Some(Value::Int(400)));
}
