//! Shared strategies and helpers for the frame property suite.

#![allow(dead_code)]

use keyframe::core::Value;
use keyframe::frame::Frame;
use keyframe::index::KeyIndex;
use keyframe::vector::Column;
use proptest::prelude::*;
use std::sync::Once;

pub type TestFrame = Frame<i32, &'static str>;

static INIT: Once = Once::new();

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

// ============================================================================
// Strategies
// ============================================================================

/// Distinct row keys in `range` with optional cells, sorted by key
fn cells(range: std::ops::Range<i32>) -> impl Strategy<Value = Vec<(i32, Option<i64>)>> {
    prop::collection::btree_map(range, prop::option::of(-1000_i64..1000), 0..16)
        .prop_map(|m| m.into_iter().collect())
}

fn build(column: &'static str, cells: Vec<(i32, Option<i64>)>, ordered: bool) -> TestFrame {
    let (keys, values): (Vec<i32>, Vec<Option<i64>>) = cells.into_iter().unzip();
    let rows = if ordered {
        KeyIndex::new(keys)
    } else {
        KeyIndex::unordered(keys)
    };
    Frame::from_columns(rows, vec![(column, Column::from(values))]).unwrap()
}

/// One-column frame with ordered row keys in `-30..30`
pub fn ordered_frame(column: &'static str) -> impl Strategy<Value = TestFrame> {
    cells(-30..30).prop_map(move |c| build(column, c, true))
}

/// One-column frame whose row keys are in arbitrary order
pub fn unordered_frame(column: &'static str) -> impl Strategy<Value = TestFrame> {
    cells(-30..30)
        .prop_shuffle()
        .prop_map(move |c| build(column, c, false))
}

/// One-column frame, ordered or not
pub fn any_frame(column: &'static str) -> impl Strategy<Value = TestFrame> {
    prop_oneof![ordered_frame(column), unordered_frame(column)]
}

/// Ordered one-column frame with row keys drawn from `range`
pub fn frame_in(column: &'static str, range: std::ops::Range<i32>) -> impl Strategy<Value = TestFrame> {
    cells(range).prop_map(move |c| build(column, c, true))
}

// ============================================================================
// Helpers
// ============================================================================

/// Cell of `frame` at (`row`, `column`), `None` for absent keys too
pub fn cell(frame: &TestFrame, row: &i32, column: &'static str) -> Option<Value> {
    frame.get_value(row, &column).ok().flatten()
}

/// Column cells in row order
pub fn column_values(frame: &TestFrame, column: &'static str) -> Vec<Option<Value>> {
    frame
        .get_column(&column)
        .map(|s| s.column().iter_values().collect())
        .unwrap_or_default()
}
