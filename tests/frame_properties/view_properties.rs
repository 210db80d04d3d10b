//! Row and column views agree with each other and with the frame.

use crate::common::*;
use keyframe::frame::{JoinKind, RowState};
use proptest::prelude::*;

proptest! {
    #[test]
    fn rows_and_columns_agree(a in any_frame("x"), b in any_frame("y")) {
        let frame = a.join(&b, JoinKind::Outer).unwrap();
        let rows = frame.rows();
        let columns = frame.columns();
        for (r, row) in rows.iter() {
            for (c, series) in columns.iter() {
                prop_assert_eq!(row.get(c), series.get(r));
                prop_assert_eq!(row.get(c), cell(&frame, r, *c));
            }
        }
    }

    #[test]
    fn materialization_is_transparent(a in any_frame("x"), b in any_frame("y")) {
        let frame = a.join(&b, JoinKind::Outer).unwrap();
        for key in frame.row_keys() {
            let row = frame.get_row(key).unwrap();
            let before: Vec<_> = row.column_index().addresses().map(|c| row.get_value(c)).collect();
            prop_assert_eq!(row.state(), RowState::Unmaterialized);

            prop_assert_eq!(row.data(), before.as_slice());
            prop_assert_eq!(row.state(), RowState::Materialized);

            let after: Vec<_> = row.column_index().addresses().map(|c| row.get_value(c)).collect();
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn dense_views_are_filters(a in any_frame("x"), b in any_frame("y")) {
        let frame = a.join(&b, JoinKind::Outer).unwrap();

        let dense_rows: Vec<i32> = frame.rows_dense().keys().copied().collect();
        let expected: Vec<i32> = frame
            .row_keys()
            .iter()
            .filter(|r| frame.get_row(r).map(|row| row.is_dense()).unwrap_or(false))
            .copied()
            .collect();
        prop_assert_eq!(dense_rows, expected);

        for (_, series) in frame.columns_dense().iter() {
            prop_assert!(series.is_dense());
        }
    }
}
