//! Append properties over generated frames.

use crate::common::*;
use keyframe::core::{AppendPolicy, Error};
use proptest::prelude::*;

proptest! {
    #[test]
    fn append_row_count_is_sum(a in frame_in("x", -30..0), b in frame_in("x", 0..30)) {
        init_tracing();
        let stacked = a.append_with(&b, AppendPolicy::LeftOrRight).unwrap();
        prop_assert_eq!(stacked.row_count(), a.row_count() + b.row_count());
        prop_assert_eq!(stacked.column_keys(), &["x"]);

        let mut expected = column_values(&a, "x");
        expected.extend(column_values(&b, "x"));
        prop_assert_eq!(column_values(&stacked, "x"), expected);
    }

    #[test]
    fn append_keeps_repeated_keys(a in any_frame("x"), b in any_frame("x")) {
        let stacked = a.append(&b).unwrap();
        let keys: Vec<i32> = a.row_keys().iter().chain(b.row_keys()).copied().collect();
        prop_assert_eq!(stacked.row_keys(), keys.as_slice());
    }

    #[test]
    fn append_pads_disjoint_columns(a in any_frame("x"), b in any_frame("y")) {
        let stacked = a.append(&b).unwrap();
        let x = column_values(&stacked, "x");
        let y = column_values(&stacked, "y");
        prop_assert_eq!(x.len(), stacked.row_count());
        prop_assert_eq!(y.len(), stacked.row_count());
        prop_assert!(x[a.row_count()..].iter().all(Option::is_none));
        prop_assert!(y[..a.row_count()].iter().all(Option::is_none));
    }

    #[test]
    fn overlapping_rows_rejected_when_forbidden(a in any_frame("x")) {
        prop_assume!(a.row_count() > 0);
        let err = a.append_with(&a, AppendPolicy::LeftOrRight).unwrap_err();
        prop_assert!(matches!(err, Error::DuplicateRowKey(_)));
    }
}
