//! Join properties over generated frames.

use crate::common::*;
use keyframe::core::Lookup;
use keyframe::frame::{JoinKind, JoinOptions};
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    #[test]
    fn left_join_keeps_left_keys(a in any_frame("x"), b in any_frame("y")) {
        init_tracing();
        let joined = a.join(&b, JoinKind::Left).unwrap();
        prop_assert_eq!(joined.row_keys(), a.row_keys());
        prop_assert_eq!(column_values(&joined, "x"), column_values(&a, "x"));
    }

    #[test]
    fn right_join_keeps_right_keys(a in any_frame("x"), b in any_frame("y")) {
        let joined = a.join(&b, JoinKind::Right).unwrap();
        prop_assert_eq!(joined.row_keys(), b.row_keys());
        prop_assert_eq!(column_values(&joined, "y"), column_values(&b, "y"));
    }

    #[test]
    fn inner_keys_within_outer_keys(a in any_frame("x"), b in any_frame("y")) {
        let inner = a.join(&b, JoinKind::Inner).unwrap();
        let outer = a.join(&b, JoinKind::Outer).unwrap();

        let inner_keys: BTreeSet<i32> = inner.row_keys().iter().copied().collect();
        let outer_keys: BTreeSet<i32> = outer.row_keys().iter().copied().collect();
        prop_assert!(inner_keys.is_subset(&outer_keys));

        let both: BTreeSet<i32> = a
            .row_keys()
            .iter()
            .filter(|k| b.row_index().contains(k))
            .copied()
            .collect();
        prop_assert_eq!(inner_keys, both);
    }

    #[test]
    fn outer_join_routes_cells(a in any_frame("x"), b in any_frame("y")) {
        let outer = a.join(&b, JoinKind::Outer).unwrap();
        prop_assert_eq!(outer.column_keys(), &["x", "y"]);
        for key in outer.row_keys() {
            prop_assert_eq!(cell(&outer, key, "x"), cell(&a, key, "x"));
            prop_assert_eq!(cell(&outer, key, "y"), cell(&b, key, "y"));
        }
    }

    #[test]
    fn prefilter_is_invisible(a in ordered_frame("x"), b in ordered_frame("y")) {
        for kind in [JoinKind::Left, JoinKind::Right] {
            let with = a
                .join_with_options(&b, kind, JoinOptions { lookup: Lookup::Exact, prefilter: true })
                .unwrap();
            let without = a
                .join_with_options(&b, kind, JoinOptions { lookup: Lookup::Exact, prefilter: false })
                .unwrap();
            prop_assert_eq!(with, without);
        }
    }

    #[test]
    fn shared_column_key_always_fails(a in any_frame("x"), b in any_frame("x")) {
        for kind in [JoinKind::Outer, JoinKind::Inner, JoinKind::Left, JoinKind::Right] {
            prop_assert!(a.join(&b, kind).is_err());
        }
    }
}
