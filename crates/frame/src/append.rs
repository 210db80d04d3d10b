//! Frame append (vertical stacking)
//!
//! Rows of the other frame go after this frame's rows. Column keys are
//! unioned, so a key on both sides is one logical column stacked from both
//! halves. A column on one side only is padded with missing cells for the
//! rows of the other side; a column slot empty on both sides stays empty.

use crate::frame::Frame;
use keyframe_core::{AppendPolicy, Axis, Result, VectorCommand};
use keyframe_index::IndexKey;
use keyframe_vector::{Column, Vector, VectorBuilder};
use tracing::debug;

impl<R: IndexKey, C: IndexKey> Frame<R, C> {
    /// Stack `other` below this frame, keeping repeated row keys
    ///
    /// # Errors
    ///
    /// Only fails on inconsistent input frames.
    pub fn append(&self, other: &Self) -> Result<Self> {
        self.append_with(other, AppendPolicy::KeepDuplicates)
    }

    /// Stack `other` below this frame
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRowKey`](keyframe_core::Error::DuplicateRowKey) under
    /// [`AppendPolicy::LeftOrRight`] when a row key is in both frames.
    pub fn append_with(&self, other: &Self, policy: AppendPolicy) -> Result<Self> {
        let (row_index, row_command) = self.row_index().append(
            other.row_index(),
            VectorCommand::Return(0),
            VectorCommand::Return(1),
            policy,
            Axis::Rows,
        )?;
        let (column_index, left, right) = self.column_index().union(
            other.column_index(),
            VectorCommand::identity(),
            VectorCommand::identity(),
        )?;

        let builder = VectorBuilder::new();
        let left = builder.build(&left, std::slice::from_ref(self.data()))?;
        let right = builder.build(&right, std::slice::from_ref(other.data()))?;
        let (top, bottom) = (self.row_count(), other.row_count());

        let data = left
            .iter_optional()
            .zip(right.iter_optional())
            .map(|pair| {
                let halves = match pair {
                    (Some(l), Some(r)) => [l.clone(), r.clone()],
                    (Some(l), None) => [l.clone(), l.missing_like(bottom)],
                    (None, Some(r)) => [r.missing_like(top), r.clone()],
                    (None, None) => return Ok(None),
                };
                builder.build_column(&row_command, &halves).map(Some)
            })
            .collect::<Result<Vec<Option<Column>>>>()?;

        debug!(
            target: "keyframe::frame",
            top,
            bottom,
            columns = column_index.len(),
            ?policy,
            "append"
        );
        Ok(Frame::from_parts(row_index, column_index, Vector::from_optional(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyframe_core::{Error, Value};
    use keyframe_index::KeyIndex;

    fn frame(rows: Vec<i32>, columns: Vec<(&'static str, Column)>) -> Frame<i32, &'static str> {
        Frame::from_columns(KeyIndex::new(rows), columns).unwrap()
    }

    fn values(frame: &Frame<i32, &'static str>, key: &'static str) -> Vec<Option<Value>> {
        frame.get_column(&key).unwrap().column().iter_values().collect()
    }

    #[test]
    fn test_append_stacks_shared_column() {
        let a = frame(vec![0, 1, 2], vec![("x", Column::from(vec![10_i64, 20, 30]))]);
        let b = frame(vec![2, 3], vec![("x", Column::from(vec![300_i64, 400]))]);
        let stacked = a.append(&b).unwrap();

        assert_eq!(stacked.row_keys(), &[0, 1, 2, 2, 3]);
        assert_eq!(stacked.column_keys(), &["x"]);
        assert_eq!(
            values(&stacked, "x"),
            [10, 20, 30, 300, 400].into_iter().map(|v| Some(Value::Int(v))).collect::<Vec<_>>()
        );
        assert_eq!(stacked.get_column(&"x").unwrap().kind(), keyframe_core::ValueKind::Int);
    }

    #[test]
    fn test_append_pads_one_sided_columns() {
        let a = frame(vec![0], vec![("x", Column::from(vec![1_i64]))]);
        let b = frame(vec![1, 2], vec![("y", Column::from(vec![true, false]))]);
        let stacked = a.append(&b).unwrap();

        assert_eq!(stacked.column_keys(), &["x", "y"]);
        assert_eq!(values(&stacked, "x"), vec![Some(Value::Int(1)), None, None]);
        assert_eq!(
            values(&stacked, "y"),
            vec![None, Some(Value::Bool(true)), Some(Value::Bool(false))]
        );
    }

    #[test]
    fn test_append_keeps_empty_slots_empty() {
        let a = Frame::new(KeyIndex::new(vec![0]), KeyIndex::new(vec!["gone"]), Vector::missing(1)).unwrap();
        let b = frame(vec![1], vec![]);
        let stacked = a.append(&b).unwrap();
        assert!(matches!(stacked.get_column(&"gone"), Err(Error::ColumnHasNoValue(_))));
    }

    #[test]
    fn test_append_boxes_mixed_kinds() {
        let a = frame(vec![0], vec![("v", Column::from(vec![1_i64]))]);
        let b = frame(vec![1], vec![("v", Column::from(vec!["one".to_string()]))]);
        let stacked = a.append(&b).unwrap();
        assert_eq!(
            values(&stacked, "v"),
            vec![Some(Value::Int(1)), Some(Value::from("one"))]
        );
    }

    #[test]
    fn test_append_left_or_right_rejects_shared_rows() {
        let a = frame(vec![0, 1], vec![]);
        let b = frame(vec![1], vec![]);
        assert!(matches!(
            a.append_with(&b, AppendPolicy::LeftOrRight),
            Err(Error::DuplicateRowKey(_))
        ));
    }

    #[test]
    fn test_append_to_empty_frame() {
        let b = frame(vec![4, 5], vec![("x", Column::from(vec![1_i64, 2]))]);
        let stacked = Frame::empty().append(&b).unwrap();
        assert_eq!(stacked, b);
    }
}
