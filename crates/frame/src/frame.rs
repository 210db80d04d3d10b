//! Frame: row index × column index × columns
//!
//! ## Invariants
//!
//! - `data.len() == column_index.len()`: one slot per column address
//! - every present column has `row_index.len()` slots
//! - a column slot may hold no column (sparse frames after joins/appends)
//!
//! Frames are values. Every edit below returns a new frame built from the
//! old one's shared parts; the receiver is never modified. Use
//! [`FrameHandle`](crate::FrameHandle) for an owner that swaps frames in place.

use crate::row::VirtualRow;
use crate::series::Series;
use keyframe_core::{Address, AppendPolicy, Axis, Error, Lookup, Result, Value, VectorCommand};
use keyframe_index::{IndexKey, KeyIndex};
use keyframe_vector::{Column, Vector, VectorBuilder};

/// Columnar table addressed by row keys `R` and column keys `C`
#[derive(Debug, Clone)]
pub struct Frame<R, C> {
    row_index: KeyIndex<R>,
    column_index: KeyIndex<C>,
    data: Vector<Column>,
}

impl<R: IndexKey, C: IndexKey> PartialEq for Frame<R, C> {
    fn eq(&self, other: &Self) -> bool {
        self.row_index == other.row_index
            && self.column_index == other.column_index
            && self.data == other.data
    }
}

impl<R: IndexKey, C: IndexKey> Default for Frame<R, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: IndexKey, C: IndexKey> Frame<R, C> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Assemble a frame from its three parts
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateColumnKey`] when a column key repeats;
    /// [`Error::LengthMismatch`] when `data` does not have one slot per column
    /// key, or a column does not have one slot per row key.
    pub fn new(row_index: KeyIndex<R>, column_index: KeyIndex<C>, data: Vector<Column>) -> Result<Self> {
        if let Some(key) = column_index.first_duplicate() {
            return Err(Error::duplicate_key(Axis::Columns, key));
        }
        if data.len() != column_index.len() {
            return Err(Error::LengthMismatch {
                expected: column_index.len(),
                actual: data.len(),
            });
        }
        if let Some(column) = data.iter_optional().flatten().find(|c| c.len() != row_index.len()) {
            return Err(Error::LengthMismatch {
                expected: row_index.len(),
                actual: column.len(),
            });
        }
        Ok(Self::from_parts(row_index, column_index, data))
    }

    pub(crate) fn from_parts(row_index: KeyIndex<R>, column_index: KeyIndex<C>, data: Vector<Column>) -> Self {
        Self {
            row_index,
            column_index,
            data,
        }
    }

    /// Frame from keyed columns, in the given column order
    ///
    /// # Errors
    ///
    /// As [`Frame::new`].
    pub fn from_columns<I>(row_index: KeyIndex<R>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, Column)>,
    {
        let (keys, columns): (Vec<C>, Vec<Column>) = columns.into_iter().unzip();
        Self::new(row_index, KeyIndex::new(keys), Vector::from_values(columns))
    }

    /// Frame with no rows and no columns
    pub fn empty() -> Self {
        Self::from_parts(KeyIndex::empty(), KeyIndex::empty(), Vector::default())
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Row index
    pub fn row_index(&self) -> &KeyIndex<R> {
        &self.row_index
    }

    /// Column index
    pub fn column_index(&self) -> &KeyIndex<C> {
        &self.column_index
    }

    /// Column vector, one slot per column address
    pub fn data(&self) -> &Vector<Column> {
        &self.data
    }

    /// Row keys in address order
    pub fn row_keys(&self) -> &[R] {
        self.row_index.keys()
    }

    /// Column keys in address order
    pub fn column_keys(&self) -> &[C] {
        self.column_index.keys()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_index.len()
    }

    /// Number of column keys
    pub fn column_count(&self) -> usize {
        self.column_index.len()
    }

    /// Whether the frame has neither rows nor columns
    pub fn is_empty(&self) -> bool {
        self.row_index.is_empty() && self.column_index.is_empty()
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Column under `key`, viewed through the row index
    ///
    /// # Errors
    ///
    /// [`Error::ColumnNotFound`] when the key is not in the column index,
    /// [`Error::ColumnHasNoValue`] when its slot holds no column.
    pub fn get_column(&self, key: &C) -> Result<Series<R>> {
        let address = self
            .column_index
            .locate(key)
            .ok_or_else(|| Error::column_not_found(key))?;
        let column = self
            .data
            .get(address)
            .ok_or_else(|| Error::column_has_no_value(key))?;
        Ok(Series::from_parts(self.row_index.clone(), column.clone()))
    }

    /// Column under `key` if it exists and holds a column
    pub fn try_get_column(&self, key: &C) -> Option<Series<R>> {
        self.get_column(key).ok()
    }

    /// Lazy view of the row under `key`
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when the key is not in the row index.
    pub fn get_row(&self, key: &R) -> Result<VirtualRow<C>> {
        let address = self
            .row_index
            .locate(key)
            .ok_or_else(|| Error::key_not_found(key))?;
        Ok(self.row_at(address))
    }

    pub(crate) fn row_at(&self, address: Address) -> VirtualRow<C> {
        VirtualRow::new(address, self.column_index.clone(), self.data.clone())
    }

    /// Single cell
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] for an unknown row key, [`Error::ColumnNotFound`]
    /// for an unknown column key. A missing cell is `Ok(None)`.
    pub fn get_value(&self, row: &R, column: &C) -> Result<Option<Value>> {
        let row = self
            .row_index
            .locate(row)
            .ok_or_else(|| Error::key_not_found(row))?;
        let column = self
            .column_index
            .locate(column)
            .ok_or_else(|| Error::column_not_found(column))?;
        Ok(self.data.get(column).and_then(|c| c.get_value(row)))
    }

    // ========================================================================
    // Column edits
    // ========================================================================

    /// New frame with `column` added under `key` after the existing columns
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the column length differs from the row
    /// count, [`Error::DuplicateColumnKey`] if `key` is already a column.
    pub fn add_column(&self, key: C, column: Column) -> Result<Self> {
        self.check_length(&column)?;
        let (column_index, command) = self.column_index.append(
            &KeyIndex::new(vec![key]),
            VectorCommand::Return(0),
            VectorCommand::Return(1),
            AppendPolicy::LeftOrRight,
            Axis::Columns,
        )?;
        let data = VectorBuilder::new().build(&command, &[self.data.clone(), Vector::from_values(vec![column])])?;
        Ok(Self::from_parts(self.row_index.clone(), column_index, data))
    }

    /// New frame without the column under `key`
    ///
    /// # Errors
    ///
    /// [`Error::ColumnNotFound`] when the key is not a column.
    pub fn drop_column(&self, key: &C) -> Result<Self> {
        if !self.column_index.contains(key) {
            return Err(Error::column_not_found(key));
        }
        let (column_index, command) = self.column_index.drop_item(key, VectorCommand::identity())?;
        let data = VectorBuilder::new().build(&command, std::slice::from_ref(&self.data))?;
        Ok(Self::from_parts(self.row_index.clone(), column_index, data))
    }

    /// New frame with the column under `key` replaced, or added if absent
    ///
    /// A replaced column keeps its position.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the column length differs from the row
    /// count.
    pub fn replace_column(&self, key: C, column: Column) -> Result<Self> {
        let Some(address) = self.column_index.locate(&key) else {
            return self.add_column(key, column);
        };
        self.check_length(&column)?;
        let data = self
            .data
            .iter_optional()
            .enumerate()
            .map(|(i, c)| {
                if i == address.index() {
                    Some(column.clone())
                } else {
                    c.cloned()
                }
            })
            .collect();
        Ok(Self::from_parts(self.row_index.clone(), self.column_index.clone(), data))
    }

    fn check_length(&self, column: &Column) -> Result<()> {
        if column.len() != self.row_count() {
            return Err(Error::LengthMismatch {
                expected: self.row_count(),
                actual: column.len(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Row edits
    // ========================================================================

    /// New frame without the row under `key`
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when the key is not a row.
    pub fn drop_row(&self, key: &R) -> Result<Self> {
        let (row_index, command) = self.row_index.drop_item(key, VectorCommand::identity())?;
        self.with_rows(row_index, &command)
    }

    /// New frame with the rows whose keys fall in `[min, max]`
    ///
    /// # Errors
    ///
    /// [`Error::OrderingRequired`] when the row index is unordered.
    pub fn get_row_range(&self, min: Option<&R>, max: Option<&R>) -> Result<Self> {
        let (row_index, command) = self.row_index.get_range(min, max, VectorCommand::identity())?;
        self.with_rows(row_index, &command)
    }

    /// New frame realigned onto `target`'s row keys
    ///
    /// Target keys without a match (under `policy`) become missing rows.
    ///
    /// # Errors
    ///
    /// [`Error::OrderingRequired`] for a nearest-key policy on an unordered
    /// row index;
    /// [`Error::DuplicateRowKey`] when this index repeats a key.
    pub fn realign_rows(&self, target: &KeyIndex<R>, policy: Lookup) -> Result<Self> {
        let command = self.row_index.reindex(target, policy, VectorCommand::identity())?;
        self.with_rows(target.clone(), &command)
    }

    /// Apply a row command to every column
    fn with_rows(&self, row_index: KeyIndex<R>, command: &VectorCommand) -> Result<Self> {
        let data = VectorBuilder::new().build_columns(command, &self.data)?;
        Ok(Self::from_parts(row_index, self.column_index.clone(), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame<i32, &'static str> {
        Frame::from_columns(
            KeyIndex::new(vec![0, 1, 2]),
            vec![
                ("x", Column::from(vec![10_i64, 20, 30])),
                ("name", Column::from(vec![Some("a".to_string()), None, Some("c".to_string())])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_validates_lengths() {
        let rows = KeyIndex::new(vec![0, 1]);
        let cols = KeyIndex::new(vec!["a"]);
        let short = Vector::from_values(vec![Column::from(vec![1_i64])]);
        assert!(matches!(
            Frame::new(rows.clone(), cols.clone(), short),
            Err(Error::LengthMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            Frame::new(rows, cols, Vector::missing(3)),
            Err(Error::LengthMismatch { expected: 1, actual: 3 })
        ));
    }

    #[test]
    fn test_from_columns_rejects_duplicate_keys() {
        let err = Frame::from_columns(
            KeyIndex::new(vec![0]),
            vec![("a", Column::from(vec![1_i64])), ("a", Column::from(vec![2_i64]))],
        )
        .unwrap_err();
        assert_eq!(err, Error::DuplicateColumnKey("\"a\"".to_string()));
    }

    #[test]
    fn test_new_rejects_duplicate_column_keys() {
        let columns = Vector::from_values(vec![Column::from(vec![1_i64]), Column::from(vec![2_i64])]);
        let err = Frame::<i32, &str>::new(KeyIndex::new(vec![0]), KeyIndex::unordered(vec!["b", "b"]), columns)
            .unwrap_err();
        assert_eq!(err, Error::DuplicateColumnKey("\"b\"".to_string()));

        // Repeated row keys stay legal.
        let frame = Frame::new(
            KeyIndex::new(vec![0, 0]),
            KeyIndex::new(vec!["b"]),
            Vector::from_values(vec![Column::from(vec![1_i64, 2])]),
        )
        .unwrap();
        assert_eq!(frame.row_keys(), &[0, 0]);
    }

    #[test]
    fn test_get_column_errors_are_distinct() {
        let frame = Frame::new(
            KeyIndex::new(vec![0]),
            KeyIndex::new(vec!["empty"]),
            Vector::missing(1),
        )
        .unwrap();
        assert!(matches!(frame.get_column(&"nope"), Err(Error::ColumnNotFound(_))));
        assert!(matches!(frame.get_column(&"empty"), Err(Error::ColumnHasNoValue(_))));
        assert!(frame.try_get_column(&"empty").is_none());
    }

    #[test]
    fn test_get_row_and_value() {
        let frame = sample();
        let row = frame.get_row(&1).unwrap();
        assert_eq!(row.get(&"x"), Some(Value::Int(20)));
        assert_eq!(row.get(&"name"), None);
        assert!(matches!(frame.get_row(&9), Err(Error::KeyNotFound(_))));

        assert_eq!(frame.get_value(&2, &"name").unwrap(), Some(Value::from("c")));
        assert!(matches!(frame.get_value(&2, &"zzz"), Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_add_column_is_copy_on_write() {
        let frame = sample();
        let added = frame.add_column("flag", Column::from(vec![true, false, true])).unwrap();
        assert_eq!(frame.column_count(), 2);
        assert_eq!(added.column_keys(), &["x", "name", "flag"]);
        assert!(added.row_index().ptr_eq(frame.row_index()));
        assert!(added
            .get_column(&"x")
            .unwrap()
            .column()
            .ptr_eq(frame.get_column(&"x").unwrap().column()));
    }

    #[test]
    fn test_add_column_errors() {
        let frame = sample();
        assert!(matches!(
            frame.add_column("x", Column::from(vec![1_i64, 2, 3])),
            Err(Error::DuplicateColumnKey(_))
        ));
        assert!(matches!(
            frame.add_column("short", Column::from(vec![1_i64])),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_drop_and_replace_column() {
        let frame = sample();
        let dropped = frame.drop_column(&"x").unwrap();
        assert_eq!(dropped.column_keys(), &["name"]);
        assert!(matches!(frame.drop_column(&"x2"), Err(Error::ColumnNotFound(_))));

        let replaced = frame.replace_column("x", Column::from(vec![1.0_f64, 2.0, 3.0])).unwrap();
        assert_eq!(replaced.column_keys(), &["x", "name"]);
        assert_eq!(replaced.get_value(&0, &"x").unwrap(), Some(Value::Float(1.0)));

        let appended = frame.replace_column("y", Column::from(vec![7_i64, 8, 9])).unwrap();
        assert_eq!(appended.column_count(), 3);
    }

    #[test]
    fn test_row_edits() {
        let frame = sample();
        let dropped = frame.drop_row(&1).unwrap();
        assert_eq!(dropped.row_keys(), &[0, 2]);
        assert_eq!(dropped.get_value(&2, &"x").unwrap(), Some(Value::Int(30)));

        let ranged = frame.get_row_range(Some(&1), None).unwrap();
        assert_eq!(ranged.row_keys(), &[1, 2]);

        let realigned = frame
            .realign_rows(&KeyIndex::new(vec![2, 5]), Lookup::Exact)
            .unwrap();
        assert_eq!(realigned.get_value(&2, &"x").unwrap(), Some(Value::Int(30)));
        assert_eq!(realigned.get_value(&5, &"x").unwrap(), None);
    }
}
