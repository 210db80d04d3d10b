//! Virtual row vector
//!
//! A frame stores columns, so reading a row means visiting every column at
//! one row address. [`VirtualRow`] does that on demand instead of
//! transposing the frame:
//!
//! - `Unmaterialized`: holds the row address plus shared handles to the
//!   column index and column data; each read dispatches to one column.
//! - `Materialized`: the first full pass ([`VirtualRow::data`], `select`,
//!   `select_optional`) caches every cell; later reads hit the cache.
//!
//! The transition happens once and never reverses. It changes cost, not
//! results. The cache is local to one row value and not shared across
//! threads.

use keyframe_core::{Address, Error, Result, Value};
use keyframe_index::{IndexKey, KeyIndex};
use keyframe_vector::{Column, Vector};
use once_cell::unsync::OnceCell;
use tracing::trace;

/// Materialization state of a [`VirtualRow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Reads dispatch to the frame's columns
    Unmaterialized,
    /// Reads are served from the row's own cache
    Materialized,
}

/// Lazy view of one frame row, addressed by column
#[derive(Debug, Clone)]
pub struct VirtualRow<C> {
    row: Address,
    columns: KeyIndex<C>,
    data: Vector<Column>,
    cache: OnceCell<Vec<Option<Value>>>,
}

impl<C: IndexKey> VirtualRow<C> {
    pub(crate) fn new(row: Address, columns: KeyIndex<C>, data: Vector<Column>) -> Self {
        Self {
            row,
            columns,
            data,
            cache: OnceCell::new(),
        }
    }

    /// Row address inside the frame's columns
    pub fn address(&self) -> Address {
        self.row
    }

    /// Column index the row is keyed by
    pub fn column_index(&self) -> &KeyIndex<C> {
        &self.columns
    }

    /// Number of cells (one per column key)
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Current materialization state
    pub fn state(&self) -> RowState {
        if self.cache.get().is_some() {
            RowState::Materialized
        } else {
            RowState::Unmaterialized
        }
    }

    /// Whether the cache has been filled
    pub fn is_materialized(&self) -> bool {
        self.state() == RowState::Materialized
    }

    /// Cell at a column address
    ///
    /// Missing when the column slot holds no column or the column has no
    /// value at this row.
    pub fn get_value(&self, column: Address) -> Option<Value> {
        match self.cache.get() {
            Some(values) => values.get(column.index()).cloned().flatten(),
            None => self.fetch(column),
        }
    }

    /// Cell under a column key; `None` also for unknown keys
    pub fn get(&self, key: &C) -> Option<Value> {
        self.columns.locate(key).and_then(|a| self.get_value(a))
    }

    /// Cell under a column key
    ///
    /// # Errors
    ///
    /// [`Error::ColumnNotFound`] when the key is not a column of the frame.
    pub fn try_get(&self, key: &C) -> Result<Option<Value>> {
        let address = self
            .columns
            .locate(key)
            .ok_or_else(|| Error::column_not_found(key))?;
        Ok(self.get_value(address))
    }

    fn fetch(&self, column: Address) -> Option<Value> {
        self.data.get(column).and_then(|c| c.get_value(self.row))
    }

    /// Every cell in column-address order, materializing the row
    pub fn data(&self) -> &[Option<Value>] {
        self.cache.get_or_init(|| {
            trace!(target: "keyframe::row", row = %self.row, columns = self.columns.len(), "materialize");
            self.columns.addresses().map(|a| self.fetch(a)).collect()
        })
    }

    /// Map every present cell; missing cells stay missing
    pub fn select<U, F>(&self, f: F) -> Vec<Option<U>>
    where
        F: Fn(&Value) -> U,
    {
        self.data().iter().map(|v| v.as_ref().map(&f)).collect()
    }

    /// Map every cell, missing ones included
    pub fn select_optional<U, F>(&self, f: F) -> Vec<Option<U>>
    where
        F: Fn(Option<&Value>) -> Option<U>,
    {
        self.data().iter().map(|v| f(v.as_ref())).collect()
    }

    /// Present cells with their column keys
    pub fn observations(&self) -> impl Iterator<Item = (&C, &Value)> + '_ {
        self.columns
            .keys()
            .iter()
            .zip(self.data())
            .filter_map(|(k, v)| v.as_ref().map(|v| (k, v)))
    }

    /// Whether every column has a value at this row
    ///
    /// Scans all columns without materializing.
    pub fn is_dense(&self) -> bool {
        match self.cache.get() {
            Some(values) => values.iter().all(Option::is_some),
            None => self
                .columns
                .addresses()
                .all(|a| self.data.get(a).map_or(false, |c| c.is_present(self.row))),
        }
    }

    /// The materialized row as a boxed column
    pub fn to_column(&self) -> Column {
        Column::Value(Vector::from_optional(self.data().to_vec()))
    }
}
