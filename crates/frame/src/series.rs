//! Series: one column seen through a key index

use keyframe_core::{Address, Error, Lookup, Result, Value, ValueKind, VectorCommand};
use keyframe_index::{IndexKey, KeyIndex};
use keyframe_vector::{Column, VectorBuilder};

/// A column paired with the index that addresses it
///
/// Cells are read boxed as [`Value`]; the column underneath stays typed.
#[derive(Debug, Clone)]
pub struct Series<K> {
    index: KeyIndex<K>,
    column: Column,
}

impl<K: IndexKey> PartialEq for Series<K> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.column == other.column
    }
}

impl<K: IndexKey> Series<K> {
    /// Pair `column` with `index`
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the column does not have one slot per key.
    pub fn new(index: KeyIndex<K>, column: Column) -> Result<Self> {
        if column.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: column.len(),
            });
        }
        Ok(Self::from_parts(index, column))
    }

    pub(crate) fn from_parts(index: KeyIndex<K>, column: Column) -> Self {
        Self { index, column }
    }

    /// Index of the series
    pub fn index(&self) -> &KeyIndex<K> {
        &self.index
    }

    /// Underlying typed column
    pub fn column(&self) -> &Column {
        &self.column
    }

    /// Keys in address order
    pub fn keys(&self) -> &[K] {
        self.index.keys()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the series has no keys
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Element kind of the column
    pub fn kind(&self) -> ValueKind {
        self.column.kind()
    }

    /// Value for `key`; `None` if the key is absent or the cell is missing
    pub fn get(&self, key: &K) -> Option<Value> {
        self.index.locate(key).and_then(|a| self.column.get_value(a))
    }

    /// Value for `key`, distinguishing an absent key from a missing cell
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when the key is not in the index.
    pub fn try_get(&self, key: &K) -> Result<Option<Value>> {
        let address = self.index.locate(key).ok_or_else(|| Error::key_not_found(key))?;
        Ok(self.column.get_value(address))
    }

    /// Value for `key` under a nearest-key policy
    pub fn lookup(&self, key: &K, policy: Lookup) -> Option<Value> {
        self.index
            .lookup(key, policy)
            .and_then(|a| self.column.get_value(a))
    }

    /// Value at a physical address
    pub fn get_at(&self, address: Address) -> Option<Value> {
        self.column.get_value(address)
    }

    /// Present values with their keys, in address order
    pub fn observations(&self) -> impl Iterator<Item = (&K, Value)> + '_ {
        self.index
            .mappings()
            .filter_map(|(k, a)| self.column.get_value(a).map(|v| (k, v)))
    }

    /// Every cell in address order, missing ones as `None`
    pub fn values(&self) -> impl Iterator<Item = Option<Value>> + '_ {
        self.column.iter_values()
    }

    /// Whether every key has a value
    pub fn is_dense(&self) -> bool {
        self.column.is_dense()
    }

    /// This series realigned onto `target`'s keys
    ///
    /// # Errors
    ///
    /// [`Error::OrderingRequired`] for a nearest-key policy on an unordered
    /// index;
    /// [`Error::DuplicateRowKey`] when this index repeats a key.
    pub fn reindex(&self, target: &KeyIndex<K>, policy: Lookup) -> Result<Series<K>> {
        let command = self
            .index
            .reindex(target, policy, VectorCommand::identity())?;
        let column = VectorBuilder::new().build_column(&command, std::slice::from_ref(&self.column))?;
        Ok(Self::from_parts(target.clone(), column))
    }

    /// Keys within `[min, max]`
    ///
    /// # Errors
    ///
    /// [`Error::OrderingRequired`] on an unordered index.
    pub fn get_range(&self, min: Option<&K>, max: Option<&K>) -> Result<Series<K>> {
        let (index, command) = self
            .index
            .get_range(min, max, VectorCommand::identity())?;
        let column = VectorBuilder::new().build_column(&command, std::slice::from_ref(&self.column))?;
        Ok(Self::from_parts(index, column))
    }
}
