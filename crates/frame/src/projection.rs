//! Keyed projections of a frame
//!
//! `columns()` and `rows()` expose a frame as a sequence keyed by column or
//! row keys. Values are produced when read, so iterating the keys of
//! `rows()` never builds a [`VirtualRow`].
//!
//! The dense variants decide membership up front with a full scan,
//! O(rows x columns) per call and uncached. Callers that need a dense
//! projection repeatedly should keep the result.

use crate::frame::Frame;
use crate::row::VirtualRow;
use crate::series::Series;
use keyframe_core::Address;
use keyframe_index::{IndexKey, KeyIndex};
use keyframe_vector::Column;
use std::fmt;

/// Sequence of keys with values produced on demand
pub struct KeyedSeq<K, V> {
    index: KeyIndex<K>,
    /// Addresses of `index` included in the sequence, ascending
    addresses: Vec<Address>,
    produce: Box<dyn Fn(Address) -> Option<V>>,
}

impl<K: IndexKey, V> KeyedSeq<K, V> {
    pub(crate) fn new<F>(index: KeyIndex<K>, addresses: Vec<Address>, produce: F) -> Self
    where
        F: Fn(Address) -> Option<V> + 'static,
    {
        Self {
            index,
            addresses,
            produce: Box::new(produce),
        }
    }

    /// Number of keys in the sequence
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether the sequence has no keys
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Keys in sequence order; produces no values
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.addresses.iter().filter_map(|a| self.index.key_at(*a))
    }

    /// Whether `key` is part of the sequence
    pub fn contains(&self, key: &K) -> bool {
        self.address_of(key).is_some()
    }

    fn address_of(&self, key: &K) -> Option<Address> {
        self.index
            .locate(key)
            .filter(|a| self.addresses.binary_search(a).is_ok())
    }

    /// Produce the value under `key`
    pub fn get(&self, key: &K) -> Option<V> {
        self.address_of(key).and_then(|a| (self.produce)(a))
    }

    /// Produce every value with its key, in sequence order
    pub fn iter(&self) -> impl Iterator<Item = (&K, V)> + '_ {
        self.addresses.iter().filter_map(move |a| {
            let key = self.index.key_at(*a)?;
            (self.produce)(*a).map(|v| (key, v))
        })
    }
}

impl<K: fmt::Debug, V> fmt::Debug for KeyedSeq<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedSeq")
            .field("index", &self.index)
            .field("addresses", &self.addresses)
            .finish_non_exhaustive()
    }
}

impl<R: IndexKey, C: IndexKey> Frame<R, C> {
    /// Columns keyed by column key, each viewed through the row index
    ///
    /// Column keys whose slot holds no column are left out.
    pub fn columns(&self) -> KeyedSeq<C, Series<R>> {
        self.column_projection(|_| true)
    }

    /// Columns with a value in every row
    pub fn columns_dense(&self) -> KeyedSeq<C, Series<R>> {
        self.column_projection(|c| c.is_dense())
    }

    fn column_projection<P>(&self, keep: P) -> KeyedSeq<C, Series<R>>
    where
        P: Fn(&Column) -> bool,
    {
        let data = self.data().clone();
        let addresses = self
            .column_index()
            .addresses()
            .filter(|a| data.get(*a).map_or(false, &keep))
            .collect();
        let rows = self.row_index().clone();
        KeyedSeq::new(self.column_index().clone(), addresses, move |a| {
            data.get(a)
                .map(|column| Series::from_parts(rows.clone(), column.clone()))
        })
    }

    /// Rows keyed by row key; each row is built only when read
    pub fn rows(&self) -> KeyedSeq<R, VirtualRow<C>> {
        let addresses = self.row_index().addresses().collect();
        self.row_projection(addresses)
    }

    /// Rows with a value in every column
    pub fn rows_dense(&self) -> KeyedSeq<R, VirtualRow<C>> {
        let data = self.data();
        let columns = self.column_index();
        let addresses = self
            .row_index()
            .addresses()
            .filter(|row| {
                columns
                    .addresses()
                    .all(|c| data.get(c).map_or(false, |col| col.is_present(*row)))
            })
            .collect();
        self.row_projection(addresses)
    }

    fn row_projection(&self, addresses: Vec<Address>) -> KeyedSeq<R, VirtualRow<C>> {
        let columns = self.column_index().clone();
        let data = self.data().clone();
        KeyedSeq::new(self.row_index().clone(), addresses, move |a| {
            Some(VirtualRow::new(a, columns.clone(), data.clone()))
        })
    }
}
