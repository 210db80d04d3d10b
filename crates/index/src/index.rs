//! Key index
//!
//! A [`KeyIndex`] is created once from a key sequence and never mutated:
//! every transformation in [`crate::builder`] returns a new index. Clones
//! share the same allocation, so any number of frames and series can hold
//! the same index.
//!
//! # Ordering
//!
//! An index is *ordered* when its keys are strictly increasing in address
//! order. Only ordered indices answer range restrictions and nearest-key
//! lookups; those operations fail with [`Error::OrderingRequired`] elsewhere
//! (or, for a plain [`KeyIndex::lookup`], fall back to an exact match).
//!
//! # Duplicates
//!
//! Row appends may keep the same key twice. Such an index is never ordered,
//! and a lookup of a repeated key returns its first address. Union,
//! intersection and reindexing from it would have to pick one occurrence,
//! so they fail with [`Error::DuplicateRowKey`] instead.

use keyframe_core::{Address, Error, Lookup, Result};
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Bound satisfied by every key type an index can hold
///
/// Keys are owned (`'static`) so lazy projections can hold indices
/// without borrowing from the frame they came from.
pub trait IndexKey: Clone + Eq + Hash + Ord + Debug + 'static {}

impl<T> IndexKey for T where T: Clone + Eq + Hash + Ord + Debug + 'static {}

#[derive(Debug)]
struct IndexInner<K> {
    /// Keys in address order
    keys: Vec<K>,
    /// Key -> first address holding it
    lookup: FxHashMap<K, Address>,
    ordered: bool,
}

/// Immutable, shared mapping from keys to addresses
#[derive(Debug)]
pub struct KeyIndex<K> {
    inner: Arc<IndexInner<K>>,
}

impl<K> Clone for KeyIndex<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: IndexKey> PartialEq for KeyIndex<K> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.inner.ordered == other.inner.ordered && self.inner.keys == other.inner.keys)
    }
}

impl<K: IndexKey> Eq for KeyIndex<K> {}

impl<K: IndexKey> Default for KeyIndex<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: IndexKey> KeyIndex<K> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Index over `keys` in the given order
    ///
    /// The index is ordered iff the keys are strictly increasing.
    pub fn new<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let keys: Vec<K> = keys.into_iter().collect();
        let ordered = keys.windows(2).all(|w| w[0] < w[1]);
        Self::from_parts(keys, ordered)
    }

    /// Index over `keys` whose order carries no meaning
    pub fn unordered<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self::from_parts(keys.into_iter().collect(), false)
    }

    /// Ordered index over the sorted, deduplicated `keys`
    pub fn sorted<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();
        Self::from_parts(keys, true)
    }

    /// Index with no keys
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), true)
    }

    pub(crate) fn from_parts(keys: Vec<K>, ordered: bool) -> Self {
        let mut lookup = FxHashMap::with_capacity_and_hasher(keys.len(), Default::default());
        for (i, key) in keys.iter().enumerate() {
            lookup.entry(key.clone()).or_insert(Address::new(i));
        }
        Self {
            inner: Arc::new(IndexInner {
                keys,
                lookup,
                ordered,
            }),
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Keys in address order
    pub fn keys(&self) -> &[K] {
        &self.inner.keys
    }

    /// Number of keys (the size of the address space)
    pub fn len(&self) -> usize {
        self.inner.keys.len()
    }

    /// Whether the index has no keys
    pub fn is_empty(&self) -> bool {
        self.inner.keys.is_empty()
    }

    /// Whether key order is meaningful for ranges and nearest lookups
    pub fn is_ordered(&self) -> bool {
        self.inner.ordered
    }

    /// Whether every key appears once
    pub fn is_unique(&self) -> bool {
        self.inner.lookup.len() == self.inner.keys.len()
    }

    /// Key whose repeat sits at the lowest address
    pub fn first_duplicate(&self) -> Option<&K> {
        if self.is_unique() {
            return None;
        }
        self.mappings()
            .find(|(k, a)| self.locate(k) != Some(*a))
            .map(|(k, _)| k)
    }

    /// Whether both handles share the same index
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Key stored at `address`
    pub fn key_at(&self, address: Address) -> Option<&K> {
        self.inner.keys.get(address.index())
    }

    /// Exact address of `key`
    pub fn locate(&self, key: &K) -> Option<Address> {
        self.inner.lookup.get(key).copied()
    }

    /// Whether `key` is in the index
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lookup.contains_key(key)
    }

    /// Address of `key` under `policy`
    ///
    /// Absent keys give `None` under [`Lookup::Exact`]. The nearest
    /// policies search the sorted keys of an ordered index; on an unordered
    /// index they behave as `Exact`.
    pub fn lookup(&self, key: &K, policy: Lookup) -> Option<Address> {
        if let Some(address) = self.locate(key) {
            return Some(address);
        }
        if !self.inner.ordered {
            return None;
        }
        let keys = &self.inner.keys;
        match policy {
            Lookup::Exact => None,
            Lookup::ExactOrGreater => {
                let i = keys.partition_point(|k| k < key);
                (i < keys.len()).then(|| Address::new(i))
            }
            Lookup::ExactOrSmaller => {
                let i = keys.partition_point(|k| k <= key);
                (i > 0).then(|| Address::new(i - 1))
            }
        }
    }

    /// Key/address pairs in address order
    pub fn mappings(&self) -> impl Iterator<Item = (&K, Address)> + '_ {
        self.inner
            .keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k, Address::new(i)))
    }

    /// Every address of the index
    pub fn addresses(&self) -> impl Iterator<Item = Address> + Clone {
        Address::range(self.len())
    }

    /// Smallest and largest key of an ordered index, `None` when empty
    pub fn key_range(&self) -> Result<Option<(&K, &K)>> {
        if !self.inner.ordered {
            return Err(Error::ordering_required("key range"));
        }
        Ok(self.inner.keys.first().zip(self.inner.keys.last()))
    }
}
