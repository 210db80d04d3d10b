//! Index algebra
//!
//! Set and relational operations over [`KeyIndex`]. Each operation takes the
//! command(s) producing the vectors attached to its inputs and returns the new
//! index with command(s) producing vectors attached to it:
//!
//! | Operation    | Keys                                   | Commands returned      |
//! |--------------|----------------------------------------|------------------------|
//! | `union`      | set union                              | one per side           |
//! | `intersect`  | keys present on both sides             | one per side           |
//! | `append`     | concatenation                          | one combined           |
//! | `reindex`    | the target's keys                      | one                    |
//! | `drop_item`  | all but one key                        | one                    |
//! | `get_range`  | keys within inclusive bounds           | one                    |
//!
//! Inputs are never modified. When an operation leaves the address space
//! unchanged the caller's command is returned as is, so no column is copied.
//!
//! `union`, `intersect` and `reindex` match keys one-to-one. An input that
//! holds a key more than once (the source side, for `reindex`) fails with
//! [`Error::DuplicateRowKey`]; only row appends produce such indices.

use crate::index::{IndexKey, KeyIndex};
use keyframe_core::{Address, AppendPolicy, Axis, Error, Lookup, Result, VectorCommand, VectorMerge};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use tracing::debug;

impl<K: IndexKey> KeyIndex<K> {
    /// Union of two indices
    ///
    /// A key present on both sides gets one address in the result and both
    /// returned commands route to it. Two ordered inputs give an ordered
    /// result; otherwise this side's keys come first, followed by the other
    /// side's new keys in their order.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRowKey`] when either side repeats a key.
    pub fn union(
        &self,
        other: &KeyIndex<K>,
        left: VectorCommand,
        right: VectorCommand,
    ) -> Result<(KeyIndex<K>, VectorCommand, VectorCommand)> {
        self.ensure_unique()?;
        other.ensure_unique()?;
        if self == other {
            return Ok((self.clone(), left, right));
        }

        let (index, left_map) = if self.is_ordered() && other.is_ordered() {
            let index = KeyIndex::from_parts(merge_sorted(self.keys(), other.keys()), true);
            let left_map: Vec<Option<Address>> =
                index.keys().iter().map(|k| self.locate(k)).collect();
            (index, left_map)
        } else {
            let mut seen: FxHashSet<&K> = FxHashSet::default();
            let mut keys = self.keys().to_vec();
            for key in other.keys() {
                if !self.contains(key) && seen.insert(key) {
                    keys.push(key.clone());
                }
            }
            let left_map: Vec<Option<Address>> = self
                .addresses()
                .map(Some)
                .chain(std::iter::repeat(None))
                .take(keys.len())
                .collect();
            (KeyIndex::from_parts(keys, false), left_map)
        };
        let right_map = index.keys().iter().map(|k| other.locate(k)).collect();

        debug!(
            target: "keyframe::index",
            left = self.len(),
            right = other.len(),
            result = index.len(),
            "union"
        );
        Ok((
            index,
            VectorCommand::relocate(left, left_map),
            VectorCommand::relocate(right, right_map),
        ))
    }

    /// Intersection of two indices, in this side's key order
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRowKey`] when either side repeats a key.
    pub fn intersect(
        &self,
        other: &KeyIndex<K>,
        left: VectorCommand,
        right: VectorCommand,
    ) -> Result<(KeyIndex<K>, VectorCommand, VectorCommand)> {
        self.ensure_unique()?;
        other.ensure_unique()?;
        if self == other {
            return Ok((self.clone(), left, right));
        }

        let mut keys = Vec::new();
        let mut left_map = Vec::new();
        let mut right_map = Vec::new();
        for (key, address) in self.mappings() {
            if let Some(found) = other.locate(key) {
                keys.push(key.clone());
                left_map.push(Some(address));
                right_map.push(Some(found));
            }
        }

        debug!(
            target: "keyframe::index",
            left = self.len(),
            right = other.len(),
            result = keys.len(),
            "intersect"
        );
        Ok((
            KeyIndex::from_parts(keys, self.is_ordered()),
            VectorCommand::relocate(left, left_map),
            VectorCommand::relocate(right, right_map),
        ))
    }

    /// Concatenate the other side's keys after this side's
    ///
    /// The returned command combines the left vector, placed at the first
    /// `self.len()` addresses, with the right vector placed after it.
    ///
    /// # Errors
    ///
    /// Under [`AppendPolicy::LeftOrRight`] a key present on both sides fails
    /// with the duplicate-key error of `axis`.
    pub fn append(
        &self,
        other: &KeyIndex<K>,
        left: VectorCommand,
        right: VectorCommand,
        policy: AppendPolicy,
        axis: Axis,
    ) -> Result<(KeyIndex<K>, VectorCommand)> {
        if policy == AppendPolicy::LeftOrRight {
            if let Some(key) = other.keys().iter().find(|k| self.contains(k)) {
                return Err(Error::duplicate_key(axis, key));
            }
        }
        if other.is_empty() {
            return Ok((self.clone(), left));
        }
        if self.is_empty() {
            return Ok((other.clone(), right));
        }

        let (n1, n2) = (self.len(), other.len());
        let ordered = self.is_ordered()
            && other.is_ordered()
            && matches!(
                (self.keys().last(), other.keys().first()),
                (Some(a), Some(b)) if a < b
            );
        let keys: Vec<K> = self.keys().iter().chain(other.keys()).cloned().collect();

        let left_map = self
            .addresses()
            .map(Some)
            .chain(std::iter::repeat(None).take(n2))
            .collect();
        let right_map = std::iter::repeat(None)
            .take(n1)
            .chain(other.addresses().map(Some))
            .collect();
        let command = VectorCommand::combine(
            VectorCommand::relocate(left, left_map),
            VectorCommand::relocate(right, right_map),
            VectorMerge::PreferLeft,
        );

        debug!(target: "keyframe::index", left = n1, right = n2, ?policy, "append");
        Ok((KeyIndex::from_parts(keys, ordered), command))
    }

    /// Command moving vectors attached to this index onto `target`
    ///
    /// Every key of `target` is looked up here under `policy`; keys with no
    /// match produce missing values.
    ///
    /// # Errors
    ///
    /// [`Error::OrderingRequired`] when `policy` is a nearest-key policy and
    /// this index is not ordered, [`Error::DuplicateRowKey`] when this index
    /// repeats a key. Repeated keys in `target` are fine.
    pub fn reindex(
        &self,
        target: &KeyIndex<K>,
        policy: Lookup,
        command: VectorCommand,
    ) -> Result<VectorCommand> {
        self.ensure_unique()?;
        if policy.is_nearest() && !self.is_ordered() {
            return Err(Error::ordering_required("reindex with nearest-key lookup"));
        }
        if policy == Lookup::Exact && self == target {
            return Ok(command);
        }

        let mapping = target
            .keys()
            .iter()
            .map(|k| self.lookup(k, policy))
            .collect();
        debug!(
            target: "keyframe::index",
            source_len = self.len(),
            target_len = target.len(),
            ?policy,
            "reindex"
        );
        Ok(VectorCommand::relocate(command, mapping))
    }

    /// Remove `key` (its first occurrence)
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when the key is absent.
    pub fn drop_item(&self, key: &K, command: VectorCommand) -> Result<(KeyIndex<K>, VectorCommand)> {
        let dropped = self.locate(key).ok_or_else(|| Error::key_not_found(key))?;

        let (keys, mapping): (Vec<K>, Vec<Option<Address>>) = self
            .mappings()
            .filter(|(_, address)| *address != dropped)
            .map(|(k, address)| (k.clone(), Some(address)))
            .unzip();

        Ok((
            KeyIndex::from_parts(keys, self.is_ordered()),
            VectorCommand::relocate(command, mapping),
        ))
    }

    fn ensure_unique(&self) -> Result<()> {
        match self.first_duplicate() {
            Some(key) => Err(Error::duplicate_key(Axis::Rows, key)),
            None => Ok(()),
        }
    }

    /// Keys within `[min, max]`; an absent bound leaves that side open
    ///
    /// # Errors
    ///
    /// [`Error::OrderingRequired`] on an unordered index.
    pub fn get_range(
        &self,
        min: Option<&K>,
        max: Option<&K>,
        command: VectorCommand,
    ) -> Result<(KeyIndex<K>, VectorCommand)> {
        if !self.is_ordered() {
            return Err(Error::ordering_required("range restriction"));
        }

        let keys = self.keys();
        let start = min.map_or(0, |m| keys.partition_point(|k| k < m));
        let end = max.map_or(keys.len(), |m| keys.partition_point(|k| k <= m)).max(start);
        if start == 0 && end == keys.len() {
            return Ok((self.clone(), command));
        }

        Ok((
            KeyIndex::from_parts(keys[start..end].to_vec(), true),
            VectorCommand::restrict(command, Address::new(start), Address::new(end)),
        ))
    }
}

/// Merge two strictly increasing key lists, keeping shared keys once
fn merge_sorted<K: Ord + Clone>(left: &[K], right: &[K]) -> Vec<K> {
    let mut out = Vec::with_capacity(left.len().max(right.len()));
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            Ordering::Less => {
                out.push(left[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(right[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                out.push(left[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    out
}
