//! Typed column store
//!
//! A [`Vector<T>`] is the physical storage of one column: a fixed-length
//! sequence of `Option<T>` addressed by [`Address`]. It is immutable once
//! built and shared by reference count, so frames produced by
//! non-destructive operations reuse the same allocation.

use keyframe_core::Address;
use std::fmt;
use std::sync::Arc;

/// Immutable sequence of optional values
pub struct Vector<T> {
    data: Arc<[Option<T>]>,
}

impl<T> Vector<T> {
    /// Build from present values only
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_optional(values.into_iter().map(Some))
    }

    /// Build from optional values; `None` marks a missing cell
    pub fn from_optional<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        Self {
            data: values.into_iter().collect(),
        }
    }

    /// A vector of `len` missing cells
    pub fn missing(len: usize) -> Self {
        Self::from_optional((0..len).map(|_| None))
    }

    /// Number of slots, present or missing
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no slots
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `address`; `None` if missing or out of range
    pub fn get(&self, address: Address) -> Option<&T> {
        self.data.get(address.index()).and_then(Option::as_ref)
    }

    /// Whether `address` is a slot of this vector
    pub fn contains_address(&self, address: Address) -> bool {
        address.index() < self.data.len()
    }

    /// All slots in address order
    pub fn iter_optional(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.data.iter().map(Option::as_ref)
    }

    /// Present values with their addresses
    pub fn observations(&self) -> impl Iterator<Item = (Address, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (Address::new(i), v)))
    }

    /// Element-type preserving map over present values
    pub fn map<U, F>(&self, f: F) -> Vector<U>
    where
        F: Fn(&T) -> U,
    {
        Vector::from_optional(self.iter_optional().map(|v| v.map(&f)))
    }

    /// Map over every slot, missing ones included
    pub fn map_optional<U, F>(&self, f: F) -> Vector<U>
    where
        F: Fn(Option<&T>) -> Option<U>,
    {
        Vector::from_optional(self.iter_optional().map(f))
    }

    /// Number of present values
    pub fn present_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_some()).count()
    }

    /// Whether every slot holds a value
    pub fn is_dense(&self) -> bool {
        self.data.iter().all(Option::is_some)
    }

    /// Whether both vectors share the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Clone> Vector<T> {
    /// Copy out the slots as owned optional values
    pub fn to_optional_vec(&self) -> Vec<Option<T>> {
        self.data.to_vec()
    }
}

impl<T> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::missing(0)
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.data[..] == other.data[..]
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> FromIterator<Option<T>> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self::from_optional(iter)
    }
}
