//! Physical slot addresses
//!
//! An [`Address`] names one slot of a column vector (row axis) or of a
//! frame's data vector (column axis). Addresses are decoupled from key
//! order: after a union or reindex the same key may live at a different
//! address, and only the owning key index knows the mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, totally ordered handle into a vector's physical storage.
///
/// Two addresses are equal iff they refer to the same slot. The address
/// space of a vector of length `n` is `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(usize);

impl Address {
    /// First slot of any address space
    pub const ZERO: Address = Address(0);

    /// Create an address from a raw slot offset
    pub const fn new(slot: usize) -> Self {
        Address(slot)
    }

    /// Raw slot offset
    pub const fn index(self) -> usize {
        self.0
    }

    /// The address of the following slot
    pub const fn next(self) -> Self {
        Address(self.0 + 1)
    }

    /// Iterate over the full address space of a vector of `len` slots
    pub fn range(len: usize) -> impl Iterator<Item = Address> + Clone {
        (0..len).map(Address)
    }
}

impl From<usize> for Address {
    fn from(slot: usize) -> Self {
        Address(slot)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}
