//! Policies for index operations

use serde::{Deserialize, Serialize};

/// How a key lookup treats keys absent from the index
///
/// The nearest-neighbour policies are only meaningful on ordered indices.
/// On an unordered index a plain lookup falls back to [`Lookup::Exact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookup {
    /// Only the key itself matches
    #[default]
    Exact,
    /// The key, or else the smallest key greater than it
    ExactOrGreater,
    /// The key, or else the greatest key smaller than it
    ExactOrSmaller,
}

impl Lookup {
    /// Whether the policy needs key order to be meaningful
    pub fn is_nearest(self) -> bool {
        !matches!(self, Lookup::Exact)
    }
}

/// What an index append does with keys present on both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendPolicy {
    /// Keep every key, duplicates included (vertical stacking)
    #[default]
    KeepDuplicates,
    /// Fail on the first key present on both sides
    LeftOrRight,
}

/// Axis of a frame an index belongs to
///
/// Only used to report conflicts with the right error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Row keys
    Rows,
    /// Column keys
    Columns,
}
