//! Frame join
//!
//! A join pairs the row indices of two frames and concatenates their
//! columns:
//!
//! | Kind    | Row keys                  | Row command (left / right)   |
//! |---------|---------------------------|------------------------------|
//! | `Outer` | union                     | both relocated onto union    |
//! | `Inner` | intersection              | both relocated onto the meet |
//! | `Left`  | left frame's keys         | identity / reindex           |
//! | `Right` | right frame's keys        | reindex / identity           |
//!
//! Column keys are appended with [`AppendPolicy::LeftOrRight`]: a column key
//! on both sides fails the join with [`Error::DuplicateColumnKey`] before any
//! column is touched. Row keys are matched one to one, so a repeated row key
//! (left behind by an append) is only allowed on the side whose rows are kept.
//!
//! [`Error::DuplicateColumnKey`]: keyframe_core::Error::DuplicateColumnKey

use crate::frame::Frame;
use keyframe_core::{AppendPolicy, Axis, FrameConfig, Lookup, Result, VectorCommand};
use keyframe_index::{IndexKey, KeyIndex};
use keyframe_vector::VectorBuilder;
use tracing::debug;

/// Which row keys a join keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    /// Keys of either frame
    #[default]
    Outer,
    /// Keys of both frames
    Inner,
    /// Keys of the left frame
    Left,
    /// Keys of the right frame
    Right,
}

/// Tuning for [`Frame::join_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOptions {
    /// Key matching for `Left` and `Right` joins
    pub lookup: Lookup,
    /// Restrict the reindexed side to the kept side's key range first
    ///
    /// Only applies to exact lookups between ordered indices; it never
    /// changes the result.
    pub prefilter: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            lookup: Lookup::Exact,
            prefilter: true,
        }
    }
}

impl From<&FrameConfig> for JoinOptions {
    fn from(config: &FrameConfig) -> Self {
        Self {
            lookup: config.default_lookup,
            prefilter: config.left_join_prefilter,
        }
    }
}

impl<R: IndexKey, C: IndexKey> Frame<R, C> {
    /// Join with exact key matching
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateColumnKey`](keyframe_core::Error::DuplicateColumnKey)
    /// when both frames have a column under the same key;
    /// [`Error::DuplicateRowKey`](keyframe_core::Error::DuplicateRowKey) when a
    /// row index that must be matched key by key repeats a key (either side
    /// of `Outer` and `Inner`, the dropped side of `Left` and `Right`).
    pub fn join(&self, other: &Self, kind: JoinKind) -> Result<Self> {
        self.join_with_options(other, kind, JoinOptions::default())
    }

    /// Join matching row keys under `lookup`
    ///
    /// The lookup only matters for `Left` and `Right` joins; `Outer` and
    /// `Inner` always match keys exactly.
    ///
    /// # Errors
    ///
    /// As [`Frame::join`], plus
    /// [`Error::OrderingRequired`](keyframe_core::Error::OrderingRequired)
    /// for a nearest-key lookup into an unordered row index.
    pub fn join_with(&self, other: &Self, kind: JoinKind, lookup: Lookup) -> Result<Self> {
        let options = JoinOptions {
            lookup,
            ..JoinOptions::default()
        };
        self.join_with_options(other, kind, options)
    }

    /// Join with explicit options
    ///
    /// # Errors
    ///
    /// See [`Frame::join_with`].
    pub fn join_with_options(&self, other: &Self, kind: JoinKind, options: JoinOptions) -> Result<Self> {
        let (column_index, column_command) = self.column_index().append(
            other.column_index(),
            VectorCommand::Return(0),
            VectorCommand::Return(1),
            AppendPolicy::LeftOrRight,
            Axis::Columns,
        )?;

        let identity = VectorCommand::identity;
        let (row_index, left, right) = match kind {
            JoinKind::Outer => self.row_index().union(other.row_index(), identity(), identity())?,
            JoinKind::Inner => self.row_index().intersect(other.row_index(), identity(), identity())?,
            JoinKind::Left => {
                let right = align_onto(self.row_index(), other.row_index(), options)?;
                (self.row_index().clone(), identity(), right)
            }
            JoinKind::Right => {
                let left = align_onto(other.row_index(), self.row_index(), options)?;
                (other.row_index().clone(), left, identity())
            }
        };

        let builder = VectorBuilder::new();
        let left_data = builder.build_columns(&left, self.data())?;
        let right_data = builder.build_columns(&right, other.data())?;
        let data = builder.build(&column_command, &[left_data, right_data])?;

        debug!(
            target: "keyframe::frame",
            ?kind,
            left_rows = self.row_count(),
            right_rows = other.row_count(),
            rows = row_index.len(),
            columns = column_index.len(),
            "join"
        );
        Ok(Frame::from_parts(row_index, column_index, data))
    }
}

/// Command moving vectors attached to `source` onto the keys of `target`
fn align_onto<R: IndexKey>(
    target: &KeyIndex<R>,
    source: &KeyIndex<R>,
    options: JoinOptions,
) -> Result<VectorCommand> {
    let prefilter = options.prefilter
        && options.lookup == Lookup::Exact
        && target.is_ordered()
        && source.is_ordered();
    if prefilter {
        if let Some((min, max)) = target.key_range()? {
            let (restricted, command) = source.get_range(Some(min), Some(max), VectorCommand::identity())?;
            return restricted.reindex(target, options.lookup, command);
        }
    }
    source.reindex(target, options.lookup, VectorCommand::identity())
}
