//! Data frames for keyframe
//!
//! A [`Frame`] is a row index, a column index and one vector of columns.
//! Frames are immutable values: joins, appends and column edits return new
//! frames that share every index and column they did not change.
//!
//! - Frame: construction, lookups, copy-on-write column and row edits
//! - Join / Append: frame composition on top of the index algebra
//! - Series: one column viewed through its row index
//! - VirtualRow: lazy single-row view over all columns
//! - KeyedSeq: keyed projections (`columns`, `rows` and their dense variants)
//! - FrameHandle: single-owner mutable wrapper over an immutable frame

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod append;
pub mod frame;
pub mod handle;
pub mod join;
pub mod projection;
pub mod row;
pub mod series;

pub use frame::Frame;
pub use handle::FrameHandle;
pub use join::{JoinKind, JoinOptions};
pub use projection::KeyedSeq;
pub use row::{RowState, VirtualRow};
pub use series::Series;
