//! Mutable owner of a frame
//!
//! Frames themselves are immutable values. A [`FrameHandle`] is the single
//! writer that replaces its frame as a whole on every series edit: the edit
//! builds a complete new frame first and only then swaps it in, so a failed
//! edit leaves the handle untouched. Snapshots taken earlier keep seeing the
//! frame they were taken from.
//!
//! `&mut self` on the edit methods is the only exclusion there is; share a
//! handle across threads behind your own lock.

use crate::frame::Frame;
use keyframe_core::Result;
use keyframe_index::IndexKey;
use keyframe_vector::Column;
use tracing::trace;

/// Single-writer wrapper replacing its frame on each edit
#[derive(Debug, Clone)]
pub struct FrameHandle<R, C> {
    frame: Frame<R, C>,
}

impl<R: IndexKey, C: IndexKey> FrameHandle<R, C> {
    /// Take ownership of `frame`
    pub fn new(frame: Frame<R, C>) -> Self {
        Self { frame }
    }

    /// Current frame
    pub fn frame(&self) -> &Frame<R, C> {
        &self.frame
    }

    /// Cheap copy of the current frame, unaffected by later edits
    pub fn snapshot(&self) -> Frame<R, C> {
        self.frame.clone()
    }

    /// Release the current frame
    pub fn into_inner(self) -> Frame<R, C> {
        self.frame
    }

    /// Add a column under a new key
    ///
    /// # Errors
    ///
    /// As [`Frame::add_column`].
    pub fn add_series(&mut self, key: C, column: Column) -> Result<()> {
        let next = self.frame.add_column(key, column)?;
        self.swap(next, "add_series");
        Ok(())
    }

    /// Remove the column under `key`
    ///
    /// # Errors
    ///
    /// As [`Frame::drop_column`].
    pub fn drop_series(&mut self, key: &C) -> Result<()> {
        let next = self.frame.drop_column(key)?;
        self.swap(next, "drop_series");
        Ok(())
    }

    /// Replace the column under `key`, adding it if absent
    ///
    /// # Errors
    ///
    /// As [`Frame::replace_column`].
    pub fn replace_series(&mut self, key: C, column: Column) -> Result<()> {
        let next = self.frame.replace_column(key, column)?;
        self.swap(next, "replace_series");
        Ok(())
    }

    fn swap(&mut self, next: Frame<R, C>, edit: &'static str) {
        trace!(target: "keyframe::frame", edit, columns = next.column_count(), "swap frame");
        self.frame = next;
    }
}

impl<R: IndexKey, C: IndexKey> Default for FrameHandle<R, C> {
    fn default() -> Self {
        Self::new(Frame::empty())
    }
}

impl<R: IndexKey, C: IndexKey> From<Frame<R, C>> for FrameHandle<R, C> {
    fn from(frame: Frame<R, C>) -> Self {
        Self::new(frame)
    }
}
