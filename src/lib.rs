//! Keyframe - columnar, key-indexed data frames
//!
//! A frame is a row index, a column index and one typed column per column
//! key. Joins, appends, reindexing and slicing are computed on the indices
//! first; the result is a symbolic command that moves column data only
//! once, when it is applied.
//!
//! # Quick Start
//!
//! ```
//! use keyframe::{Column, Frame, JoinKind, KeyIndex, Value};
//!
//! let a = Frame::from_columns(KeyIndex::new(vec![0, 1, 2]), vec![("x", Column::from(vec![10_i64, 20, 30]))])?;
//! let b = Frame::from_columns(KeyIndex::new(vec![2, 3]), vec![("y", Column::from(vec![300_i64, 400]))])?;
//!
//! let joined = a.join(&b, JoinKind::Outer)?;
//! assert_eq!(joined.row_keys(), &[0, 1, 2, 3]);
//! assert_eq!(joined.get_value(&3, &"y")?, Some(Value::Int(400)));
//! assert_eq!(joined.get_value(&3, &"x")?, None);
//! # Ok::<(), keyframe::Error>(())
//! ```
//!
//! # Architecture
//!
//! - [`core`]: addresses, values, commands, policies, errors, config
//! - [`vector`]: typed column storage and the command executor
//! - [`index`]: key indices and their algebra
//! - [`frame`]: frames, series, row views, join and append

pub use keyframe_core as core;
pub use keyframe_frame as frame;
pub use keyframe_index as index;
pub use keyframe_vector as vector;

pub use keyframe_core::{Error, FrameConfig, Lookup, Result, Value, ValueKind};
pub use keyframe_frame::{Frame, FrameHandle, JoinKind, Series, VirtualRow};
pub use keyframe_index::KeyIndex;
pub use keyframe_vector::Column;
