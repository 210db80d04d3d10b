//! Core types for keyframe
//!
//! This crate defines the foundational types used throughout the system:
//! - Address: Opaque handle of a physical slot in a column or data vector
//! - Value: Boxed cell used at the untyped access boundary (rows, columns)
//! - Lookup / AppendPolicy / Axis: Policies driving index operations
//! - VectorCommand: Symbolic description of how to derive a new vector
//! - Error: Error type hierarchy
//! - FrameConfig: Defaults loaded from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod command;
pub mod config;
pub mod error;
pub mod lookup;
pub mod value;

pub use address::Address;
pub use command::{VectorCommand, VectorMerge};
pub use config::{FrameConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use lookup::{AppendPolicy, Axis, Lookup};
pub use value::{Value, ValueKind};
