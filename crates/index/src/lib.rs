//! Key indices for keyframe
//!
//! A [`KeyIndex`] maps logical keys to physical [`Address`]es. Every
//! transformation (union, intersect, append, reindex, range, drop) returns a
//! brand new index together with the [`VectorCommand`] that moves vectors
//! from the old address space into the new one. Nothing here touches column
//! data: commands are executed later by `keyframe-vector`.
//!
//! [`Address`]: keyframe_core::Address
//! [`VectorCommand`]: keyframe_core::VectorCommand

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod index;

pub use index::{IndexKey, KeyIndex};
