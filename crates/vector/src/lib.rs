//! Column storage for keyframe
//!
//! This crate implements the typed column stores and the executor that turns
//! a [`VectorCommand`](keyframe_core::VectorCommand) into a concrete vector:
//! - Vector: Immutable, reference-counted sequence of optional values
//! - Column: Closed tagged union of the supported element kinds
//! - VectorBuilder: Bottom-up interpreter of command trees
//!
//! Clones of a [`Vector`] share storage, so commands that return an argument
//! unchanged never copy column data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod column;
pub mod vector;

pub use builder::VectorBuilder;
pub use column::Column;
pub use vector::Vector;
