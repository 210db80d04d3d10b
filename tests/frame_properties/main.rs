//! Frame Property Suite
//!
//! End-to-end properties of frame composition, run through the `keyframe`
//! facade:
//!
//! - **Join**: left/right cardinality, inner within outer, cell routing
//! - **Append**: row counts and vertical stacking
//! - **Views**: row and column access agree; materialization changes
//!   nothing observable
//! - **Scenarios**: fixed worked examples with exact expected tables

mod append_properties;
mod common;
mod join_properties;
mod scenarios;
mod view_properties;
