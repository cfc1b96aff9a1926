//! Operations over boxes.
//!
//! This module holds everything that consumes one or two boxes:
//! - Precondition checks shared by all operations
//! - Envelope extraction from geometry values
//! - Topological and directional predicates
//! - Union, intersection and the ordering comparator
//! - Grid tiling
//!
//! Operations are exposed as inherent methods on [`crate::STBox`]; the
//! modules group them by concern.

#[cfg(feature = "geojson")]
pub mod geojson;

pub mod envelope;
pub mod ordering;
pub mod position;
pub mod set_ops;
pub mod tiling;
pub mod topology;
pub mod validation;
