//! # stbox-types
//!
//! Spatial and temporal value types consumed by the spatiotemporal box.
//!
//! This crate provides the small set of collaborator types a box converts
//! to and from:
//!
//! - **Point types**: `Point3d`
//! - **Bounding box types**: `BoundingBox2D`, `BoundingBox3D`
//! - **Temporal types**: `Timestamp`, `Period`, `TimestampSet`, `PeriodSet`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives and `chrono` for calendar conversions.
//!
//! ## Examples
//!
//! ```rust
//! use stbox_types::bbox::BoundingBox3D;
//! use stbox_types::temporal::{Period, Timestamp};
//!
//! let t0: Timestamp = "2001-01-01 00:00:00+00".parse()?;
//! let t1: Timestamp = "2001-01-02".parse()?;
//! let period = Period::closed(t0, t1)?;
//! assert!(period.lower() < period.upper());
//!
//! let bbox = BoundingBox3D::new(0.0, 0.0, 0.0, 10.0, 10.0, 5.0);
//! assert_eq!(bbox.max_z - bbox.min_z, 5.0);
//! # Ok::<(), stbox_types::temporal::TemporalError>(())
//! ```

pub mod bbox;
pub mod point;
pub mod temporal;
