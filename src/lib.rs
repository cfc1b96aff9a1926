//! Spatiotemporal bounding boxes with predicates, set algebra, ordering and grid tiling.
//!
//! ```rust
//! use stbox::{GridConfig, STBox};
//!
//! let a: STBox = "STBOX T((1.0,2.0,2001-01-01),(3.0,4.0,2001-01-02))".parse()?;
//! let b = STBox::xy(2.0, 3.0, 10.0, 10.0);
//! assert!(a.overlaps(&b)?);
//!
//! let cells = b.grid(&GridConfig::new(5.0))?.count();
//! assert_eq!(cells, 4);
//! # Ok::<(), stbox::StboxError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod flags;
pub mod stbox;

pub use crate::stbox::{DEFAULT_GEODETIC_SRID, ENCODED_LEN, STBox};
pub use error::{Result, StboxError};
pub use flags::Dimensions;

pub use config::{DEFAULT_TIME_ORIGIN, GridConfig};

pub use compute::envelope::{Envelope, SpatialExtent, SpatialValue};
pub use compute::tiling::{StboxGrid, Tile, TileCoords, tile_at};

pub use stbox_types;
pub use stbox_types::bbox::{BoundingBox2D, BoundingBox3D};
pub use stbox_types::point::Point3d;
pub use stbox_types::temporal::{Period, PeriodSet, TemporalError, Timestamp, TimestampSet};

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, STBox, StboxError};

    pub use crate::{Dimensions, GridConfig, StboxGrid, Tile, tile_at};

    pub use crate::{SpatialExtent, SpatialValue};

    pub use crate::{Period, Point3d, Timestamp};

    pub use chrono::TimeDelta;
}
