use geo::Rect;
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// This is a wrapper around `geo::Rect`. A box taken from a geodetic or 3D
/// source carries its Z extent along, so that converting back and forth keeps
/// the full envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// The underlying geometric rectangle
    pub rect: Rect,
    /// Z extent carried for 3D or geodetic sources
    pub z: Option<(f64, f64)>,
    /// Whether the coordinates are on the sphere
    pub geodetic: bool,
}

impl BoundingBox2D {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use stbox_types::bbox::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::new(-74.0, 40.7, -73.9, 40.8);
    /// assert!(bbox.z.is_none());
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
            z: None,
            geodetic: false,
        }
    }

    /// Create a bounding box from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            z: None,
            geodetic: false,
        }
    }

    /// Attach a Z extent.
    pub fn with_z(mut self, min_z: f64, max_z: f64) -> Self {
        self.z = Some((min_z, max_z));
        self
    }

    /// Mark the box as geodetic.
    pub fn with_geodetic(mut self, geodetic: bool) -> Self {
        self.geodetic = geodetic;
        self
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }
}

/// A 3D axis-aligned bounding box with a spatial reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
    /// Spatial reference identifier, 0 when unspecified
    pub srid: i32,
}

impl BoundingBox3D {
    /// Create a new 3D bounding box with an unspecified SRID.
    ///
    /// # Examples
    ///
    /// ```
    /// use stbox_types::bbox::BoundingBox3D;
    ///
    /// let bbox = BoundingBox3D::new(-74.0, 40.7, 0.0, -73.9, 40.8, 100.0).with_srid(4326);
    /// assert_eq!(bbox.srid, 4326);
    /// ```
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
            srid: 0,
        }
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }
}
