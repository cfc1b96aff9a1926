use geo::Point;
use serde::{Deserialize, Serialize};

/// A 3D point with x, y (longitude/latitude or planar) and z coordinates.
///
/// Used as the spatial origin of a tiling grid and as a geometry source for
/// building boxes with a Z extent.
///
/// # Examples
///
/// ```
/// use stbox_types::point::Point3d;
/// use geo::Point;
///
/// let origin = Point3d::new(10.0, 20.0, 5.0);
/// assert_eq!(origin.z(), 5.0);
///
/// // A 2D point becomes a 3D point on the z = 0 plane.
/// let flat: Point3d = Point::new(1.0, 2.0).into();
/// assert_eq!(flat.z(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    /// The 2D point (x/y)
    pub point: Point<f64>,
    /// The z coordinate
    pub z: f64,
}

impl Point3d {
    /// Create a new 3D point from x, y, and z coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: Point::new(x, y),
            z,
        }
    }

    /// Create a 3D point from a 2D point and a z coordinate.
    pub fn from_point(point: Point<f64>, z: f64) -> Self {
        Self { point, z }
    }

    /// The origin `(0, 0, 0)`.
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite() && self.z.is_finite()
    }
}

impl Default for Point3d {
    fn default() -> Self {
        Self::origin()
    }
}

impl From<Point<f64>> for Point3d {
    fn from(point: Point<f64>) -> Self {
        Self::from_point(point, 0.0)
    }
}
