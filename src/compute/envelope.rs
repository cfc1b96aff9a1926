//! Envelope extraction from spatial values.
//!
//! Boxes never look inside a geometry. Anything that can report its
//! extent implements [`SpatialExtent`], and the conversions in
//! [`crate::STBox`] only consume the resulting [`Envelope`].

use geo::{BoundingRect, Geometry, HasDimensions, Point, Rect};
use serde::{Deserialize, Serialize};
use stbox_types::point::Point3d;

use crate::stbox::DEFAULT_GEODETIC_SRID;

/// The extent of a non-empty spatial value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
    /// The value carries a Z coordinate.
    pub has_z: bool,
    /// The coordinates are longitude/latitude on the sphere.
    pub geodetic: bool,
}

impl Envelope {
    /// Planar 2D envelope.
    pub fn from_rect(rect: Rect<f64>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self {
            xmin: min.x,
            xmax: max.x,
            ymin: min.y,
            ymax: max.y,
            zmin: 0.0,
            zmax: 0.0,
            has_z: false,
            geodetic: false,
        }
    }

    pub fn with_z(mut self, zmin: f64, zmax: f64) -> Self {
        self.zmin = zmin;
        self.zmax = zmax;
        self.has_z = true;
        self
    }
}

/// A value with a computable spatial extent.
pub trait SpatialExtent {
    /// The envelope, or `None` when the value is empty.
    fn envelope(&self) -> Option<Envelope>;

    /// Spatial reference of the value; 0 when unknown.
    fn srid(&self) -> i32 {
        0
    }

    fn is_empty(&self) -> bool {
        self.envelope().is_none()
    }
}

impl SpatialExtent for Geometry<f64> {
    fn envelope(&self) -> Option<Envelope> {
        if HasDimensions::is_empty(self) {
            return None;
        }
        self.bounding_rect().map(Envelope::from_rect)
    }
}

impl SpatialExtent for Point<f64> {
    fn envelope(&self) -> Option<Envelope> {
        Some(Envelope::from_rect(self.bounding_rect()))
    }
}

impl SpatialExtent for Rect<f64> {
    fn envelope(&self) -> Option<Envelope> {
        Some(Envelope::from_rect(*self))
    }
}

impl SpatialExtent for Point3d {
    fn envelope(&self) -> Option<Envelope> {
        Some(Envelope::from_rect(self.point.bounding_rect()).with_z(self.z, self.z))
    }
}

/// A spatial value tagged with its reference system.
///
/// `geo` types carry no SRID; this wrapper supplies one together with the
/// geometry/geography distinction.
///
/// # Examples
///
/// ```
/// use geo::{Geometry, point};
/// use stbox::STBox;
/// use stbox::compute::envelope::SpatialValue;
///
/// let place = SpatialValue::geography(Geometry::Point(point!(x: 2.35, y: 48.85)));
/// let b = STBox::from_geometry(&place).unwrap();
/// assert!(b.is_geodetic());
/// assert_eq!(b.srid(), 4326);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialValue<G> {
    pub value: G,
    pub srid: i32,
    pub geodetic: bool,
}

impl<G: SpatialExtent> SpatialValue<G> {
    /// A planar geometry in the given reference system.
    pub fn geometry(value: G, srid: i32) -> Self {
        Self {
            value,
            srid,
            geodetic: false,
        }
    }

    /// A geography on WGS 84.
    pub fn geography(value: G) -> Self {
        Self {
            value,
            srid: DEFAULT_GEODETIC_SRID,
            geodetic: true,
        }
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }
}

impl<G: SpatialExtent> SpatialExtent for SpatialValue<G> {
    fn envelope(&self) -> Option<Envelope> {
        let mut envelope = self.value.envelope()?;
        envelope.geodetic = self.geodetic;
        Some(envelope)
    }

    fn srid(&self) -> i32 {
        self.srid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPoint, line_string, point};

    #[test]
    fn test_geometry_envelope() {
        let line: Geometry<f64> = Geometry::LineString(line_string![
            (x: 1.0, y: 5.0),
            (x: -2.0, y: 3.0),
            (x: 4.0, y: 0.5),
        ]);
        let env = line.envelope().unwrap();
        assert_eq!((env.xmin, env.xmax), (-2.0, 4.0));
        assert_eq!((env.ymin, env.ymax), (0.5, 5.0));
        assert!(!env.has_z && !env.geodetic);
        assert_eq!(SpatialExtent::srid(&line), 0);
    }

    #[test]
    fn test_empty_geometry_has_no_envelope() {
        let empty: Geometry<f64> = Geometry::LineString(LineString::new(vec![]));
        assert!(empty.envelope().is_none());
        assert!(SpatialExtent::is_empty(&empty));

        let empty: Geometry<f64> = Geometry::MultiPoint(MultiPoint::new(vec![]));
        assert!(empty.envelope().is_none());
    }

    #[test]
    fn test_point_envelopes() {
        let env = point!(x: 3.0, y: 4.0).envelope().unwrap();
        assert_eq!((env.xmin, env.xmax, env.ymin, env.ymax), (3.0, 3.0, 4.0, 4.0));

        let env = Point3d::new(1.0, 2.0, 7.5).envelope().unwrap();
        assert!(env.has_z);
        assert_eq!((env.zmin, env.zmax), (7.5, 7.5));
    }

    #[test]
    fn test_spatial_value_tags() {
        let v = SpatialValue::geometry(point!(x: 1.0, y: 1.0), 3857);
        assert_eq!(v.srid(), 3857);
        assert!(!v.envelope().unwrap().geodetic);

        let g = SpatialValue::geography(point!(x: 1.0, y: 1.0)).with_srid(4269);
        assert_eq!(g.srid(), 4269);
        assert!(g.envelope().unwrap().geodetic);
    }
}
