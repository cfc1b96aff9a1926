//! Conversions between boxes and related value types.

use super::STBox;
use crate::compute::envelope::SpatialExtent;
use crate::compute::validation::{ensure_has_t, ensure_has_x};
use crate::error::{Result, StboxError};
use crate::flags::Dimensions;
use stbox_types::bbox::{BoundingBox2D, BoundingBox3D};
use stbox_types::temporal::{Period, PeriodSet, Timestamp, TimestampSet};

impl STBox {
    /// The spatial part as a 2D box. Geodetic boxes keep their Z extent in
    /// the result.
    pub fn to_box2d(&self) -> Result<BoundingBox2D> {
        ensure_has_x(self)?;
        let mut result = BoundingBox2D::new(self.xmin, self.ymin, self.xmax, self.ymax)
            .with_geodetic(self.is_geodetic());
        if self.dims.has_z_extent() {
            result = result.with_z(self.zmin, self.zmax);
        }
        Ok(result)
    }

    /// The spatial part as a 3D box. Z is zero when the box has no Z flag.
    pub fn to_box3d(&self) -> Result<BoundingBox3D> {
        ensure_has_x(self)?;
        let (zmin, zmax) = if self.has_z() {
            (self.zmin, self.zmax)
        } else {
            (0.0, 0.0)
        };
        Ok(
            BoundingBox3D::new(self.xmin, self.ymin, zmin, self.xmax, self.ymax, zmax)
                .with_srid(self.srid),
        )
    }

    /// The time extent as a closed period.
    pub fn to_period(&self) -> Result<Period> {
        ensure_has_t(self)?;
        Ok(Period::closed(self.tmin, self.tmax)?)
    }

    /// Fill the spatial part from `value`. On an empty value the spatial
    /// flags are cleared and `false` is returned.
    pub(crate) fn fill_spatial<E: SpatialExtent + ?Sized>(&mut self, value: &E) -> bool {
        let Some(env) = value.envelope() else {
            self.dims.set_x(false);
            self.dims.set_z(false);
            self.dims.set_t(false);
            self.dims.set_geodetic(false);
            return false;
        };
        self.xmin = env.xmin;
        self.xmax = env.xmax;
        self.ymin = env.ymin;
        self.ymax = env.ymax;
        if env.has_z || env.geodetic {
            self.zmin = env.zmin;
            self.zmax = env.zmax;
        }
        self.srid = value.srid();
        self.dims = Dimensions::new(true, env.has_z, false, env.geodetic);
        true
    }

    fn empty() -> STBox {
        STBox::make(
            false,
            false,
            false,
            false,
            0,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            Timestamp::EPOCH,
            Timestamp::EPOCH,
        )
    }

    /// Box of a spatial value, or `None` when the value is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo::{Geometry, LineString, line_string};
    /// use stbox::STBox;
    ///
    /// let line = Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 2.0)]);
    /// assert_eq!(STBox::from_geometry(&line), Some(STBox::xy(0.0, 0.0, 4.0, 2.0)));
    ///
    /// let empty = Geometry::LineString(LineString::<f64>::new(vec![]));
    /// assert_eq!(STBox::from_geometry(&empty), None);
    /// ```
    pub fn from_geometry<E: SpatialExtent + ?Sized>(value: &E) -> Option<STBox> {
        let mut result = STBox::empty();
        result.fill_spatial(value).then_some(result)
    }

    /// Box of a spatial value at one instant.
    pub fn from_geometry_timestamp<E: SpatialExtent + ?Sized>(
        value: &E,
        t: Timestamp,
    ) -> Option<STBox> {
        let mut result = STBox::from_geometry(value)?;
        result.tmin = t;
        result.tmax = t;
        result.dims.set_t(true);
        Some(result)
    }

    /// Box of a spatial value over a period.
    pub fn from_geometry_period<E: SpatialExtent + ?Sized>(
        value: &E,
        period: &Period,
    ) -> Option<STBox> {
        let mut result = STBox::from_geometry(value)?;
        result.tmin = period.lower();
        result.tmax = period.upper();
        result.dims.set_t(true);
        Some(result)
    }
}

impl TryFrom<&geo::Geometry<f64>> for STBox {
    type Error = StboxError;

    fn try_from(value: &geo::Geometry<f64>) -> Result<Self> {
        STBox::from_geometry(value).ok_or(StboxError::EmptyGeometry)
    }
}

impl From<BoundingBox2D> for STBox {
    fn from(b: BoundingBox2D) -> Self {
        STBox::xy(b.min_x(), b.min_y(), b.max_x(), b.max_y())
    }
}

impl From<BoundingBox3D> for STBox {
    fn from(b: BoundingBox3D) -> Self {
        STBox::xyz(b.min_x, b.min_y, b.min_z, b.max_x, b.max_y, b.max_z).with_srid(b.srid)
    }
}

impl From<Timestamp> for STBox {
    fn from(t: Timestamp) -> Self {
        STBox::t(t, t)
    }
}

impl From<Period> for STBox {
    fn from(p: Period) -> Self {
        STBox::t(p.lower(), p.upper())
    }
}

impl From<&TimestampSet> for STBox {
    fn from(ts: &TimestampSet) -> Self {
        STBox::from(ts.bounding_period())
    }
}

impl From<&PeriodSet> for STBox {
    fn from(ps: &PeriodSet) -> Self {
        STBox::from(ps.bounding_period())
    }
}
