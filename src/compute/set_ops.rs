//! Union and intersection.

use crate::compute::validation::{
    ensure_same_dimensionality, ensure_same_geodetic, ensure_same_spatial_reference,
    ensure_same_srid,
};
use crate::error::{Result, StboxError};
use crate::stbox::STBox;
use stbox_types::temporal::Timestamp;

impl STBox {
    /// Smallest box covering both boxes.
    ///
    /// The boxes must have the same dimensions, geodetic-ness and SRID. With
    /// `strict`, disjoint boxes are rejected since their union is not a box.
    ///
    /// # Examples
    ///
    /// ```
    /// use stbox::{STBox, StboxError};
    ///
    /// let a = STBox::xy(0.0, 0.0, 1.0, 1.0);
    /// let b = STBox::xy(3.0, 3.0, 4.0, 4.0);
    /// assert_eq!(a.union(&b, false)?, STBox::xy(0.0, 0.0, 4.0, 4.0));
    /// assert_eq!(a.union(&b, true), Err(StboxError::NonContiguousUnion));
    /// # Ok::<(), StboxError>(())
    /// ```
    pub fn union(&self, other: &STBox, strict: bool) -> Result<STBox> {
        ensure_same_geodetic(self, other)?;
        ensure_same_dimensionality(self, other)?;
        ensure_same_srid(self, other)?;
        if strict && !self.overlaps(other)? {
            return Err(StboxError::NonContiguousUnion);
        }
        let mut result = *self;
        result.expand(other);
        Ok(result)
    }

    /// Common part of the boxes on the dimensions both carry, or `None` when
    /// they share no dimension or are disjoint on one of them.
    pub fn intersection(&self, other: &STBox) -> Result<Option<STBox>> {
        ensure_same_spatial_reference(self, other)?;

        let dims = self.dimensions().common(other.dimensions());
        if !dims.has_any() {
            return Ok(None);
        }
        if dims.has_x()
            && (self.xmin > other.xmax
                || other.xmin > self.xmax
                || self.ymin > other.ymax
                || other.ymin > self.ymax)
        {
            return Ok(None);
        }
        if dims.has_z_extent() && (self.zmin > other.zmax || other.zmin > self.zmax) {
            return Ok(None);
        }
        if dims.has_t() && (self.tmin > other.tmax || other.tmin > self.tmax) {
            return Ok(None);
        }

        let (mut xmin, mut xmax, mut ymin, mut ymax, mut zmin, mut zmax) =
            (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let (mut tmin, mut tmax) = (Timestamp::EPOCH, Timestamp::EPOCH);
        if dims.has_x() {
            xmin = self.xmin.max(other.xmin);
            xmax = self.xmax.min(other.xmax);
            ymin = self.ymin.max(other.ymin);
            ymax = self.ymax.min(other.ymax);
            if dims.has_z_extent() {
                zmin = self.zmin.max(other.zmin);
                zmax = self.zmax.min(other.zmax);
            }
        }
        if dims.has_t() {
            tmin = self.tmin.max(other.tmin);
            tmax = self.tmax.min(other.tmax);
        }
        Ok(Some(STBox::make(
            dims.has_x(),
            dims.has_z(),
            dims.has_t(),
            dims.is_geodetic(),
            self.srid,
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            tmin,
            tmax,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_union_covers_both() {
        let a = STBox::xyt(0.0, 0.0, ts("2001-01-01"), 2.0, 2.0, ts("2001-01-03"));
        let b = STBox::xyt(1.0, -1.0, ts("2001-01-02"), 3.0, 1.0, ts("2001-01-05"));
        let u = a.union(&b, true).unwrap();
        assert_eq!(
            u,
            STBox::xyt(0.0, -1.0, ts("2001-01-01"), 3.0, 2.0, ts("2001-01-05"))
        );
        assert!(u.contains(&a).unwrap() && u.contains(&b).unwrap());
    }

    #[test]
    fn test_union_requires_same_dimensions() {
        let a = STBox::xy(0.0, 0.0, 1.0, 1.0);
        let b = STBox::xyz(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        assert_eq!(a.union(&b, false), Err(StboxError::IncompatibleDimensions));
        assert!(matches!(
            a.union(&a.with_srid(3857), false),
            Err(StboxError::SridMismatch { .. })
        ));
    }

    #[test]
    fn test_intersection_narrows_dimensions() {
        let a = STBox::xyzt(0.0, 0.0, 0.0, ts("2001-01-01"), 4.0, 4.0, 4.0, ts("2001-01-04"));
        let b = STBox::xyt(2.0, 1.0, ts("2001-01-02"), 6.0, 3.0, ts("2001-01-09"));
        let i = a.intersection(&b).unwrap().unwrap();
        assert_eq!(
            i,
            STBox::xyt(2.0, 1.0, ts("2001-01-02"), 4.0, 3.0, ts("2001-01-04"))
        );
        assert!(!i.has_z());
    }

    #[test]
    fn test_intersection_none_cases() {
        let a = STBox::xy(0.0, 0.0, 1.0, 1.0);
        assert_eq!(a.intersection(&STBox::xy(2.0, 2.0, 3.0, 3.0)).unwrap(), None);
        let t = STBox::t(ts("2001-01-01"), ts("2001-01-02"));
        assert_eq!(a.intersection(&t).unwrap(), None);
        assert_eq!(
            a.intersection(&STBox::geodetic(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)),
            Err(StboxError::GeodeticMismatch)
        );
    }

    #[test]
    fn test_time_only_box_intersects_geodetic_box() {
        let t = STBox::t(ts("2001-01-01"), ts("2001-01-03"));
        let g = STBox::geodetic_t(0.0, 0.0, 0.0, ts("2001-01-02"), 1.0, 1.0, 1.0, ts("2001-01-05"));
        let i = t.intersection(&g).unwrap().unwrap();
        assert_eq!(i, STBox::t(ts("2001-01-02"), ts("2001-01-03")));
    }

    #[test]
    fn test_touching_boxes_intersect_in_a_slice() {
        let a = STBox::xy(0.0, 0.0, 5.0, 5.0);
        let b = STBox::xy(5.0, 0.0, 10.0, 5.0);
        let i = a.intersection(&b).unwrap().unwrap();
        assert_eq!(i, STBox::xy(5.0, 0.0, 5.0, 5.0));
    }
}
