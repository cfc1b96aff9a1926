//! Topological predicates between boxes.
//!
//! Each predicate first checks that the boxes share a dimension and, when
//! both are spatial, that they agree on geodetic-ness and SRID. Only the
//! dimensions both boxes carry are then compared, so a spatial-only box can
//! be tested against a spatiotemporal one.

use crate::compute::validation::{ensure_common_dimension, ensure_same_spatial_reference};
use crate::error::Result;
use crate::flags::Dimensions;
use crate::stbox::STBox;

/// Validate a pair of boxes and return the dimensions they share.
pub(crate) fn common_dimensions(b1: &STBox, b2: &STBox) -> Result<Dimensions> {
    ensure_common_dimension(b1, b2)?;
    ensure_same_spatial_reference(b1, b2)?;
    Ok(b1.dimensions().common(b2.dimensions()))
}

impl STBox {
    /// Does this box contain `other` on every shared dimension?
    ///
    /// # Examples
    ///
    /// ```
    /// use stbox::STBox;
    ///
    /// let outer = STBox::xy(0.0, 0.0, 10.0, 10.0);
    /// let inner = STBox::xy(2.0, 2.0, 3.0, 3.0);
    /// assert!(outer.contains(&inner)?);
    /// assert!(!inner.contains(&outer)?);
    /// # Ok::<(), stbox::StboxError>(())
    /// ```
    pub fn contains(&self, other: &STBox) -> Result<bool> {
        let dims = common_dimensions(self, other)?;
        if dims.has_x()
            && (other.xmin < self.xmin
                || other.xmax > self.xmax
                || other.ymin < self.ymin
                || other.ymax > self.ymax)
        {
            return Ok(false);
        }
        if dims.has_z_extent() && (other.zmin < self.zmin || other.zmax > self.zmax) {
            return Ok(false);
        }
        if dims.has_t() && (other.tmin < self.tmin || other.tmax > self.tmax) {
            return Ok(false);
        }
        Ok(true)
    }

    /// Is this box contained in `other`?
    pub fn contained(&self, other: &STBox) -> Result<bool> {
        other.contains(self)
    }

    /// Do the boxes share at least one point on every shared dimension?
    pub fn overlaps(&self, other: &STBox) -> Result<bool> {
        let dims = common_dimensions(self, other)?;
        if dims.has_x()
            && (self.xmax < other.xmin
                || self.xmin > other.xmax
                || self.ymax < other.ymin
                || self.ymin > other.ymax)
        {
            return Ok(false);
        }
        if dims.has_z_extent() && (self.zmax < other.zmin || self.zmin > other.zmax) {
            return Ok(false);
        }
        if dims.has_t() && (self.tmax < other.tmin || self.tmin > other.tmax) {
            return Ok(false);
        }
        Ok(true)
    }

    /// Equal bounds on every shared dimension.
    pub fn same(&self, other: &STBox) -> Result<bool> {
        let dims = common_dimensions(self, other)?;
        if dims.has_x()
            && (self.xmin != other.xmin
                || self.xmax != other.xmax
                || self.ymin != other.ymin
                || self.ymax != other.ymax)
        {
            return Ok(false);
        }
        if dims.has_z_extent() && (self.zmin != other.zmin || self.zmax != other.zmax) {
            return Ok(false);
        }
        if dims.has_t() && (self.tmin != other.tmin || self.tmax != other.tmax) {
            return Ok(false);
        }
        Ok(true)
    }

    /// Do the boxes touch without their interiors overlapping?
    ///
    /// Boxes sharing n dimensions are adjacent when their intersection has
    /// zero extent along at least one of those dimensions. A degenerate box
    /// lying inside another therefore counts as adjacent to it.
    pub fn adjacent(&self, other: &STBox) -> Result<bool> {
        let dims = common_dimensions(self, other)?;
        let Some(inter) = self.intersection(other)? else {
            return Ok(false);
        };
        let mut degenerate = false;
        if dims.has_x() {
            degenerate |= inter.xmin == inter.xmax || inter.ymin == inter.ymax;
            if dims.has_z_extent() {
                degenerate |= inter.zmin == inter.zmax;
            }
        }
        if dims.has_t() {
            degenerate |= inter.tmin == inter.tmax;
        }
        Ok(degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StboxError;
    use stbox_types::temporal::Timestamp;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_contains_on_common_dimensions() {
        let xyt = STBox::xyt(0.0, 0.0, ts("2001-01-01"), 10.0, 10.0, ts("2001-01-10"));
        let xy = STBox::xy(1.0, 1.0, 2.0, 2.0);
        let t = STBox::t(ts("2001-01-02"), ts("2001-01-03"));
        assert!(xyt.contains(&xy).unwrap());
        assert!(xyt.contains(&t).unwrap());
        assert!(t.contained(&xyt).unwrap());

        let late = STBox::t(ts("2001-01-09"), ts("2001-01-11"));
        assert!(!xyt.contains(&late).unwrap());
    }

    #[test]
    fn test_contains_compares_z_only_when_shared() {
        let a = STBox::xyz(0.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        let b = STBox::xyz(1.0, 1.0, 20.0, 2.0, 2.0, 30.0);
        assert!(!a.contains(&b).unwrap());
        assert!(a.contains(&STBox::xy(1.0, 1.0, 2.0, 2.0)).unwrap());
    }

    #[test]
    fn test_overlaps() {
        let a = STBox::xy(0.0, 0.0, 5.0, 5.0);
        assert!(a.overlaps(&STBox::xy(5.0, 5.0, 6.0, 6.0)).unwrap());
        assert!(!a.overlaps(&STBox::xy(5.1, 0.0, 6.0, 6.0)).unwrap());
        assert!(a.overlaps(&a).unwrap());
    }

    #[test]
    fn test_same_ignores_unshared_dimensions() {
        let a = STBox::xyt(0.0, 0.0, ts("2001-01-01"), 1.0, 1.0, ts("2001-01-02"));
        let b = STBox::xy(0.0, 0.0, 1.0, 1.0);
        assert!(a.same(&b).unwrap());
        assert!(!a.same(&STBox::xy(0.0, 0.0, 1.0, 2.0)).unwrap());
    }

    #[test]
    fn test_predicate_errors() {
        let xy = STBox::xy(0.0, 0.0, 1.0, 1.0);
        let t = STBox::t(ts("2001-01-01"), ts("2001-01-02"));
        assert_eq!(xy.overlaps(&t), Err(StboxError::IncompatibleDimensions));

        let other_srid = xy.with_srid(3857);
        assert!(matches!(
            xy.contains(&other_srid),
            Err(StboxError::SridMismatch { .. })
        ));

        let g = STBox::geodetic(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).with_srid(0);
        assert_eq!(xy.same(&g), Err(StboxError::GeodeticMismatch));
    }

    #[test]
    fn test_adjacent() {
        let a = STBox::xy(0.0, 0.0, 5.0, 5.0);
        assert!(a.adjacent(&STBox::xy(5.0, 0.0, 10.0, 5.0)).unwrap());
        assert!(!a.adjacent(&STBox::xy(6.0, 0.0, 10.0, 5.0)).unwrap());
        assert!(!a.adjacent(&a).unwrap());

        let t1 = STBox::t(ts("2001-01-01"), ts("2001-01-02"));
        let t2 = STBox::t(ts("2001-01-02"), ts("2001-01-03"));
        assert!(t1.adjacent(&t2).unwrap());
    }

    #[test]
    fn test_adjacent_degenerate_box_inside_another() {
        let outer = STBox::xy(0.0, 0.0, 10.0, 10.0);
        let slice = STBox::xy(5.0, 2.0, 5.0, 8.0);
        assert!(outer.contains(&slice).unwrap());
        assert!(outer.adjacent(&slice).unwrap());
    }
}
