//! Directional predicates.
//!
//! `left`/`right` work on X, `below`/`above` on Y, `front`/`back` on Z and
//! `before`/`after` on time. The strict forms require a gap between the
//! boxes; the `over*` forms only bound one side, e.g. `overleft` holds when
//! this box does not extend to the right of `other`.

use crate::compute::validation::{
    ensure_has_t, ensure_has_x, ensure_has_z, ensure_same_geodetic, ensure_same_srid,
};
use crate::error::Result;
use crate::stbox::STBox;

fn check_spatial(b1: &STBox, b2: &STBox) -> Result<()> {
    ensure_has_x(b1)?;
    ensure_has_x(b2)?;
    ensure_same_geodetic(b1, b2)?;
    ensure_same_srid(b1, b2)
}

fn check_depth(b1: &STBox, b2: &STBox) -> Result<()> {
    ensure_has_z(b1)?;
    ensure_has_z(b2)?;
    ensure_same_geodetic(b1, b2)?;
    ensure_same_srid(b1, b2)
}

fn check_temporal(b1: &STBox, b2: &STBox) -> Result<()> {
    ensure_has_t(b1)?;
    ensure_has_t(b2)
}

impl STBox {
    /// Strictly to the left of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stbox::STBox;
    ///
    /// let a = STBox::xy(0.0, 0.0, 1.0, 1.0);
    /// let b = STBox::xy(2.0, 0.0, 3.0, 1.0);
    /// assert!(a.left(&b)?);
    /// assert!(b.right(&a)?);
    /// # Ok::<(), stbox::StboxError>(())
    /// ```
    pub fn left(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.xmax < other.xmin)
    }

    /// Does not extend to the right of `other`.
    pub fn overleft(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.xmax <= other.xmax)
    }

    pub fn right(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.xmin > other.xmax)
    }

    /// Does not extend to the left of `other`.
    pub fn overright(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.xmin >= other.xmin)
    }

    pub fn below(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.ymax < other.ymin)
    }

    pub fn overbelow(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.ymax <= other.ymax)
    }

    pub fn above(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.ymin > other.ymax)
    }

    pub fn overabove(&self, other: &STBox) -> Result<bool> {
        check_spatial(self, other)?;
        Ok(self.ymin >= other.ymin)
    }

    /// Strictly in front of `other`, i.e. smaller Z. Both boxes need Z.
    pub fn front(&self, other: &STBox) -> Result<bool> {
        check_depth(self, other)?;
        Ok(self.zmax < other.zmin)
    }

    pub fn overfront(&self, other: &STBox) -> Result<bool> {
        check_depth(self, other)?;
        Ok(self.zmax <= other.zmax)
    }

    pub fn back(&self, other: &STBox) -> Result<bool> {
        check_depth(self, other)?;
        Ok(self.zmin > other.zmax)
    }

    pub fn overback(&self, other: &STBox) -> Result<bool> {
        check_depth(self, other)?;
        Ok(self.zmin >= other.zmin)
    }

    /// Ends strictly before `other` starts.
    pub fn before(&self, other: &STBox) -> Result<bool> {
        check_temporal(self, other)?;
        Ok(self.tmax < other.tmin)
    }

    /// Does not end after `other` ends.
    pub fn overbefore(&self, other: &STBox) -> Result<bool> {
        check_temporal(self, other)?;
        Ok(self.tmax <= other.tmax)
    }

    pub fn after(&self, other: &STBox) -> Result<bool> {
        check_temporal(self, other)?;
        Ok(self.tmin > other.tmax)
    }

    pub fn overafter(&self, other: &STBox) -> Result<bool> {
        check_temporal(self, other)?;
        Ok(self.tmin >= other.tmin)
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
    fn test_x_and_y_predicates() {
        let a = STBox::xy(0.0, 0.0, 2.0, 2.0);
        let b = STBox::xy(1.0, 3.0, 4.0, 5.0);

        assert!(!a.left(&b).unwrap());
        assert!(a.overleft(&b).unwrap());
        assert!(!b.right(&a).unwrap());
        assert!(b.overright(&a).unwrap());

        assert!(a.below(&b).unwrap());
        assert!(a.overbelow(&b).unwrap());
        assert!(b.above(&a).unwrap());
        assert!(b.overabove(&a).unwrap());
        assert!(!a.above(&b).unwrap());
    }

    #[test]
    fn test_z_predicates() {
        let a = STBox::xyz(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let b = STBox::xyz(0.0, 0.0, 2.0, 1.0, 1.0, 3.0);
        assert!(a.front(&b).unwrap());
        assert!(a.overfront(&b).unwrap());
        assert!(b.back(&a).unwrap());
        assert!(b.overback(&a).unwrap());
        assert!(!b.front(&a).unwrap());

        let flat = STBox::xy(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            a.front(&flat),
            Err(StboxError::DimensionMissing(_))
        ));
    }

    #[test]
    fn test_t_predicates() {
        let a = STBox::t(ts("2001-01-01"), ts("2001-01-02"));
        let b = STBox::xyt(0.0, 0.0, ts("2001-01-03"), 1.0, 1.0, ts("2001-01-04"));
        assert!(a.before(&b).unwrap());
        assert!(a.overbefore(&b).unwrap());
        assert!(b.after(&a).unwrap());
        assert!(b.overafter(&a).unwrap());
        assert!(!a.after(&b).unwrap());

        let xy = STBox::xy(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            a.before(&xy),
            Err(StboxError::DimensionMissing(_))
        ));
    }

    #[test]
    fn test_spatial_predicates_check_reference() {
        let a = STBox::xy(0.0, 0.0, 1.0, 1.0);
        let t = STBox::t(ts("2001-01-01"), ts("2001-01-02"));
        assert!(matches!(a.left(&t), Err(StboxError::DimensionMissing(_))));
        assert!(matches!(
            a.left(&a.with_srid(4326)),
            Err(StboxError::SridMismatch { .. })
        ));
    }
}
