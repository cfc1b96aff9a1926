//! Total order over boxes, for use as a sorted index key.
//!
//! Boxes compare lexicographically on SRID, time bounds, lower spatial
//! corner, upper spatial corner and finally the dimension flags. A bound
//! group is compared directly when both boxes carry it; when only one box
//! carries it, the box without it sorts first.

use crate::stbox::STBox;
use stbox_types::temporal::Timestamp;
use std::cmp::Ordering;

/// Float order that never fails: NaN sorts by its bit pattern.
#[inline]
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

#[inline]
fn cmp_present<T, F>(a: Option<T>, b: Option<T>, cmp: F) -> Ordering
where
    F: FnOnce(T, T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn time_bounds(b: &STBox) -> Option<(Timestamp, Timestamp)> {
    b.has_t().then_some((b.tmin, b.tmax))
}

fn spatial(b: &STBox) -> Option<&STBox> {
    b.has_x().then_some(b)
}

fn depth(b: &STBox) -> Option<&STBox> {
    b.dims.has_z_extent().then_some(b)
}

impl STBox {
    /// Compare two boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use stbox::STBox;
    ///
    /// let a = STBox::xy(0.0, 0.0, 1.0, 1.0);
    /// let b = STBox::xy(0.0, 0.5, 1.0, 1.0);
    /// assert_eq!(a.compare(&b), Ordering::Less);
    /// assert!(a < b);
    /// ```
    pub fn compare(&self, other: &STBox) -> Ordering {
        self.srid
            .cmp(&other.srid)
            .then_with(|| cmp_present(time_bounds(self), time_bounds(other), |a, b| a.cmp(&b)))
            .then_with(|| {
                cmp_present(spatial(self), spatial(other), |a, b| {
                    cmp_f64(a.xmin, b.xmin)
                        .then_with(|| cmp_f64(a.ymin, b.ymin))
                        .then_with(|| {
                            cmp_present(depth(a), depth(b), |a, b| cmp_f64(a.zmin, b.zmin))
                        })
                        .then_with(|| cmp_f64(a.xmax, b.xmax))
                        .then_with(|| cmp_f64(a.ymax, b.ymax))
                        .then_with(|| {
                            cmp_present(depth(a), depth(b), |a, b| cmp_f64(a.zmax, b.zmax))
                        })
                })
            })
            .then_with(|| self.dims.to_bits().cmp(&other.dims.to_bits()))
    }
}

impl PartialOrd for STBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_srid_first() {
        let a = STBox::xy(5.0, 5.0, 6.0, 6.0).with_srid(1);
        let b = STBox::xy(0.0, 0.0, 1.0, 1.0).with_srid(2);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_time_before_space() {
        let a = STBox::xyt(9.0, 9.0, ts("2001-01-01"), 10.0, 10.0, ts("2001-01-02"));
        let b = STBox::xyt(0.0, 0.0, ts("2001-01-02"), 1.0, 1.0, ts("2001-01-03"));
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn test_lower_corner_before_upper_corner() {
        let a = STBox::xyz(0.0, 0.0, 0.0, 9.0, 9.0, 9.0);
        let b = STBox::xyz(0.0, 0.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_missing_dimension_sorts_first() {
        let xy = STBox::xy(0.0, 0.0, 1.0, 1.0);
        let xyt = STBox::xyt(0.0, 0.0, ts("2001-01-01"), 1.0, 1.0, ts("2001-01-02"));
        assert_eq!(xy.compare(&xyt), Ordering::Less);

        let xyz = STBox::xyz(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        assert_eq!(xy.compare(&xyz), Ordering::Less);
    }

    #[test]
    fn test_equal_boxes_compare_equal() {
        let a = STBox::xyzt(1.0, 2.0, 3.0, ts("2001-01-01"), 4.0, 5.0, 6.0, ts("2001-01-02"));
        let b = a;
        assert_eq!(a.compare(&b), Ordering::Equal);
        assert!(a <= b && a >= b);
    }

    #[test]
    fn test_geodetic_flag_breaks_ties() {
        let planar = STBox::xyz(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).with_srid(4326);
        let geodetic = STBox::geodetic_z(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        assert_eq!(planar.compare(&geodetic), Ordering::Less);
        assert_ne!(planar, geodetic);
    }
}
