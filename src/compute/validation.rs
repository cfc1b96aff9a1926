//! Precondition checks shared by box operations.
//!
//! Every check returns `Ok(())` or the error the calling operation must fail
//! with, so operations read as a list of `ensure_*(..)?` lines.

use crate::error::{Result, StboxError};
use crate::stbox::STBox;
use chrono::TimeDelta;

/// Fails with `DimensionMissing` unless the box has X/Y.
///
/// # Examples
///
/// ```
/// use stbox::STBox;
/// use stbox::compute::validation::ensure_has_x;
///
/// assert!(ensure_has_x(&STBox::xy(0.0, 0.0, 1.0, 1.0)).is_ok());
/// ```
pub fn ensure_has_x(b: &STBox) -> Result<()> {
    if !b.has_x() {
        return Err(StboxError::DimensionMissing(
            "The box must have XY dimension".to_string(),
        ));
    }
    Ok(())
}

/// Fails with `DimensionMissing` unless the box has the Z flag.
pub fn ensure_has_z(b: &STBox) -> Result<()> {
    if !b.has_z() {
        return Err(StboxError::DimensionMissing(
            "The box must have Z dimension".to_string(),
        ));
    }
    Ok(())
}

/// Fails with `DimensionMissing` unless the box has a time extent.
pub fn ensure_has_t(b: &STBox) -> Result<()> {
    if !b.has_t() {
        return Err(StboxError::DimensionMissing(
            "The box must have time dimension".to_string(),
        ));
    }
    Ok(())
}

pub fn ensure_not_geodetic(b: &STBox) -> Result<()> {
    if b.is_geodetic() {
        return Err(StboxError::UnsupportedGeodetic);
    }
    Ok(())
}

/// Fails with `IncompatibleDimensions` when the boxes share neither X nor T.
pub fn ensure_common_dimension(b1: &STBox, b2: &STBox) -> Result<()> {
    if !b1.dimensions().common(b2.dimensions()).has_any() {
        return Err(StboxError::IncompatibleDimensions);
    }
    Ok(())
}

pub fn ensure_same_geodetic(b1: &STBox, b2: &STBox) -> Result<()> {
    if b1.is_geodetic() != b2.is_geodetic() {
        return Err(StboxError::GeodeticMismatch);
    }
    Ok(())
}

/// SRIDs only matter when both boxes have a spatial extent.
pub fn ensure_same_srid(b1: &STBox, b2: &STBox) -> Result<()> {
    if b1.has_x() && b2.has_x() && b1.srid() != b2.srid() {
        return Err(StboxError::SridMismatch {
            left: b1.srid(),
            right: b2.srid(),
        });
    }
    Ok(())
}

/// Geodetic-ness and SRID must agree wherever both boxes have X.
pub fn ensure_same_spatial_reference(b1: &STBox, b2: &STBox) -> Result<()> {
    if b1.has_x() && b2.has_x() {
        ensure_same_geodetic(b1, b2)?;
        ensure_same_srid(b1, b2)?;
    }
    Ok(())
}

/// Fails with `IncompatibleDimensions` unless X, Z and T flags all agree.
pub fn ensure_same_dimensionality(b1: &STBox, b2: &STBox) -> Result<()> {
    if !b1.dimensions().same_dimensionality(b2.dimensions()) {
        return Err(StboxError::IncompatibleDimensions);
    }
    Ok(())
}

/// Validates a spatial cell size.
///
/// # Examples
///
/// ```
/// use stbox::compute::validation::ensure_positive_size;
///
/// assert!(ensure_positive_size(1.5).is_ok());
/// assert!(ensure_positive_size(0.0).is_err());
/// assert!(ensure_positive_size(f64::NAN).is_err());
/// ```
pub fn ensure_positive_size(size: f64) -> Result<()> {
    if !size.is_finite() {
        return Err(StboxError::InvalidArgument(format!(
            "The size must be finite, got: {}",
            size
        )));
    }
    if size <= 0.0 {
        return Err(StboxError::InvalidArgument(format!(
            "The size must be positive, got: {}",
            size
        )));
    }
    Ok(())
}

/// Validates a temporal cell size.
pub fn ensure_positive_duration(duration: TimeDelta) -> Result<()> {
    if duration <= TimeDelta::zero() {
        return Err(StboxError::InvalidArgument(format!(
            "The duration must be positive, got: {}",
            duration
        )));
    }
    if duration.num_microseconds().is_none() {
        return Err(StboxError::InvalidArgument(format!(
            "The duration is too large: {}",
            duration
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stbox_types::temporal::Timestamp;

    fn period_box() -> STBox {
        STBox::t(Timestamp::from_micros(0), Timestamp::from_micros(10))
    }

    #[test]
    fn test_dimension_checks() {
        let xy = STBox::xy(0.0, 0.0, 1.0, 1.0);
        let xyz = STBox::xyz(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let t = period_box();

        assert!(ensure_has_x(&xy).is_ok());
        assert!(matches!(
            ensure_has_x(&t),
            Err(StboxError::DimensionMissing(_))
        ));
        assert!(ensure_has_z(&xyz).is_ok());
        assert!(ensure_has_z(&xy).is_err());
        assert!(ensure_has_t(&t).is_ok());
        assert!(ensure_has_t(&xy).is_err());
    }

    #[test]
    fn test_geodetic_check() {
        let g = STBox::geodetic(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        assert_eq!(ensure_not_geodetic(&g), Err(StboxError::UnsupportedGeodetic));
        assert!(ensure_not_geodetic(&STBox::xy(0.0, 0.0, 1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_common_dimension() {
        let xy = STBox::xy(0.0, 0.0, 1.0, 1.0);
        let t = period_box();
        assert_eq!(
            ensure_common_dimension(&xy, &t),
            Err(StboxError::IncompatibleDimensions)
        );
        assert!(ensure_common_dimension(&xy, &xy).is_ok());
    }

    #[test]
    fn test_spatial_reference_checks() {
        let a = STBox::xy(0.0, 0.0, 1.0, 1.0).with_srid(3857);
        let b = STBox::xy(0.0, 0.0, 1.0, 1.0).with_srid(4326);
        assert_eq!(
            ensure_same_srid(&a, &b),
            Err(StboxError::SridMismatch {
                left: 3857,
                right: 4326
            })
        );
        // No spatial extent on one side: nothing to compare
        assert!(ensure_same_srid(&a, &period_box()).is_ok());

        let g = STBox::geodetic(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).with_srid(3857);
        assert_eq!(
            ensure_same_spatial_reference(&a, &g),
            Err(StboxError::GeodeticMismatch)
        );
    }

    #[test]
    fn test_sizes() {
        assert!(ensure_positive_size(0.1).is_ok());
        assert!(ensure_positive_size(-1.0).is_err());
        assert!(ensure_positive_size(f64::INFINITY).is_err());
        assert!(ensure_positive_duration(TimeDelta::hours(1)).is_ok());
        assert!(ensure_positive_duration(TimeDelta::zero()).is_err());
        assert!(ensure_positive_duration(TimeDelta::seconds(-5)).is_err());
    }
}
