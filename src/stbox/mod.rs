//! The spatiotemporal box value.
//!
//! An [`STBox`] bounds values over up to four dimensions: X and Y (always
//! together), Z, and time. Which dimensions are present is recorded in its
//! [`Dimensions`]; bounds of absent dimensions are zero and ignored.
//!
//! ```rust
//! use stbox::STBox;
//!
//! let a = STBox::xy(0.0, 0.0, 10.0, 10.0);
//! let b = STBox::xy(5.0, 5.0, 15.0, 15.0);
//! assert!(a.overlaps(&b)?);
//! assert_eq!(a.to_string(), "STBOX((0,0),(10,10))");
//! # Ok::<(), stbox::StboxError>(())
//! ```

mod binary;
mod cast;
mod text;

pub use binary::ENCODED_LEN;

use crate::compute::validation::{ensure_has_t, ensure_has_x};
use crate::error::{Result, StboxError};
use crate::flags::Dimensions;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use stbox_types::temporal::Timestamp;

/// SRID given to geodetic boxes when none is stated.
pub const DEFAULT_GEODETIC_SRID: i32 = 4326;

/// A spatiotemporal bounding box.
///
/// Boxes are small `Copy` values. Every transformation returns a new box;
/// only [`STBox::expand`] works in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStbox")]
pub struct STBox {
    pub(crate) xmin: f64,
    pub(crate) xmax: f64,
    pub(crate) ymin: f64,
    pub(crate) ymax: f64,
    pub(crate) zmin: f64,
    pub(crate) zmax: f64,
    pub(crate) tmin: Timestamp,
    pub(crate) tmax: Timestamp,
    pub(crate) srid: i32,
    pub(crate) dims: Dimensions,
}

/// Serialized fields of a box before the invariants are checked.
#[derive(Deserialize)]
struct RawStbox {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    zmin: f64,
    zmax: f64,
    tmin: Timestamp,
    tmax: Timestamp,
    srid: i32,
    dims: Dimensions,
}

impl TryFrom<RawStbox> for STBox {
    type Error = StboxError;

    fn try_from(raw: RawStbox) -> Result<Self> {
        STBox {
            xmin: raw.xmin,
            xmax: raw.xmax,
            ymin: raw.ymin,
            ymax: raw.ymax,
            zmin: raw.zmin,
            zmax: raw.zmax,
            tmin: raw.tmin,
            tmax: raw.tmax,
            srid: raw.srid,
            dims: raw.dims,
        }
        .checked()
    }
}

#[inline]
fn ordered<T: PartialOrd>(min: T, max: T) -> (T, T) {
    if min > max { (max, min) } else { (min, max) }
}

impl STBox {
    /// Build a box, swapping any inverted bounds and zeroing absent axes.
    ///
    /// Z, the geodetic flag and the SRID only exist alongside X, so they are
    /// cleared when `has_x` is false.
    #[allow(clippy::too_many_arguments)]
    pub fn make(
        has_x: bool,
        has_z: bool,
        has_t: bool,
        geodetic: bool,
        srid: i32,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        zmin: f64,
        zmax: f64,
        tmin: Timestamp,
        tmax: Timestamp,
    ) -> STBox {
        let dims = Dimensions::new(has_x, has_x && has_z, has_t, has_x && geodetic);
        let mut result = STBox {
            xmin: 0.0,
            xmax: 0.0,
            ymin: 0.0,
            ymax: 0.0,
            zmin: 0.0,
            zmax: 0.0,
            tmin: Timestamp::EPOCH,
            tmax: Timestamp::EPOCH,
            srid: if has_x { srid } else { 0 },
            dims,
        };
        if dims.has_x() {
            (result.xmin, result.xmax) = ordered(xmin, xmax);
            (result.ymin, result.ymax) = ordered(ymin, ymax);
            if dims.has_z_extent() {
                (result.zmin, result.zmax) = ordered(zmin, zmax);
            }
        }
        if dims.has_t() {
            (result.tmin, result.tmax) = ordered(tmin, tmax);
        }
        result
    }

    /// Check a box read from storage against the invariants [`STBox::make`]
    /// establishes, zeroing the bounds of absent axes.
    ///
    /// Fails with [`StboxError::MalformedInput`] when Z or the geodetic flag
    /// is set without X, when neither X nor T is set, or when a present axis
    /// has its minimum above its maximum.
    pub(crate) fn checked(self) -> Result<STBox> {
        let dims = self.dims;
        if !dims.has_any() {
            return Err(StboxError::MalformedInput(
                "Box must have an X or a T dimension".to_string(),
            ));
        }
        if !dims.has_x() && (dims.has_z() || dims.is_geodetic()) {
            return Err(StboxError::MalformedInput(
                "Z and geodetic flags require an X dimension".to_string(),
            ));
        }
        let inverted = |axis: &str| {
            StboxError::MalformedInput(format!("Box has {}min greater than {}max", axis, axis))
        };
        if dims.has_x() {
            if self.xmin > self.xmax {
                return Err(inverted("x"));
            }
            if self.ymin > self.ymax {
                return Err(inverted("y"));
            }
            if dims.has_z_extent() && self.zmin > self.zmax {
                return Err(inverted("z"));
            }
        }
        if dims.has_t() && self.tmin > self.tmax {
            return Err(inverted("t"));
        }
        Ok(Self::make(
            dims.has_x(),
            dims.has_z(),
            dims.has_t(),
            dims.is_geodetic(),
            self.srid,
            self.xmin,
            self.xmax,
            self.ymin,
            self.ymax,
            self.zmin,
            self.zmax,
            self.tmin,
            self.tmax,
        ))
    }

    /// Planar X/Y box with an unspecified SRID.
    pub fn xy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> STBox {
        Self::make(
            true,
            false,
            false,
            false,
            0,
            xmin,
            xmax,
            ymin,
            ymax,
            0.0,
            0.0,
            Timestamp::EPOCH,
            Timestamp::EPOCH,
        )
    }

    /// Planar X/Y/Z box.
    pub fn xyz(xmin: f64, ymin: f64, zmin: f64, xmax: f64, ymax: f64, zmax: f64) -> STBox {
        Self::make(
            true,
            true,
            false,
            false,
            0,
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            Timestamp::EPOCH,
            Timestamp::EPOCH,
        )
    }

    /// Time-only box.
    pub fn t(tmin: Timestamp, tmax: Timestamp) -> STBox {
        Self::make(
            false, false, true, false, 0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, tmin, tmax,
        )
    }

    /// Planar X/Y box with a time extent.
    pub fn xyt(
        xmin: f64,
        ymin: f64,
        tmin: Timestamp,
        xmax: f64,
        ymax: f64,
        tmax: Timestamp,
    ) -> STBox {
        Self::make(
            true, false, true, false, 0, xmin, xmax, ymin, ymax, 0.0, 0.0, tmin, tmax,
        )
    }

    /// Planar X/Y/Z box with a time extent.
    #[allow(clippy::too_many_arguments)]
    pub fn xyzt(
        xmin: f64,
        ymin: f64,
        zmin: f64,
        tmin: Timestamp,
        xmax: f64,
        ymax: f64,
        zmax: f64,
        tmax: Timestamp,
    ) -> STBox {
        Self::make(
            true, true, true, false, 0, xmin, xmax, ymin, ymax, zmin, zmax, tmin, tmax,
        )
    }

    /// Geodetic box without the Z flag. Geodetic boxes always carry Z bounds.
    pub fn geodetic(xmin: f64, ymin: f64, zmin: f64, xmax: f64, ymax: f64, zmax: f64) -> STBox {
        Self::make(
            true,
            false,
            false,
            true,
            DEFAULT_GEODETIC_SRID,
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            Timestamp::EPOCH,
            Timestamp::EPOCH,
        )
    }

    /// Geodetic box with the Z flag set.
    pub fn geodetic_z(xmin: f64, ymin: f64, zmin: f64, xmax: f64, ymax: f64, zmax: f64) -> STBox {
        Self::make(
            true,
            true,
            false,
            true,
            DEFAULT_GEODETIC_SRID,
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            Timestamp::EPOCH,
            Timestamp::EPOCH,
        )
    }

    /// Geodetic box with a time extent.
    #[allow(clippy::too_many_arguments)]
    pub fn geodetic_t(
        xmin: f64,
        ymin: f64,
        zmin: f64,
        tmin: Timestamp,
        xmax: f64,
        ymax: f64,
        zmax: f64,
        tmax: Timestamp,
    ) -> STBox {
        Self::make(
            true,
            false,
            true,
            true,
            DEFAULT_GEODETIC_SRID,
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            tmin,
            tmax,
        )
    }

    /// Geodetic box with the Z flag and a time extent.
    #[allow(clippy::too_many_arguments)]
    pub fn geodetic_zt(
        xmin: f64,
        ymin: f64,
        zmin: f64,
        tmin: Timestamp,
        xmax: f64,
        ymax: f64,
        zmax: f64,
        tmax: Timestamp,
    ) -> STBox {
        Self::make(
            true,
            true,
            true,
            true,
            DEFAULT_GEODETIC_SRID,
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
            tmin,
            tmax,
        )
    }

    /// Replace the SRID. Ignored for boxes without X.
    pub fn with_srid(mut self, srid: i32) -> STBox {
        if self.dims.has_x() {
            self.srid = srid;
        }
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn has_x(&self) -> bool {
        self.dims.has_x()
    }

    pub fn has_z(&self) -> bool {
        self.dims.has_z()
    }

    pub fn has_t(&self) -> bool {
        self.dims.has_t()
    }

    pub fn is_geodetic(&self) -> bool {
        self.dims.is_geodetic()
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn xmin(&self) -> Option<f64> {
        self.has_x().then_some(self.xmin)
    }

    pub fn xmax(&self) -> Option<f64> {
        self.has_x().then_some(self.xmax)
    }

    pub fn ymin(&self) -> Option<f64> {
        self.has_x().then_some(self.ymin)
    }

    pub fn ymax(&self) -> Option<f64> {
        self.has_x().then_some(self.ymax)
    }

    pub fn zmin(&self) -> Option<f64> {
        self.has_z().then_some(self.zmin)
    }

    pub fn zmax(&self) -> Option<f64> {
        self.has_z().then_some(self.zmax)
    }

    pub fn tmin(&self) -> Option<Timestamp> {
        self.has_t().then_some(self.tmin)
    }

    pub fn tmax(&self) -> Option<Timestamp> {
        self.has_t().then_some(self.tmax)
    }

    /// Extend this box to also cover `other` on the dimensions this box has.
    ///
    /// No SRID or dimensionality check is made; callers that need one go
    /// through [`STBox::union`].
    pub fn expand(&mut self, other: &STBox) {
        if self.dims.has_x() {
            self.xmin = self.xmin.min(other.xmin);
            self.xmax = self.xmax.max(other.xmax);
            self.ymin = self.ymin.min(other.ymin);
            self.ymax = self.ymax.max(other.ymax);
            if self.dims.has_z_extent() {
                self.zmin = self.zmin.min(other.zmin);
                self.zmax = self.zmax.max(other.zmax);
            }
        }
        if self.dims.has_t() {
            self.tmin = self.tmin.min(other.tmin);
            self.tmax = self.tmax.max(other.tmax);
        }
    }

    /// Shift the time extent by `start` and/or rescale it to `duration`.
    ///
    /// With a duration the new upper bound is `tmin + duration` (after the
    /// shift); otherwise the upper bound is shifted along with the lower one.
    pub fn shift_scale(
        &self,
        start: Option<TimeDelta>,
        duration: Option<TimeDelta>,
    ) -> Result<STBox> {
        if start.is_none() && duration.is_none() {
            return Err(StboxError::InvalidArgument(
                "At least one of the shift or duration must be given".to_string(),
            ));
        }
        ensure_has_t(self)?;
        if let Some(duration) = duration
            && duration < TimeDelta::zero()
        {
            return Err(StboxError::InvalidArgument(format!(
                "The duration must be positive: {}",
                duration
            )));
        }
        let mut result = *self;
        if let Some(start) = start {
            result.tmin = self.tmin.checked_add(start)?;
        }
        result.tmax = match (start, duration) {
            (_, Some(duration)) => result.tmin.checked_add(duration)?,
            (Some(start), None) => self.tmax.checked_add(start)?,
            (None, None) => self.tmax,
        };
        Ok(result)
    }

    /// Widen every spatial axis by `delta` on both sides.
    pub fn expand_spatial(&self, delta: f64) -> Result<STBox> {
        ensure_has_x(self)?;
        let mut result = *self;
        result.xmin = self.xmin - delta;
        result.xmax = self.xmax + delta;
        result.ymin = self.ymin - delta;
        result.ymax = self.ymax + delta;
        if self.dims.has_z_extent() {
            result.zmin = self.zmin - delta;
            result.zmax = self.zmax + delta;
        }
        Ok(result)
    }

    /// Widen the time extent by `duration` on both sides.
    pub fn expand_temporal(&self, duration: TimeDelta) -> Result<STBox> {
        ensure_has_t(self)?;
        let mut result = *self;
        result.tmin = self.tmin.checked_sub(duration)?;
        result.tmax = self.tmax.checked_add(duration)?;
        Ok(result)
    }

    /// Round the spatial bounds to `digits` decimal places. Time is untouched.
    pub fn round_precision(&self, digits: i32) -> Result<STBox> {
        ensure_has_x(self)?;
        let mut result = *self;
        result.xmin = round_to(self.xmin, digits);
        result.xmax = round_to(self.xmax, digits);
        result.ymin = round_to(self.ymin, digits);
        result.ymax = round_to(self.ymax, digits);
        if self.dims.has_z_extent() {
            result.zmin = round_to(self.zmin, digits);
            result.zmax = round_to(self.zmax, digits);
        }
        Ok(result)
    }

    /// True when every active spatial bound is finite.
    pub(crate) fn has_finite_space(&self) -> bool {
        !self.dims.has_x()
            || [self.xmin, self.xmax, self.ymin, self.ymax, self.zmin, self.zmax]
                .iter()
                .all(|v| v.is_finite())
    }
}

/// Round half away from zero at the given number of decimals.
fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(digits);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}
