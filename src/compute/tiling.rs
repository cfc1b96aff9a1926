//! Regular grid tiling of a box.
//!
//! A grid partitions space into cubes of edge `cell_size` anchored at an
//! origin point, and optionally time into slices of `time_cell_size`
//! anchored at a time origin. Cell `(i, j, ..)` spans
//! `[origin + size * i, origin + size * (i + 1))` on each axis.
//!
//! The cells covering a box run from the cell holding its lower bound to the
//! cell holding its upper bound. An upper bound lying exactly on a cell edge
//! closes the previous cell rather than opening a new one, unless the box is
//! flat along that axis.
//!
//! [`StboxGrid`] enumerates every cell touching a box, X varying fastest,
//! then Y, then Z and T when present:
//!
//! ```
//! use stbox::{GridConfig, STBox};
//!
//! let bounds = STBox::xy(0.0, 0.0, 10.0, 10.0);
//! let coords: Vec<Vec<i64>> = bounds
//!     .grid(&GridConfig::new(5.0))?
//!     .map(|tile| tile.coords.to_vec())
//!     .collect();
//! assert_eq!(coords.len(), 4);
//! assert_eq!(coords[0], vec![0, 0]);
//! assert_eq!(coords[1], vec![1, 0]);
//! # Ok::<(), stbox::StboxError>(())
//! ```

use crate::compute::validation::{
    ensure_has_t, ensure_has_x, ensure_not_geodetic, ensure_positive_duration,
    ensure_positive_size,
};
use crate::config::GridConfig;
use crate::error::{Result, StboxError};
use crate::stbox::STBox;
use serde::Serialize;
use smallvec::SmallVec;
use stbox_types::point::Point3d;
use stbox_types::temporal::{TemporalError, Timestamp};
use std::iter::FusedIterator;

const MAX_DIMS: usize = 4;

/// Integer coordinates of a cell, one per active axis.
pub type TileCoords = SmallVec<[i64; MAX_DIMS]>;

/// One cell of a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub coords: TileCoords,
    pub bounds: STBox,
}

/// Cell geometry shared by the enumerator and [`tile_at`].
#[derive(Debug, Clone, Copy)]
struct Layout {
    has_z: bool,
    has_t: bool,
    srid: i32,
    size: f64,
    tsize: i64,
    origin: Point3d,
    time_origin: Timestamp,
}

impl Layout {
    fn ndims(&self) -> usize {
        2 + usize::from(self.has_z) + usize::from(self.has_t)
    }

    fn checked_cell_time(&self, coord: i64) -> Result<Timestamp> {
        self.tsize
            .checked_mul(coord)
            .and_then(|offset| self.time_origin.as_micros().checked_add(offset))
            .map(Timestamp::from_micros)
            .ok_or(StboxError::Temporal(TemporalError::Overflow))
    }

    fn cell_time(&self, coord: i64) -> Timestamp {
        Timestamp::from_micros(
            self.time_origin
                .as_micros()
                .saturating_add(self.tsize.saturating_mul(coord)),
        )
    }

    /// Like [`Layout::cell`], failing when the time bounds overflow.
    fn checked_cell(&self, coords: &[i64]) -> Result<STBox> {
        if self.has_t {
            let coord = coords[self.ndims() - 1];
            let next = coord
                .checked_add(1)
                .ok_or(StboxError::Temporal(TemporalError::Overflow))?;
            self.checked_cell_time(coord)?;
            self.checked_cell_time(next)?;
        }
        Ok(self.cell(coords))
    }

    /// Box of the cell at `coords`; `coords.len()` must equal `ndims()`.
    fn cell(&self, coords: &[i64]) -> STBox {
        let span = |origin: f64, coord: i64| {
            (
                origin + self.size * coord as f64,
                origin + self.size * (coord as f64 + 1.0),
            )
        };
        let (xmin, xmax) = span(self.origin.x(), coords[0]);
        let (ymin, ymax) = span(self.origin.y(), coords[1]);
        let (zmin, zmax) = if self.has_z {
            span(self.origin.z(), coords[2])
        } else {
            (0.0, 0.0)
        };
        let (tmin, tmax) = if self.has_t {
            let coord = coords[self.ndims() - 1];
            (self.cell_time(coord), self.cell_time(coord.saturating_add(1)))
        } else {
            (Timestamp::EPOCH, Timestamp::EPOCH)
        };
        STBox::make(
            true, self.has_z, self.has_t, false, self.srid, xmin, xmax, ymin, ymax, zmin, zmax,
            tmin, tmax,
        )
    }
}

/// Cell index range `[lo, hi]` covering `[low, high]` along one spatial axis.
///
/// Fails when an index does not fit in an `i64`.
fn spatial_range(low: f64, high: f64, origin: f64, size: f64) -> Result<(i64, i64)> {
    let lo = ((low - origin) / size).floor();
    let pos = (high - origin) / size;
    let mut hi = pos.floor();
    if hi == pos && high > low {
        hi -= 1.0;
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    let limit = i64::MAX as f64;
    for index in [lo, hi] {
        if !(index >= -limit && index < limit) {
            return Err(StboxError::InvalidArgument(format!(
                "Grid cell index {} along [{}, {}] is out of range for cell size {}",
                index, low, high, size
            )));
        }
    }
    Ok((lo as i64, hi as i64))
}

/// Cell index range covering `[low, high]` along the time axis.
fn temporal_range(
    low: Timestamp,
    high: Timestamp,
    origin: Timestamp,
    tsize: i64,
) -> Result<(i64, i64)> {
    let tsize = i128::from(tsize);
    let offset = |t: Timestamp| i128::from(t.as_micros()) - i128::from(origin.as_micros());
    let lo = offset(low).div_euclid(tsize);
    let mut hi = offset(high).div_euclid(tsize);
    if offset(high).rem_euclid(tsize) == 0 && high > low {
        hi -= 1;
    }
    let to_i64 =
        |v: i128| i64::try_from(v).map_err(|_| StboxError::Temporal(TemporalError::Overflow));
    Ok((to_i64(lo)?, to_i64(hi)?))
}

/// Enumerator over the cells of a grid covering a box.
///
/// Created by [`STBox::grid`]. The grid is a plain iterator: the caller
/// pulls cells at its own pace and may drop it at any point.
#[derive(Debug, Clone)]
pub struct StboxGrid {
    layout: Layout,
    min: [i64; MAX_DIMS],
    max: [i64; MAX_DIMS],
    coords: [i64; MAX_DIMS],
    done: bool,
}

impl StboxGrid {
    /// Build the grid covering `bounds`.
    ///
    /// Fails when the cell sizes are not positive, when `bounds` has no
    /// spatial extent, is geodetic or has non-finite bounds, when a time
    /// cell size is given for a box without time, or when the origin SRID
    /// is set and differs from the box SRID.
    pub fn new(bounds: &STBox, config: &GridConfig) -> Result<Self> {
        ensure_positive_size(config.cell_size)?;
        ensure_has_x(bounds)?;
        ensure_not_geodetic(bounds)?;
        if let Some(duration) = config.time_cell_size {
            ensure_positive_duration(duration)?;
            ensure_has_t(bounds)?;
        }
        if config.origin_srid != 0 && config.origin_srid != bounds.srid() {
            return Err(StboxError::SridMismatch {
                left: bounds.srid(),
                right: config.origin_srid,
            });
        }
        if !bounds.has_finite_space() || !config.origin.is_finite() {
            log::warn!("Rejecting grid over non-finite bounds: {}", bounds);
            return Err(StboxError::InvalidArgument(
                "The grid bounds and origin must be finite".to_string(),
            ));
        }

        let tsize = config.time_cell_micros().unwrap_or(0);
        let layout = Layout {
            has_z: bounds.has_z(),
            has_t: tsize > 0,
            srid: bounds.srid(),
            size: config.cell_size,
            tsize,
            origin: config.origin,
            time_origin: config.time_origin,
        };

        let mut min = [0i64; MAX_DIMS];
        let mut max = [0i64; MAX_DIMS];
        let origin = config.origin;
        let size = config.cell_size;
        (min[0], max[0]) = spatial_range(bounds.xmin, bounds.xmax, origin.x(), size)?;
        (min[1], max[1]) = spatial_range(bounds.ymin, bounds.ymax, origin.y(), size)?;
        let mut ndims = 2;
        if layout.has_z {
            (min[ndims], max[ndims]) =
                spatial_range(bounds.zmin, bounds.zmax, origin.z(), size)?;
            ndims += 1;
        }
        if layout.has_t {
            (min[ndims], max[ndims]) =
                temporal_range(bounds.tmin, bounds.tmax, config.time_origin, tsize)?;
            ndims += 1;
            // Every enumerated cell must have representable time bounds.
            layout.checked_cell(&min[..ndims])?;
            layout.checked_cell(&max[..ndims])?;
        }

        let grid = Self {
            layout,
            min,
            max,
            coords: min,
            done: false,
        };
        log::debug!(
            "Created {}-dimensional grid: cells {:?}..={:?}, {} in total",
            grid.ndims(),
            grid.min_coords(),
            grid.max_coords(),
            grid.cell_count()
        );
        Ok(grid)
    }

    /// Number of active axes, between 2 and 4.
    pub fn ndims(&self) -> usize {
        self.layout.ndims()
    }

    /// Lowest cell coordinates, one per active axis.
    pub fn min_coords(&self) -> &[i64] {
        &self.min[..self.ndims()]
    }

    /// Highest cell coordinates, one per active axis.
    pub fn max_coords(&self) -> &[i64] {
        &self.max[..self.ndims()]
    }

    /// Total number of cells, saturating at `u128::MAX`.
    pub fn cell_count(&self) -> u128 {
        self.min_coords()
            .iter()
            .zip(self.max_coords())
            .map(|(lo, hi)| (i128::from(*hi) - i128::from(*lo) + 1) as u128)
            .fold(1u128, |acc, n| acc.saturating_mul(n))
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The cell the enumerator points at. After the grid is exhausted this
    /// is the last cell produced.
    pub fn current_cell(&self) -> Tile {
        let coords = &self.coords[..self.ndims()];
        Tile {
            coords: TileCoords::from_slice(coords),
            bounds: self.layout.cell(coords),
        }
    }

    /// The cell at arbitrary coordinates of this grid, which need not lie
    /// within the covered range.
    pub fn cell_at(&self, coords: &[i64]) -> Result<Tile> {
        if coords.len() != self.ndims() {
            return Err(StboxError::InvalidArgument(format!(
                "Expected {} coordinates, got {}",
                self.ndims(),
                coords.len()
            )));
        }
        Ok(Tile {
            coords: TileCoords::from_slice(coords),
            bounds: self.layout.checked_cell(coords)?,
        })
    }

    /// Move to the next cell, X fastest. Marks the grid done after the last
    /// cell instead of wrapping around.
    pub fn advance(&mut self) {
        if self.done {
            return;
        }
        let ndims = self.ndims();
        for axis in 0..ndims {
            if self.coords[axis] < self.max[axis] {
                self.coords[axis] += 1;
                for lower in 0..axis {
                    self.coords[lower] = self.min[lower];
                }
                log::trace!("Advanced grid to {:?}", &self.coords[..ndims]);
                return;
            }
        }
        self.done = true;
        log::debug!("Grid enumeration finished at {:?}", &self.coords[..ndims]);
    }

    /// Restart the enumeration from the first cell.
    pub fn reset(&mut self) {
        self.coords = self.min;
        self.done = false;
    }

    /// Cells not yet produced.
    fn remaining(&self) -> u128 {
        if self.done {
            return 0;
        }
        let mut position = 0u128;
        let mut stride = 1u128;
        for axis in 0..self.ndims() {
            let offset = (i128::from(self.coords[axis]) - i128::from(self.min[axis])) as u128;
            let extent = (i128::from(self.max[axis]) - i128::from(self.min[axis]) + 1) as u128;
            position = position.saturating_add(offset.saturating_mul(stride));
            stride = stride.saturating_mul(extent);
        }
        self.cell_count().saturating_sub(position)
    }
}

impl Iterator for StboxGrid {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.done {
            return None;
        }
        let tile = self.current_cell();
        self.advance();
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for StboxGrid {}

/// Box of one grid cell, without enumerating the grid.
///
/// Without a time cell size, 2 coordinates mean X/Y and 3 mean X/Y/Z. With
/// one, 3 coordinates mean X/Y/T and 4 mean X/Y/Z/T. The SRID of the result
/// is the origin SRID of the configuration.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use stbox::{GridConfig, tile_at};
///
/// let config = GridConfig::new(5.0).with_time_cell_size(TimeDelta::days(1));
/// let cell = tile_at(&[1, 0, 2], &config)?;
/// assert_eq!(cell.xmin(), Some(5.0));
/// assert!(cell.has_t() && !cell.has_z());
/// # Ok::<(), stbox::StboxError>(())
/// ```
pub fn tile_at(coords: &[i64], config: &GridConfig) -> Result<STBox> {
    config.validate()?;
    let has_t = config.time_cell_size.is_some();
    let has_z = match (coords.len(), has_t) {
        (2, false) | (3, true) => false,
        (3, false) | (4, true) => true,
        (2, true) => {
            return Err(StboxError::InvalidArgument(
                "The number of coordinates must be at least 3 for the temporal dimension"
                    .to_string(),
            ));
        }
        (n, _) => {
            return Err(StboxError::InvalidArgument(format!(
                "The number of coordinates must be between 2 and {}, got {}",
                if has_t { 4 } else { 3 },
                n
            )));
        }
    };
    let layout = Layout {
        has_z,
        has_t,
        srid: config.origin_srid,
        size: config.cell_size,
        tsize: config.time_cell_micros().unwrap_or(0),
        origin: config.origin,
        time_origin: config.time_origin,
    };
    layout.checked_cell(coords)
}

impl STBox {
    /// Grid of cells covering this box. See [`StboxGrid::new`].
    pub fn grid(&self, config: &GridConfig) -> Result<StboxGrid> {
        StboxGrid::new(self, config)
    }

    /// Box of one grid cell. See [`tile_at`].
    pub fn tile(coords: &[i64], config: &GridConfig) -> Result<STBox> {
        tile_at(coords, config)
    }
}
