//! Grid tiling configuration.
//!
//! A [`GridConfig`] describes a regular grid: the spatial cell edge, an
//! optional temporal cell size and the origins the cells are aligned to.
//! It is the explicit replacement for picking spatial-only or
//! spatiotemporal tiling from the number of arguments.

use crate::compute::validation::{ensure_positive_duration, ensure_positive_size};
use crate::error::{Result, StboxError};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use stbox_types::point::Point3d;
use stbox_types::temporal::Timestamp;

/// Default temporal origin: Monday 2000-01-03 00:00:00 UTC.
pub const DEFAULT_TIME_ORIGIN: Timestamp = Timestamp::from_micros(946_857_600_000_000);

/// Grid layout shared by [`crate::STBox::grid`] and [`crate::STBox::tile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Edge length of a cell on every spatial axis
    pub cell_size: f64,

    /// Cell length on the time axis; `None` tiles space only
    #[serde(
        default,
        with = "duration_micros",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_cell_size: Option<TimeDelta>,

    #[serde(default)]
    pub origin: Point3d,

    /// SRID of the origin point, 0 when unspecified
    #[serde(default)]
    pub origin_srid: i32,

    #[serde(default = "GridConfig::default_time_origin")]
    pub time_origin: Timestamp,
}

impl GridConfig {
    /// Spatial-only grid with cells of `cell_size` anchored at the origin.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            time_cell_size: None,
            origin: Point3d::origin(),
            origin_srid: 0,
            time_origin: Self::default_time_origin(),
        }
    }

    const fn default_time_origin() -> Timestamp {
        DEFAULT_TIME_ORIGIN
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_time_cell_size(mut self, time_cell_size: TimeDelta) -> Self {
        self.time_cell_size = Some(time_cell_size);
        self
    }

    pub fn with_origin(mut self, origin: Point3d) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_origin_srid(mut self, srid: i32) -> Self {
        self.origin_srid = srid;
        self
    }

    pub fn with_time_origin(mut self, time_origin: Timestamp) -> Self {
        self.time_origin = time_origin;
        self
    }

    /// Time cell size in microseconds, if any.
    pub(crate) fn time_cell_micros(&self) -> Option<i64> {
        self.time_cell_size.and_then(|d| d.num_microseconds())
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive_size(self.cell_size)?;
        if let Some(duration) = self.time_cell_size {
            ensure_positive_duration(duration)?;
        }
        if !self.origin.is_finite() {
            return Err(StboxError::InvalidArgument(
                "The grid origin must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)
            .map_err(|e| StboxError::Serialization(format!("Invalid grid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            StboxError::Serialization(format!("Failed to serialize grid config: {}", e))
        })
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: GridConfig = toml::from_str(toml_str)
            .map_err(|e| StboxError::Serialization(format!("Invalid grid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            StboxError::Serialization(format!("Failed to serialize grid config: {}", e))
        })
    }
}

/// `Option<TimeDelta>` as an optional integer number of microseconds.
mod duration_micros {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<TimeDelta>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value.map(|d| d.num_microseconds()) {
            Some(Some(micros)) => serializer.serialize_some(&micros),
            Some(None) => Err(<S::Error as serde::ser::Error>::custom(
                "time cell size out of range",
            )),
            None => None::<i64>.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeDelta>, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?.map(TimeDelta::microseconds))
    }
}
