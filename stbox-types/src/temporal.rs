//! Time instants and the time-interval types a box can be built from.
//!
//! Instants are stored as microseconds since the Unix epoch (UTC), which keeps
//! them a plain `i64` that orders, hashes and copies cheaply. Calendar work is
//! delegated to `chrono`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

/// Errors raised by time arithmetic and temporal value construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TemporalError {
    #[error("Overflow in adding/subtracting a duration")]
    Overflow,
    #[error("Timestamp out of range: {0} microseconds")]
    OutOfRange(i64),
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
    #[error("Invalid period: lower bound {lower} is after upper bound {upper}")]
    InvalidPeriod { lower: Timestamp, upper: Timestamp },
    #[error("A timestamp set or period set must contain at least one element")]
    EmptySet,
}

/// Wire form of a [`Period`], checked through [`Period::new`] on decode.
#[derive(Deserialize)]
struct RawPeriod {
    lower: Timestamp,
    upper: Timestamp,
    lower_inc: bool,
    upper_inc: bool,
}

impl TryFrom<RawPeriod> for Period {
    type Error = TemporalError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Period::new(raw.lower, raw.upper, raw.lower_inc, raw.upper_inc)
    }
}

/// A UTC time instant with microsecond precision.
///
/// `Timestamp` implements `Display` and `FromStr` using the
/// `YYYY-MM-DD HH:MM:SS[.ffffff]+00` form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Create a timestamp from microseconds since the Unix epoch.
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Microseconds since the Unix epoch.
    pub const fn as_micros(self) -> i64 {
        self.0
    }

    /// Add a duration, failing instead of wrapping on overflow.
    pub fn checked_add(self, delta: TimeDelta) -> Result<Self, TemporalError> {
        let micros = delta.num_microseconds().ok_or(TemporalError::Overflow)?;
        self.0
            .checked_add(micros)
            .map(Self)
            .ok_or(TemporalError::Overflow)
    }

    /// Subtract a duration, failing instead of wrapping on overflow.
    pub fn checked_sub(self, delta: TimeDelta) -> Result<Self, TemporalError> {
        let micros = delta.num_microseconds().ok_or(TemporalError::Overflow)?;
        self.0
            .checked_sub(micros)
            .map(Self)
            .ok_or(TemporalError::Overflow)
    }

    /// Convert to a `chrono` date-time.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, TemporalError> {
        DateTime::<Utc>::from_timestamp_micros(self.0).ok_or(TemporalError::OutOfRange(self.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Ok(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.f+00")),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = TemporalError;

    /// Accepts `YYYY-MM-DD HH:MM:SS[.f][offset]`, RFC 3339, a `T`-separated
    /// local form, or a bare date. Inputs without an offset are taken as UTC.
    ///
    /// Instants outside the calendar range are written as raw microseconds
    /// and read back from that form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(micros) = s.parse::<i64>() {
            let t = Self(micros);
            if t.to_datetime().is_err() {
                return Ok(t);
            }
        }
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Ok(t.with_timezone(&Utc).into());
        }
        if let Ok(t) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Ok(t.with_timezone(&Utc).into());
        }
        if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
            return Ok(t.and_utc().into());
        }
        if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(t.and_utc().into());
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        match date.and_hms_opt(0, 0, 0) {
            Some(t) => Ok(t.and_utc().into()),
            None => Err(TemporalError::OutOfRange(0)),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(t: DateTime<Utc>) -> Self {
        Self(t.timestamp_micros())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        DateTime::<Utc>::from(t).into()
    }
}

/// A time interval with inclusive or exclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    lower: Timestamp,
    upper: Timestamp,
    lower_inc: bool,
    upper_inc: bool,
}

impl Period {
    /// Create a period, rejecting inverted or empty bounds.
    pub fn new(
        lower: Timestamp,
        upper: Timestamp,
        lower_inc: bool,
        upper_inc: bool,
    ) -> Result<Self, TemporalError> {
        if lower > upper || (lower == upper && !(lower_inc && upper_inc)) {
            return Err(TemporalError::InvalidPeriod { lower, upper });
        }
        Ok(Self {
            lower,
            upper,
            lower_inc,
            upper_inc,
        })
    }

    /// A period including both bounds.
    pub fn closed(lower: Timestamp, upper: Timestamp) -> Result<Self, TemporalError> {
        Self::new(lower, upper, true, true)
    }

    /// The degenerate period `[t, t]`.
    pub fn instant(t: Timestamp) -> Self {
        Self {
            lower: t,
            upper: t,
            lower_inc: true,
            upper_inc: true,
        }
    }

    pub fn lower(&self) -> Timestamp {
        self.lower
    }

    pub fn upper(&self) -> Timestamp {
        self.upper
    }

    pub fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    pub fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    /// Length of the period; fails when it does not fit in an `i64` of
    /// microseconds.
    pub fn duration(&self) -> Result<TimeDelta, TemporalError> {
        self.upper
            .as_micros()
            .checked_sub(self.lower.as_micros())
            .map(TimeDelta::microseconds)
            .ok_or(TemporalError::Overflow)
    }

    /// A period is its own bounding period.
    pub fn bounding_period(&self) -> Period {
        *self
    }
}

/// A non-empty, ordered set of distinct timestamps.
///
/// Serialized as a plain array; decoding goes through [`TimestampSet::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Timestamp>", into = "Vec<Timestamp>")]
pub struct TimestampSet {
    timestamps: Vec<Timestamp>,
}

impl TimestampSet {
    /// Build a set from arbitrary timestamps, sorting and removing duplicates.
    pub fn new(mut timestamps: Vec<Timestamp>) -> Result<Self, TemporalError> {
        if timestamps.is_empty() {
            return Err(TemporalError::EmptySet);
        }
        timestamps.sort_unstable();
        timestamps.dedup();
        Ok(Self { timestamps })
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn start(&self) -> Timestamp {
        self.timestamps[0]
    }

    pub fn end(&self) -> Timestamp {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// The closed period from the first to the last timestamp.
    pub fn bounding_period(&self) -> Period {
        Period {
            lower: self.start(),
            upper: self.end(),
            lower_inc: true,
            upper_inc: true,
        }
    }
}

impl TryFrom<Vec<Timestamp>> for TimestampSet {
    type Error = TemporalError;

    fn try_from(timestamps: Vec<Timestamp>) -> Result<Self, Self::Error> {
        Self::new(timestamps)
    }
}

impl From<TimestampSet> for Vec<Timestamp> {
    fn from(set: TimestampSet) -> Self {
        set.timestamps
    }
}

/// A non-empty set of periods, ordered by lower bound.
///
/// Serialized as a plain array; decoding goes through [`PeriodSet::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Period>", into = "Vec<Period>")]
pub struct PeriodSet {
    periods: Vec<Period>,
}

impl PeriodSet {
    pub fn new(mut periods: Vec<Period>) -> Result<Self, TemporalError> {
        if periods.is_empty() {
            return Err(TemporalError::EmptySet);
        }
        periods.sort_by(|a, b| {
            a.lower
                .cmp(&b.lower)
                .then_with(|| b.lower_inc.cmp(&a.lower_inc))
        });
        Ok(Self { periods })
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// The smallest period covering every member.
    pub fn bounding_period(&self) -> Period {
        let first = self.periods[0];
        let last = self
            .periods
            .iter()
            .copied()
            .max_by(|a, b| a.upper.cmp(&b.upper).then(a.upper_inc.cmp(&b.upper_inc)))
            .unwrap_or(first);
        Period {
            lower: first.lower,
            upper: last.upper,
            lower_inc: first.lower_inc,
            upper_inc: last.upper_inc,
        }
    }
}

impl TryFrom<Vec<Period>> for PeriodSet {
    type Error = TemporalError;

    fn try_from(periods: Vec<Period>) -> Result<Self, Self::Error> {
        Self::new(periods)
    }
}

impl From<PeriodSet> for Vec<Period> {
    fn from(set: PeriodSet) -> Self {
        set.periods
    }
}
