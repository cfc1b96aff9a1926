//! Error type shared by every box operation.

use stbox_types::temporal::TemporalError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StboxError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StboxError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing dimension: {0}")]
    DimensionMissing(String),

    #[error("The boxes must have at least one common dimension")]
    IncompatibleDimensions,

    #[error("Operation on mixed planar and geodetic coordinates")]
    GeodeticMismatch,

    #[error("Operation on mixed SRID: {left} and {right}")]
    SridMismatch { left: i32, right: i32 },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Result of box union would not be contiguous")]
    NonContiguousUnion,

    #[error("The box cannot be geodetic")]
    UnsupportedGeodetic,

    #[error("Cannot compute the bounding box of an empty geometry")]
    EmptyGeometry,

    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StboxError {
    /// True for the one soft failure: an empty geometry has no box, and the
    /// caller can skip the value instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StboxError::EmptyGeometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_geometry_is_recoverable() {
        assert!(StboxError::EmptyGeometry.is_recoverable());
        assert!(!StboxError::NonContiguousUnion.is_recoverable());
        assert!(!StboxError::MalformedInput("x".into()).is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = StboxError::SridMismatch {
            left: 4326,
            right: 3857,
        };
        assert_eq!(err.to_string(), "Operation on mixed SRID: 4326 and 3857");

        let err: StboxError = TemporalError::Overflow.into();
        assert!(matches!(err, StboxError::Temporal(TemporalError::Overflow)));
    }
}
