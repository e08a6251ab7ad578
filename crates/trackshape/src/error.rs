//! Error type shared by all shape operations.
//!
//! Every variant belongs to the "invalid input" class: the caller handed in
//! something no geometry can be computed from. Degenerate but valid geometry
//! (one point, two points, collinear clouds) never produces an error.

use std::fmt;

/// Errors surfaced by hull, centroid and metric operations.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeError {
    /// At least one point is required.
    EmptyInput { what: &'static str },
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
    /// Latitude outside [−90°, 90°].
    LatitudeOutOfRange { index: usize, lat: f64 },
    /// Weight is negative or not finite.
    InvalidWeight { index: usize, weight: f64 },
    /// All weights are zero.
    ZeroTotalWeight,
    /// Sphere radius is not a finite positive number.
    InvalidRadius { radius: f64 },
}

impl ShapeError {
    /// All shape errors are input errors; retrying with the same input fails identically.
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        true
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::EmptyInput { what } => {
                write!(f, "invalid input: {what} needs at least one point")
            }
            ShapeError::NonFinite { index } => {
                write!(f, "invalid input: point {index} has a non-finite coordinate")
            }
            ShapeError::LatitudeOutOfRange { index, lat } => write!(
                f,
                "invalid input: point {index} has latitude {lat} outside [-90, 90]"
            ),
            ShapeError::InvalidWeight { index, weight } => write!(
                f,
                "invalid input: point {index} has weight {weight} (must be finite and >= 0)"
            ),
            ShapeError::ZeroTotalWeight => write!(f, "invalid input: total weight is zero"),
            ShapeError::InvalidRadius { radius } => write!(
                f,
                "invalid input: sphere radius {radius} (must be finite and > 0)"
            ),
        }
    }
}

impl std::error::Error for ShapeError {}
