//! Error types for the simulation core.
//!
//! All validation is fail-fast: bad values are rejected at construction
//! time (or on first use) and propagate synchronously to the caller.
//! Nothing in the core retries, clamps, or substitutes defaults.

use glam::Vec2;
use thiserror::Error;

/// Error type for simulation construction and tick operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A scalar or vector carried a value no computation can use
    /// (NaN, infinity, or a direction that is not unit length).
    #[error("invalid value for {what}: {value}")]
    InvalidValue { what: &'static str, value: f32 },
    /// A finite value outside its permitted range (negative speed,
    /// non-positive radius, boundary min >= max).
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: f32 },
    /// A shape with no usable area (collinear triangle, zero-extent
    /// rectangle, empty composite).
    #[error("degenerate shape: {0}")]
    DegenerateShape(&'static str),
    /// A cross-field simulation-state invariant was broken. Fatal;
    /// signals a pipeline bug, not a recoverable runtime condition.
    #[error("simulation invariant violated: {0}")]
    InvariantViolation(&'static str),
}

/// Validate that a scalar is finite (neither NaN nor infinite).
pub(crate) fn finite(what: &'static str, value: f32) -> Result<f32, SimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidValue { what, value })
    }
}

/// Validate that both components of a vector are finite.
pub(crate) fn finite_vec(what: &'static str, value: Vec2) -> Result<Vec2, SimError> {
    finite(what, value.x)?;
    finite(what, value.y)?;
    Ok(value)
}

/// Validate that a vector is unit length (within floating tolerance).
pub(crate) fn unit_vec(what: &'static str, value: Vec2) -> Result<Vec2, SimError> {
    finite_vec(what, value)?;
    if (value.length_squared() - 1.0).abs() > 1e-4 {
        return Err(SimError::InvalidValue {
            what,
            value: value.length(),
        });
    }
    Ok(value)
}
