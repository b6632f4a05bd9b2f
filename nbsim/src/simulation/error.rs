//! Error types for the simulation engine.

use thiserror::Error;

/// Which constraint an input value broke
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputViolation {
    #[error("no bodies supplied")]
    Empty,

    #[error("expected {expected} entries, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("row {index} has {found} components, expected {expected}")]
    Dimension { index: usize, expected: usize, found: usize },

    #[error("value {value} must be strictly positive")]
    NonPositive { value: f64 },

    #[error("entry {index} is {value}, must be strictly positive")]
    NonPositiveEntry { index: usize, value: f64 },

    #[error("value {value} is negative")]
    Negative { value: f64 },

    #[error("value must be finite")]
    NonFinite,

    #[error("entry {index} is not finite")]
    NonFiniteEntry { index: usize },

    #[error("configured dimension {found} does not match the requested {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("dimension {found} is not supported, expected 2 or 3")]
    UnsupportedDimension { found: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Raised before any step is taken; the caller can fix the input and retry
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: InputViolation,
    },

    /// Raised after a completed run whose state went non-finite
    #[error("non-finite state first seen at step {first_step} (bodies {bodies:?})")]
    NumericalInstability { first_step: usize, bodies: Vec<usize> },
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: InputViolation) -> Self {
        SimError::InvalidInput { field, reason }
    }

    /// Field name for `InvalidInput`, `None` otherwise
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SimError::InvalidInput { field, .. } => Some(field),
            SimError::NumericalInstability { .. } => None,
        }
    }
}
