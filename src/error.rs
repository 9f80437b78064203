//! Configuration error types.
//!
//! The simulation itself has no failure paths; only loading a [`Tuning`](crate::Tuning)
//! from external data can fail.

use std::fmt;

/// Errors raised while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    /// The JSON document could not be parsed
    Parse(serde_json::Error),

    /// A value parsed fine but is outside its usable range
    Invalid {
        /// Field name (for logging)
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Human-readable description of the accepted range
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "failed to parse tuning data: {}", e),
            TuningError::Invalid {
                name,
                value,
                expected,
            } => write!(f, "tuning value '{}' = {} is outside {}", name, value, expected),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `TuningError` as the error type.
pub type TuningResult<T> = Result<T, TuningError>;
