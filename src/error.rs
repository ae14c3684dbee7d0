//! Error types for invalid input at the simulation boundary

use thiserror::Error;

/// Rejected arguments to the simulation core.
///
/// Grid queries, rule evaluation and stepping are total and never produce
/// these; they only come from constructors and setters that take caller input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("steps per second must be a positive finite number, got {0}")]
    InvalidSpeed(f64),

    #[error("probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("unknown rule '{0}' (expected conway, seeds, highlife or day_night)")]
    UnknownRule(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}
