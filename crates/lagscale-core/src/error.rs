//! Scaler error types.
//!
//! Three kinds cover every failure an adapter can surface:
//! configuration problems are fatal at construction, upstream problems
//! are transient and surfaced per poll (the control loop owns retry and
//! backoff), and a backend that answers without usable data is a hard
//! failure for that poll so real lag is never masked as idle.
//!
//! A checkpoint store reporting "no checkpoint for this partition" is
//! NOT an error: the checkpoint accessor returns `Ok(None)` and the lag
//! calculator falls back to its no-checkpoint estimate.

use thiserror::Error;

/// Result type alias for scaler operations.
pub type ScalerResult<T> = Result<T, ScalerError>;

/// Errors surfaced by scaler adapters and their backend collaborators.
#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("metric unavailable: {0}")]
    MetricUnavailable(String),
}

impl ScalerError {
    /// Whether this error is transient and worth retrying on a later
    /// poll. Configuration errors are permanent until the trigger
    /// definition changes.
    pub fn is_transient(&self) -> bool {
        matches!(self, ScalerError::UpstreamUnavailable(_))
    }
}
