//! Error type shared by every planning entry point.

use thiserror::Error;

/// Reasons a planning call can fail.
///
/// Apart from [`PlanError::Clustering`] and [`PlanError::Cancelled`], every
/// variant describes malformed input. None of them are retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Fewer distinct stops than requested vehicles, or no vehicles at all.
    #[error("{stops} distinct stop(s) cannot be split across {vehicles} vehicle(s)")]
    InsufficientStops { stops: usize, vehicles: usize },

    /// Speed was zero, negative, or not a finite number.
    #[error("speed must be a positive finite number of km/h, got {0}")]
    InvalidSpeed(f64),

    /// Arrival time could not be parsed as an ISO-8601 timestamp.
    #[error("invalid arrival timestamp {input:?}")]
    InvalidTimestamp { input: String },

    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidPoint { latitude: f64, longitude: f64 },

    /// Tortuosity factor was zero, negative, or not a finite number.
    #[error("tortuosity factor must be a positive finite number, got {0}")]
    InvalidTortuosity(f64),

    /// Arrival minus travel duration falls outside the representable range.
    #[error("departure time is out of range")]
    DepartureOutOfRange,

    /// The clustering backend rejected its parameters or failed to fit.
    #[error("clustering failed: {0}")]
    Clustering(String),

    /// The caller asked to abandon the computation.
    #[error("planning was cancelled")]
    Cancelled,
}

impl PlanError {
    /// Whether the failure was caused by the request itself.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PlanError::Clustering(_) | PlanError::Cancelled)
    }
}
