//! Point-to-point trip estimates.
//!
//! A trip is the straight-line distance scaled by a tortuosity factor to
//! approximate road distance, driven at a constant speed, arriving exactly at
//! the requested time. Unlike fleet tours, a trip has no return leg.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::haversine::haversine_km;
use crate::point::Point;

/// Multiplier from great-circle distance to estimated road distance.
pub const DEFAULT_TORTUOSITY_FACTOR: f64 = 1.4;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// Offset-less layouts accepted after RFC 3339 fails. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TripOptions {
    /// Road distance over great-circle distance. Must be finite and positive.
    pub tortuosity_factor: f64,
}

impl Default for TripOptions {
    fn default() -> Self {
        Self {
            tortuosity_factor: DEFAULT_TORTUOSITY_FACTOR,
        }
    }
}

/// Estimated single trip, departure worked back from the arrival time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleTripResult {
    pub vehicle_id: String,
    /// Always `[origin, destination]`.
    pub path: Vec<Point>,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
}

/// Plans one origin to destination trip that arrives at `target_arrival`.
#[tracing::instrument(skip(options))]
pub fn plan_trip(
    origin: Point,
    destination: Point,
    speed_kmh: f64,
    target_arrival: &str,
    vehicle_id: &str,
    options: &TripOptions,
) -> Result<SingleTripResult, PlanError> {
    if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
        tracing::warn!(speed_kmh, "rejecting non-positive speed");
        return Err(PlanError::InvalidSpeed(speed_kmh));
    }
    let tortuosity = options.tortuosity_factor;
    if !tortuosity.is_finite() || tortuosity <= 0.0 {
        tracing::warn!(tortuosity, "rejecting non-positive tortuosity factor");
        return Err(PlanError::InvalidTortuosity(tortuosity));
    }
    let arrival_time = parse_arrival(target_arrival)
        .inspect_err(|_| tracing::warn!(target_arrival, "rejecting unparsable arrival time"))?;

    let distance_km = haversine_km(&origin, &destination) * tortuosity;
    let duration_hours = distance_km / speed_kmh;

    // float-to-int `as` saturates, and a saturated value is always out of range
    let travel = Duration::microseconds((duration_hours * MICROS_PER_HOUR).round() as i64);
    let departure_time = arrival_time
        .checked_sub_signed(travel)
        .ok_or(PlanError::DepartureOutOfRange)?;

    tracing::debug!(distance_km, duration_hours, %departure_time, "trip planned");

    Ok(SingleTripResult {
        vehicle_id: vehicle_id.to_string(),
        path: vec![origin, destination],
        distance_km,
        duration_hours,
        departure_time,
        arrival_time,
    })
}

/// Parses an ISO-8601 arrival time.
///
/// A trailing `Z` is read as `+00:00`. Timestamps without an offset are taken
/// to be UTC.
pub fn parse_arrival(input: &str) -> Result<DateTime<FixedOffset>, PlanError> {
    let trimmed = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        .ok_or_else(|| PlanError::InvalidTimestamp {
            input: input.to_string(),
        })
}
