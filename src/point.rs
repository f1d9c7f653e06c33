//! Coordinate value types.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "long", alias = "lng")]
    longitude: f64,
}

impl TryFrom<RawPoint> for Point {
    type Error = PlanError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Point::new(raw.latitude, raw.longitude)
    }
}

impl Point {
    /// Creates a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PlanError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(PlanError::InvalidPoint {
                latitude,
                longitude,
            })
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns (lat, lng).
    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub(crate) fn bits(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

impl TryFrom<(f64, f64)> for Point {
    type Error = PlanError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Point::new(latitude, longitude)
    }
}

/// A point to be visited, optionally carrying a caller-supplied identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStop")]
pub struct Stop {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub point: Point,
}

#[derive(Deserialize)]
struct RawStop {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "long", alias = "lng")]
    longitude: f64,
}

impl TryFrom<RawStop> for Stop {
    type Error = PlanError;

    fn try_from(raw: RawStop) -> Result<Self, Self::Error> {
        Ok(Stop {
            id: raw.id,
            point: Point::new(raw.latitude, raw.longitude)?,
        })
    }
}

impl Stop {
    pub fn new(point: Point) -> Self {
        Self { id: None, point }
    }

    pub fn with_id(id: impl Into<String>, point: Point) -> Self {
        Self {
            id: Some(id.into()),
            point,
        }
    }

    /// Identity used to collapse duplicates: identifier plus exact coordinate bits.
    pub(crate) fn key(&self) -> (Option<&str>, (u64, u64)) {
        (self.id.as_deref(), self.point.bits())
    }
}

impl From<Point> for Stop {
    fn from(point: Point) -> Self {
        Stop::new(point)
    }
}
