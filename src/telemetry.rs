//! Boundary with the telemetry feature table.
//!
//! Ingestion produces one row per record with a fixed column set. Routing only
//! reads the coordinates; the rest feeds the maintenance classifier.

use serde::{Deserialize, Serialize};

use crate::point::{Point, Stop};
use crate::traits::VehicleFeatures;

/// One row of the uniform feature table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub mileage: f64,
    pub vehicle_age: u32,
    pub fuel_efficiency: f64,
    pub battery_health: f64,
    pub engine_health: f64,
    pub avg_speed: f64,
    pub avg_accel: f64,
    pub odometer_reading: f64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub long: Option<f64>,
    #[serde(default)]
    pub needs_maintenance: Option<bool>,
}

impl FeatureRow {
    /// The row's coordinates, if both are present and valid.
    pub fn location(&self) -> Option<Point> {
        Point::new(self.lat?, self.long?).ok()
    }

    pub fn features(&self) -> VehicleFeatures {
        VehicleFeatures {
            mileage: self.mileage,
            vehicle_age: self.vehicle_age,
            fuel_efficiency: self.fuel_efficiency,
            battery_health: self.battery_health,
            engine_health: self.engine_health,
            avg_speed: self.avg_speed,
            avg_accel: self.avg_accel,
            odometer_reading: self.odometer_reading,
        }
    }
}

/// Turns feature rows into routable stops, skipping rows without a usable
/// location. Each stop is identified by its row index.
pub fn stops_from_features(rows: &[FeatureRow]) -> Vec<Stop> {
    let stops: Vec<Stop> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            row.location()
                .map(|point| Stop::with_id(index.to_string(), point))
        })
        .collect();

    let dropped = rows.len() - stops.len();
    if dropped > 0 {
        tracing::debug!(dropped, "skipped rows without a valid location");
    }
    stops
}
