//! Seams between the routing core and its collaborators.
//!
//! The core only needs a distance metric. The maintenance classifier is an
//! external collaborator; its interface lives here so callers can wire a model
//! next to the planner without the planner depending on it.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Measures the distance in kilometers between two points.
pub trait DistanceMetric {
    fn distance_km(&self, from: &Point, to: &Point) -> f64;

    /// Full pairwise matrix, indexed by the provided point order.
    ///
    /// `matrix[i][j]` is the distance from `points[i]` to `points[j]`.
    fn matrix_for(&self, points: &[Point]) -> Vec<Vec<f64>> {
        points
            .iter()
            .map(|from| points.iter().map(|to| self.distance_km(from, to)).collect())
            .collect()
    }
}

/// Telemetry features a maintenance model is trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFeatures {
    pub mileage: f64,
    pub vehicle_age: u32,
    pub fuel_efficiency: f64,
    pub battery_health: f64,
    pub engine_health: f64,
    pub avg_speed: f64,
    pub avg_accel: f64,
    pub odometer_reading: f64,
}

/// Output of a maintenance classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenancePrediction {
    pub needs_maintenance: bool,
    /// Probability of the positive class, when the model exposes one.
    pub maintenance_probability: Option<f64>,
}

/// A trained binary classifier for maintenance risk.
pub trait MaintenanceClassifier {
    fn predict(&self, features: &VehicleFeatures) -> MaintenancePrediction;
}
