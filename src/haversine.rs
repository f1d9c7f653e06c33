//! Great-circle distance on a spherical earth.
//!
//! Every distance figure the planner reports comes from here. Road networks
//! are not modelled; callers that want a road estimate scale the result
//! (see [`crate::trip::TripOptions::tortuosity_factor`]).

use crate::point::Point;
use crate::traits::DistanceMetric;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Symmetric, non-negative, and zero for identical points.
pub fn haversine_km(from: &Point, to: &Point) -> f64 {
    let (lat1, lng1) = from.coords();
    let (lat2, lng2) = to.coords();

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // rounding can push `a` past 1 for antipodal points
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Haversine metric for tour building.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_km(&self, from: &Point, to: &Point) -> f64 {
        haversine_km(from, to)
    }
}
