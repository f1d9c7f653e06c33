//! Los Angeles area locations for realistic test fixtures.
//!
//! Coordinates are rounded public landmark positions. Neighbourhoods are far
//! enough apart that a clustering into them is unambiguous.

use fleet_route_planner::{Point, Stop};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lng).unwrap()
    }

    pub fn stop(&self) -> Stop {
        Stop::with_id(self.name, self.point())
    }
}

// ============================================================================
// Downtown
// ============================================================================

pub const DOWNTOWN: &[Location] = &[
    Location::new("City Hall", 34.0537, -118.2427),
    Location::new("Union Station", 34.0562, -118.2365),
    Location::new("Grand Central Market", 34.0508, -118.2490),
    Location::new("Walt Disney Concert Hall", 34.0553, -118.2498),
    Location::new("Crypto.com Arena", 34.0430, -118.2673),
    Location::new("LA Convention Center", 34.0403, -118.2696),
];

// ============================================================================
// Santa Monica
// ============================================================================

pub const SANTA_MONICA: &[Location] = &[
    Location::new("Santa Monica Pier", 34.0092, -118.4976),
    Location::new("Third Street Promenade", 34.0164, -118.4963),
    Location::new("Santa Monica College", 34.0166, -118.4700),
    Location::new("Tongva Park", 34.0111, -118.4919),
    Location::new("Santa Monica Airport", 34.0158, -118.4513),
];

// ============================================================================
// Pasadena
// ============================================================================

pub const PASADENA: &[Location] = &[
    Location::new("Pasadena City Hall", 34.1478, -118.1445),
    Location::new("Rose Bowl", 34.1613, -118.1676),
    Location::new("Caltech", 34.1377, -118.1253),
    Location::new("Old Pasadena", 34.1456, -118.1505),
    Location::new("Huntington Library", 34.1291, -118.1145),
];

// ============================================================================
// Long Beach
// ============================================================================

pub const LONG_BEACH: &[Location] = &[
    Location::new("Queen Mary", 33.7527, -118.1897),
    Location::new("Aquarium of the Pacific", 33.7620, -118.1969),
    Location::new("Long Beach Airport", 33.8177, -118.1516),
    Location::new("CSU Long Beach", 33.7838, -118.1141),
];

/// Every fixture location.
pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(20);
    all.extend_from_slice(DOWNTOWN);
    all.extend_from_slice(SANTA_MONICA);
    all.extend_from_slice(PASADENA);
    all.extend_from_slice(LONG_BEACH);
    all
}

pub fn all_stops() -> Vec<Stop> {
    all_locations().iter().map(Location::stop).collect()
}

pub fn stops_of(locations: &[Location]) -> Vec<Stop> {
    locations.iter().map(Location::stop).collect()
}

/// Six anonymous stops on a 0.01 degree grid around downtown.
pub fn downtown_grid() -> Vec<Stop> {
    [
        (34.0522, -118.2437),
        (34.0522, -118.2537),
        (34.0622, -118.2437),
        (34.0622, -118.2537),
        (34.0722, -118.2437),
        (34.0722, -118.2537),
    ]
    .into_iter()
    .map(|(lat, lng)| Stop::new(Point::new(lat, lng).unwrap()))
    .collect()
}
