//! Closed visiting sequences and the nearest-neighbour tour builder.
//!
//! A tour starts at an anchor stop, visits every other stop once, and returns
//! to the anchor. Construction is greedy: O(k²) over k stops, not optimal.

use serde::Serialize;

use crate::haversine::Haversine;
use crate::point::{Point, Stop};
use crate::traits::DistanceMetric;

/// An ordered, closed sequence of stops.
///
/// A non-empty tour has the form `[s0, s1, ..., sk, s0]`. The empty tour has
/// no stops and zero distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    stops: Vec<Stop>,
    total_distance_km: f64,
}

impl Tour {
    pub fn empty() -> Self {
        Self {
            stops: Vec::new(),
            total_distance_km: 0.0,
        }
    }

    /// The visiting sequence, including the closing repeat of the anchor.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    pub fn points(&self) -> Vec<Point> {
        self.stops.iter().map(|stop| stop.point).collect()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of distinct stops visited (the closing repeat is not counted).
    pub fn stop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Consecutive (from, to) pairs along the tour.
    pub fn legs(&self) -> impl Iterator<Item = (&Stop, &Stop)> {
        self.stops.iter().zip(self.stops.iter().skip(1))
    }
}

/// Builds a closed tour over `stops` using great-circle distance.
///
/// See [`build_tour_with`] for the anchor rules.
pub fn build_tour(stops: &[Stop], start: Option<&Stop>) -> Tour {
    build_tour_with(&Haversine, stops, start)
}

/// Builds a closed tour over `stops` by repeatedly moving to the nearest
/// unvisited stop under `metric`.
///
/// The anchor is `start` when given, otherwise the first stop. A `start` that
/// is not one of `stops` acts as a depot: the tour leaves from it and returns
/// to it. Ties go to the stop that comes first in `stops`.
pub fn build_tour_with<M: DistanceMetric>(
    metric: &M,
    stops: &[Stop],
    start: Option<&Stop>,
) -> Tour {
    if stops.is_empty() {
        return Tour::empty();
    }

    let nodes = anchored_nodes(stops, start);
    let points: Vec<Point> = nodes.iter().map(|stop| stop.point).collect();
    let matrix = metric.matrix_for(&points);

    let mut visited = vec![false; nodes.len()];
    visited[0] = true;
    let mut order = Vec::with_capacity(nodes.len() + 1);
    order.push(0);
    let mut current = 0;
    let mut total_distance_km = 0.0;

    for _ in 1..nodes.len() {
        let mut nearest: Option<usize> = None;
        let mut min_dist = f64::INFINITY;

        for (candidate, seen) in visited.iter().enumerate() {
            if *seen {
                continue;
            }
            let dist = matrix[current][candidate];
            if nearest.is_none() || dist < min_dist {
                min_dist = dist;
                nearest = Some(candidate);
            }
        }

        let Some(next) = nearest else { break };
        visited[next] = true;
        total_distance_km += min_dist;
        order.push(next);
        current = next;
    }

    total_distance_km += matrix[current][0];
    order.push(0);

    Tour {
        stops: order.into_iter().map(|i| nodes[i].clone()).collect(),
        total_distance_km,
    }
}

/// Puts the anchor at index 0, followed by the remaining stops in input order.
fn anchored_nodes<'a>(stops: &'a [Stop], start: Option<&'a Stop>) -> Vec<&'a Stop> {
    let Some(start) = start else {
        return stops.iter().collect();
    };

    let mut nodes = Vec::with_capacity(stops.len() + 1);
    nodes.push(start);
    match stops.iter().position(|stop| stop == start) {
        Some(anchor) => nodes.extend(
            stops
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != anchor)
                .map(|(_, stop)| stop),
        ),
        None => nodes.extend(stops.iter()),
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine::haversine_km;

    fn stop(lat: f64, lng: f64) -> Stop {
        Stop::new(Point::new(lat, lng).unwrap())
    }

    fn named(id: &str, lat: f64, lng: f64) -> Stop {
        Stop::with_id(id, Point::new(lat, lng).unwrap())
    }

    fn ids(tour: &Tour) -> Vec<&str> {
        tour.stops()
            .iter()
            .map(|stop| stop.id.as_deref().unwrap_or("?"))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let tour = build_tour(&[], None);
        assert!(tour.is_empty());
        assert_eq!(tour.total_distance_km(), 0.0);
        assert_eq!(tour.stop_count(), 0);
    }

    #[test]
    fn test_single_stop_is_degenerate_loop() {
        let only = stop(34.05, -118.24);
        let tour = build_tour(&[only.clone()], None);
        assert_eq!(tour.stops(), &[only.clone(), only][..]);
        assert_eq!(tour.total_distance_km(), 0.0);
        assert_eq!(tour.stop_count(), 1);
    }

    #[test]
    fn test_visits_nearest_first() {
        let stops = vec![
            named("a", 0.0, 0.0),
            named("far", 0.0, 3.0),
            named("near", 0.0, 1.0),
            named("mid", 0.0, 2.0),
        ];
        let tour = build_tour(&stops, None);
        assert_eq!(ids(&tour), vec!["a", "near", "mid", "far", "a"]);
    }

    #[test]
    fn test_ties_go_to_input_order() {
        let stops = vec![
            named("origin", 0.0, 0.0),
            named("east", 0.0, 1.0),
            named("west", 0.0, -1.0),
        ];
        let tour = build_tour(&stops, None);
        assert_eq!(ids(&tour), vec!["origin", "east", "west", "origin"]);
    }

    #[test]
    fn test_start_inside_set_is_anchor() {
        let stops = vec![named("a", 0.0, 0.0), named("b", 0.0, 1.0), named("c", 0.0, 2.0)];
        let tour = build_tour(&stops, Some(&stops[2]));
        assert_eq!(ids(&tour), vec!["c", "b", "a", "c"]);
        assert_eq!(tour.stop_count(), 3);
    }

    #[test]
    fn test_start_outside_set_is_depot() {
        let depot = named("depot", 0.0, -1.0);
        let stops = vec![named("a", 0.0, 1.0), named("b", 0.0, 0.0)];
        let tour = build_tour(&stops, Some(&depot));
        assert_eq!(ids(&tour), vec!["depot", "b", "a", "depot"]);
    }

    #[test]
    fn test_total_matches_leg_sum() {
        let stops = vec![
            stop(34.05, -118.24),
            stop(34.10, -118.30),
            stop(34.00, -118.20),
            stop(34.07, -118.26),
        ];
        let tour = build_tour(&stops, None);
        let leg_sum: f64 = tour
            .legs()
            .map(|(from, to)| haversine_km(&from.point, &to.point))
            .sum();
        assert!((tour.total_distance_km() - leg_sum).abs() < 1e-9);
        assert_eq!(tour.stops().first(), tour.stops().last());
    }

    struct Planar;

    impl DistanceMetric for Planar {
        fn distance_km(&self, from: &Point, to: &Point) -> f64 {
            let (dx, dy) = (from.latitude() - to.latitude(), from.longitude() - to.longitude());
            (dx * dx + dy * dy).sqrt()
        }
    }

    #[test]
    fn test_custom_metric() {
        let stops = vec![stop(0.0, 0.0), stop(0.0, 1.0), stop(1.0, 1.0), stop(1.0, 0.0)];
        let tour = build_tour_with(&Planar, &stops, None);
        assert!((tour.total_distance_km() - 4.0).abs() < 1e-12);
    }
}
