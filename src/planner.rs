//! Route plan assembly.
//!
//! Two independent call paths share only the distance primitive:
//! fleet planning (partition, then one tour per cluster) and single-trip
//! planning. Neither keeps state between calls.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::partition::{self, PartitionOptions};
use crate::point::{Point, Stop};
use crate::tour::{self, Tour};
use crate::trip::{self, SingleTripResult, TripOptions};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    pub partition: PartitionOptions,
    pub trip: TripOptions,
    /// Build per-vehicle tours on the rayon pool.
    pub parallel: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            partition: PartitionOptions::default(),
            trip: TripOptions::default(),
            parallel: true,
        }
    }
}

/// One closed tour per vehicle, keyed by vehicle index `0..vehicle_count`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FleetPlan {
    tours: BTreeMap<usize, Tour>,
}

/// Per-vehicle headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub vehicle: usize,
    pub stops: usize,
    pub distance_km: f64,
}

impl FleetPlan {
    pub fn tour(&self, vehicle: usize) -> Option<&Tour> {
        self.tours.get(&vehicle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tour)> {
        self.tours.iter().map(|(vehicle, tour)| (*vehicle, tour))
    }

    pub fn vehicle_count(&self) -> usize {
        self.tours.len()
    }

    /// Stops across all tours, closing repeats excluded.
    pub fn stop_count(&self) -> usize {
        self.tours.values().map(Tour::stop_count).sum()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.tours.values().map(Tour::total_distance_km).sum()
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.iter()
            .map(|(vehicle, tour)| RouteSummary {
                vehicle,
                stops: tour.stop_count(),
                distance_km: tour.total_distance_km(),
            })
            .collect()
    }

    pub fn into_tours(self) -> BTreeMap<usize, Tour> {
        self.tours
    }
}

/// A planning request as it arrives from a transport layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RouteRequest {
    Fleet {
        stops: Vec<Stop>,
        vehicle_count: usize,
    },
    Trip {
        origin: Point,
        destination: Point,
        speed_kmh: f64,
        target_arrival: String,
        vehicle_id: String,
    },
}

/// Result of [`RoutePlanner::plan`], tagged by the request mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoutePlan {
    Fleet(FleetPlan),
    Trip(SingleTripResult),
}

#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    options: PlannerOptions,
}

impl RoutePlanner {
    pub fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn plan(&self, request: &RouteRequest) -> Result<RoutePlan, PlanError> {
        match request {
            RouteRequest::Fleet {
                stops,
                vehicle_count,
            } => self
                .assemble_fleet_plan(stops, *vehicle_count)
                .map(RoutePlan::Fleet),
            RouteRequest::Trip {
                origin,
                destination,
                speed_kmh,
                target_arrival,
                vehicle_id,
            } => self
                .plan_trip(*origin, *destination, *speed_kmh, target_arrival, vehicle_id)
                .map(RoutePlan::Trip),
        }
    }

    /// Clusters `stops` into `vehicle_count` groups and builds a closed tour
    /// for each. Either every stop is routed or the call fails.
    pub fn assemble_fleet_plan(
        &self,
        stops: &[Stop],
        vehicle_count: usize,
    ) -> Result<FleetPlan, PlanError> {
        self.assemble_fleet_plan_with_cancel(stops, vehicle_count, &|| false)
    }

    /// Like [`Self::assemble_fleet_plan`], checking `should_cancel` before each
    /// cluster is routed. A cancelled call returns no partial plan.
    #[tracing::instrument(skip(self, stops, should_cancel), fields(stop_count = stops.len()))]
    pub fn assemble_fleet_plan_with_cancel(
        &self,
        stops: &[Stop],
        vehicle_count: usize,
        should_cancel: &(dyn Fn() -> bool + Sync),
    ) -> Result<FleetPlan, PlanError> {
        let clusters = partition::partition(stops, vehicle_count, &self.options.partition)?;

        let route = |(vehicle, cluster): (usize, Vec<Stop>)| {
            if should_cancel() {
                return Err(PlanError::Cancelled);
            }
            Ok((vehicle, tour::build_tour(&cluster, None)))
        };

        let tours: BTreeMap<usize, Tour> = if self.options.parallel {
            clusters
                .into_par_iter()
                .enumerate()
                .map(route)
                .collect::<Result<BTreeMap<_, _>, PlanError>>()?
        } else {
            clusters
                .into_iter()
                .enumerate()
                .map(route)
                .collect::<Result<BTreeMap<_, _>, PlanError>>()?
        };

        let plan = FleetPlan { tours };
        for summary in plan.summaries() {
            tracing::info!(
                "vehicle {}: {} stops, est. distance {:.2} km",
                summary.vehicle + 1,
                summary.stops,
                summary.distance_km
            );
        }

        Ok(plan)
    }

    pub fn plan_trip(
        &self,
        origin: Point,
        destination: Point,
        speed_kmh: f64,
        target_arrival: &str,
        vehicle_id: &str,
    ) -> Result<SingleTripResult, PlanError> {
        trip::plan_trip(
            origin,
            destination,
            speed_kmh,
            target_arrival,
            vehicle_id,
            &self.options.trip,
        )
    }
}

/// Fleet planning with default options.
pub fn assemble_fleet_plan(stops: &[Stop], vehicle_count: usize) -> Result<FleetPlan, PlanError> {
    RoutePlanner::default().assemble_fleet_plan(stops, vehicle_count)
}

/// Fleet planning with default options and a cancellation hook.
pub fn assemble_fleet_plan_with_cancel(
    stops: &[Stop],
    vehicle_count: usize,
    should_cancel: &(dyn Fn() -> bool + Sync),
) -> Result<FleetPlan, PlanError> {
    RoutePlanner::default().assemble_fleet_plan_with_cancel(stops, vehicle_count, should_cancel)
}

/// Single-trip planning with the default tortuosity factor.
pub fn plan_trip(
    origin: Point,
    destination: Point,
    speed_kmh: f64,
    target_arrival: &str,
    vehicle_id: &str,
) -> Result<SingleTripResult, PlanError> {
    RoutePlanner::default().plan_trip(origin, destination, speed_kmh, target_arrival, vehicle_id)
}
