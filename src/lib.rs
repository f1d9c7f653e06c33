//! fleet-route-planner core
//!
//! Assigns delivery stops to vehicles, orders each vehicle's stops into a
//! closed tour, and estimates single point-to-point trips.

pub mod error;
pub mod haversine;
pub mod partition;
pub mod planner;
pub mod point;
pub mod telemetry;
pub mod tour;
pub mod traits;
pub mod trip;

pub use error::PlanError;
pub use haversine::{Haversine, haversine_km};
pub use planner::{
    FleetPlan, PlannerOptions, RoutePlan, RoutePlanner, RouteRequest, RouteSummary,
    assemble_fleet_plan, assemble_fleet_plan_with_cancel, plan_trip,
};
pub use point::{Point, Stop};
pub use tour::{Tour, build_tour};
pub use trip::SingleTripResult;
