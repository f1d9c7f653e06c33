//! Test fixtures for fleet-route-planner.
//!
//! Provides real Los Angeles area coordinates grouped by neighbourhood, plus
//! helpers to turn them into stops.

#![allow(dead_code)]

pub mod los_angeles_locations;

pub use los_angeles_locations::*;
