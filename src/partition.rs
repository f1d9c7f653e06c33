//! Splits stops into one spatial cluster per vehicle.
//!
//! Clustering runs k-means over raw (lat, lng) degrees with squared Euclidean
//! distance. Clusters are small compared with the earth's curvature, so the
//! planar approximation is only used for grouping; reported distances always
//! come from [`crate::haversine`].

use std::collections::{HashMap, HashSet};

use linfa::DatasetBase;
use linfa::prelude::*;
use linfa_clustering::KMeans;
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::error::PlanError;
use crate::point::Stop;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_N_INIT: usize = 10;
pub const DEFAULT_MAX_ITERATIONS: usize = 300;
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartitionOptions {
    /// Seed for centroid initialisation. Same seed and input, same clusters.
    pub seed: u64,
    /// Number of independent k-means runs; the lowest-inertia run is kept.
    /// Must be at least one.
    pub n_init: usize,
    /// Upper bound on iterations per run.
    pub max_iterations: usize,
    /// A run stops once no centroid moves further than this (in degrees).
    pub tolerance: f64,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_init: DEFAULT_N_INIT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Assigns every distinct stop to exactly one of `vehicle_count` clusters.
///
/// The result has `vehicle_count` entries; an entry may be empty. Stops keep
/// their input order inside a cluster. Exact duplicates (same identifier and
/// coordinates) are collapsed first.
pub fn partition(
    stops: &[Stop],
    vehicle_count: usize,
    options: &PartitionOptions,
) -> Result<Vec<Vec<Stop>>, PlanError> {
    let distinct = dedupe_stops(stops);

    if vehicle_count == 0 || distinct.len() < vehicle_count {
        tracing::warn!(
            stops = distinct.len(),
            vehicles = vehicle_count,
            "not enough stops for clustering"
        );
        return Err(PlanError::InsufficientStops {
            stops: distinct.len(),
            vehicles: vehicle_count,
        });
    }

    let labels = cluster_labels(&distinct, vehicle_count, options)?;

    let mut clusters: Vec<Vec<Stop>> = vec![Vec::new(); vehicle_count];
    for (stop, label) in distinct.into_iter().zip(labels) {
        clusters[label].push(stop.clone());
    }

    for (vehicle, cluster) in clusters.iter().enumerate() {
        if cluster.is_empty() {
            tracing::debug!(vehicle, "cluster ended up empty");
        }
    }

    Ok(clusters)
}

fn dedupe_stops(stops: &[Stop]) -> Vec<&Stop> {
    let mut seen = HashSet::new();
    stops.iter().filter(|stop| seen.insert(stop.key())).collect()
}

/// One cluster label per stop.
///
/// k-means runs over the distinct coordinates only. When there are no more
/// distinct coordinates than clusters, each coordinate gets its own cluster
/// in first-seen order and the remaining clusters stay empty.
fn cluster_labels(
    stops: &[&Stop],
    k: usize,
    options: &PartitionOptions,
) -> Result<Vec<usize>, PlanError> {
    let mut coordinate_index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut coords: Vec<(f64, f64)> = Vec::new();
    let slots: Vec<usize> = stops
        .iter()
        .map(|stop| {
            *coordinate_index.entry(stop.point.bits()).or_insert_with(|| {
                coords.push(stop.point.coords());
                coords.len() - 1
            })
        })
        .collect();

    let coordinate_labels: Vec<usize> = if coords.len() <= k {
        (0..coords.len()).collect()
    } else {
        kmeans(&coords, k, options)?
    };

    Ok(slots.into_iter().map(|slot| coordinate_labels[slot]).collect())
}

/// Best-of-`n_init` k-means++ fit; returns one label per coordinate.
fn kmeans(
    coords: &[(f64, f64)],
    k: usize,
    options: &PartitionOptions,
) -> Result<Vec<usize>, PlanError> {
    let observations = Array2::from_shape_fn((coords.len(), 2), |(row, column)| {
        let (lat, lng) = coords[row];
        if column == 0 { lat } else { lng }
    });
    let dataset = DatasetBase::from(observations);

    let rng = ChaCha8Rng::seed_from_u64(options.seed);
    let model = KMeans::params_with_rng(k, rng)
        .n_runs(options.n_init)
        .max_n_iterations(options.max_iterations as u64)
        .tolerance(options.tolerance)
        .fit(&dataset)
        .map_err(|err| PlanError::Clustering(err.to_string()))?;

    let labels = model.predict(dataset.records());
    tracing::debug!(clusters = k, points = coords.len(), "k-means fitted");

    Ok(labels.to_vec())
}
