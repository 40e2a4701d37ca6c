//! Density aggregation.
//!
//! Raw measurements (vehicles on an approach, total lane length feeding it)
//! are reduced to a density per approach, then averaged per direction pair.
//! Everything here is a pure function.

use crate::core::{Approach, DirectionPair, PairGroups};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Raw measurement of one approach for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproachMeasurement {
    /// Vehicles currently on the approach
    pub vehicle_count: u32,
    /// Total lane length of the approach
    pub total_length: f64,
}

/// Measurements for every approach on a single tick.
pub type Readings = HashMap<Approach, ApproachMeasurement>;

impl ApproachMeasurement {
    pub fn new(vehicle_count: u32, total_length: f64) -> Self {
        Self {
            vehicle_count,
            total_length,
        }
    }

    /// Combine per-lane `(vehicle_count, lane_length)` samples into a single
    /// approach measurement.
    ///
    /// Counts and lengths are summed, so an approach fed by several edges or
    /// lanes is treated as one stretch of road.
    ///
    /// ```rust
    /// use phaseplan::ApproachMeasurement;
    ///
    /// let m = ApproachMeasurement::from_lanes([(3, 100.0), (1, 100.0)]);
    /// assert_eq!(m.vehicle_count, 4);
    /// assert_eq!(m.density(), 0.02);
    /// ```
    pub fn from_lanes(lanes: impl IntoIterator<Item = (u32, f64)>) -> Self {
        lanes
            .into_iter()
            .fold(Self::default(), |acc, (count, length)| Self {
                vehicle_count: acc.vehicle_count.saturating_add(count),
                total_length: acc.total_length + length,
            })
    }

    pub fn density(&self) -> f64 {
        compute_approach_density(self.vehicle_count, self.total_length)
    }
}

/// Vehicles per unit length.
///
/// An approach without a usable length (zero, negative, NaN, or so small the
/// quotient overflows) reports no congestion: the result is `0.0`, never NaN
/// or infinity.
pub fn compute_approach_density(vehicle_count: u32, total_length: f64) -> f64 {
    if total_length <= 0.0 || total_length.is_nan() {
        return 0.0;
    }
    let density = f64::from(vehicle_count) / total_length;
    if density.is_finite() {
        density
    } else {
        0.0
    }
}

/// Arithmetic mean of the densities of `pair`.
///
/// # Panics
///
/// Pair membership is fixed configuration, so an empty pair or a member with
/// no entry in `readings` is a programming error and panics.
pub fn compute_pair_density(readings: &HashMap<Approach, f64>, pair: &BTreeSet<Approach>) -> f64 {
    assert!(!pair.is_empty(), "direction pair has no approaches");
    let total: f64 = pair
        .iter()
        .map(|approach| match readings.get(approach) {
            Some(density) => *density,
            None => panic!("no density for approach {approach} in pair"),
        })
        .sum();
    total / pair.len() as f64
}

/// Average density of both direction pairs on one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairDensities {
    pub a: f64,
    pub b: f64,
}

impl PairDensities {
    /// Reduce raw readings to per-pair densities.
    ///
    /// Every approach in `groups` must be present in `readings`; callers
    /// check this before aggregating.
    pub fn from_readings(readings: &Readings, groups: &PairGroups) -> Self {
        let densities = approach_densities(readings);
        Self {
            a: compute_pair_density(&densities, groups.members(DirectionPair::A)),
            b: compute_pair_density(&densities, groups.members(DirectionPair::B)),
        }
    }

    pub fn of(&self, pair: DirectionPair) -> f64 {
        match pair {
            DirectionPair::A => self.a,
            DirectionPair::B => self.b,
        }
    }
}

/// Density of every measured approach.
pub fn approach_densities(readings: &Readings) -> HashMap<Approach, f64> {
    readings
        .iter()
        .map(|(approach, measurement)| (*approach, measurement.density()))
        .collect()
}
