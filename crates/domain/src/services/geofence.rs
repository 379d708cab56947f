//! Geofence validation.
//!
//! Pure decision function: given a submitted point and its accuracy radius,
//! decide whether it lies within a class's circular boundary. Persisting
//! accepted or rejected attempts is the caller's job.

use geo::{point, HaversineDistance};
use thiserror::Error;

use crate::models::subject_class::ClassBoundary;

/// Policy knobs for geofence validation.
#[derive(Debug, Clone, Copy)]
pub struct GeofencePolicy {
    /// Readings with a larger accuracy radius than this cannot be judged.
    pub max_accuracy_m: f64,
    /// Fixed slack beyond the boundary radius to absorb GPS noise.
    pub tolerance_m: f64,
}

impl Default for GeofencePolicy {
    fn default() -> Self {
        Self {
            max_accuracy_m: 100.0,
            tolerance_m: 10.0,
        }
    }
}

/// Outcome of a geofence evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeofenceDecision {
    Inside,
    Outside { distance_meters: f64 },
}

impl GeofenceDecision {
    pub fn is_inside(&self) -> bool {
        matches!(self, GeofenceDecision::Inside)
    }
}

/// Error cases where no in/out decision can be made.
#[derive(Debug, Error)]
pub enum GeofenceError {
    #[error("Location accuracy {accuracy_m}m exceeds the maximum of {max_m}m")]
    ImpreciseLocation { accuracy_m: f64, max_m: f64 },

    #[error("Accuracy must be non-negative")]
    NegativeAccuracy,
}

/// Evaluates a submitted point against a class boundary.
///
/// The point is accepted when the haversine distance to the boundary center,
/// reduced by the reported accuracy, falls within the boundary radius plus
/// the configured tolerance. An accuracy of zero means an exact fix.
pub fn evaluate(
    boundary: &ClassBoundary,
    latitude: f64,
    longitude: f64,
    accuracy_m: f64,
    policy: &GeofencePolicy,
) -> Result<GeofenceDecision, GeofenceError> {
    if accuracy_m < 0.0 {
        return Err(GeofenceError::NegativeAccuracy);
    }
    if accuracy_m > policy.max_accuracy_m {
        return Err(GeofenceError::ImpreciseLocation {
            accuracy_m,
            max_m: policy.max_accuracy_m,
        });
    }

    let submitted = point!(x: longitude, y: latitude);
    let center = point!(x: boundary.longitude, y: boundary.latitude);
    let distance_meters = submitted.haversine_distance(&center);

    let allowed = boundary.radius_meters as f64 + accuracy_m + policy.tolerance_m;
    if distance_meters <= allowed {
        Ok(GeofenceDecision::Inside)
    } else {
        Ok(GeofenceDecision::Outside { distance_meters })
    }
}
