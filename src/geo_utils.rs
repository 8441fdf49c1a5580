//! Geographic utilities: geodesic distance and geofence containment.
//!
//! Distances use the WGS-84 ellipsoid (Karney's algorithm via `geo::Geodesic`).
//! The stop/deceleration radius and the geofence radius are calibrated against
//! this model, so do not swap in a spherical approximation.

use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

use crate::GpsPoint;

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Latitude of the default geofence center (RIT parking area).
pub const DEFAULT_GEOFENCE_LATITUDE: f64 = 43.08611833333333;

/// Longitude of the default geofence center (RIT parking area).
pub const DEFAULT_GEOFENCE_LONGITUDE: f64 = -77.679955;

/// Default geofence radius in miles.
pub const DEFAULT_GEOFENCE_RADIUS_MILES: f64 = 2.0;

#[inline]
fn to_point(p: &GpsPoint) -> Point<f64> {
    Point::new(p.longitude, p.latitude)
}

/// Geodesic distance between two GPS points in meters.
#[inline]
pub fn geodesic_distance_meters(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    Geodesic::distance(to_point(p1), to_point(p2))
}

/// Geodesic distance between two GPS points in kilometres.
#[inline]
pub fn geodesic_distance_km(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    geodesic_distance_meters(p1, p2) / 1000.0
}

/// Geodesic distance between two GPS points in miles.
///
/// NaN coordinates yield NaN rather than an error.
///
/// # Example
/// ```
/// use route_scorer::GpsPoint;
/// use route_scorer::geo_utils::geodesic_distance_miles;
///
/// let a = GpsPoint::new(43.0861, -77.6800);
/// let b = GpsPoint::new(43.1566, -77.6088);
/// let miles = geodesic_distance_miles(&a, &b);
/// assert!(miles > 5.0 && miles < 7.0);
/// ```
#[inline]
pub fn geodesic_distance_miles(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    geodesic_distance_meters(p1, p2) / METERS_PER_MILE
}

/// Total geodesic length of a polyline in miles.
pub fn polyline_length_miles(points: &[GpsPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| geodesic_distance_miles(&w[0], &w[1]))
        .sum()
}

/// Circular exclusion zone. Position deltas that start inside it are not
/// counted as travel distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub center: GpsPoint,
    pub radius_miles: f64,
}

impl Geofence {
    pub fn new(center: GpsPoint, radius_miles: f64) -> Self {
        Self {
            center,
            radius_miles,
        }
    }

    /// True iff `distance(center, point) <= radius_miles`.
    ///
    /// A NaN distance compares false, so invalid points count as outside.
    pub fn contains(&self, point: &GpsPoint) -> bool {
        geodesic_distance_miles(&self.center, point) <= self.radius_miles
    }
}

impl Default for Geofence {
    fn default() -> Self {
        Self {
            center: GpsPoint::new(DEFAULT_GEOFENCE_LATITUDE, DEFAULT_GEOFENCE_LONGITUDE),
            radius_miles: DEFAULT_GEOFENCE_RADIUS_MILES,
        }
    }
}

/// Free-function form of [`Geofence::contains`].
pub fn is_within_fence(point: &GpsPoint, center: &GpsPoint, radius_miles: f64) -> bool {
    Geofence::new(*center, radius_miles).contains(point)
}
