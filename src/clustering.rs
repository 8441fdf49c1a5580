//! Proximity clustering of stop and deceleration events.
//!
//! A vehicle waiting at a light drifts a few metres between GPS fixes, and the
//! same light is often hit more than once on a trip. Both cases should count as
//! one event, so each event is recorded against an ordered set of
//! representative coordinates:
//!
//! 1. exact hit on an existing representative: that cluster is incremented
//! 2. otherwise the first representative within `radius_km` (insertion order)
//!    is incremented
//! 3. otherwise the coordinate becomes a new representative
//!
//! Representatives are never moved or reassigned, so clusters stay disjoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo_utils::geodesic_distance_km;
use crate::GpsPoint;

/// Default merge radius in kilometres.
pub const DEFAULT_CLUSTER_RADIUS_KM: f64 = 0.1;

/// Axis order used for the proximity test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// Latitude and longitude in their proper roles.
    #[default]
    LatLon,
    /// Longitude read as latitude and vice versa, matching trip data scored
    /// by older tooling. Only affects the proximity test, never the geofence
    /// or distance accumulation.
    SwappedLegacy,
}

/// Configuration for event clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Merge radius in kilometres. Default: 0.1
    pub radius_km: f64,
    /// Axis order for the proximity test. Default: `LatLon`
    pub axis_order: AxisOrder,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_CLUSTER_RADIUS_KM,
            axis_order: AxisOrder::LatLon,
        }
    }
}

/// Outcome of recording one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterHit {
    /// A new cluster was created at this index.
    Created(usize),
    /// The coordinate is exactly an existing representative.
    Exact(usize),
    /// The coordinate was merged into a nearby cluster.
    Merged(usize),
}

impl ClusterHit {
    pub fn index(&self) -> usize {
        match *self {
            ClusterHit::Created(i) | ClusterHit::Exact(i) | ClusterHit::Merged(i) => i,
        }
    }
}

#[derive(Debug, Clone)]
struct EventCluster {
    representative: GpsPoint,
    count: u32,
}

/// Ordered map from representative coordinate to occurrence counter.
#[derive(Debug, Clone)]
pub struct EventClusters {
    config: ClusterConfig,
    clusters: Vec<EventCluster>,
    /// Bit-pattern index for the exact tier.
    exact: HashMap<(u64, u64), usize>,
}

#[inline]
fn exact_key(p: &GpsPoint) -> (u64, u64) {
    (p.latitude.to_bits(), p.longitude.to_bits())
}

impl EventClusters {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            clusters: Vec::new(),
            exact: HashMap::new(),
        }
    }

    /// Distance used for the proximity test, honouring the configured axis order.
    fn proximity_km(&self, a: &GpsPoint, b: &GpsPoint) -> f64 {
        match self.config.axis_order {
            AxisOrder::LatLon => geodesic_distance_km(a, b),
            AxisOrder::SwappedLegacy => {
                let a = GpsPoint::new(a.longitude, a.latitude);
                let b = GpsPoint::new(b.longitude, b.latitude);
                geodesic_distance_km(&a, &b)
            }
        }
    }

    /// Index of the first representative within the merge radius, in
    /// insertion order.
    pub fn find_nearby(&self, point: &GpsPoint) -> Option<usize> {
        self.clusters
            .iter()
            .position(|c| self.proximity_km(point, &c.representative) <= self.config.radius_km)
    }

    /// Record one event at `point`.
    pub fn record(&mut self, point: GpsPoint) -> ClusterHit {
        if let Some(&idx) = self.exact.get(&exact_key(&point)) {
            self.clusters[idx].count += 1;
            return ClusterHit::Exact(idx);
        }

        if let Some(idx) = self.find_nearby(&point) {
            self.clusters[idx].count += 1;
            return ClusterHit::Merged(idx);
        }

        let idx = self.clusters.len();
        self.clusters.push(EventCluster {
            representative: point,
            count: 1,
        });
        self.exact.insert(exact_key(&point), idx);
        ClusterHit::Created(idx)
    }

    /// Number of distinct clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Occurrence counter of the cluster at `index`.
    pub fn count_at(&self, index: usize) -> Option<u32> {
        self.clusters.get(index).map(|c| c.count)
    }

    /// Representatives and counters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (GpsPoint, u32)> + '_ {
        self.clusters.iter().map(|c| (c.representative, c.count))
    }
}

impl Default for EventClusters {
    fn default() -> Self {
        Self::new(ClusterConfig::default())
    }
}
