//! Tests for stop/deceleration event clustering

use route_scorer::clustering::DEFAULT_CLUSTER_RADIUS_KM;
use route_scorer::geo_utils::geodesic_distance_km;
use route_scorer::{AxisOrder, ClusterConfig, ClusterHit, EventClusters, GpsPoint};

#[test]
fn test_two_points_within_radius_make_one_cluster() {
    let mut clusters = EventClusters::default();
    let a = GpsPoint::new(43.1500, -77.6000);
    let b = GpsPoint::new(43.1504, -77.6003);
    assert!(geodesic_distance_km(&a, &b) < DEFAULT_CLUSTER_RADIUS_KM);

    assert_eq!(clusters.record(a), ClusterHit::Created(0));
    assert_eq!(clusters.record(b), ClusterHit::Merged(0));
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters.count_at(0), Some(2));
}

#[test]
fn test_two_points_beyond_radius_make_two_clusters() {
    let mut clusters = EventClusters::default();
    let a = GpsPoint::new(43.1500, -77.6000);
    let b = GpsPoint::new(43.1520, -77.6000);
    assert!(geodesic_distance_km(&a, &b) > DEFAULT_CLUSTER_RADIUS_KM);

    clusters.record(a);
    clusters.record(b);
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters.count_at(0), Some(1));
    assert_eq!(clusters.count_at(1), Some(1));
}

#[test]
fn test_find_nearby() {
    let mut clusters = EventClusters::default();
    assert_eq!(clusters.find_nearby(&GpsPoint::new(43.15, -77.60)), None);

    clusters.record(GpsPoint::new(43.15, -77.60));
    assert_eq!(clusters.find_nearby(&GpsPoint::new(43.1505, -77.60)), Some(0));
    assert_eq!(clusters.find_nearby(&GpsPoint::new(43.16, -77.60)), None);
}

#[test]
fn test_iteration_keeps_insertion_order() {
    let mut clusters = EventClusters::default();
    let points = [
        GpsPoint::new(43.30, -77.60),
        GpsPoint::new(43.10, -77.60),
        GpsPoint::new(43.20, -77.60),
    ];
    for p in points {
        clusters.record(p);
    }
    clusters.record(points[1]);

    let collected: Vec<(GpsPoint, u32)> = clusters.iter().collect();
    assert_eq!(
        collected,
        vec![(points[0], 1), (points[1], 2), (points[2], 1)]
    );
}

#[test]
fn test_zero_radius_only_merges_exact() {
    let mut clusters = EventClusters::new(ClusterConfig {
        radius_km: 0.0,
        ..ClusterConfig::default()
    });
    let a = GpsPoint::new(43.15, -77.60);
    clusters.record(a);
    assert_eq!(clusters.record(GpsPoint::new(43.15001, -77.60)), ClusterHit::Created(1));
    assert_eq!(clusters.record(a), ClusterHit::Exact(0));
}

#[test]
fn test_swapped_axis_order() {
    let config = ClusterConfig {
        axis_order: AxisOrder::SwappedLegacy,
        ..ClusterConfig::default()
    };
    let mut clusters = EventClusters::new(config);
    // 0.001 deg of longitude at 43.1N is ~81 m, but ~111 m when read as latitude
    clusters.record(GpsPoint::new(43.1, -77.600));
    assert_eq!(clusters.record(GpsPoint::new(43.1, -77.601)), ClusterHit::Created(1));
}

#[test]
fn test_cluster_config_json() {
    let config: ClusterConfig = serde_json::from_str(r#"{"axis_order": "swapped_legacy"}"#).unwrap();
    assert_eq!(config.axis_order, AxisOrder::SwappedLegacy);
    assert_eq!(config.radius_km, DEFAULT_CLUSTER_RADIUS_KM);
}
